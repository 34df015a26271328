//! Error types for schema analysis and code generation.
//!
//! Every fallible operation in this crate returns `CodegenResult<T>`, an alias for
//! `Result<T, CodegenError>`. The two schema-level failures a generation pass can hit are
//! modelled as their own types so hosts can match on them:
//!
//! - [`UnsupportedPropertyError`]: a property's type is outside the supported set.
//! - [`UnresolvedReferenceError`]: a model reference names a type with no storage record.
//!
//! # Example
//!
//! ```
//! use auto_value_realm::error::UnsupportedPropertyError;
//!
//! let error = UnsupportedPropertyError {
//!     class: "Test".to_string(),
//!     property: "foo".to_string(),
//!     type_name: "java.lang.Object".to_string(),
//! };
//! assert_eq!(
//!     error.to_string(),
//!     "Test.foo is of a non supported type: java.lang.Object"
//! );
//! ```

use derive_more::Display;
use thiserror::Error;

/// Result type alias for code generation operations.
pub type CodegenResult<T> = Result<T, CodegenError>;

/// The main error type of the generator.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// A property's declared type cannot be stored
    #[error(transparent)]
    UnsupportedProperty(#[from] UnsupportedPropertyError),

    /// A nested or list reference names a type that has no generated storage record
    #[error(transparent)]
    UnresolvedReference(#[from] UnresolvedReferenceError),

    /// The class reaches a cycle of model references
    #[error("{class} is part of a cyclic model graph: {}", cycle.join(" -> "))]
    CyclicReference { class: String, cycle: Vec<String> },

    /// Type text that could not be parsed into a descriptor
    #[error("Invalid type '{text}': {reason}")]
    InvalidType { text: String, reason: String },

    /// Malformed schema or generator configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O error while reading schemas or writing artifacts
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
}

/// Raised by the schema validator on the first property of an unsupported type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{class}.{property} is of a non supported type: {type_name}")]
pub struct UnsupportedPropertyError {
    /// Simple name of the owning class
    pub class: String,
    /// Property name derived from the accessor
    pub property: String,
    /// Fully qualified name of the offending type
    pub type_name: String,
}

/// Raised by the storage-record synthesizer when a referenced model is unknown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "{class}.{property} references {type_name}, which has no generated storage record in this pass"
)]
pub struct UnresolvedReferenceError {
    pub class: String,
    pub property: String,
    pub type_name: String,
}

/// A failure reported once for a class whose generation was aborted.
#[derive(Debug, Display)]
#[display("{class}: {error}")]
pub struct Diagnostic {
    /// Fully qualified model name of the failed class
    pub class: String,
    pub error: CodegenError,
}
