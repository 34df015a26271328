//! Prelude module for convenient imports.
//!
//! ```rust
//! use auto_value_realm::prelude::*;
//! ```

pub use crate::codegen::{
    Classification, GeneratedClass, GenerationReport, Generator, KnownModels, ResolvedNames,
    classify, validate,
};
pub use crate::config::GeneratorConfig;
pub use crate::error::{
    CodegenError, CodegenResult, Diagnostic, UnresolvedReferenceError, UnsupportedPropertyError,
};
pub use crate::schema::{
    ClassSchema, ImplementationTarget, PrimitiveKind, PropertySchema, ScalarKind, SchemaBatch,
    SchemaFile, TypeDescriptor, parse_schema_file, parse_schema_str,
};
pub use crate::sink::{Artifact, ArtifactSink, DirectorySink, MemorySink};
