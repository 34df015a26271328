//! Input model of the generator: type descriptors, class schemas and schema files.

pub mod class;
pub mod file;
pub mod types;

pub use class::{ClassSchema, ImplementationTarget, PropertySchema};
pub use file::{SchemaBatch, SchemaFile, parse_schema_file, parse_schema_str};
pub use types::{PrimitiveKind, ScalarKind, TypeDescriptor};
