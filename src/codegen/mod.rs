//! Schema analysis and Java code synthesis.
//!
//! The engine turns validated [`ClassSchema`](crate::schema::ClassSchema)s into two
//! declarations per model: the `$Realm` storage record and the `AutoValue_` implementation
//! subclass, linked by a pair of conversion methods.

pub mod classifier;
pub mod conversion;
pub mod generator;
pub mod java;
pub mod naming;
pub mod registry;
pub mod storage;
pub mod subclass;
pub mod validator;

pub use classifier::{Classification, classify};
pub use generator::{GeneratedClass, GenerationReport, Generator};
pub use naming::ResolvedNames;
pub use registry::{KnownModel, KnownModels};
pub use validator::{ClassifiedProperty, ValidatedClass, validate};
