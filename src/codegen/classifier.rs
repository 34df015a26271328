//! Property type classification.
//!
//! Every property is classified exactly once, during validation, and the resulting
//! [`Classification`] is carried with the property through both synthesizers.

use crate::codegen::registry::KnownModels;
use crate::schema::{PrimitiveKind, ScalarKind, TypeDescriptor};
use std::fmt;

/// The ordered-sequence type a list of models must be declared as.
pub const LIST_TYPE: &str = "java.util.List";

/// How a property's declared type is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A language primitive, stored as-is
    Primitive(PrimitiveKind),
    /// A member of the closed scalar set, stored as-is
    Scalar(ScalarKind),
    /// A reference to another model, stored as that model's record
    NestedModel(String),
    /// A list of models, stored as a list of records
    ModelList(String),
    Unsupported,
}

impl Classification {
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Qualified name of the referenced model, for nested and list references.
    pub fn referenced_model(&self) -> Option<&str> {
        match self {
            Self::NestedModel(name) | Self::ModelList(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "primitive {kind}"),
            Self::Scalar(kind) => write!(f, "scalar {kind}"),
            Self::NestedModel(name) => write!(f, "nested model {name}"),
            Self::ModelList(name) => write!(f, "list of model {name}"),
            Self::Unsupported => f.write_str("unsupported"),
        }
    }
}

/// Classify a declared type against the models known to the pass.
pub fn classify(ty: &TypeDescriptor, known: &KnownModels) -> Classification {
    if let TypeDescriptor::Primitive(kind) = ty {
        return Classification::Primitive(*kind);
    }
    if let Some(kind) = ScalarKind::from_descriptor(ty) {
        return Classification::Scalar(kind);
    }

    match ty {
        TypeDescriptor::Declared { name, args } if args.is_empty() && known.is_model(name) => {
            Classification::NestedModel(name.clone())
        }
        TypeDescriptor::Declared { name, args } if name == LIST_TYPE => match args.as_slice() {
            [TypeDescriptor::Declared { name, args }] if args.is_empty() && known.is_model(name) => {
                Classification::ModelList(name.clone())
            }
            _ => Classification::Unsupported,
        },
        _ => Classification::Unsupported,
    }
}
