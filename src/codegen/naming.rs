//! Utilities for deriving the canonical names of generated types and members.
//!
//! Downstream tooling looks generated types up by these names; the prefixes and separators
//! below are fixed.

use crate::codegen::java::ClassName;
use crate::schema::{ClassSchema, TypeDescriptor};

/// Prefix of the generated storage record type
pub const STORAGE_PREFIX: &str = "$Realm";

/// Prefix of the generated model implementation type
pub const IMPLEMENTATION_PREFIX: &str = "AutoValue_";

/// Prefix of the implementation's superclass in the extension chain
pub const EXTENDED_IMPLEMENTATION_PREFIX: &str = "$AutoValue_";

fn join_chain<'a>(chain: impl IntoIterator<Item = &'a str>, separator: &str) -> String {
    chain.into_iter().fold(String::new(), |mut joined, name| {
        if !joined.is_empty() {
            joined.push_str(separator);
        }
        joined.push_str(name);
        joined
    })
}

/// Storage type name (e.g., [Test] + Inner -> $RealmTest_Inner)
pub fn storage_type_name<'a>(chain: impl IntoIterator<Item = &'a str>) -> String {
    format!("{STORAGE_PREFIX}{}", join_chain(chain, "_"))
}

/// Qualified model type name, only valid in type position (e.g., Test.Inner)
pub fn model_type_name<'a>(chain: impl IntoIterator<Item = &'a str>) -> String {
    join_chain(chain, ".")
}

/// Generated implementation type name (e.g., AutoValue_Test_Inner)
pub fn implementation_type_name<'a>(chain: impl IntoIterator<Item = &'a str>) -> String {
    format!("{IMPLEMENTATION_PREFIX}{}", join_chain(chain, "_"))
}

/// Superclass of the generated implementation (e.g., $AutoValue_Test_Inner)
pub fn extended_implementation_type_name<'a>(chain: impl IntoIterator<Item = &'a str>) -> String {
    format!("{EXTENDED_IMPLEMENTATION_PREFIX}{}", join_chain(chain, "_"))
}

/// The three canonical type names of one model class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNames {
    /// `$Realm<Chain_With_Underscores>` in the model's package
    pub storage: ClassName,
    /// `<Chain.With.Dots>` in the model's package
    pub model: ClassName,
    /// `AutoValue_<Chain_With_Underscores>` in the model's package
    pub implementation: ClassName,
}

impl ResolvedNames {
    pub fn for_class(schema: &ClassSchema) -> Self {
        Self::resolve(&schema.package, &schema.enclosing, &schema.simple_name)
    }

    pub fn resolve(package: &str, enclosing: &[String], simple_name: &str) -> Self {
        let chain = || {
            enclosing
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(simple_name))
        };

        Self {
            storage: ClassName::new(package, storage_type_name(chain())),
            model: ClassName::nested(package, enclosing.to_vec(), simple_name),
            implementation: ClassName::new(package, implementation_type_name(chain())),
        }
    }
}

/// Derive a property name from its accessor (e.g., getFooBar -> fooBar, isDone -> done).
///
/// `is` is only treated as a prefix on primitive boolean accessors.
pub fn property_name(accessor: &str, declared_type: &TypeDescriptor) -> String {
    let stripped = strip_prefix(accessor, "get").or_else(|| {
        declared_type
            .is_primitive_boolean()
            .then(|| strip_prefix(accessor, "is"))
            .flatten()
    });

    decapitalize(stripped.unwrap_or(accessor))
}

fn strip_prefix<'a>(accessor: &'a str, prefix: &str) -> Option<&'a str> {
    accessor
        .strip_prefix(prefix)
        .filter(|rest| rest.chars().next().is_some_and(char::is_uppercase))
}

/// Setter name on the storage record (e.g., name -> setName)
pub fn setter_name(property: &str) -> String {
    format!("set{}", capitalize(property))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}
