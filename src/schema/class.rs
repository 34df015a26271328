//! Elaborated class and property schemas.
//!
//! A [`ClassSchema`] is built fresh for every generation pass and is read-only input to the
//! synthesizers. The enclosing chain is stored as an explicit, outermost-first list so every name
//! derivation is a fold over it rather than a walk of enclosing elements.

use crate::codegen::naming;
use crate::schema::types::TypeDescriptor;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// One model property, identified by its accessor method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySchema {
    /// Property name derived from the accessor (`getFoo` -> `foo`)
    pub name: String,
    /// Accessor method name on the model type
    pub accessor: String,
    pub declared_type: TypeDescriptor,
    pub primary_key: bool,
    pub indexed: bool,
}

impl PropertySchema {
    pub fn new(accessor: impl Into<String>, declared_type: TypeDescriptor) -> Self {
        let accessor = accessor.into();
        Self {
            name: naming::property_name(&accessor, &declared_type),
            accessor,
            declared_type,
            primary_key: false,
            indexed: false,
        }
    }

    pub fn primary_key(mut self, primary_key: bool) -> Self {
        self.primary_key = primary_key;
        self
    }

    pub fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }
}

/// Overrides for the generated implementation subclass.
///
/// Unset fields fall back to `AutoValue_<Chain>` extending `$AutoValue_<Chain>`, final.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationTarget {
    pub class_name: Option<String>,
    pub extends: Option<String>,
    #[serde(rename = "final")]
    pub is_final: Option<bool>,
}

/// A model-marked class discovered by the host.
///
/// # Examples
///
/// ```
/// use auto_value_realm::schema::{ClassSchema, PropertySchema, TypeDescriptor};
///
/// let schema = ClassSchema::builder()
///     .package("test")
///     .enclosing(vec!["Outer".to_string()])
///     .simple_name("Inner")
///     .trigger(Some("toRealmObject".to_string()))
///     .properties(vec![PropertySchema::new(
///         "getName",
///         TypeDescriptor::declared("java.lang.String"),
///     )])
///     .build();
///
/// assert_eq!(schema.qualified_name(), "test.Outer.Inner");
/// assert_eq!(schema.properties[0].name, "name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct ClassSchema {
    #[builder(setter(into))]
    pub package: String,

    /// Enclosing class names, outermost first
    #[builder(default)]
    pub enclosing: Vec<String>,

    #[builder(setter(into))]
    pub simple_name: String,

    /// Accessor that requests generation; `None` means the class is only model-marked
    #[builder(default)]
    pub trigger: Option<String>,

    /// Properties in declaration order
    #[builder(default)]
    pub properties: Vec<PropertySchema>,

    #[builder(default)]
    pub implementation: ImplementationTarget,
}

impl ClassSchema {
    /// Enclosing classes followed by the simple name.
    pub fn chain(&self) -> impl Iterator<Item = &str> {
        self.enclosing
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.simple_name.as_str()))
    }

    /// `package.Outer.Inner`, or `Outer.Inner` in the default package.
    pub fn qualified_name(&self) -> String {
        let model = naming::model_type_name(self.chain());
        if self.package.is_empty() {
            model
        } else {
            format!("{}.{}", self.package, model)
        }
    }

    pub fn is_applicable(&self) -> bool {
        self.trigger.is_some()
    }

    pub fn is_trigger(&self, property: &PropertySchema) -> bool {
        self.trigger.as_deref() == Some(property.accessor.as_str())
    }

    /// Properties that take part in generation, in declaration order.
    pub fn generated_properties(&self) -> impl Iterator<Item = &PropertySchema> {
        self.properties.iter().filter(|p| !self.is_trigger(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::PrimitiveKind;

    fn sample() -> ClassSchema {
        ClassSchema::builder()
            .package("")
            .simple_name("Test")
            .trigger(Some("toRealmObject".to_string()))
            .properties(vec![
                PropertySchema::new("getName", TypeDescriptor::declared("java.lang.String")),
                PropertySchema::new(
                    "toRealmObject",
                    TypeDescriptor::declared("$RealmTest"),
                ),
                PropertySchema::new("count", TypeDescriptor::Primitive(PrimitiveKind::Int)),
            ])
            .build()
    }

    #[test]
    fn test_default_package_qualified_name() {
        assert_eq!(sample().qualified_name(), "Test");
    }

    #[test]
    fn test_trigger_is_excluded() {
        let schema = sample();
        let names: Vec<&str> = schema
            .generated_properties()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["name", "count"]);
        assert!(schema.is_applicable());
    }

    #[test]
    fn test_markers_default_off() {
        let property = PropertySchema::new("getId", TypeDescriptor::declared("java.lang.Long"))
            .primary_key(true);
        assert!(property.primary_key);
        assert!(!property.indexed);
    }
}
