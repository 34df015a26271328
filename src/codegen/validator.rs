use crate::codegen::classifier::{Classification, classify};
use crate::codegen::registry::KnownModels;
use crate::error::UnsupportedPropertyError;
use crate::schema::{ClassSchema, PropertySchema};

/// A property together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedProperty<'a> {
    pub schema: &'a PropertySchema,
    pub classification: Classification,
}

/// A class whose every generated property has a supported type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedClass<'a> {
    pub schema: &'a ClassSchema,
    /// Non-trigger properties in declaration order
    pub properties: Vec<ClassifiedProperty<'a>>,
}

impl ValidatedClass<'_> {
    /// Qualified names of the models this class references, in declaration order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter_map(|p| p.classification.referenced_model())
    }
}

/// Classify every non-trigger property, failing on the first unsupported one.
pub fn validate<'a>(
    schema: &'a ClassSchema,
    known: &KnownModels,
) -> Result<ValidatedClass<'a>, UnsupportedPropertyError> {
    let mut properties = Vec::with_capacity(schema.properties.len());

    for property in schema.generated_properties() {
        let classification = classify(&property.declared_type, known);
        if !classification.is_supported() {
            return Err(UnsupportedPropertyError {
                class: schema.simple_name.clone(),
                property: property.name.clone(),
                type_name: property.declared_type.to_string(),
            });
        }

        log::debug!(
            "{}.{} classified as {classification}",
            schema.simple_name,
            property.name
        );
        properties.push(ClassifiedProperty {
            schema: property,
            classification,
        });
    }

    Ok(ValidatedClass { schema, properties })
}
