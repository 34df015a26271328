//! TOML schema files
//!
//! A schema file describes the model classes of one package. Files are parsed with serde into
//! the plain structures below and then elaborated into [`ClassSchema`]s.

use crate::config::GeneratorConfig;
use crate::error::{CodegenError, CodegenResult};
use crate::schema::class::{ClassSchema, ImplementationTarget, PropertySchema};
use crate::schema::types::TypeDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Root of a schema file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    /// Package of every model in the file, empty for the default package
    #[serde(default)]
    pub package: String,
    /// Qualified names of model-marked types described elsewhere
    #[serde(default)]
    pub external_models: Vec<String>,
    #[serde(default, rename = "model")]
    pub models: Vec<ModelConfig>,
}

/// One `[[model]]` table
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Enclosing classes and simple name, dot separated (e.g., `Outer.Inner`)
    pub name: String,
    pub trigger: Option<String>,
    #[serde(default)]
    pub implementation: ImplementationTarget,
    #[serde(default, rename = "property")]
    pub properties: Vec<PropertyConfig>,
}

/// One `[[model.property]]` table
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyConfig {
    pub accessor: String,
    pub r#type: String,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub indexed: bool,
}

/// Every class schema and external model name of one generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaBatch {
    pub classes: Vec<ClassSchema>,
    pub external_models: Vec<String>,
}

impl SchemaBatch {
    pub fn new(classes: Vec<ClassSchema>) -> Self {
        Self {
            classes,
            external_models: Vec::new(),
        }
    }

    pub fn with_external_models(
        mut self,
        names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.external_models.extend(names.into_iter().map(Into::into));
        self
    }

    /// Append another batch, keeping input order.
    pub fn merge(&mut self, other: SchemaBatch) {
        self.classes.extend(other.classes);
        for name in other.external_models {
            if !self.external_models.contains(&name) {
                self.external_models.push(name);
            }
        }
    }

    /// Parse and merge several schema files.
    pub fn load<P: AsRef<Path>>(
        paths: impl IntoIterator<Item = P>,
        config: &GeneratorConfig,
    ) -> CodegenResult<Self> {
        let mut batch = Self::default();
        for path in paths {
            let file = parse_schema_file(&path)?;
            let loaded = file.into_batch(config).map_err(|e| {
                CodegenError::Configuration(format!("{}: {e}", path.as_ref().display()))
            })?;
            log::debug!(
                "Loaded {} models from {}",
                loaded.classes.len(),
                path.as_ref().display()
            );
            batch.merge(loaded);
        }
        Ok(batch)
    }
}

/// Parse a schema from a TOML file
pub fn parse_schema_file<P: AsRef<Path>>(path: P) -> CodegenResult<SchemaFile> {
    let content = fs::read_to_string(&path).map_err(|e| {
        CodegenError::Configuration(format!(
            "Failed to read schema file '{}': {}",
            path.as_ref().display(),
            e
        ))
    })?;

    parse_schema_str(&content).map_err(|e| {
        CodegenError::Configuration(format!(
            "Failed to parse schema file '{}': {}",
            path.as_ref().display(),
            e
        ))
    })
}

/// Parse a schema from a TOML string
pub fn parse_schema_str(content: &str) -> CodegenResult<SchemaFile> {
    Ok(toml::from_str(content)?)
}

impl SchemaFile {
    /// Elaborate every model of the file into a class schema.
    pub fn into_batch(self, config: &GeneratorConfig) -> CodegenResult<SchemaBatch> {
        let classes = self
            .models
            .into_iter()
            .map(|model| model.into_class_schema(&self.package, config))
            .collect::<CodegenResult<Vec<_>>>()?;

        Ok(SchemaBatch {
            classes,
            external_models: self.external_models,
        })
    }
}

impl ModelConfig {
    fn into_class_schema(
        self,
        package: &str,
        config: &GeneratorConfig,
    ) -> CodegenResult<ClassSchema> {
        let mut chain: Vec<String> = self.name.split('.').map(str::to_string).collect();
        if chain.iter().any(String::is_empty) {
            return Err(CodegenError::Configuration(format!(
                "Invalid model name '{}'",
                self.name
            )));
        }
        let simple_name = chain.pop().unwrap_or_default();

        let mut seen = BTreeSet::new();
        let mut properties = Vec::with_capacity(self.properties.len());
        for property in self.properties {
            let declared_type: TypeDescriptor = property.r#type.parse()?;
            let schema = PropertySchema::new(property.accessor, declared_type)
                .primary_key(property.primary_key)
                .indexed(property.indexed);
            if !seen.insert(schema.name.clone()) {
                return Err(CodegenError::Configuration(format!(
                    "Model '{}' declares property '{}' more than once",
                    self.name, schema.name
                )));
            }
            properties.push(schema);
        }

        let trigger = self.trigger.or_else(|| {
            properties
                .iter()
                .any(|p| p.accessor == config.to_storage_method)
                .then(|| config.to_storage_method.clone())
        });

        Ok(ClassSchema::builder()
            .package(package)
            .enclosing(chain)
            .simple_name(simple_name)
            .trigger(trigger)
            .properties(properties)
            .implementation(self.implementation)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::PrimitiveKind;

    const SCHEMA: &str = r#"
package = "com.example"
external_models = ["com.other.Legacy"]

[[model]]
name = "Outer.Inner"

[[model.property]]
accessor = "getId"
type = "long"
primary_key = true
indexed = true

[[model.property]]
accessor = "isActive"
type = "boolean"

[[model.property]]
accessor = "toRealmObject"
type = "com.example.$RealmOuter_Inner"

[[model]]
name = "Plain"
"#;

    #[test]
    fn test_parse_and_elaborate() {
        let batch = parse_schema_str(SCHEMA)
            .unwrap()
            .into_batch(&GeneratorConfig::default())
            .unwrap();

        assert_eq!(batch.external_models, vec!["com.other.Legacy".to_string()]);
        assert_eq!(batch.classes.len(), 2);

        let inner = &batch.classes[0];
        assert_eq!(inner.qualified_name(), "com.example.Outer.Inner");
        assert_eq!(inner.trigger.as_deref(), Some("toRealmObject"));
        assert_eq!(inner.properties[0].name, "id");
        assert!(inner.properties[0].primary_key && inner.properties[0].indexed);
        assert_eq!(inner.properties[1].name, "active");
        assert_eq!(
            inner.properties[1].declared_type,
            TypeDescriptor::Primitive(PrimitiveKind::Boolean)
        );

        assert!(!batch.classes[1].is_applicable());
    }

    #[test]
    fn test_duplicate_property_names() {
        let text = r#"
[[model]]
name = "Test"
trigger = "toRealmObject"

[[model.property]]
accessor = "getName"
type = "java.lang.String"

[[model.property]]
accessor = "name"
type = "java.lang.String"
"#;
        let error = parse_schema_str(text)
            .unwrap()
            .into_batch(&GeneratorConfig::default())
            .unwrap_err();
        assert!(matches!(error, CodegenError::Configuration(ref m) if m.contains("'name'")));
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            parse_schema_str("[[model]]\nname = 1\n"),
            Err(CodegenError::TomlDeError(_))
        ));

        let bad_type = "[[model]]\nname = \"T\"\n[[model.property]]\naccessor = \"a\"\ntype = \"List<\"\n";
        assert!(matches!(
            parse_schema_str(bad_type)
                .unwrap()
                .into_batch(&GeneratorConfig::default()),
            Err(CodegenError::InvalidType { .. })
        ));

        let bad_name = "[[model]]\nname = \"Outer..Inner\"\n";
        assert!(
            parse_schema_str(bad_name)
                .unwrap()
                .into_batch(&GeneratorConfig::default())
                .is_err()
        );
    }

    #[test]
    fn test_merge_dedups_external_models() {
        let mut batch = SchemaBatch::default().with_external_models(["a.A"]);
        batch.merge(SchemaBatch::default().with_external_models(["a.A", "b.B"]));
        assert_eq!(batch.external_models, vec!["a.A".to_string(), "b.B".to_string()]);
    }
}
