//! Generator configuration.
//!
//! Every option names something on the storage-engine side of the generated code (base class,
//! annotations, helper contract). The defaults target Realm and the `auto-value-realm` runtime
//! helpers; the `$Realm` and `AutoValue_` naming convention is fixed and not configurable.

use crate::codegen::java::ClassName;
use crate::error::{CodegenError, CodegenResult};
use serde::Deserialize;
use std::path::Path;
use typed_builder::TypedBuilder;

/// Configuration of a generation pass.
///
/// # Examples
///
/// ```
/// use auto_value_realm::config::GeneratorConfig;
///
/// // Create with defaults
/// let config = GeneratorConfig::default();
/// assert_eq!(config.to_storage_method, "toRealmObject");
///
/// // Customize options
/// let config = GeneratorConfig::builder()
///     .indent("    ")
///     .record_base("com.example.db.Record")
///     .build();
/// assert_eq!(config.to_model_method, "toModel");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Deserialize)]
#[builder(doc)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Trigger accessor name, also the model -> record method
    #[builder(default = "toRealmObject".to_string(), setter(into))]
    pub to_storage_method: String,

    /// Record -> model method on the storage record
    #[builder(default = "toModel".to_string(), setter(into))]
    pub to_model_method: String,

    /// Superclass of every storage record
    #[builder(default = "io.realm.RealmObject".to_string(), setter(into))]
    pub record_base: String,

    /// Mutable list type holding records
    #[builder(default = "io.realm.RealmList".to_string(), setter(into))]
    pub record_list: String,

    #[builder(default = "io.realm.annotations.PrimaryKey".to_string(), setter(into))]
    pub primary_key_annotation: String,

    #[builder(default = "io.realm.annotations.Index".to_string(), setter(into))]
    pub index_annotation: String,

    /// Conversion capability implemented by records, parameterized by the model type
    #[builder(
        default = "com.remind101.auto.value.realm.AvRealmModel".to_string(),
        setter(into)
    )]
    pub conversion_interface: String,

    /// Owner of the static list conversion helpers
    #[builder(
        default = "com.remind101.auto.value.realm.AvRealmHelper".to_string(),
        setter(into)
    )]
    pub list_helper: String,

    #[builder(default = "toRealmModels".to_string(), setter(into))]
    pub models_to_records: String,

    #[builder(default = "fromRealmModels".to_string(), setter(into))]
    pub records_to_models: String,

    /// Indentation unit of generated sources
    #[builder(default = "  ".to_string(), setter(into))]
    pub indent: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GeneratorConfig {
    /// Load a configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> CodegenResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> CodegenResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> CodegenResult<()> {
        let methods = [
            ("to_storage_method", &self.to_storage_method),
            ("to_model_method", &self.to_model_method),
            ("models_to_records", &self.models_to_records),
            ("records_to_models", &self.records_to_models),
        ];
        for (key, value) in methods {
            if value.is_empty() || value.contains('.') {
                return Err(CodegenError::Configuration(format!(
                    "{key} must be a bare method name, got '{value}'"
                )));
            }
        }
        if self.to_storage_method == self.to_model_method {
            return Err(CodegenError::Configuration(
                "to_storage_method and to_model_method must differ".to_string(),
            ));
        }
        if !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(CodegenError::Configuration(
                "indent may only contain spaces and tabs".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn record_base_class(&self) -> ClassName {
        ClassName::parse(&self.record_base)
    }

    pub(crate) fn record_list_class(&self) -> ClassName {
        ClassName::parse(&self.record_list)
    }

    pub(crate) fn primary_key_class(&self) -> ClassName {
        ClassName::parse(&self.primary_key_annotation)
    }

    pub(crate) fn index_class(&self) -> ClassName {
        ClassName::parse(&self.index_annotation)
    }

    pub(crate) fn conversion_interface_class(&self) -> ClassName {
        ClassName::parse(&self.conversion_interface)
    }

    pub(crate) fn list_helper_class(&self) -> ClassName {
        ClassName::parse(&self.list_helper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.to_storage_method, "toRealmObject");
        assert_eq!(config.to_model_method, "toModel");
        assert_eq!(config.indent, "  ");
        assert_eq!(
            config.primary_key_class(),
            ClassName::new("io.realm.annotations", "PrimaryKey")
        );
        assert_eq!(
            config.list_helper_class(),
            ClassName::new("com.remind101.auto.value.realm", "AvRealmHelper")
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            indent = "    "
            record_base = "com.example.Record"
            "#,
        )
        .unwrap();
        assert_eq!(config.indent, "    ");
        assert_eq!(config.record_base_class(), ClassName::new("com.example", "Record"));
        assert_eq!(config.record_list, "io.realm.RealmList");
    }

    #[test]
    fn test_invalid_toml_config() {
        assert!(GeneratorConfig::from_toml_str("unknown_key = 1").is_err());
        assert!(GeneratorConfig::from_toml_str("to_model_method = \"a.b\"").is_err());
        assert!(GeneratorConfig::from_toml_str("to_model_method = \"toRealmObject\"").is_err());
        assert!(GeneratorConfig::from_toml_str("indent = \"x\"").is_err());
    }
}
