//! The two-phase generation pass.
//!
//! Phase one discovers every model of the batch into an immutable [`KnownModels`] snapshot.
//! Phase two generates each applicable class independently against that snapshot: validate,
//! reject cyclic model graphs, synthesize, render, and finally hand the rendered artifacts to
//! the sink in one call. A failing class is reported once and never stops the others.

use crate::codegen::java::JavaFile;
use crate::codegen::naming::ResolvedNames;
use crate::codegen::registry::KnownModels;
use crate::codegen::validator::validate;
use crate::codegen::{conversion, storage, subclass};
use crate::config::GeneratorConfig;
use crate::error::{CodegenError, CodegenResult, Diagnostic};
use crate::schema::{ClassSchema, SchemaBatch};
use crate::sink::{Artifact, ArtifactSink};
use std::collections::BTreeSet;

/// Both declarations generated for one model class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedClass {
    /// Qualified model name
    pub model: String,
    /// The `$Realm` storage record
    pub storage: JavaFile,
    /// The `AutoValue_` implementation subclass
    pub implementation: JavaFile,
}

impl GeneratedClass {
    /// Render both declarations.
    pub fn artifacts(&self) -> Vec<Artifact> {
        [&self.storage, &self.implementation]
            .into_iter()
            .map(|file| Artifact {
                package: file.package.clone(),
                type_name: file.type_spec.name.clone(),
                source: file.to_string(),
            })
            .collect()
    }
}

/// Outcome of a generation pass.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Qualified names of the classes whose artifacts were written
    pub generated: Vec<String>,
    /// Model-marked classes without a trigger
    pub skipped: Vec<String>,
    /// One diagnostic per failed class
    pub failures: Vec<Diagnostic>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs generation passes with a fixed configuration.
///
/// # Examples
///
/// ```
/// use auto_value_realm::codegen::Generator;
/// use auto_value_realm::schema::{ClassSchema, PropertySchema, SchemaBatch, TypeDescriptor};
/// use auto_value_realm::sink::MemorySink;
///
/// let schema = ClassSchema::builder()
///     .package("com.example")
///     .simple_name("User")
///     .trigger(Some("toRealmObject".to_string()))
///     .properties(vec![PropertySchema::new(
///         "getName",
///         TypeDescriptor::declared("java.lang.String"),
///     )])
///     .build();
///
/// let mut sink = MemorySink::new();
/// let report = Generator::default().run(&SchemaBatch::new(vec![schema]), &mut sink);
///
/// assert!(report.is_success());
/// assert!(sink.source("com.example.$RealmUser").is_some());
/// assert!(sink.source("com.example.AutoValue_User").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Discover every model of the batch.
    pub fn discover(&self, batch: &SchemaBatch) -> KnownModels {
        KnownModels::discover(&batch.classes, &batch.external_models)
    }

    /// Generate every applicable class of the batch into `sink`.
    pub fn run(
        &self,
        batch: &SchemaBatch,
        sink: &mut (impl ArtifactSink + ?Sized),
    ) -> GenerationReport {
        let known = self.discover(batch);
        log::debug!("Discovered {} model types", known.len());

        let mut report = GenerationReport::default();
        let mut reported_duplicates = BTreeSet::new();
        for schema in &batch.classes {
            let qualified = schema.qualified_name();
            if known.is_duplicate(&qualified) {
                // one diagnostic for the name, no artifacts for any of its schemas
                if reported_duplicates.insert(qualified.clone()) {
                    let diagnostic = Diagnostic {
                        error: duplicate_error(&qualified),
                        class: qualified,
                    };
                    log::error!("{diagnostic}");
                    report.failures.push(diagnostic);
                }
                continue;
            }
            if !schema.is_applicable() {
                log::warn!(
                    "Skipping {qualified}: no {} accessor",
                    self.config.to_storage_method
                );
                report.skipped.push(qualified);
                continue;
            }

            let written = self
                .generate_class(schema, &known)
                .and_then(|generated| sink.write(&generated.artifacts()));
            match written {
                Ok(()) => {
                    log::info!("Generated {qualified}");
                    report.generated.push(qualified);
                }
                Err(error) => {
                    let diagnostic = Diagnostic {
                        class: qualified,
                        error,
                    };
                    log::error!("{diagnostic}");
                    report.failures.push(diagnostic);
                }
            }
        }

        log::info!(
            "Generation finished: {} generated, {} skipped, {} failed",
            report.generated.len(),
            report.skipped.len(),
            report.failures.len()
        );
        report
    }

    /// Generate both declarations of one class without writing them anywhere.
    pub fn generate_class(
        &self,
        schema: &ClassSchema,
        known: &KnownModels,
    ) -> CodegenResult<GeneratedClass> {
        let qualified = schema.qualified_name();
        if !schema.is_applicable() {
            return Err(CodegenError::Configuration(format!(
                "{qualified} declares no {} accessor",
                self.config.to_storage_method
            )));
        }
        if let Some(trigger) = &schema.trigger
            && *trigger != self.config.to_storage_method
        {
            return Err(CodegenError::Configuration(format!(
                "{qualified} uses trigger {trigger} but the generated implementation overrides {}",
                self.config.to_storage_method
            )));
        }
        if known.is_duplicate(&qualified) {
            return Err(duplicate_error(&qualified));
        }

        let class = validate(schema, known)?;
        if let Some(cycle) = known.find_cycle(&qualified) {
            return Err(CodegenError::CyclicReference {
                class: qualified,
                cycle,
            });
        }

        let names = ResolvedNames::for_class(schema);
        let methods = conversion::synthesize(&class, &names, &self.config);
        let record =
            storage::synthesize(&class, &names, known, &self.config, methods.to_model)?;
        let implementation = subclass::synthesize(&class, known, methods.to_storage);

        log::debug!(
            "Synthesized {} and {} for {qualified}",
            names.storage.simple_name(),
            implementation.name
        );

        Ok(GeneratedClass {
            model: qualified,
            storage: JavaFile::new(schema.package.clone(), record).indent(&self.config.indent),
            implementation: JavaFile::new(schema.package.clone(), implementation)
                .indent(&self.config.indent),
        })
    }
}

fn duplicate_error(qualified: &str) -> CodegenError {
    CodegenError::Configuration(format!("{qualified} is declared by more than one schema"))
}
