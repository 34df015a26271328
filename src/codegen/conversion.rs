//! The two conversion methods between a model and its storage record.
//!
//! `toRealmObject` lives on the generated implementation and copies every property into a fresh
//! record, `toModel` lives on the record and rebuilds the implementation through its full-arity
//! constructor. Nested models convert themselves, lists go through the static helper contract in
//! one call each.

use crate::codegen::classifier::Classification;
use crate::codegen::java::{ClassName, Expr, MethodSpec, Modifier, Statement, TypeName};
use crate::codegen::naming::{self, ResolvedNames};
use crate::codegen::validator::ValidatedClass;
use crate::config::GeneratorConfig;

/// Name of the record local inside `toRealmObject`
pub const RECORD_LOCAL: &str = "realmObject";

fn override_annotation() -> ClassName {
    ClassName::new("java.lang", "Override")
}

/// Both conversion methods of one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionMethods {
    /// Model -> record, attached to the generated implementation
    pub to_storage: MethodSpec,
    /// Record -> model, attached to the storage record
    pub to_model: MethodSpec,
}

pub fn synthesize(
    class: &ValidatedClass<'_>,
    names: &ResolvedNames,
    config: &GeneratorConfig,
) -> ConversionMethods {
    ConversionMethods {
        to_storage: to_storage_method(class, names, config),
        to_model: to_model_method(class, names, config),
    }
}

/// `@Override public final $RealmX toRealmObject()`
pub fn to_storage_method(
    class: &ValidatedClass<'_>,
    names: &ResolvedNames,
    config: &GeneratorConfig,
) -> MethodSpec {
    let record = TypeName::from(names.storage.clone());
    let mut method = MethodSpec::method(&config.to_storage_method)
        .annotate(override_annotation())
        .modifiers([Modifier::Public, Modifier::Final])
        .returns(record.clone())
        .statement(Statement::Local {
            ty: record,
            name: RECORD_LOCAL.to_string(),
            init: Expr::New {
                class: names.storage.clone(),
                args: Vec::new(),
            },
        });

    for property in &class.properties {
        let value = Expr::call(&property.schema.accessor);
        let value = match &property.classification {
            Classification::NestedModel(_) => value.invoke(&config.to_storage_method, Vec::new()),
            Classification::ModelList(_) => Expr::InvokeStatic {
                owner: config.list_helper_class(),
                method: config.models_to_records.clone(),
                args: vec![value],
            },
            _ => value,
        };

        method = method.statement(Statement::Expr(Expr::name(RECORD_LOCAL).invoke(
            naming::setter_name(&property.schema.name),
            vec![value],
        )));
    }

    method.statement(Statement::Return(Expr::name(RECORD_LOCAL)))
}

/// `@Override public final X toModel()`
pub fn to_model_method(
    class: &ValidatedClass<'_>,
    names: &ResolvedNames,
    config: &GeneratorConfig,
) -> MethodSpec {
    let args = class
        .properties
        .iter()
        .map(|property| {
            let field = Expr::name(&property.schema.name);
            match &property.classification {
                Classification::NestedModel(_) => field.invoke(&config.to_model_method, Vec::new()),
                Classification::ModelList(_) => Expr::InvokeStatic {
                    owner: config.list_helper_class(),
                    method: config.records_to_models.clone(),
                    args: vec![field],
                },
                _ => field,
            }
        })
        .collect();

    MethodSpec::method(&config.to_model_method)
        .annotate(override_annotation())
        .modifiers([Modifier::Public, Modifier::Final])
        .returns(names.model.clone().into())
        .statement(Statement::Return(Expr::New {
            class: names.implementation.clone(),
            args,
        }))
}
