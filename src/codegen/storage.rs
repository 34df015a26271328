//! Storage record synthesis.
//!
//! The record mirrors the model one field per property. Scalars and primitives keep their type,
//! model references are rewritten to the referenced model's record, so a cross-package reference
//! ends up typed with the other package's `$Realm` class.

use crate::codegen::classifier::Classification;
use crate::codegen::java::{Expr, FieldSpec, MethodSpec, Modifier, Statement, TypeName, TypeSpec};
use crate::codegen::naming::{self, ResolvedNames};
use crate::codegen::registry::KnownModels;
use crate::codegen::validator::{ClassifiedProperty, ValidatedClass};
use crate::config::GeneratorConfig;
use crate::error::UnresolvedReferenceError;

/// Field type of a property on the storage record.
pub fn record_field_type(
    class: &ValidatedClass<'_>,
    property: &ClassifiedProperty<'_>,
    known: &KnownModels,
    config: &GeneratorConfig,
) -> Result<TypeName, UnresolvedReferenceError> {
    let resolve = |model: &str| {
        known
            .storage_type(model)
            .cloned()
            .ok_or_else(|| UnresolvedReferenceError {
                class: class.schema.simple_name.clone(),
                property: property.schema.name.clone(),
                type_name: model.to_string(),
            })
    };

    Ok(match &property.classification {
        Classification::NestedModel(model) => resolve(model)?.into(),
        Classification::ModelList(model) => {
            TypeName::parameterized(config.record_list_class(), vec![resolve(model)?.into()])
        }
        _ => known.type_name(&property.schema.declared_type),
    })
}

/// Build the storage record declaration, ending with its record -> model method.
pub fn synthesize(
    class: &ValidatedClass<'_>,
    names: &ResolvedNames,
    known: &KnownModels,
    config: &GeneratorConfig,
    to_model: MethodSpec,
) -> Result<TypeSpec, UnresolvedReferenceError> {
    let mut record = TypeSpec::class(names.storage.simple_name())
        .modifiers([Modifier::Public])
        .superclass(config.record_base_class().into())
        .implements(TypeName::parameterized(
            config.conversion_interface_class(),
            vec![names.model.clone().into()],
        ));

    let mut setters = Vec::with_capacity(class.properties.len());
    for property in &class.properties {
        let ty = record_field_type(class, property, known, config)?;
        let name = &property.schema.name;

        let mut field = FieldSpec::new(ty.clone(), name);
        if property.schema.primary_key {
            field = field.annotate(config.primary_key_class());
        }
        if property.schema.indexed {
            field = field.annotate(config.index_class());
        }
        record = record.field(field.modifiers([Modifier::Private]));

        setters.push(
            MethodSpec::method(naming::setter_name(name))
                .modifiers([Modifier::Public])
                .parameter(ty, name)
                .statement(Statement::Assign {
                    target: Expr::this_field(name),
                    value: Expr::name(name),
                }),
        );
    }

    let record = setters
        .into_iter()
        .fold(record, |record, setter| record.method(setter));
    Ok(record.method(to_model))
}
