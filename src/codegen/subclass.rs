use crate::codegen::java::{ClassName, Expr, MethodSpec, Modifier, Statement, TypeSpec};
use crate::codegen::naming;
use crate::codegen::registry::KnownModels;
use crate::codegen::validator::ValidatedClass;
use crate::schema::ClassSchema;

/// Name of the generated implementation class (`AutoValue_<Chain>` unless overridden).
pub fn implementation_name(schema: &ClassSchema) -> String {
    schema
        .implementation
        .class_name
        .clone()
        .unwrap_or_else(|| naming::implementation_type_name(schema.chain()))
}

/// Superclass of the generated implementation (`$AutoValue_<Chain>` unless overridden).
pub fn superclass_name(schema: &ClassSchema) -> String {
    schema
        .implementation
        .extends
        .clone()
        .unwrap_or_else(|| naming::extended_implementation_type_name(schema.chain()))
}

/// Build the implementation subclass carrying the model -> record method.
///
/// The constructor forwards every property to the superclass in declaration order and is left
/// out entirely for classes without properties.
pub fn synthesize(
    class: &ValidatedClass<'_>,
    known: &KnownModels,
    to_storage: MethodSpec,
) -> TypeSpec {
    let schema = class.schema;
    let finality = if schema.implementation.is_final.unwrap_or(true) {
        Modifier::Final
    } else {
        Modifier::Abstract
    };

    let mut subclass = TypeSpec::class(implementation_name(schema))
        .modifiers([finality])
        .superclass(ClassName::new(schema.package.clone(), superclass_name(schema)).into());

    if !class.properties.is_empty() {
        let constructor = class.properties.iter().fold(
            MethodSpec::constructor(),
            |constructor, property| {
                constructor.parameter(
                    known.type_name(&property.schema.declared_type),
                    &property.schema.name,
                )
            },
        );
        let forwarded = class
            .properties
            .iter()
            .map(|p| Expr::name(&p.schema.name))
            .collect();
        subclass = subclass.method(constructor.statement(Statement::Super(forwarded)));
    }

    subclass.method(to_storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::java::TypeName;
    use crate::codegen::validator::validate;
    use crate::schema::{ImplementationTarget, PrimitiveKind, PropertySchema, TypeDescriptor};

    fn to_storage() -> MethodSpec {
        MethodSpec::method("toRealmObject")
    }

    #[test]
    fn test_default_names_and_constructor() {
        let schema = ClassSchema::builder()
            .package("test")
            .enclosing(vec!["Outer".to_string()])
            .simple_name("Inner")
            .trigger(Some("toRealmObject".to_string()))
            .properties(vec![
                PropertySchema::new("getId", TypeDescriptor::Primitive(PrimitiveKind::Long)),
                PropertySchema::new("getName", TypeDescriptor::declared("java.lang.String")),
            ])
            .build();
        let known = KnownModels::discover([&schema], std::iter::empty::<&str>());
        let class = validate(&schema, &known).unwrap();
        let subclass = synthesize(&class, &known, to_storage());

        assert_eq!(subclass.name, "AutoValue_Outer_Inner");
        assert_eq!(subclass.modifiers, vec![Modifier::Final]);
        assert_eq!(
            subclass.superclass,
            Some(ClassName::new("test", "$AutoValue_Outer_Inner").into())
        );

        let constructor = subclass.constructor().unwrap();
        assert!(constructor.modifiers.is_empty());
        assert_eq!(
            constructor.parameters[0].ty,
            TypeName::Primitive(PrimitiveKind::Long)
        );
        assert_eq!(constructor.parameters[1].name, "name");
        assert_eq!(
            constructor.body,
            vec![Statement::Super(vec![Expr::name("id"), Expr::name("name")])]
        );
        assert_eq!(subclass.methods.len(), 2);
    }

    #[test]
    fn test_overrides_and_no_constructor() {
        let schema = ClassSchema::builder()
            .package("test")
            .simple_name("Empty")
            .trigger(Some("toRealmObject".to_string()))
            .implementation(ImplementationTarget {
                class_name: Some("$AutoValue_Empty".to_string()),
                extends: Some("$$AutoValue_Empty".to_string()),
                is_final: Some(false),
            })
            .build();
        let known = KnownModels::discover([&schema], std::iter::empty::<&str>());
        let class = validate(&schema, &known).unwrap();
        let subclass = synthesize(&class, &known, to_storage());

        assert_eq!(subclass.name, "$AutoValue_Empty");
        assert_eq!(subclass.modifiers, vec![Modifier::Abstract]);
        assert!(subclass.constructor().is_none());
        assert_eq!(subclass.methods.len(), 1);
    }
}
