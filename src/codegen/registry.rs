//! The known-model-types snapshot produced by the discovery phase.
//!
//! Discovery runs over every schema of a pass before any synthesizer does, so references are
//! resolved by name against the whole pass regardless of the order classes are generated in.
//! The snapshot is immutable once built and is passed explicitly to every consumer.

use crate::codegen::classifier::classify;
use crate::codegen::java::{ClassName, TypeName};
use crate::codegen::naming::ResolvedNames;
use crate::schema::{ClassSchema, TypeDescriptor};
use std::collections::{BTreeMap, BTreeSet};

/// A model-marked type known to the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownModel {
    /// The model type itself
    pub model: ClassName,
    /// Its storage record, when one is generated in this pass
    pub storage: Option<ClassName>,
    /// Qualified names of the models its properties reference
    pub references: Vec<String>,
}

/// Model-marked types of one pass, keyed by fully qualified model name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownModels {
    models: BTreeMap<String, KnownModel>,
    /// Qualified names declared by more than one schema of the pass
    duplicates: BTreeSet<String>,
}

impl KnownModels {
    /// Build the snapshot from every class schema of the pass plus model-marked types the host
    /// knows about without a schema.
    pub fn discover<'a, I, S>(schemas: I, external: impl IntoIterator<Item = S>) -> Self
    where
        I: IntoIterator<Item = &'a ClassSchema>,
        S: AsRef<str>,
    {
        let mut models = BTreeMap::new();

        for name in external {
            let name = name.as_ref();
            models.insert(
                name.to_string(),
                KnownModel {
                    model: ClassName::parse(name),
                    storage: None,
                    references: Vec::new(),
                },
            );
        }

        let mut declared = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        let schemas: Vec<&ClassSchema> = schemas.into_iter().collect();
        for schema in &schemas {
            let names = ResolvedNames::for_class(schema);
            let storage = schema.is_applicable().then_some(names.storage);
            let qualified = schema.qualified_name();
            log::debug!(
                "Discovered model {qualified} (storage record: {})",
                storage
                    .as_ref()
                    .map_or_else(|| "none".to_string(), ClassName::canonical_name)
            );
            if !declared.insert(qualified.clone()) {
                log::warn!("Model {qualified} is declared by more than one schema");
                duplicates.insert(qualified.clone());
            }
            models.insert(
                qualified,
                KnownModel {
                    model: names.model,
                    storage,
                    references: Vec::new(),
                },
            );
        }

        // an ambiguous model generates no record, so references to it stay unresolved
        for name in &duplicates {
            if let Some(model) = models.get_mut(name) {
                model.storage = None;
            }
        }

        // edges need the complete set of names before anything can be classified
        let mut known = Self { models, duplicates };
        let edges: Vec<(String, Vec<String>)> = schemas
            .iter()
            .map(|schema| {
                let references = schema
                    .generated_properties()
                    .filter_map(|p| {
                        classify(&p.declared_type, &known)
                            .referenced_model()
                            .map(str::to_string)
                    })
                    .collect();
                (schema.qualified_name(), references)
            })
            .collect();
        for (name, references) in edges {
            if let Some(model) = known.models.get_mut(&name) {
                model.references = references;
            }
        }

        known
    }

    /// The first reference cycle reachable from `start`, as the list of models along it with the
    /// repeated model at both ends.
    pub fn find_cycle(&self, start: &str) -> Option<Vec<String>> {
        let mut path = Vec::new();
        let mut finished = BTreeSet::new();
        self.visit(start, &mut path, &mut finished)
    }

    fn visit(
        &self,
        name: &str,
        path: &mut Vec<String>,
        finished: &mut BTreeSet<String>,
    ) -> Option<Vec<String>> {
        if let Some(position) = path.iter().position(|n| n == name) {
            let mut cycle = path[position..].to_vec();
            cycle.push(name.to_string());
            return Some(cycle);
        }
        if finished.contains(name) {
            return None;
        }

        path.push(name.to_string());
        if let Some(model) = self.models.get(name) {
            for next in &model.references {
                if let Some(cycle) = self.visit(next, path, finished) {
                    return Some(cycle);
                }
            }
        }
        path.pop();
        finished.insert(name.to_string());
        None
    }

    /// Whether more than one schema of the pass declares `qualified`.
    pub fn is_duplicate(&self, qualified: &str) -> bool {
        self.duplicates.contains(qualified)
    }

    pub fn is_model(&self, qualified: &str) -> bool {
        self.models.contains_key(qualified)
    }

    pub fn get(&self, qualified: &str) -> Option<&KnownModel> {
        self.models.get(qualified)
    }

    /// Storage record of a model, `None` if the model is unknown or generates no record.
    pub fn storage_type(&self, qualified: &str) -> Option<&ClassName> {
        self.models.get(qualified)?.storage.as_ref()
    }

    /// Spell a declared type for generated code.
    ///
    /// Known models use the package/enclosing split recorded at discovery; every other
    /// declared type is split with [`ClassName::parse`].
    pub fn type_name(&self, ty: &TypeDescriptor) -> TypeName {
        match ty {
            TypeDescriptor::Primitive(kind) => TypeName::Primitive(*kind),
            TypeDescriptor::Array(component) => TypeName::Array(Box::new(self.type_name(component))),
            TypeDescriptor::Declared { name, args } => {
                let raw = self
                    .get(name)
                    .map_or_else(|| ClassName::parse(name), |known| known.model.clone());
                if args.is_empty() {
                    TypeName::Class(raw)
                } else {
                    TypeName::parameterized(raw, args.iter().map(|a| self.type_name(a)).collect())
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropertySchema;

    fn model(package: &str, enclosing: &[&str], name: &str, trigger: bool) -> ClassSchema {
        ClassSchema::builder()
            .package(package)
            .enclosing(enclosing.iter().map(|s| s.to_string()).collect())
            .simple_name(name)
            .trigger(trigger.then(|| "toRealmObject".to_string()))
            .build()
    }

    #[test]
    fn test_discover_records_storage_types() {
        let schemas = vec![
            model("p1", &[], "Foo", true),
            model("p2", &["lower"], "Bar", true),
            model("p3", &[], "Plain", false),
        ];
        let known = KnownModels::discover(&schemas, ["p4.Legacy"]);

        assert_eq!(known.len(), 4);
        assert_eq!(
            known.storage_type("p1.Foo"),
            Some(&ClassName::new("p1", "$RealmFoo"))
        );
        // the recorded split wins over the naming heuristic
        assert_eq!(
            known.storage_type("p2.lower.Bar"),
            Some(&ClassName::new("p2", "$Realmlower_Bar"))
        );
        assert!(known.is_model("p3.Plain"));
        assert_eq!(known.storage_type("p3.Plain"), None);
        assert!(known.is_model("p4.Legacy"));
        assert_eq!(known.storage_type("p4.Legacy"), None);
        assert!(!known.is_model("p5.Missing"));
    }

    #[test]
    fn test_find_cycle() {
        let with = |name: &str, ty: &str| {
            ClassSchema::builder()
                .package("p")
                .simple_name(name)
                .trigger(Some("toRealmObject".to_string()))
                .properties(vec![PropertySchema::new("getNext", ty.parse().unwrap())])
                .build()
        };
        let schemas = vec![
            with("A", "p.B"),
            with("B", "java.util.List<p.A>"),
            with("C", "p.A"),
            with("D", "java.lang.String"),
            with("Self", "p.Self"),
        ];
        let known = KnownModels::discover(&schemas, std::iter::empty::<&str>());

        assert_eq!(
            known.find_cycle("p.A"),
            Some(vec!["p.A".to_string(), "p.B".to_string(), "p.A".to_string()])
        );
        // C is not on the cycle but reaches it
        assert_eq!(
            known.find_cycle("p.C"),
            Some(vec!["p.A".to_string(), "p.B".to_string(), "p.A".to_string()])
        );
        assert_eq!(known.find_cycle("p.D"), None);
        assert_eq!(
            known.find_cycle("p.Self"),
            Some(vec!["p.Self".to_string(), "p.Self".to_string()])
        );
        assert_eq!(known.get("p.B").unwrap().references, vec!["p.A".to_string()]);
    }

    #[test]
    fn test_duplicate_declarations_have_no_storage() {
        let schemas = vec![
            model("p", &[], "Foo", true),
            model("p", &[], "Foo", true),
            model("p", &[], "Bar", true),
        ];
        let known = KnownModels::discover(&schemas, ["p.Bar"]);

        assert!(known.is_duplicate("p.Foo"));
        assert!(known.is_model("p.Foo"));
        assert_eq!(known.storage_type("p.Foo"), None);
        // a schema for an external name is not a duplicate
        assert!(!known.is_duplicate("p.Bar"));
        assert_eq!(
            known.storage_type("p.Bar"),
            Some(&ClassName::new("p", "$RealmBar"))
        );
    }

    #[test]
    fn test_type_name_uses_known_split() {
        let schemas = vec![model("p", &["Outer"], "Inner", true)];
        let known = KnownModels::discover(&schemas, std::iter::empty::<&str>());

        let ty = TypeDescriptor::parameterized(
            "java.util.List",
            vec![TypeDescriptor::declared("p.Outer.Inner")],
        );
        assert_eq!(
            known.type_name(&ty),
            TypeName::parameterized(
                ClassName::new("java.util", "List"),
                vec![ClassName::nested("p", vec!["Outer".to_string()], "Inner").into()],
            )
        );
    }
}
