// Common test utilities and helpers
//
// `Runtime` executes the generated method bodies directly from the declaration model, so the
// conversion properties can be checked without a Java toolchain. Objects are plain values; the
// list helper contract is implemented element-wise as the runtime library does.

#![allow(dead_code)]

use auto_value_realm::codegen::java::{Expr, MethodKind, Statement, TypeSpec};
use auto_value_realm::prelude::*;
use std::cell::Cell;
use std::collections::BTreeMap;

/// Parse a property type, panicking on invalid text.
pub fn property(accessor: &str, ty: &str) -> PropertySchema {
    PropertySchema::new(accessor, ty.parse().expect("valid type"))
}

/// A model class with the default trigger.
pub fn model(package: &str, name: &str, properties: Vec<PropertySchema>) -> ClassSchema {
    let (enclosing, simple) = match name.rsplit_once('.') {
        Some((outer, simple)) => (outer.split('.').map(str::to_string).collect(), simple),
        None => (Vec::new(), name),
    };
    ClassSchema::builder()
        .package(package)
        .enclosing(enclosing)
        .simple_name(simple)
        .trigger(Some("toRealmObject".to_string()))
        .properties(properties)
        .build()
}

/// Run a pass into memory, asserting it succeeded.
pub fn generate(batch: &SchemaBatch) -> MemorySink {
    let mut sink = MemorySink::new();
    let report = Generator::default().run(batch, &mut sink);
    assert!(report.is_success(), "unexpected failures: {:?}", report.failures);
    sink
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Long(i64),
    Double(f64),
    Bool(bool),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Object(Object),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    /// Canonical name of the object's class
    pub class: String,
    pub fields: BTreeMap<String, Value>,
}

impl Object {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: &str, value: Value) -> Self {
        self.fields.insert(field.to_string(), value);
        self
    }

    pub fn field(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&Value::Null)
    }
}

impl Value {
    pub fn as_object(&self) -> &Object {
        match self {
            Value::Object(object) => object,
            other => panic!("expected an object, got {other:?}"),
        }
    }
}

/// Executes generated declarations.
pub struct Runtime {
    config: GeneratorConfig,
    /// canonical class name -> generated declaration
    types: BTreeMap<String, TypeSpec>,
    /// canonical implementation name -> model schema
    models: BTreeMap<String, ClassSchema>,
    to_storage_calls: Cell<usize>,
    to_model_calls: Cell<usize>,
}

impl Runtime {
    /// Generate every class of the batch and load the results.
    pub fn load(batch: &SchemaBatch) -> Self {
        let generator = Generator::default();
        let known = generator.discover(batch);
        let mut runtime = Self {
            config: generator.config().clone(),
            types: BTreeMap::new(),
            models: BTreeMap::new(),
            to_storage_calls: Cell::new(0),
            to_model_calls: Cell::new(0),
        };

        for schema in batch.classes.iter().filter(|s| s.is_applicable()) {
            let generated = generator
                .generate_class(schema, &known)
                .expect("class generates");
            let implementation = generated.implementation.class_name().canonical_name();
            runtime.models.insert(implementation.clone(), schema.clone());
            runtime.types.insert(implementation, generated.implementation.type_spec);
            runtime.types.insert(
                generated.storage.class_name().canonical_name(),
                generated.storage.type_spec,
            );
        }
        runtime
    }

    /// Canonical name of the implementation class of a model.
    pub fn implementation_of(&self, schema: &ClassSchema) -> String {
        self.models
            .iter()
            .find(|(_, s)| *s == schema)
            .map(|(name, _)| name.clone())
            .expect("model is loaded")
    }

    pub fn to_storage_calls(&self) -> usize {
        self.to_storage_calls.get()
    }

    pub fn to_model_calls(&self) -> usize {
        self.to_model_calls.get()
    }

    pub fn reset_counters(&self) {
        self.to_storage_calls.set(0);
        self.to_model_calls.set(0);
    }

    /// Call `toRealmObject()` on a model instance.
    pub fn to_storage(&self, model: &Object) -> Value {
        self.call(model.clone(), &self.config.to_storage_method, Vec::new())
    }

    /// Call `toModel()` on a record instance.
    pub fn to_model(&self, record: &Object) -> Value {
        self.call(record.clone(), &self.config.to_model_method, Vec::new())
    }

    fn call(&self, mut receiver: Object, method: &str, args: Vec<Value>) -> Value {
        if method == self.config.to_storage_method {
            self.to_storage_calls.set(self.to_storage_calls.get() + 1);
        }
        if method == self.config.to_model_method {
            self.to_model_calls.set(self.to_model_calls.get() + 1);
        }

        let spec = self.types.get(&receiver.class);
        if let Some(body) = spec.and_then(|s| s.find_method(method)) {
            let params = body.parameters.iter().map(|p| p.name.clone());
            let locals = params.zip(args).collect();
            return self.execute(&mut receiver, locals, &body.body);
        }

        // accessors of the model implementation
        let schema = self
            .models
            .get(&receiver.class)
            .unwrap_or_else(|| panic!("no method {method} on {}", receiver.class));
        let property = schema
            .properties
            .iter()
            .find(|p| p.accessor == method)
            .unwrap_or_else(|| panic!("no accessor {method} on {}", receiver.class));
        receiver.field(&property.name).clone()
    }

    fn construct(&self, class: String, args: Vec<Value>) -> Value {
        let mut object = Object::new(class);
        let constructor = self
            .types
            .get(&object.class)
            .and_then(TypeSpec::constructor)
            .cloned();
        match constructor {
            Some(constructor) => {
                let params = constructor.parameters.iter().map(|p| p.name.clone());
                let locals = params.zip(args).collect();
                self.execute(&mut object, locals, &constructor.body);
            }
            None => assert!(args.is_empty(), "{} has no constructor", object.class),
        }
        Value::Object(object)
    }

    fn execute(
        &self,
        this: &mut Object,
        mut locals: BTreeMap<String, Value>,
        body: &[Statement],
    ) -> Value {
        for statement in body {
            match statement {
                Statement::Local { name, init, .. } => {
                    let value = self.eval(this, &locals, init);
                    locals.insert(name.clone(), value);
                }
                Statement::Expr(Expr::Invoke {
                    target: Some(target),
                    method,
                    args,
                }) if matches!(target.as_ref(), Expr::Name(n) if locals.contains_key(n)) => {
                    let Expr::Name(local) = target.as_ref() else {
                        unreachable!()
                    };
                    let args = args.iter().map(|a| self.eval(this, &locals, a)).collect();
                    let Some(Value::Object(receiver)) = locals.get_mut(local) else {
                        panic!("{local} is not an object");
                    };
                    // setters mutate the local record in place
                    self.invoke_mut(receiver, method, args);
                }
                Statement::Expr(expr) => {
                    self.eval(this, &locals, expr);
                }
                Statement::Assign { target, value } => {
                    let value = self.eval(this, &locals, value);
                    match target {
                        Expr::Field { target, name } if **target == Expr::This => {
                            this.fields.insert(name.clone(), value);
                        }
                        other => panic!("unsupported assignment target {other:?}"),
                    }
                }
                Statement::Return(expr) => return self.eval(this, &locals, expr),
                Statement::Super(args) => {
                    for arg in args {
                        let Expr::Name(name) = arg else {
                            panic!("unsupported super argument {arg:?}");
                        };
                        let value = self.eval(this, &locals, arg);
                        this.fields.insert(name.clone(), value);
                    }
                }
            }
        }
        Value::Null
    }

    fn invoke_mut(&self, receiver: &mut Object, method: &str, args: Vec<Value>) {
        let spec = self
            .types
            .get(&receiver.class)
            .unwrap_or_else(|| panic!("unknown class {}", receiver.class));
        let body = spec
            .find_method(method)
            .unwrap_or_else(|| panic!("no method {method} on {}", receiver.class));
        assert!(matches!(body.kind, MethodKind::Method { .. }));
        let params = body.parameters.iter().map(|p| p.name.clone());
        let locals = params.zip(args).collect();
        self.execute(receiver, locals, &body.body);
    }

    fn eval(&self, this: &Object, locals: &BTreeMap<String, Value>, expr: &Expr) -> Value {
        match expr {
            Expr::Name(name) => locals
                .get(name)
                .cloned()
                .unwrap_or_else(|| this.field(name).clone()),
            Expr::This => Value::Object(this.clone()),
            Expr::Field { target, name } => match self.eval(this, locals, target) {
                Value::Object(object) => object.field(name).clone(),
                other => panic!("field access on {other:?}"),
            },
            Expr::Invoke {
                target,
                method,
                args,
            } => {
                let receiver = match target {
                    Some(target) => self.eval(this, locals, target),
                    None => Value::Object(this.clone()),
                };
                let args = args.iter().map(|a| self.eval(this, locals, a)).collect();
                match receiver {
                    Value::Object(object) => self.call(object, method, args),
                    other => panic!("call of {method} on {other:?}"),
                }
            }
            Expr::InvokeStatic {
                owner,
                method,
                args,
            } => {
                assert_eq!(owner.canonical_name(), self.config.list_helper);
                let args: Vec<Value> = args.iter().map(|a| self.eval(this, locals, a)).collect();
                let [Value::List(items)] = args.as_slice() else {
                    panic!("list helper expects one list argument");
                };
                let element_method = if *method == self.config.models_to_records {
                    &self.config.to_storage_method
                } else if *method == self.config.records_to_models {
                    &self.config.to_model_method
                } else {
                    panic!("unknown list helper {method}");
                };
                Value::List(
                    items
                        .iter()
                        .map(|item| self.call(item.as_object().clone(), element_method, Vec::new()))
                        .collect(),
                )
            }
            Expr::New { class, args } => {
                let args = args.iter().map(|a| self.eval(this, locals, a)).collect();
                self.construct(class.canonical_name(), args)
            }
        }
    }
}
