use super::{ClassName, Modifier, TypeName};

/// A field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub annotations: Vec<ClassName>,
    pub modifiers: Vec<Modifier>,
    pub ty: TypeName,
    pub name: String,
}

impl FieldSpec {
    pub fn new(ty: TypeName, name: impl Into<String>) -> Self {
        Self {
            annotations: Vec::new(),
            modifiers: Vec::new(),
            ty,
            name: name.into(),
        }
    }

    pub fn annotate(mut self, annotation: ClassName) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }
}

/// A method or constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub ty: TypeName,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodKind {
    /// A named method; `None` returns `void`
    Method {
        name: String,
        returns: Option<TypeName>,
    },
    Constructor,
}

/// A method or constructor declaration with its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    pub annotations: Vec<ClassName>,
    pub modifiers: Vec<Modifier>,
    pub kind: MethodKind,
    pub parameters: Vec<ParameterSpec>,
    pub body: Vec<Statement>,
}

impl MethodSpec {
    pub fn method(name: impl Into<String>) -> Self {
        Self::with_kind(MethodKind::Method {
            name: name.into(),
            returns: None,
        })
    }

    pub fn constructor() -> Self {
        Self::with_kind(MethodKind::Constructor)
    }

    fn with_kind(kind: MethodKind) -> Self {
        Self {
            annotations: Vec::new(),
            modifiers: Vec::new(),
            kind,
            parameters: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn annotate(mut self, annotation: ClassName) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    /// Set the return type. Constructors ignore it.
    pub fn returns(mut self, ty: TypeName) -> Self {
        if let MethodKind::Method { returns, .. } = &mut self.kind {
            *returns = Some(ty);
        }
        self
    }

    pub fn parameter(mut self, ty: TypeName, name: impl Into<String>) -> Self {
        self.parameters.push(ParameterSpec {
            ty,
            name: name.into(),
        });
        self
    }

    pub fn statement(mut self, statement: Statement) -> Self {
        self.body.push(statement);
        self
    }

    /// Method name, `None` for constructors.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            MethodKind::Method { name, .. } => Some(name),
            MethodKind::Constructor => None,
        }
    }

    pub fn return_type(&self) -> Option<&TypeName> {
        match &self.kind {
            MethodKind::Method { returns, .. } => returns.as_ref(),
            MethodKind::Constructor => None,
        }
    }
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub superclass: Option<TypeName>,
    pub interfaces: Vec<TypeName>,
    pub fields: Vec<FieldSpec>,
    pub methods: Vec<MethodSpec>,
}

impl TypeSpec {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            modifiers: Vec::new(),
            name: name.into(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn superclass(mut self, superclass: TypeName) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn implements(mut self, interface: TypeName) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodSpec> {
        self.methods.iter().find(|m| m.name() == Some(name))
    }

    pub fn constructor(&self) -> Option<&MethodSpec> {
        self.methods
            .iter()
            .find(|m| m.kind == MethodKind::Constructor)
    }

    /// Every class referenced anywhere in the declaration, including method bodies.
    pub(super) fn referenced_classes(&self) -> Vec<&ClassName> {
        let mut classes = Vec::new();
        if let Some(superclass) = &self.superclass {
            classes.extend(superclass.classes());
        }
        for interface in &self.interfaces {
            classes.extend(interface.classes());
        }
        for field in &self.fields {
            classes.extend(&field.annotations);
            classes.extend(field.ty.classes());
        }
        for method in &self.methods {
            classes.extend(&method.annotations);
            if let Some(returns) = method.return_type() {
                classes.extend(returns.classes());
            }
            for parameter in &method.parameters {
                classes.extend(parameter.ty.classes());
            }
            for statement in &method.body {
                statement.collect_classes(&mut classes);
            }
        }
        classes
    }
}

/// A statement inside a method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `Type name = init;`
    Local {
        ty: TypeName,
        name: String,
        init: Expr,
    },
    /// `expr;`
    Expr(Expr),
    /// `target = value;`
    Assign { target: Expr, value: Expr },
    Return(Expr),
    /// `super(args);`
    Super(Vec<Expr>),
}

impl Statement {
    fn collect_classes<'a>(&'a self, classes: &mut Vec<&'a ClassName>) {
        match self {
            Self::Local { ty, init, .. } => {
                classes.extend(ty.classes());
                init.collect_classes(classes);
            }
            Self::Expr(expr) | Self::Return(expr) => expr.collect_classes(classes),
            Self::Assign { target, value } => {
                target.collect_classes(classes);
                value.collect_classes(classes);
            }
            Self::Super(args) => args.iter().for_each(|a| a.collect_classes(classes)),
        }
    }
}

/// An expression inside a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A local, parameter or field referenced by bare name
    Name(String),
    This,
    /// `target.name`
    Field { target: Box<Expr>, name: String },
    /// `target.method(args)`, or `method(args)` on the implicit receiver
    Invoke {
        target: Option<Box<Expr>>,
        method: String,
        args: Vec<Expr>,
    },
    /// `Owner.method(args)`
    InvokeStatic {
        owner: ClassName,
        method: String,
        args: Vec<Expr>,
    },
    /// `new Class(args)`
    New { class: ClassName, args: Vec<Expr> },
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn this_field(name: impl Into<String>) -> Self {
        Self::Field {
            target: Box::new(Self::This),
            name: name.into(),
        }
    }

    /// Call `method()` on the implicit receiver.
    pub fn call(method: impl Into<String>) -> Self {
        Self::Invoke {
            target: None,
            method: method.into(),
            args: Vec::new(),
        }
    }

    /// Call `method(args)` on this expression.
    pub fn invoke(self, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Invoke {
            target: Some(Box::new(self)),
            method: method.into(),
            args,
        }
    }

    fn collect_classes<'a>(&'a self, classes: &mut Vec<&'a ClassName>) {
        match self {
            Self::Name(_) | Self::This => {}
            Self::Field { target, .. } => target.collect_classes(classes),
            Self::Invoke { target, args, .. } => {
                if let Some(target) = target {
                    target.collect_classes(classes);
                }
                args.iter().for_each(|a| a.collect_classes(classes));
            }
            Self::InvokeStatic { owner, args, .. } => {
                classes.push(owner);
                args.iter().for_each(|a| a.collect_classes(classes));
            }
            Self::New { class, args } => {
                classes.push(class);
                args.iter().for_each(|a| a.collect_classes(classes));
            }
        }
    }
}
