use super::{ClassName, Expr, FieldSpec, MethodKind, MethodSpec, Modifier, Statement, TypeName, TypeSpec};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write};

const DEFAULT_INDENT: &str = "  ";

/// A compilation unit holding a single top-level type.
///
/// # Examples
///
/// ```
/// use auto_value_realm::codegen::java::{ClassName, JavaFile, Modifier, TypeSpec};
///
/// let spec = TypeSpec::class("$RealmTest")
///     .modifiers([Modifier::Public])
///     .superclass(ClassName::new("io.realm", "RealmObject").into());
/// let source = JavaFile::new("test", spec).to_string();
///
/// assert_eq!(
///     source,
///     "package test;\n\nimport io.realm.RealmObject;\n\npublic class $RealmTest extends RealmObject {\n}\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaFile {
    pub package: String,
    pub type_spec: TypeSpec,
    indent: String,
}

impl JavaFile {
    pub fn new(package: impl Into<String>, type_spec: TypeSpec) -> Self {
        Self {
            package: package.into(),
            type_spec,
            indent: DEFAULT_INDENT.to_string(),
        }
    }

    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// The class this file declares.
    pub fn class_name(&self) -> ClassName {
        ClassName::new(self.package.clone(), self.type_spec.name.clone())
    }

    fn write_to(&self, out: &mut impl Write) -> fmt::Result {
        let imports = ImportScope::resolve(&self.package, &self.type_spec);
        let mut writer = CodeWriter {
            out,
            imports: &imports,
            indent: &self.indent,
            level: 0,
        };

        if !self.package.is_empty() {
            writeln!(writer.out, "package {};", self.package)?;
            writeln!(writer.out)?;
        }
        if !imports.imported.is_empty() {
            let sorted: BTreeSet<String> = imports
                .imported
                .values()
                .map(ClassName::canonical_name)
                .collect();
            for import in sorted {
                writeln!(writer.out, "import {import};")?;
            }
            writeln!(writer.out)?;
        }

        writer.type_spec(&self.type_spec)
    }
}

impl fmt::Display for JavaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Decides which classes are imported and how every class is spelled in the file.
struct ImportScope {
    package: String,
    /// simple top-level name -> imported top-level class
    imported: BTreeMap<String, ClassName>,
}

impl ImportScope {
    fn resolve(package: &str, spec: &TypeSpec) -> Self {
        let mut reserved: BTreeSet<String> = BTreeSet::new();
        reserved.insert(spec.name.clone());

        let referenced: BTreeSet<ClassName> = spec
            .referenced_classes()
            .into_iter()
            .map(ClassName::top_level)
            .collect();

        // classes of the file's own package are visible by simple name and win collisions
        for class in &referenced {
            if class.package() == package {
                reserved.insert(class.simple_name().to_string());
            }
        }

        let mut imported = BTreeMap::new();
        for class in referenced {
            if class.package() == package || class.package().is_empty() {
                continue;
            }
            let simple = class.simple_name().to_string();
            if reserved.contains(&simple) || imported.contains_key(&simple) {
                continue;
            }
            imported.insert(simple, class);
        }

        Self {
            package: package.to_string(),
            imported,
        }
    }

    fn spell(&self, class: &ClassName) -> String {
        let top = class.top_level();
        let visible = top.package() == self.package
            || top.package().is_empty()
            || self.imported.get(top.simple_name()) == Some(&top);

        if visible {
            class.reference_name()
        } else {
            class.canonical_name()
        }
    }
}

struct CodeWriter<'a, W: Write> {
    out: &'a mut W,
    imports: &'a ImportScope,
    indent: &'a str,
    level: usize,
}

impl<W: Write> CodeWriter<'_, W> {
    fn line_start(&mut self) -> fmt::Result {
        for _ in 0..self.level {
            self.out.write_str(self.indent)?;
        }
        Ok(())
    }

    fn type_spec(&mut self, spec: &TypeSpec) -> fmt::Result {
        self.line_start()?;
        self.modifiers(&spec.modifiers)?;
        write!(self.out, "class {}", spec.name)?;
        if let Some(superclass) = &spec.superclass {
            write!(self.out, " extends {}", self.type_name(superclass))?;
        }
        if !spec.interfaces.is_empty() {
            let interfaces: Vec<String> =
                spec.interfaces.iter().map(|i| self.type_name(i)).collect();
            write!(self.out, " implements {}", interfaces.join(", "))?;
        }
        writeln!(self.out, " {{")?;

        self.level += 1;
        let mut first = true;
        for field in &spec.fields {
            if !first {
                writeln!(self.out)?;
            }
            self.field(field)?;
            first = false;
        }
        for method in &spec.methods {
            if !first {
                writeln!(self.out)?;
            }
            self.method(method, &spec.name)?;
            first = false;
        }
        self.level -= 1;

        self.line_start()?;
        writeln!(self.out, "}}")
    }

    fn annotations(&mut self, annotations: &[ClassName]) -> fmt::Result {
        for annotation in annotations {
            self.line_start()?;
            writeln!(self.out, "@{}", self.imports.spell(annotation))?;
        }
        Ok(())
    }

    fn modifiers(&mut self, modifiers: &[Modifier]) -> fmt::Result {
        for modifier in modifiers {
            write!(self.out, "{modifier} ")?;
        }
        Ok(())
    }

    fn field(&mut self, field: &FieldSpec) -> fmt::Result {
        self.annotations(&field.annotations)?;
        self.line_start()?;
        self.modifiers(&field.modifiers)?;
        writeln!(self.out, "{} {};", self.type_name(&field.ty), field.name)
    }

    fn method(&mut self, method: &MethodSpec, type_name: &str) -> fmt::Result {
        self.annotations(&method.annotations)?;
        self.line_start()?;
        self.modifiers(&method.modifiers)?;
        match &method.kind {
            MethodKind::Method { name, returns } => {
                let returns = returns
                    .as_ref()
                    .map_or_else(|| "void".to_string(), |ty| self.type_name(ty));
                write!(self.out, "{returns} {name}")?;
            }
            MethodKind::Constructor => write!(self.out, "{type_name}")?,
        }

        let parameters: Vec<String> = method
            .parameters
            .iter()
            .map(|p| format!("{} {}", self.type_name(&p.ty), p.name))
            .collect();
        writeln!(self.out, "({}) {{", parameters.join(", "))?;

        self.level += 1;
        for statement in &method.body {
            self.line_start()?;
            let statement = self.statement(statement);
            writeln!(self.out, "{statement}")?;
        }
        self.level -= 1;

        self.line_start()?;
        writeln!(self.out, "}}")
    }

    fn statement(&self, statement: &Statement) -> String {
        match statement {
            Statement::Local { ty, name, init } => {
                format!("{} {} = {};", self.type_name(ty), name, self.expr(init))
            }
            Statement::Expr(expr) => format!("{};", self.expr(expr)),
            Statement::Assign { target, value } => {
                format!("{} = {};", self.expr(target), self.expr(value))
            }
            Statement::Return(expr) => format!("return {};", self.expr(expr)),
            Statement::Super(args) => format!("super({});", self.args(args)),
        }
    }

    fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Name(name) => name.clone(),
            Expr::This => "this".to_string(),
            Expr::Field { target, name } => format!("{}.{}", self.expr(target), name),
            Expr::Invoke {
                target: Some(target),
                method,
                args,
            } => format!("{}.{}({})", self.expr(target), method, self.args(args)),
            Expr::Invoke {
                target: None,
                method,
                args,
            } => format!("{}({})", method, self.args(args)),
            Expr::InvokeStatic {
                owner,
                method,
                args,
            } => format!("{}.{}({})", self.imports.spell(owner), method, self.args(args)),
            Expr::New { class, args } => {
                format!("new {}({})", self.imports.spell(class), self.args(args))
            }
        }
    }

    fn args(&self, args: &[Expr]) -> String {
        args.iter()
            .map(|a| self.expr(a))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn type_name(&self, ty: &TypeName) -> String {
        match ty {
            TypeName::Primitive(kind) => kind.to_string(),
            TypeName::Class(class) => self.imports.spell(class),
            TypeName::Parameterized { raw, args } => {
                let args: Vec<String> = args.iter().map(|a| self.type_name(a)).collect();
                format!("{}<{}>", self.imports.spell(raw), args.join(", "))
            }
            TypeName::Array(component) => format!("{}[]", self.type_name(component)),
        }
    }
}
