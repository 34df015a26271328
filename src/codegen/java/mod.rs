//! A small Java declaration model and its source renderer.
//!
//! The synthesizers describe generated types as data ([`TypeSpec`], [`MethodSpec`], ...) and
//! [`JavaFile`] turns them into source text, managing imports along the way. Keeping the
//! generated code as data lets tests inspect it structurally instead of matching strings.

mod spec;
mod writer;

pub use spec::{Expr, FieldSpec, MethodKind, MethodSpec, ParameterSpec, Statement, TypeSpec};
pub use writer::JavaFile;

use crate::schema::PrimitiveKind;
use derive_more::From;
use std::fmt;
use strum::Display;

/// A possibly nested class, split into package, enclosing classes and simple name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: String,
    enclosing: Vec<String>,
    simple: String,
}

impl ClassName {
    /// A top-level class.
    pub fn new(package: impl Into<String>, simple: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            enclosing: Vec::new(),
            simple: simple.into(),
        }
    }

    /// A class nested in `enclosing` (outermost first).
    pub fn nested(
        package: impl Into<String>,
        enclosing: Vec<String>,
        simple: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            enclosing,
            simple: simple.into(),
        }
    }

    /// Split a dotted name at the first segment that does not start with a lowercase letter.
    ///
    /// `my.pkg.Foo.Inner` becomes package `my.pkg`, enclosing `[Foo]`, simple name `Inner`.
    /// A name made only of lowercase segments is read as `package.Class`.
    pub fn parse(qualified: &str) -> Self {
        let segments: Vec<&str> = qualified.split('.').collect();
        let first_class = segments
            .iter()
            .position(|s| !s.chars().next().is_some_and(|c| c.is_lowercase()))
            .unwrap_or(segments.len().saturating_sub(1));

        let package = segments[..first_class].join(".");
        let mut classes: Vec<String> = segments[first_class..]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let simple = classes.pop().unwrap_or_default();

        Self {
            package,
            enclosing: classes,
            simple,
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn simple_name(&self) -> &str {
        &self.simple
    }

    pub fn enclosing(&self) -> &[String] {
        &self.enclosing
    }

    /// The outermost class containing this one (itself when top-level).
    pub fn top_level(&self) -> ClassName {
        match self.enclosing.first() {
            Some(outer) => Self::new(self.package.clone(), outer.clone()),
            None => Self::new(self.package.clone(), self.simple.clone()),
        }
    }

    /// Name relative to the package (e.g., `Outer.Inner`).
    pub fn reference_name(&self) -> String {
        let mut name = self.enclosing.join(".");
        if !name.is_empty() {
            name.push('.');
        }
        name.push_str(&self.simple);
        name
    }

    /// Fully qualified name (e.g., `my.pkg.Outer.Inner`).
    pub fn canonical_name(&self) -> String {
        if self.package.is_empty() {
            self.reference_name()
        } else {
            format!("{}.{}", self.package, self.reference_name())
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

/// A type in declaration position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, From)]
pub enum TypeName {
    #[from]
    Primitive(PrimitiveKind),
    #[from]
    Class(ClassName),
    Parameterized { raw: ClassName, args: Vec<TypeName> },
    Array(Box<TypeName>),
}

impl TypeName {
    pub fn parameterized(raw: ClassName, args: Vec<TypeName>) -> Self {
        Self::Parameterized { raw, args }
    }

    /// Every class this type mentions, outermost first.
    pub fn classes(&self) -> Vec<&ClassName> {
        match self {
            Self::Primitive(_) => Vec::new(),
            Self::Class(class) => vec![class],
            Self::Parameterized { raw, args } => std::iter::once(raw)
                .chain(args.iter().flat_map(TypeName::classes))
                .collect(),
            Self::Array(component) => component.classes(),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Class(class) => write!(f, "{class}"),
            Self::Parameterized { raw, args } => {
                let args: Vec<String> = args.iter().map(ToString::to_string).collect();
                write!(f, "{raw}<{}>", args.join(", "))
            }
            Self::Array(component) => write!(f, "{component}[]"),
        }
    }
}

/// Declaration modifiers, rendered in the order they were added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Modifier {
    Public,
    Private,
    Abstract,
    Final,
}
