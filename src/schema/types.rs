//! Language-level type descriptors for model properties.
//!
//! A [`TypeDescriptor`] is the elaborated form of a property's declared type as the host hands
//! it over: a primitive, an array, or a declared (possibly parameterized) type identified by its
//! fully qualified name. Descriptors print exactly like the host compiler prints types, which is
//! what diagnostics quote back to the user.

use crate::error::{CodegenError, CodegenResult};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};

/// Primitive numeric, boolean and char types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

/// The closed set of non-primitive types a storage record can hold as-is.
///
/// Each variant serializes to the exact type text the host prints for it, so a descriptor is
/// matched by printing it and parsing the result back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum ScalarKind {
    #[strum(serialize = "java.lang.String")]
    Text,
    #[strum(serialize = "java.util.Date")]
    Timestamp,
    #[strum(serialize = "byte[]")]
    Blob,
    #[strum(serialize = "java.lang.Boolean")]
    Boolean,
    #[strum(serialize = "java.lang.Byte")]
    Byte,
    #[strum(serialize = "java.lang.Short")]
    Short,
    #[strum(serialize = "java.lang.Integer")]
    Integer,
    #[strum(serialize = "java.lang.Float")]
    Float,
    #[strum(serialize = "java.lang.Long")]
    Long,
    #[strum(serialize = "java.lang.Double")]
    Double,
}

impl ScalarKind {
    /// Match a descriptor against the supported scalar set.
    pub fn from_descriptor(ty: &TypeDescriptor) -> Option<Self> {
        match ty {
            TypeDescriptor::Primitive(_) => None,
            _ => ty.to_string().parse().ok(),
        }
    }
}

/// A declared property type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    Array(Box<TypeDescriptor>),
    Declared {
        name: String,
        args: Vec<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    /// A non-parameterized declared type.
    pub fn declared(name: impl Into<String>) -> Self {
        Self::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A declared type with type arguments, e.g. `java.util.List<p.Foo>`.
    pub fn parameterized(name: impl Into<String>, args: Vec<TypeDescriptor>) -> Self {
        Self::Declared {
            name: name.into(),
            args,
        }
    }

    pub fn array_of(component: TypeDescriptor) -> Self {
        Self::Array(Box::new(component))
    }

    pub fn is_primitive_boolean(&self) -> bool {
        matches!(self, Self::Primitive(PrimitiveKind::Boolean))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Array(component) => write!(f, "{component}[]"),
            Self::Declared { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    // javac prints type arguments without a space after the comma
                    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", args.join(","))?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = CodegenError;

    fn from_str(s: &str) -> CodegenResult<Self> {
        let mut parser = TypeParser {
            text: s,
            chars: s.char_indices().peekable(),
        };
        let ty = parser.parse_type()?;
        parser.skip_whitespace();
        if let Some(&(_, c)) = parser.chars.peek() {
            return Err(parser.error(format!("unexpected '{c}' after type")));
        }
        Ok(ty)
    }
}

struct TypeParser<'a> {
    text: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl TypeParser<'_> {
    fn parse_type(&mut self) -> CodegenResult<TypeDescriptor> {
        self.skip_whitespace();
        let name = self.parse_name();
        if name.is_empty() {
            return Err(self.error("expected a type name".to_string()));
        }

        let mut args = Vec::new();
        self.skip_whitespace();
        if self.eat('<') {
            loop {
                args.push(self.parse_type()?);
                self.skip_whitespace();
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.error("expected ',' or '>' in type arguments".to_string()));
            }
        }

        let mut ty = match PrimitiveKind::from_str(&name) {
            Ok(kind) if args.is_empty() => TypeDescriptor::Primitive(kind),
            Ok(kind) => {
                return Err(self.error(format!("primitive '{kind}' cannot take type arguments")));
            }
            Err(_) => TypeDescriptor::Declared { name, args },
        };

        loop {
            self.skip_whitespace();
            if !self.eat('[') {
                break;
            }
            self.skip_whitespace();
            if !self.eat(']') {
                return Err(self.error("expected ']'".to_string()));
            }
            ty = TypeDescriptor::array_of(ty);
        }

        Ok(ty)
    }

    fn parse_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' || c == '.' {
                name.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        name
    }

    fn eat(&mut self, expected: char) -> bool {
        match self.chars.peek() {
            Some(&(_, c)) if c == expected => {
                self.chars.next();
                true
            }
            _ => false,
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn error(&mut self, reason: String) -> CodegenError {
        let position = self.chars.peek().map_or(self.text.len(), |&(i, _)| i);
        CodegenError::InvalidType {
            text: self.text.to_string(),
            reason: format!("{reason} at offset {position}"),
        }
    }
}
