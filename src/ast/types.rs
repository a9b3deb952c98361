//! Type annotations as they appear in the source.
//!
//! The parser may hand annotations over either as raw text (`"&[i32; 4]"`)
//! or already broken into structure. Both forms are resolved into concrete
//! types by the type checker's resolver.

use std::fmt::Display;

/// Represents a type annotation that still needs resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotation {
    /// The annotation exactly as written, e.g. `&mut Point` or `[u8]`.
    Text(String),
    /// A bare type name: a keyword like `i32` or a user-defined type.
    Named(String),
    /// `()`
    Unit,
    /// `&T` / `&mut T`
    Reference {
        mutable: bool,
        inner: Box<TypeAnnotation>,
    },
    /// `*const T` / `*mut T`
    Pointer {
        mutable: bool,
        inner: Box<TypeAnnotation>,
    },
    /// `[T; N]`
    Array {
        element: Box<TypeAnnotation>,
        size: usize,
    },
    /// `[T]`
    Slice(Box<TypeAnnotation>),
    /// `(A, B, ...)`
    Tuple(Vec<TypeAnnotation>),
}

impl TypeAnnotation {
    pub fn named(name: &str) -> Self {
        TypeAnnotation::Named(name.to_string())
    }

    pub fn reference(inner: TypeAnnotation, mutable: bool) -> Self {
        TypeAnnotation::Reference {
            mutable,
            inner: Box::new(inner),
        }
    }
}

impl From<&str> for TypeAnnotation {
    fn from(text: &str) -> Self {
        TypeAnnotation::Text(text.to_string())
    }
}

impl Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeAnnotation::Text(text) => write!(f, "{}", text.trim()),
            TypeAnnotation::Named(name) => write!(f, "{}", name),
            TypeAnnotation::Unit => write!(f, "()"),
            TypeAnnotation::Reference { mutable, inner } => {
                write!(f, "&{}{}", if *mutable { "mut " } else { "" }, inner)
            }
            TypeAnnotation::Pointer { mutable, inner } => {
                write!(f, "*{} {}", if *mutable { "mut" } else { "const" }, inner)
            }
            TypeAnnotation::Array { element, size } => write!(f, "[{}; {}]", element, size),
            TypeAnnotation::Slice(element) => write!(f, "[{}]", element),
            TypeAnnotation::Tuple(elements) => {
                let elements = elements
                    .iter()
                    .map(|x| x.to_string())
                    .collect::<Vec<String>>();
                write!(f, "({})", elements.join(", "))
            }
        }
    }
}
