//! Canonical type representation.
//!
//! A `Type` is identified by its kind and its name. Composite types derive
//! their name from their structure (`&i32`, `[u8; 4]`, `fn(i32) -> bool`), so
//! comparing the name is enough to compare the structure.
//!
//! Builtin types are created once and shared as `Arc<Type>`.

use std::{collections::HashMap, fmt::Display, sync::Arc};

use lazy_static::lazy_static;
use serde::Serialize;

use crate::MK_PRIMITIVE;

pub type TypeRef = Arc<Type>;

lazy_static! {
    pub static ref UNIT: TypeRef = MK_PRIMITIVE!(TypeKind::Unit, "()");
    pub static ref BOOL: TypeRef = MK_PRIMITIVE!(TypeKind::Bool, "bool");

    pub static ref I8: TypeRef = MK_PRIMITIVE!(TypeKind::SignedInt, "i8");
    pub static ref I16: TypeRef = MK_PRIMITIVE!(TypeKind::SignedInt, "i16");
    pub static ref I32: TypeRef = MK_PRIMITIVE!(TypeKind::SignedInt, "i32");
    pub static ref I64: TypeRef = MK_PRIMITIVE!(TypeKind::SignedInt, "i64");
    pub static ref ISIZE: TypeRef = MK_PRIMITIVE!(TypeKind::SignedInt, "isize");

    pub static ref U8: TypeRef = MK_PRIMITIVE!(TypeKind::UnsignedInt, "u8");
    pub static ref U16: TypeRef = MK_PRIMITIVE!(TypeKind::UnsignedInt, "u16");
    pub static ref U32: TypeRef = MK_PRIMITIVE!(TypeKind::UnsignedInt, "u32");
    pub static ref U64: TypeRef = MK_PRIMITIVE!(TypeKind::UnsignedInt, "u64");
    pub static ref USIZE: TypeRef = MK_PRIMITIVE!(TypeKind::UnsignedInt, "usize");

    pub static ref F32: TypeRef = MK_PRIMITIVE!(TypeKind::Float, "f32");
    pub static ref F64: TypeRef = MK_PRIMITIVE!(TypeKind::Float, "f64");

    pub static ref CHAR: TypeRef = MK_PRIMITIVE!(TypeKind::Char, "char");
    pub static ref STRING: TypeRef = MK_PRIMITIVE!(TypeKind::String, "String");
    pub static ref STR: TypeRef = MK_PRIMITIVE!(TypeKind::String, "&str");

    /// Builtin type keywords, checked before anything else when resolving.
    pub static ref BUILTIN_LOOKUP: HashMap<String, TypeRef> = {
        let mut map = HashMap::new();
        for ty in [
            &*UNIT, &*BOOL,
            &*I8, &*I16, &*I32, &*I64, &*ISIZE,
            &*U8, &*U16, &*U32, &*U64, &*USIZE,
            &*F32, &*F64,
            &*CHAR, &*STRING, &*STR,
        ] {
            map.insert(ty.name.clone(), Arc::clone(ty));
        }
        map
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TypeKind {
    Unit,
    Bool,
    SignedInt,
    UnsignedInt,
    Float,
    Char,
    String,
    Array,
    Slice,
    Tuple,
    Struct,
    Enum,
    Function,
    Reference,
    Pointer,
    Generic,
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeKind::Unit => "unit",
            TypeKind::Bool => "bool",
            TypeKind::SignedInt => "int",
            TypeKind::UnsignedInt => "uint",
            TypeKind::Float => "float",
            TypeKind::Char => "char",
            TypeKind::String => "string",
            TypeKind::Array => "array",
            TypeKind::Slice => "slice",
            TypeKind::Tuple => "tuple",
            TypeKind::Struct => "struct",
            TypeKind::Enum => "enum",
            TypeKind::Function => "function",
            TypeKind::Reference => "reference",
            TypeKind::Pointer => "pointer",
            TypeKind::Generic => "generic",
        };
        write!(f, "{}", name)
    }
}

/// Structural payload, by kind.
#[derive(Debug, Clone, Serialize)]
pub enum TypeShape {
    Primitive,
    Function {
        parameters: Vec<TypeRef>,
        return_type: TypeRef,
    },
    /// Parallel lists, in declaration order.
    Struct {
        field_names: Vec<String>,
        field_types: Vec<TypeRef>,
    },
    /// Variants carry no payload type.
    Enum { variants: Vec<String> },
    /// Shared by `Reference` and `Pointer`.
    Indirect { inner: TypeRef, mutable: bool },
    Array { element: TypeRef, size: usize },
    Slice { element: TypeRef },
    Tuple { elements: Vec<TypeRef> },
}

#[derive(Debug, Clone, Serialize)]
pub struct Type {
    pub kind: TypeKind,
    pub name: String,
    pub shape: TypeShape,
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.name == other.name
    }
}

impl Eq for Type {}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Type {
    pub fn function(parameters: Vec<TypeRef>, return_type: TypeRef) -> TypeRef {
        let names = parameters
            .iter()
            .map(|x| x.name.clone())
            .collect::<Vec<String>>();
        Arc::new(Type {
            kind: TypeKind::Function,
            name: format!("fn({}) -> {}", names.join(", "), return_type.name),
            shape: TypeShape::Function {
                parameters,
                return_type,
            },
        })
    }

    pub fn structure(name: &str, field_names: Vec<String>, field_types: Vec<TypeRef>) -> TypeRef {
        Arc::new(Type {
            kind: TypeKind::Struct,
            name: name.to_string(),
            shape: TypeShape::Struct {
                field_names,
                field_types,
            },
        })
    }

    pub fn enumeration(name: &str, variants: Vec<String>) -> TypeRef {
        Arc::new(Type {
            kind: TypeKind::Enum,
            name: name.to_string(),
            shape: TypeShape::Enum { variants },
        })
    }

    pub fn reference(inner: TypeRef, mutable: bool) -> TypeRef {
        Arc::new(Type {
            kind: TypeKind::Reference,
            name: format!("&{}{}", if mutable { "mut " } else { "" }, inner.name),
            shape: TypeShape::Indirect { inner, mutable },
        })
    }

    pub fn pointer(inner: TypeRef, mutable: bool) -> TypeRef {
        Arc::new(Type {
            kind: TypeKind::Pointer,
            name: format!("*{} {}", if mutable { "mut" } else { "const" }, inner.name),
            shape: TypeShape::Indirect { inner, mutable },
        })
    }

    pub fn array(element: TypeRef, size: usize) -> TypeRef {
        Arc::new(Type {
            kind: TypeKind::Array,
            name: format!("[{}; {}]", element.name, size),
            shape: TypeShape::Array { element, size },
        })
    }

    pub fn slice(element: TypeRef) -> TypeRef {
        Arc::new(Type {
            kind: TypeKind::Slice,
            name: format!("[{}]", element.name),
            shape: TypeShape::Slice { element },
        })
    }

    /// An empty tuple is the unit type.
    pub fn tuple(elements: Vec<TypeRef>) -> TypeRef {
        if elements.is_empty() {
            return Arc::clone(&UNIT);
        }
        let names = elements
            .iter()
            .map(|x| x.name.clone())
            .collect::<Vec<String>>();
        Arc::new(Type {
            kind: TypeKind::Tuple,
            name: format!("({})", names.join(", ")),
            shape: TypeShape::Tuple { elements },
        })
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::SignedInt | TypeKind::UnsignedInt | TypeKind::Float
        )
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.kind, TypeKind::SignedInt | TypeKind::UnsignedInt)
    }

    pub fn is_float(&self) -> bool {
        self.kind == TypeKind::Float
    }

    pub fn is_boolean(&self) -> bool {
        self.kind == TypeKind::Bool
    }

    pub fn is_unit(&self) -> bool {
        self.kind == TypeKind::Unit
    }

    pub fn is_reference(&self) -> bool {
        self.kind == TypeKind::Reference
    }

    pub fn is_pointer(&self) -> bool {
        self.kind == TypeKind::Pointer
    }

    /// Field names of a struct, or variant names of an enum.
    pub fn field_names(&self) -> &[String] {
        match &self.shape {
            TypeShape::Struct { field_names, .. } => field_names,
            TypeShape::Enum { variants } => variants,
            _ => &[],
        }
    }

    pub fn field_type(&self, field: &str) -> Option<&TypeRef> {
        match &self.shape {
            TypeShape::Struct {
                field_names,
                field_types,
            } => field_names
                .iter()
                .position(|x| x == field)
                .map(|index| &field_types[index]),
            _ => None,
        }
    }

    pub fn has_variant(&self, variant: &str) -> bool {
        match &self.shape {
            TypeShape::Enum { variants } => variants.iter().any(|x| x == variant),
            _ => false,
        }
    }

    pub fn parameters(&self) -> Option<&[TypeRef]> {
        match &self.shape {
            TypeShape::Function { parameters, .. } => Some(parameters),
            _ => None,
        }
    }

    pub fn return_type(&self) -> Option<&TypeRef> {
        match &self.shape {
            TypeShape::Function { return_type, .. } => Some(return_type),
            _ => None,
        }
    }

    /// The type behind a reference or pointer.
    pub fn referenced(&self) -> Option<&TypeRef> {
        match &self.shape {
            TypeShape::Indirect { inner, .. } => Some(inner),
            _ => None,
        }
    }

    /// The element type of an array or slice.
    pub fn element(&self) -> Option<&TypeRef> {
        match &self.shape {
            TypeShape::Array { element, .. } | TypeShape::Slice { element } => Some(element),
            _ => None,
        }
    }
}
