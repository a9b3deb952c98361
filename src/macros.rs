//! Utility macros for the type checker.
//!
//! This module defines helper macros used throughout the crate:
//!
//! - `MK_PRIMITIVE!` - Creates a shared builtin Type
//! - `MK_IR!` - Creates an IR node
//!
//! These macros reduce boilerplate in the builtin type table and the IR builder.

/// Creates a shared primitive Type.
///
/// # Arguments
///
/// * `$kind` - The TypeKind
/// * `$name` - The keyword the type is spelled with
///
/// # Example
///
/// ```ignore
/// pub static ref I32: TypeRef = MK_PRIMITIVE!(TypeKind::SignedInt, "i32");
/// ```
#[macro_export]
macro_rules! MK_PRIMITIVE {
    ($kind:expr, $name:literal) => {
        std::sync::Arc::new($crate::type_checker::types::Type {
            kind: $kind,
            name: String::from($name),
            shape: $crate::type_checker::types::TypeShape::Primitive,
        })
    };
}

/// Creates an IR node.
///
/// The two-argument form has no children, the three-argument form takes a
/// `Vec<IrNode>` of children. `$name` is an `Option<String>` and `$type` an
/// `Option<TypeRef>`.
///
/// # Example
///
/// ```ignore
/// let node = MK_IR!(IrKind::Var, Some(name), Some(ty));
/// let call = MK_IR!(IrKind::Call, Some(callee), return_type, arguments);
/// ```
#[macro_export]
macro_rules! MK_IR {
    ($kind:expr, $name:expr, $type:expr) => {
        $crate::type_checker::typed_ast::IrNode {
            kind: $kind,
            name: $name,
            ty: $type,
            children: vec![],
        }
    };
    ($kind:expr, $name:expr, $type:expr, $children:expr) => {
        $crate::type_checker::typed_ast::IrNode {
            kind: $kind,
            name: $name,
            ty: $type,
            children: $children,
        }
    };
}
