//! Typed intermediate representation.
//!
//! The type checker lowers the syntax tree into a uniform tree of `IrNode`s.
//! Each node mirrors one checked syntax node and carries its resolved type.
//! Subtrees that failed to check are reduced to `Placeholder` nodes so the
//! parent can still be built.
//!
//! This tree is consumed by code generation.

use serde::Serialize;

use crate::MK_IR;

use super::types::{TypeRef, UNIT};

/// IR node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IrKind {
    Program,
    Block,
    VarDecl,
    Function,
    Param,
    Struct,
    Field,
    Enum,
    Variant,
    TypeAlias,
    If,
    While,
    For,
    Return,
    Const,
    Var,
    EnumValue,
    Call,
    BinOp,
    UnaryOp,
    Assign,
    Member,
    StructInit,
    Array,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrNode {
    pub kind: IrKind,
    pub name: Option<String>,
    pub ty: Option<TypeRef>,
    pub children: Vec<IrNode>,
}

impl IrNode {
    /// Stand-in for a subtree that failed to check.
    pub fn placeholder() -> Self {
        MK_IR!(IrKind::Placeholder, None, None)
    }

    /// Stand-in for a declaration that failed to resolve its type.
    pub fn unit_placeholder() -> Self {
        MK_IR!(IrKind::Placeholder, None, Some(UNIT.clone()))
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == IrKind::Placeholder
    }

    pub fn get_type(&self) -> Option<&TypeRef> {
        self.ty.as_ref()
    }
}
