use std::fmt::Display;

use crate::Span;

use super::ast::Expr;

// LITERALS

/// Literal Expression
/// Represents a literal exactly as it was written: `42`, `3.14`, `"hi"`, `'c'`, `true`.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: String,
    pub span: Span,
}

/// Symbol Expression
/// Represents an identifier in the AST, including qualified `Enum::Variant` paths.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

impl SymbolExpr {
    /// Splits an `Enum::Variant` path into its two halves.
    ///
    /// Plain identifiers return `None`.
    pub fn enum_path(&self) -> Option<(&str, &str)> {
        self.value.split_once("::")
    }
}

// COMPLEX

/// Call Expression
/// Represents a call of a named function in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: String,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

/// How a binary operator constrains its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    Arithmetic,
    Comparison,
    Logical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    And,
    Or,
}

impl BinaryOperator {
    pub fn class(&self) -> OperatorClass {
        match self {
            BinaryOperator::Plus
            | BinaryOperator::Minus
            | BinaryOperator::Star
            | BinaryOperator::Slash
            | BinaryOperator::Percent => OperatorClass::Arithmetic,
            BinaryOperator::Equals
            | BinaryOperator::NotEquals
            | BinaryOperator::Less
            | BinaryOperator::Greater
            | BinaryOperator::LessEquals
            | BinaryOperator::GreaterEquals => OperatorClass::Comparison,
            BinaryOperator::And | BinaryOperator::Or => OperatorClass::Logical,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Star => "*",
            BinaryOperator::Slash => "/",
            BinaryOperator::Percent => "%",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Binary Expression
/// Represents an operator applied to two expressions in the AST.
///
/// Member access and assignment have their own nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOperator,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Assignment Expression
/// Represents `assignee = value` in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub assignee: Box<Expr>,
    pub value: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    /// `-x`
    Negate,
    /// `!x`
    Not,
    /// `&x`
    Reference,
    /// `&mut x`
    MutableReference,
    /// `*x`
    Dereference,
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            PrefixOperator::Negate => "-",
            PrefixOperator::Not => "!",
            PrefixOperator::Reference => "&",
            PrefixOperator::MutableReference => "&mut ",
            PrefixOperator::Dereference => "*",
        };
        write!(f, "{}", symbol)
    }
}

/// Prefix Expression
/// Represents a prefix operation on an expression in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: PrefixOperator,
    pub right_expr: Box<Expr>,
    pub span: Span,
}

/// Member Expression
/// Represents `object.property` field access.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub property: String,
    pub span: Span,
}

/// Struct Initialization Expression
/// Represents the initialization of a struct in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct StructInitExpr {
    pub name: String,
    pub fields: Vec<(String, Expr)>,
    pub span: Span,
}

/// Array Expression
/// Represents an array literal `[a, b, c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpr {
    pub elements: Vec<Expr>,
    pub span: Span,
}
