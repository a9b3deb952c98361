use crate::Span;

use super::{
    expressions::{
        ArrayExpr, AssignmentExpr, BinaryExpr, BinaryOperator, CallExpr, LiteralExpr, MemberExpr,
        PrefixExpr, PrefixOperator, StructInitExpr, SymbolExpr,
    },
    statements::{
        BlockStmt, EnumDeclStmt, ExpressionStmt, FnDeclStmt, ForStmt, IfStmt, ReturnStmt,
        StructDeclStmt, TypeAliasStmt, VarDeclStmt, WhileStmt,
    },
};

/// Statement Types
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StmtType {
    ExpressionStmt,
    BlockStmt,
    VarDeclStmt,
    FnDeclStmt,
    StructDeclStmt,
    EnumDeclStmt,
    TypeAliasStmt,
    IfStmt,
    WhileStmt,
    ForStmt,
    ReturnStmt,
}

/// Statement
///
/// Every statement kind the parser can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(BlockStmt),
    Expression(ExpressionStmt),
    VarDecl(VarDeclStmt),
    FnDecl(FnDeclStmt),
    StructDecl(StructDeclStmt),
    EnumDecl(EnumDeclStmt),
    TypeAlias(TypeAliasStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(ReturnStmt),
}

impl Stmt {
    /// Returns the kind tag of the statement.
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::Block(_) => StmtType::BlockStmt,
            Stmt::Expression(_) => StmtType::ExpressionStmt,
            Stmt::VarDecl(_) => StmtType::VarDeclStmt,
            Stmt::FnDecl(_) => StmtType::FnDeclStmt,
            Stmt::StructDecl(_) => StmtType::StructDeclStmt,
            Stmt::EnumDecl(_) => StmtType::EnumDeclStmt,
            Stmt::TypeAlias(_) => StmtType::TypeAliasStmt,
            Stmt::If(_) => StmtType::IfStmt,
            Stmt::While(_) => StmtType::WhileStmt,
            Stmt::For(_) => StmtType::ForStmt,
            Stmt::Return(_) => StmtType::ReturnStmt,
        }
    }

    /// Returns the span of the statement.
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Block(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::FnDecl(stmt) => &stmt.span,
            Stmt::StructDecl(stmt) => &stmt.span,
            Stmt::EnumDecl(stmt) => &stmt.span,
            Stmt::TypeAlias(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::For(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
        }
    }

    /// Wraps an expression into an expression statement sharing its span.
    pub fn expression(expression: Expr) -> Self {
        let span = expression.get_span().clone();
        Stmt::Expression(ExpressionStmt { expression, span })
    }
}

/// Expression Types
///
/// Defines the various kinds of expressions in the AST.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    Literal,
    Symbol,
    Call,
    Binary,
    Assignment,
    Prefix,
    Member,
    StructInit,
    Array,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Symbol(SymbolExpr),
    Call(CallExpr),
    Binary(BinaryExpr),
    Assignment(AssignmentExpr),
    Prefix(PrefixExpr),
    Member(MemberExpr),
    StructInit(StructInitExpr),
    Array(ArrayExpr),
}

impl Expr {
    /// Returns the expression type of the expression.
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Literal(_) => ExprType::Literal,
            Expr::Symbol(_) => ExprType::Symbol,
            Expr::Call(_) => ExprType::Call,
            Expr::Binary(_) => ExprType::Binary,
            Expr::Assignment(_) => ExprType::Assignment,
            Expr::Prefix(_) => ExprType::Prefix,
            Expr::Member(_) => ExprType::Member,
            Expr::StructInit(_) => ExprType::StructInit,
            Expr::Array(_) => ExprType::Array,
        }
    }

    /// Returns the span of the expression.
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Literal(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Assignment(expr) => &expr.span,
            Expr::Prefix(expr) => &expr.span,
            Expr::Member(expr) => &expr.span,
            Expr::StructInit(expr) => &expr.span,
            Expr::Array(expr) => &expr.span,
        }
    }

    pub fn literal(value: &str, span: Span) -> Self {
        Expr::Literal(LiteralExpr {
            value: value.to_string(),
            span,
        })
    }

    pub fn symbol(value: &str, span: Span) -> Self {
        Expr::Symbol(SymbolExpr {
            value: value.to_string(),
            span,
        })
    }

    pub fn call(callee: &str, arguments: Vec<Expr>, span: Span) -> Self {
        Expr::Call(CallExpr {
            callee: callee.to_string(),
            arguments,
            span,
        })
    }

    pub fn binary(left: Expr, operator: BinaryOperator, right: Expr, span: Span) -> Self {
        Expr::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            span,
        })
    }

    pub fn assignment(assignee: Expr, value: Expr, span: Span) -> Self {
        Expr::Assignment(AssignmentExpr {
            assignee: Box::new(assignee),
            value: Box::new(value),
            span,
        })
    }

    pub fn prefix(operator: PrefixOperator, right_expr: Expr, span: Span) -> Self {
        Expr::Prefix(PrefixExpr {
            operator,
            right_expr: Box::new(right_expr),
            span,
        })
    }

    pub fn member(object: Expr, property: &str, span: Span) -> Self {
        Expr::Member(MemberExpr {
            object: Box::new(object),
            property: property.to_string(),
            span,
        })
    }

    pub fn struct_init(name: &str, fields: Vec<(String, Expr)>, span: Span) -> Self {
        Expr::StructInit(StructInitExpr {
            name: name.to_string(),
            fields,
            span,
        })
    }

    pub fn array(elements: Vec<Expr>, span: Span) -> Self {
        Expr::Array(ArrayExpr { elements, span })
    }
}
