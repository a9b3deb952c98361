use std::fmt::Display;

use thiserror::Error;

use crate::Position;

use super::diagnostics::{DiagnosticKind, Severity};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UndefinedVariable { .. } => "UndefinedVariable",
            ErrorImpl::UndefinedFunction { .. } => "UndefinedFunction",
            ErrorImpl::UnknownEnumVariant { .. } => "UnknownEnumVariant",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::Redefinition { .. } => "Redefinition",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::UnresolvedVariableType { .. } => "UnresolvedVariableType",
            ErrorImpl::CannotInferType { .. } => "CannotInferType",
            ErrorImpl::ArithmeticOperands { .. } => "ArithmeticOperands",
            ErrorImpl::ComparisonOperands { .. } => "ComparisonOperands",
            ErrorImpl::LogicalOperands { .. } => "LogicalOperands",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::ConditionNotBool { .. } => "ConditionNotBool",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorImpl::AssignToConstant { .. } => "AssignToConstant",
            ErrorImpl::UnknownField { .. } => "UnknownField",
            ErrorImpl::MissingField { .. } => "MissingField",
            ErrorImpl::FieldTypeMatchError { .. } => "FieldTypeMatchError",
            ErrorImpl::NotAStruct { .. } => "NotAStruct",
            ErrorImpl::InvalidUnaryOperand { .. } => "InvalidUnaryOperand",
            ErrorImpl::ArrayElementMismatch { .. } => "ArrayElementMismatch",
            ErrorImpl::EmptyArray => "EmptyArray",
            ErrorImpl::VariableShadowed { .. } => "VariableShadowed",
            ErrorImpl::MalformedTree { .. } => "MalformedTree",
        }
    }

    /// The diagnostic kind this error is reported under.
    pub fn get_kind(&self) -> DiagnosticKind {
        match &self.internal_error {
            ErrorImpl::UnknownType { .. }
            | ErrorImpl::UnresolvedVariableType { .. }
            | ErrorImpl::ArithmeticOperands { .. }
            | ErrorImpl::ComparisonOperands { .. }
            | ErrorImpl::LogicalOperands { .. }
            | ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::ConditionNotBool { .. }
            | ErrorImpl::ReturnTypeMismatch { .. }
            | ErrorImpl::FieldTypeMatchError { .. }
            | ErrorImpl::NotAStruct { .. }
            | ErrorImpl::InvalidUnaryOperand { .. }
            | ErrorImpl::ArrayElementMismatch { .. }
            | ErrorImpl::EmptyArray => DiagnosticKind::Type,
            ErrorImpl::MalformedTree { .. } => DiagnosticKind::Syntax,
            _ => DiagnosticKind::Semantic,
        }
    }

    pub fn get_severity(&self) -> Severity {
        match &self.internal_error {
            ErrorImpl::VariableShadowed { .. } => Severity::Warning,
            ErrorImpl::MalformedTree { .. } => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UndefinedVariable { variable } => ErrorTip::Suggestion(format!(
                "Declare `{}` with `let` before using it",
                variable
            )),
            ErrorImpl::UndefinedFunction { function } => ErrorTip::Suggestion(format!(
                "Functions must be declared before they are called, `{}` was not found",
                function
            )),
            ErrorImpl::UnknownEnumVariant { path } => ErrorTip::Suggestion(format!(
                "`{}` does not name a variant of a declared enum",
                path
            )),
            ErrorImpl::ArgumentCountMismatch {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::ArgumentTypeMatchError {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "Expected argument type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::Redefinition { name, .. } => ErrorTip::Suggestion(format!(
                "Rename one of the declarations of `{}`, the last one wins",
                name
            )),
            ErrorImpl::UnknownType { .. } => ErrorTip::Suggestion(String::from(
                "User types must be declared before they are used",
            )),
            ErrorImpl::UnresolvedVariableType { .. } => ErrorTip::Suggestion(String::from(
                "Add an explicit type annotation",
            )),
            ErrorImpl::CannotInferType { .. } => ErrorTip::None,
            ErrorImpl::ArithmeticOperands { .. } | ErrorImpl::ComparisonOperands { .. } => {
                ErrorTip::Suggestion(String::from("Both operands must be numbers"))
            }
            ErrorImpl::LogicalOperands { .. } => {
                ErrorTip::Suggestion(String::from("Both operands must be `bool`"))
            }
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ConditionNotBool { .. } => {
                ErrorTip::Suggestion(String::from("Compare the value explicitly, e.g. `x != 0`"))
            }
            ErrorImpl::ReturnOutsideFunction => ErrorTip::None,
            ErrorImpl::ReturnTypeMismatch { expected, .. } => ErrorTip::Suggestion(format!(
                "The enclosing function returns `{}`",
                expected
            )),
            ErrorImpl::AssignToConstant { name } => ErrorTip::Suggestion(format!(
                "Declare `{}` with `let` instead of `const`",
                name
            )),
            ErrorImpl::UnknownField { .. } | ErrorImpl::MissingField { .. } => ErrorTip::None,
            ErrorImpl::FieldTypeMatchError {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "Expected field type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::NotAStruct { .. } => ErrorTip::None,
            ErrorImpl::InvalidUnaryOperand { .. } => ErrorTip::None,
            ErrorImpl::ArrayElementMismatch { .. } => ErrorTip::Suggestion(String::from(
                "All array elements must have the same type",
            )),
            ErrorImpl::EmptyArray => ErrorTip::Suggestion(String::from(
                "Annotate the variable with an array type",
            )),
            ErrorImpl::VariableShadowed { .. } => ErrorTip::None,
            ErrorImpl::MalformedTree { .. } => ErrorTip::Suggestion(String::from(
                "The syntax tree handed to the type checker is corrupt, this is a parser bug",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl ErrorTip {
    pub fn into_option(self) -> Option<String> {
        match self {
            ErrorTip::None => None,
            ErrorTip::Suggestion(suggestion) => Some(suggestion),
        }
    }
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("undefined variable `{variable}`")]
    UndefinedVariable { variable: String },
    #[error("undefined function `{function}`")]
    UndefinedFunction { function: String },
    #[error("unknown enum or variant `{path}`")]
    UnknownEnumVariant { path: String },
    #[error("argument count mismatch calling `{function}`: expected {expected}, received {received}")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("argument type mismatch at position {position}: expected `{expected}`, received `{received}`")]
    ArgumentTypeMatchError {
        position: usize,
        expected: String,
        received: String,
    },
    #[error("{item} `{name}` redefined")]
    Redefinition { item: String, name: String },
    #[error("unknown type `{type_}`")]
    UnknownType { type_: String },
    #[error("cannot infer type for variable `{variable}`")]
    UnresolvedVariableType { variable: String },
    #[error("cannot infer type of `{expression}`")]
    CannotInferType { expression: String },
    #[error("arithmetic operator `{operator}` requires numeric operands, found `{left}` and `{right}`")]
    ArithmeticOperands {
        operator: String,
        left: String,
        right: String,
    },
    #[error("comparison operator `{operator}` requires numeric operands, found `{left}` and `{right}`")]
    ComparisonOperands {
        operator: String,
        left: String,
        right: String,
    },
    #[error("logical operator `{operator}` requires `bool` operands, found `{left}` and `{right}`")]
    LogicalOperands {
        operator: String,
        left: String,
        right: String,
    },
    #[error("types do not match: expected `{expected}`, received `{received}`")]
    TypeMatchError { expected: String, received: String },
    #[error("{construct} condition must be `bool`, found `{received}`")]
    ConditionNotBool { construct: String, received: String },
    #[error("return statement outside of function")]
    ReturnOutsideFunction,
    #[error("return type mismatch: expected `{expected}`, received `{received}`")]
    ReturnTypeMismatch { expected: String, received: String },
    #[error("cannot assign to constant `{name}`")]
    AssignToConstant { name: String },
    #[error("type `{type_}` has no field `{field}`")]
    UnknownField { type_: String, field: String },
    #[error("missing field `{field}` in initializer of `{struct_name}`")]
    MissingField { struct_name: String, field: String },
    #[error("field `{field}` type mismatch: expected `{expected}`, received `{received}`")]
    FieldTypeMatchError {
        field: String,
        expected: String,
        received: String,
    },
    #[error("`{type_}` is not a struct")]
    NotAStruct { type_: String },
    #[error("operator `{operator}` cannot be applied to `{operand}`")]
    InvalidUnaryOperand { operator: String, operand: String },
    #[error("array elements do not match: expected `{expected}`, received `{received}`")]
    ArrayElementMismatch { expected: String, received: String },
    #[error("cannot infer element type of an empty array")]
    EmptyArray,
    #[error("variable `{variable}` shadows an outer declaration")]
    VariableShadowed { variable: String },
    #[error("malformed syntax tree: {reason}")]
    MalformedTree { reason: String },
}
