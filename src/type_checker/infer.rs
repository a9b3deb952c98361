//! Expression type inference.
//!
//! Every expression is lowered into an `IrNode` whose `ty` is the inferred
//! type. A failed check records one diagnostic and yields a placeholder with
//! no type; callers seeing an untyped operand propagate it silently instead
//! of reporting again.

use std::sync::Arc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{
    ast::{
        ast::Expr,
        expressions::{
            ArrayExpr, AssignmentExpr, BinaryExpr, CallExpr, LiteralExpr, MemberExpr,
            OperatorClass, PrefixExpr, PrefixOperator, StructInitExpr, SymbolExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    MK_IR,
};

use super::{
    scope::SymbolKind,
    type_checker::TypeChecker,
    typed_ast::{IrKind, IrNode},
    types::{Type, TypeKind, TypeRef, BOOL, CHAR, F64, I32, I64, STR},
};

lazy_static! {
    static ref INTEGER_PATTERN: Regex = Regex::new(r"^-?[0-9]+$").unwrap();
    static ref FLOAT_PATTERN: Regex =
        Regex::new(r"^-?[0-9]+(\.[0-9]+([eE][+-]?[0-9]+)?|[eE][+-]?[0-9]+)$").unwrap();
    static ref CHAR_PATTERN: Regex =
        Regex::new(r#"^'([^'\\]|\\[nrt0'"\\]|\\x[0-9a-fA-F]{2}|\\u\{[0-9a-fA-F]{1,6}\})'$"#).unwrap();
}

/// Infers the type of a literal from its spelling.
///
/// Integers are `i32` when they fit, `i64` otherwise.
pub fn infer_literal(value: &str) -> Option<TypeRef> {
    let value = value.trim();

    if INTEGER_PATTERN.is_match(value) {
        return if value.parse::<i32>().is_ok() {
            Some(I32.clone())
        } else {
            Some(I64.clone())
        };
    }
    if FLOAT_PATTERN.is_match(value) {
        return Some(F64.clone());
    }
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return Some(STR.clone());
    }
    if CHAR_PATTERN.is_match(value) {
        return Some(CHAR.clone());
    }

    match value {
        "true" | "false" => Some(BOOL.clone()),
        _ => None,
    }
}

/// Whether a value of type `actual` produced by `expr` may be stored where
/// `expected` is declared. Numeric literals adapt to any type of their family.
pub fn is_assignable(expr: &Expr, actual: &TypeRef, expected: &TypeRef) -> bool {
    if actual == expected {
        return true;
    }
    is_numeric_literal(expr)
        && ((actual.is_integer() && expected.is_integer())
            || (actual.is_float() && expected.is_float()))
}

fn is_numeric_literal(expr: &Expr) -> bool {
    match expr {
        Expr::Literal(literal) => {
            let value = literal.value.trim();
            INTEGER_PATTERN.is_match(value) || FLOAT_PATTERN.is_match(value)
        }
        Expr::Prefix(prefix) => {
            prefix.operator == PrefixOperator::Negate && is_numeric_literal(&prefix.right_expr)
        }
        _ => false,
    }
}

pub fn type_check_expr(type_checker: &mut TypeChecker, ast: &Expr) -> Result<IrNode, Error> {
    type_checker.enter(ast.get_span())?;
    let node = match ast {
        Expr::Literal(literal) => type_check_literal(type_checker, literal),
        Expr::Symbol(symbol) => type_check_symbol(type_checker, symbol),
        Expr::Call(call) => type_check_call(type_checker, call),
        Expr::Binary(binary) => type_check_binary(type_checker, binary),
        Expr::Assignment(assignment) => type_check_assignment(type_checker, assignment),
        Expr::Prefix(prefix) => type_check_prefix(type_checker, prefix),
        Expr::Member(member) => type_check_member(type_checker, member),
        Expr::StructInit(struct_init) => type_check_struct_init(type_checker, struct_init),
        Expr::Array(array) => type_check_array(type_checker, array),
    };
    type_checker.leave();

    let node = node?;
    match node.get_type() {
        Some(ty) => trace!("{:?} expression inferred as `{}`", ast.get_expr_type(), ty),
        None => trace!("{:?} expression left untyped", ast.get_expr_type()),
    }
    Ok(node)
}

fn type_check_literal(
    type_checker: &mut TypeChecker,
    literal: &LiteralExpr,
) -> Result<IrNode, Error> {
    match infer_literal(&literal.value) {
        Some(ty) => Ok(MK_IR!(IrKind::Const, Some(literal.value.clone()), Some(ty))),
        None => {
            type_checker.report(
                ErrorImpl::CannotInferType {
                    expression: literal.value.clone(),
                },
                &literal.span,
            );
            Ok(IrNode::placeholder())
        }
    }
}

fn type_check_symbol(type_checker: &mut TypeChecker, symbol: &SymbolExpr) -> Result<IrNode, Error> {
    TypeChecker::require_name(&symbol.value, "identifier", &symbol.span)?;

    if let Some((enum_name, variant)) = symbol.enum_path() {
        let enum_type = type_checker
            .scopes
            .lookup_global(enum_name)
            .filter(|x| x.kind == SymbolKind::Enum && x.ty.has_variant(variant))
            .map(|x| x.ty.clone());

        return match enum_type {
            Some(ty) => Ok(MK_IR!(IrKind::EnumValue, Some(symbol.value.clone()), Some(ty))),
            None => {
                type_checker.report(
                    ErrorImpl::UnknownEnumVariant {
                        path: symbol.value.clone(),
                    },
                    &symbol.span,
                );
                Ok(IrNode::placeholder())
            }
        };
    }

    match type_checker.scopes.lookup(&symbol.value) {
        Some(found) => Ok(MK_IR!(
            IrKind::Var,
            Some(symbol.value.clone()),
            Some(found.ty.clone())
        )),
        None => {
            type_checker.report(
                ErrorImpl::UndefinedVariable {
                    variable: symbol.value.clone(),
                },
                &symbol.span,
            );
            Ok(IrNode::placeholder())
        }
    }
}

fn type_check_call(type_checker: &mut TypeChecker, call: &CallExpr) -> Result<IrNode, Error> {
    TypeChecker::require_name(&call.callee, "callee", &call.span)?;

    let function_type = match type_checker.scopes.lookup_global(&call.callee) {
        Some(symbol) if symbol.kind == SymbolKind::Function => Arc::clone(&symbol.ty),
        _ => {
            type_checker.report(
                ErrorImpl::UndefinedFunction {
                    function: call.callee.clone(),
                },
                &call.span,
            );
            return Ok(IrNode::placeholder());
        }
    };

    let (parameters, return_type) = match (function_type.parameters(), function_type.return_type())
    {
        (Some(parameters), Some(return_type)) => (parameters, return_type),
        _ => {
            return Err(Error::new(
                ErrorImpl::MalformedTree {
                    reason: format!("function `{}` has no signature", call.callee),
                },
                call.span.start.clone(),
            ))
        }
    };

    if parameters.len() != call.arguments.len() {
        type_checker.report(
            ErrorImpl::ArgumentCountMismatch {
                function: call.callee.clone(),
                expected: parameters.len(),
                received: call.arguments.len(),
            },
            &call.span,
        );
        return Ok(IrNode::placeholder());
    }

    let mut arguments = vec![];
    for (index, (argument, parameter)) in call.arguments.iter().zip(parameters.iter()).enumerate() {
        let node = type_check_expr(type_checker, argument)?;
        let received = match node.get_type() {
            Some(received) => received.clone(),
            None => return Ok(IrNode::placeholder()),
        };

        if &received != parameter {
            type_checker.report(
                ErrorImpl::ArgumentTypeMatchError {
                    position: index + 1,
                    expected: parameter.to_string(),
                    received: received.to_string(),
                },
                argument.get_span(),
            );
            return Ok(IrNode::placeholder());
        }
        arguments.push(node);
    }

    Ok(MK_IR!(
        IrKind::Call,
        Some(call.callee.clone()),
        Some(return_type.clone()),
        arguments
    ))
}

fn type_check_binary(type_checker: &mut TypeChecker, binary: &BinaryExpr) -> Result<IrNode, Error> {
    let left = type_check_expr(type_checker, &binary.left)?;
    let right = type_check_expr(type_checker, &binary.right)?;

    let (left_type, right_type) = match (left.get_type(), right.get_type()) {
        (Some(left_type), Some(right_type)) => (left_type.clone(), right_type.clone()),
        _ => return Ok(IrNode::placeholder()),
    };

    let operator = binary.operator.symbol().to_string();
    let result = match binary.operator.class() {
        OperatorClass::Arithmetic => {
            if !left_type.is_numeric() || !right_type.is_numeric() {
                type_checker.report(
                    ErrorImpl::ArithmeticOperands {
                        operator,
                        left: left_type.to_string(),
                        right: right_type.to_string(),
                    },
                    &binary.span,
                );
                return Ok(IrNode::placeholder());
            }
            if left_type.is_float() || right_type.is_float() {
                F64.clone()
            } else {
                I32.clone()
            }
        }
        OperatorClass::Comparison => {
            if !left_type.is_numeric() || !right_type.is_numeric() {
                type_checker.report(
                    ErrorImpl::ComparisonOperands {
                        operator,
                        left: left_type.to_string(),
                        right: right_type.to_string(),
                    },
                    &binary.span,
                );
                return Ok(IrNode::placeholder());
            }
            BOOL.clone()
        }
        OperatorClass::Logical => {
            if !left_type.is_boolean() || !right_type.is_boolean() {
                type_checker.report(
                    ErrorImpl::LogicalOperands {
                        operator,
                        left: left_type.to_string(),
                        right: right_type.to_string(),
                    },
                    &binary.span,
                );
                return Ok(IrNode::placeholder());
            }
            BOOL.clone()
        }
    };

    Ok(MK_IR!(
        IrKind::BinOp,
        Some(binary.operator.symbol().to_string()),
        Some(result),
        vec![left, right]
    ))
}

fn type_check_assignment(
    type_checker: &mut TypeChecker,
    assignment: &AssignmentExpr,
) -> Result<IrNode, Error> {
    let assignee = type_check_expr(type_checker, &assignment.assignee)?;
    let value = type_check_expr(type_checker, &assignment.value)?;

    if let Expr::Symbol(symbol) = assignment.assignee.as_ref() {
        let is_constant = type_checker
            .scopes
            .lookup(&symbol.value)
            .map(|x| x.kind == SymbolKind::Const)
            .unwrap_or(false);
        if is_constant {
            type_checker.report(
                ErrorImpl::AssignToConstant {
                    name: symbol.value.clone(),
                },
                &assignment.span,
            );
            return Ok(IrNode::placeholder());
        }
    }

    let (assignee_type, value_type) = match (assignee.get_type(), value.get_type()) {
        (Some(assignee_type), Some(value_type)) => (assignee_type.clone(), value_type.clone()),
        _ => return Ok(IrNode::placeholder()),
    };

    if assignee_type != value_type {
        type_checker.report(
            ErrorImpl::TypeMatchError {
                expected: assignee_type.to_string(),
                received: value_type.to_string(),
            },
            &assignment.span,
        );
        return Ok(IrNode::placeholder());
    }

    Ok(MK_IR!(
        IrKind::Assign,
        None,
        Some(assignee_type),
        vec![assignee, value]
    ))
}

fn type_check_prefix(type_checker: &mut TypeChecker, prefix: &PrefixExpr) -> Result<IrNode, Error> {
    let operand = type_check_expr(type_checker, &prefix.right_expr)?;
    let operand_type = match operand.get_type() {
        Some(operand_type) => operand_type.clone(),
        None => return Ok(IrNode::placeholder()),
    };

    let result = match prefix.operator {
        PrefixOperator::Negate if operand_type.is_numeric() => Some(operand_type.clone()),
        PrefixOperator::Not if operand_type.is_boolean() => Some(BOOL.clone()),
        PrefixOperator::Reference => Some(Type::reference(operand_type.clone(), false)),
        PrefixOperator::MutableReference => Some(Type::reference(operand_type.clone(), true)),
        PrefixOperator::Dereference => operand_type.referenced().cloned(),
        _ => None,
    };

    let result = match result {
        Some(result) => result,
        None => {
            type_checker.report(
                ErrorImpl::InvalidUnaryOperand {
                    operator: prefix.operator.to_string().trim().to_string(),
                    operand: operand_type.to_string(),
                },
                &prefix.span,
            );
            return Ok(IrNode::placeholder());
        }
    };

    Ok(MK_IR!(
        IrKind::UnaryOp,
        Some(prefix.operator.to_string().trim().to_string()),
        Some(result),
        vec![operand]
    ))
}

fn type_check_member(type_checker: &mut TypeChecker, member: &MemberExpr) -> Result<IrNode, Error> {
    TypeChecker::require_name(&member.property, "field name", &member.span)?;

    let object = type_check_expr(type_checker, &member.object)?;
    let object_type = match object.get_type() {
        Some(object_type) => object_type.clone(),
        None => return Ok(IrNode::placeholder()),
    };

    // Field access auto-dereferences one level of reference.
    let target = match object_type.referenced() {
        Some(inner) if object_type.is_reference() => inner.clone(),
        _ => object_type.clone(),
    };

    if target.kind != TypeKind::Struct {
        type_checker.report(
            ErrorImpl::NotAStruct {
                type_: object_type.to_string(),
            },
            &member.span,
        );
        return Ok(IrNode::placeholder());
    }

    match target.field_type(&member.property) {
        Some(field_type) => Ok(MK_IR!(
            IrKind::Member,
            Some(member.property.clone()),
            Some(field_type.clone()),
            vec![object]
        )),
        None => {
            type_checker.report(
                ErrorImpl::UnknownField {
                    type_: target.to_string(),
                    field: member.property.clone(),
                },
                &member.span,
            );
            Ok(IrNode::placeholder())
        }
    }
}

fn type_check_struct_init(
    type_checker: &mut TypeChecker,
    struct_init: &StructInitExpr,
) -> Result<IrNode, Error> {
    TypeChecker::require_name(&struct_init.name, "struct name", &struct_init.span)?;

    let struct_type = match type_checker.scopes.lookup_global(&struct_init.name) {
        Some(symbol) if symbol.kind == SymbolKind::Struct => symbol.ty.clone(),
        Some(symbol) => {
            let type_ = symbol.ty.to_string();
            type_checker.report(ErrorImpl::NotAStruct { type_ }, &struct_init.span);
            return Ok(IrNode::placeholder());
        }
        None => {
            type_checker.report(
                ErrorImpl::UnknownType {
                    type_: struct_init.name.clone(),
                },
                &struct_init.span,
            );
            return Ok(IrNode::placeholder());
        }
    };

    let mut failed = false;
    let mut seen: Vec<&str> = vec![];
    let mut fields = vec![];

    for (field_name, field_expr) in struct_init.fields.iter() {
        let node = type_check_expr(type_checker, field_expr)?;

        if seen.contains(&field_name.as_str()) {
            type_checker.report(
                ErrorImpl::Redefinition {
                    item: String::from("field"),
                    name: field_name.clone(),
                },
                field_expr.get_span(),
            );
            failed = true;
            continue;
        }
        seen.push(field_name);

        let expected = match struct_type.field_type(field_name) {
            Some(expected) => expected.clone(),
            None => {
                type_checker.report(
                    ErrorImpl::UnknownField {
                        type_: struct_type.to_string(),
                        field: field_name.clone(),
                    },
                    field_expr.get_span(),
                );
                failed = true;
                continue;
            }
        };

        match node.get_type() {
            Some(received) if !is_assignable(field_expr, received, &expected) => {
                type_checker.report(
                    ErrorImpl::FieldTypeMatchError {
                        field: field_name.clone(),
                        expected: expected.to_string(),
                        received: received.to_string(),
                    },
                    field_expr.get_span(),
                );
                failed = true;
            }
            Some(_) => {}
            None => failed = true,
        }

        fields.push(MK_IR!(
            IrKind::Field,
            Some(field_name.clone()),
            Some(expected),
            vec![node]
        ));
    }

    for declared in struct_type.field_names().iter() {
        if !seen.contains(&declared.as_str()) {
            type_checker.report(
                ErrorImpl::MissingField {
                    struct_name: struct_type.to_string(),
                    field: declared.clone(),
                },
                &struct_init.span,
            );
            failed = true;
        }
    }

    if failed {
        return Ok(IrNode::placeholder());
    }

    Ok(MK_IR!(
        IrKind::StructInit,
        Some(struct_init.name.clone()),
        Some(struct_type),
        fields
    ))
}

fn type_check_array(type_checker: &mut TypeChecker, array: &ArrayExpr) -> Result<IrNode, Error> {
    if array.elements.is_empty() {
        type_checker.report(ErrorImpl::EmptyArray, &array.span);
        return Ok(IrNode::placeholder());
    }

    let mut elements = vec![];
    for element in array.elements.iter() {
        elements.push(type_check_expr(type_checker, element)?);
    }

    let mut types: Vec<TypeRef> = vec![];
    for node in elements.iter() {
        match node.get_type() {
            Some(ty) => types.push(ty.clone()),
            None => return Ok(IrNode::placeholder()),
        }
    }

    let element_type = types[0].clone();
    for (ty, element) in types.iter().zip(array.elements.iter()).skip(1) {
        if ty != &element_type {
            type_checker.report(
                ErrorImpl::ArrayElementMismatch {
                    expected: element_type.to_string(),
                    received: ty.to_string(),
                },
                element.get_span(),
            );
            return Ok(IrNode::placeholder());
        }
    }

    let ty = Type::array(element_type, elements.len());
    Ok(MK_IR!(IrKind::Array, None, Some(ty), elements))
}
