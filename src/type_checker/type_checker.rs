use log::{debug, trace};
use serde::Serialize;

use crate::{
    ast::{
        ast::{Expr, Stmt},
        statements::{
            BlockStmt, EnumDeclStmt, FnDeclStmt, ForStmt, IfStmt, ReturnStmt, StructDeclStmt,
            TypeAliasStmt, VarDeclStmt, WhileStmt,
        },
        types::TypeAnnotation,
    },
    errors::{
        diagnostics::{Diagnostic, ErrorContext},
        errors::{Error, ErrorImpl},
    },
    options::TypeCheckerOptions,
    Span, MK_IR,
};

use super::{
    infer::{is_assignable, type_check_expr},
    resolver::resolve_type,
    scope::{Environment, ScopeStack, Symbol, SymbolKind},
    typed_ast::{IrKind, IrNode},
    types::{Type, TypeRef, I32, UNIT, USIZE},
};

/// Output of a full run: the typed tree, every diagnostic in traversal order,
/// and whether none of them was an error.
#[derive(Debug, Clone, Serialize)]
pub struct TypeCheckResult {
    pub ir: IrNode,
    pub diagnostics: Vec<Diagnostic>,
    pub success: bool,
}

/// State of one analysis run: the scope stack and the diagnostics reported
/// so far. Nothing is shared between runs.
#[derive(Debug)]
pub struct TypeChecker {
    pub scopes: ScopeStack,
    pub errors: ErrorContext,
    pub options: TypeCheckerOptions,
    depth: usize,
}

impl TypeChecker {
    pub fn new(options: TypeCheckerOptions) -> Self {
        TypeChecker::with_global(options, Environment::new())
    }

    /// Starts from a copy of another run's global scope, so independent items
    /// can be checked against the same declarations.
    pub fn with_global(options: TypeCheckerOptions, global: Environment) -> Self {
        TypeChecker {
            scopes: ScopeStack::with_global(global),
            errors: ErrorContext::new(options.max_diagnostics),
            options,
            depth: 0,
        }
    }

    /// Records `error` at the start of `span`.
    pub fn report(&mut self, error: ErrorImpl, span: &Span) {
        self.errors
            .report_error(&Error::new(error, span.start.clone()));
    }

    pub fn resolve(&self, annotation: &TypeAnnotation) -> Option<TypeRef> {
        resolve_type(&self.scopes, annotation)
    }

    /// Tracks nesting; a tree deeper than `max_depth` is treated as corrupt.
    pub(crate) fn enter(&mut self, span: &Span) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(Error::new(
                ErrorImpl::MalformedTree {
                    reason: format!("nesting deeper than {} levels", self.options.max_depth),
                },
                span.start.clone(),
            ));
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Names coming from the parser are never empty.
    pub(crate) fn require_name(name: &str, what: &str, span: &Span) -> Result<(), Error> {
        if name.trim().is_empty() {
            return Err(Error::new(
                ErrorImpl::MalformedTree {
                    reason: format!("empty {}", what),
                },
                span.start.clone(),
            ));
        }
        Ok(())
    }

    /// Checks every top-level statement in order. The program block itself is
    /// the global scope.
    ///
    /// A corrupt tree ends the pass after recording one fatal diagnostic; the
    /// statements checked so far are kept.
    pub fn check_program(&mut self, ast: &BlockStmt) -> IrNode {
        self.depth = 0;
        let mut children = vec![];

        for stmt in ast.iter() {
            match type_check_stmt(self, stmt) {
                Ok(node) => children.push(node),
                Err(error) => {
                    self.errors.report_error(&error);
                    while self.scopes.pop().is_some() {}
                    break;
                }
            }
        }

        MK_IR!(IrKind::Program, None, None, children)
    }

    pub fn finish(self, ir: IrNode) -> TypeCheckResult {
        let success = !self.errors.had_error();
        TypeCheckResult {
            ir,
            diagnostics: self.errors.into_diagnostics(),
            success,
        }
    }

    /// Inserts a function, struct, enum or alias into the global scope.
    /// Replacing another item is reported, but the new declaration still wins.
    fn declare_item(&mut self, symbol: Symbol, item: &str) {
        let name = symbol.name.clone();
        let span = symbol.span.clone();
        debug!("declared {} `{}`: {}", item, name, symbol.ty);

        if let Some(previous) = self.scopes.insert_global(symbol) {
            if previous.kind.is_item() {
                self.report(
                    ErrorImpl::Redefinition {
                        item: item.to_string(),
                        name,
                    },
                    &span,
                );
            }
        }
    }
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, ast: &Stmt) -> Result<IrNode, Error> {
    type_checker.enter(ast.get_span())?;
    trace!("checking {:?} at {}", ast.get_stmt_type(), ast.get_span().start);
    let node = match ast {
        Stmt::Block(block) => type_check_block(type_checker, block),
        Stmt::Expression(expression) => type_check_expr(type_checker, &expression.expression),
        Stmt::VarDecl(var_decl) => type_check_var_decl(type_checker, var_decl),
        Stmt::FnDecl(fn_decl) => type_check_fn_decl(type_checker, fn_decl),
        Stmt::StructDecl(struct_decl) => type_check_struct_decl(type_checker, struct_decl),
        Stmt::EnumDecl(enum_decl) => type_check_enum_decl(type_checker, enum_decl),
        Stmt::TypeAlias(type_alias) => type_check_type_alias(type_checker, type_alias),
        Stmt::If(if_stmt) => type_check_if(type_checker, if_stmt),
        Stmt::While(while_stmt) => type_check_while(type_checker, while_stmt),
        Stmt::For(for_stmt) => type_check_for(type_checker, for_stmt),
        Stmt::Return(return_stmt) => type_check_return(type_checker, return_stmt),
    };
    type_checker.leave();
    node
}

/// Checks a nested block in its own scope.
pub fn type_check_block(type_checker: &mut TypeChecker, ast: &BlockStmt) -> Result<IrNode, Error> {
    type_checker.scopes.push(Environment::new());
    let body = type_check_body(type_checker, ast);
    type_checker.scopes.pop();

    Ok(MK_IR!(IrKind::Block, None, None, body?))
}

/// Checks the statements of `ast` in the current scope.
fn type_check_body(type_checker: &mut TypeChecker, ast: &BlockStmt) -> Result<Vec<IrNode>, Error> {
    let mut body = vec![];
    for stmt in ast.iter() {
        body.push(type_check_stmt(type_checker, stmt)?);
    }
    Ok(body)
}

fn type_check_var_decl(
    type_checker: &mut TypeChecker,
    var_decl: &VarDeclStmt,
) -> Result<IrNode, Error> {
    TypeChecker::require_name(&var_decl.identifier, "variable name", &var_decl.span)?;

    let initializer = match &var_decl.assigned_value {
        Some(value) => Some(type_check_expr(type_checker, value)?),
        None => None,
    };
    let inferred = initializer.as_ref().and_then(|x| x.get_type().cloned());

    let var_type = match &var_decl.explicit_type {
        Some(annotation) => match type_checker.resolve(annotation) {
            Some(explicit) => {
                if let (Some(value), Some(inferred)) = (&var_decl.assigned_value, &inferred) {
                    if !is_assignable(value, inferred, &explicit) {
                        type_checker.report(
                            ErrorImpl::TypeMatchError {
                                expected: explicit.to_string(),
                                received: inferred.to_string(),
                            },
                            value.get_span(),
                        );
                    }
                }
                Some(explicit)
            }
            None => {
                type_checker.report(
                    ErrorImpl::UnknownType {
                        type_: annotation.to_string(),
                    },
                    &var_decl.span,
                );
                None
            }
        },
        None => {
            if inferred.is_none() {
                type_checker.report(
                    ErrorImpl::UnresolvedVariableType {
                        variable: var_decl.identifier.clone(),
                    },
                    &var_decl.span,
                );
            }
            inferred
        }
    };

    let var_type = match var_type {
        Some(var_type) => var_type,
        None => return Ok(IrNode::unit_placeholder()),
    };

    if type_checker.options.warn_on_shadow
        && type_checker
            .scopes
            .lookup_enclosing(&var_decl.identifier)
            .is_some()
    {
        type_checker.report(
            ErrorImpl::VariableShadowed {
                variable: var_decl.identifier.clone(),
            },
            &var_decl.span,
        );
    }

    let kind = if var_decl.is_constant {
        SymbolKind::Const
    } else {
        SymbolKind::Variable
    };
    debug!("declared {:?} `{}`: {}", kind, var_decl.identifier, var_type);
    type_checker.scopes.insert(Symbol::new(
        kind,
        &var_decl.identifier,
        var_type.clone(),
        var_decl.span.clone(),
    ));

    Ok(MK_IR!(
        IrKind::VarDecl,
        Some(var_decl.identifier.clone()),
        Some(var_type),
        initializer.into_iter().collect()
    ))
}

fn type_check_fn_decl(
    type_checker: &mut TypeChecker,
    fn_decl: &FnDeclStmt,
) -> Result<IrNode, Error> {
    TypeChecker::require_name(&fn_decl.identifier, "function name", &fn_decl.span)?;

    // An unresolved parameter falls back to i32 and an unresolved return type to ().
    let mut parameters = vec![];
    for (name, annotation) in fn_decl.parameters.iter() {
        TypeChecker::require_name(name, "parameter name", &fn_decl.span)?;
        let ty = match annotation {
            None => I32.clone(),
            Some(annotation) => match type_checker.resolve(annotation) {
                Some(ty) => ty,
                None => {
                    type_checker.report(
                        ErrorImpl::UnknownType {
                            type_: annotation.to_string(),
                        },
                        &fn_decl.span,
                    );
                    I32.clone()
                }
            },
        };
        parameters.push((name.clone(), ty));
    }

    let return_type = match &fn_decl.return_type {
        None => UNIT.clone(),
        Some(annotation) => match type_checker.resolve(annotation) {
            Some(ty) => ty,
            None => {
                type_checker.report(
                    ErrorImpl::UnknownType {
                        type_: annotation.to_string(),
                    },
                    &fn_decl.span,
                );
                UNIT.clone()
            }
        },
    };

    let function_type = Type::function(
        parameters.iter().map(|x| x.1.clone()).collect(),
        return_type.clone(),
    );
    type_checker.declare_item(
        Symbol::new(
            SymbolKind::Function,
            &fn_decl.identifier,
            function_type.clone(),
            fn_decl.span.clone(),
        ),
        "function",
    );

    // Parameters and body share the function scope.
    type_checker
        .scopes
        .push(Environment::for_function(return_type));
    for (name, ty) in parameters.iter() {
        type_checker.scopes.insert(Symbol::new(
            SymbolKind::Variable,
            name,
            ty.clone(),
            fn_decl.span.clone(),
        ));
    }
    let body = type_check_body(type_checker, &fn_decl.body);
    type_checker.scopes.pop();

    let mut children = parameters
        .into_iter()
        .map(|(name, ty)| MK_IR!(IrKind::Param, Some(name), Some(ty)))
        .collect::<Vec<IrNode>>();
    children.push(MK_IR!(IrKind::Block, None, None, body?));

    Ok(MK_IR!(
        IrKind::Function,
        Some(fn_decl.identifier.clone()),
        Some(function_type),
        children
    ))
}

fn type_check_struct_decl(
    type_checker: &mut TypeChecker,
    struct_decl: &StructDeclStmt,
) -> Result<IrNode, Error> {
    TypeChecker::require_name(&struct_decl.name, "struct name", &struct_decl.span)?;

    let mut field_names: Vec<String> = vec![];
    let mut field_types = vec![];
    for (name, annotation) in struct_decl.fields.iter() {
        TypeChecker::require_name(name, "field name", &struct_decl.span)?;

        if field_names.contains(name) {
            type_checker.report(
                ErrorImpl::Redefinition {
                    item: String::from("field"),
                    name: name.clone(),
                },
                &struct_decl.span,
            );
            continue;
        }

        match type_checker.resolve(annotation) {
            Some(ty) => {
                field_names.push(name.clone());
                field_types.push(ty);
            }
            None => {
                type_checker.report(
                    ErrorImpl::UnknownType {
                        type_: annotation.to_string(),
                    },
                    &struct_decl.span,
                );
                return Ok(IrNode::unit_placeholder());
            }
        }
    }

    let children = field_names
        .iter()
        .zip(field_types.iter())
        .map(|(name, ty)| MK_IR!(IrKind::Field, Some(name.clone()), Some(ty.clone())))
        .collect::<Vec<IrNode>>();

    let struct_type = Type::structure(&struct_decl.name, field_names, field_types);
    type_checker.declare_item(
        Symbol::new(
            SymbolKind::Struct,
            &struct_decl.name,
            struct_type.clone(),
            struct_decl.span.clone(),
        ),
        "struct",
    );

    Ok(MK_IR!(
        IrKind::Struct,
        Some(struct_decl.name.clone()),
        Some(struct_type),
        children
    ))
}

fn type_check_enum_decl(
    type_checker: &mut TypeChecker,
    enum_decl: &EnumDeclStmt,
) -> Result<IrNode, Error> {
    TypeChecker::require_name(&enum_decl.name, "enum name", &enum_decl.span)?;
    for variant in enum_decl.variants.iter() {
        TypeChecker::require_name(variant, "variant name", &enum_decl.span)?;
    }

    let enum_type = Type::enumeration(&enum_decl.name, enum_decl.variants.clone());
    type_checker.declare_item(
        Symbol::new(
            SymbolKind::Enum,
            &enum_decl.name,
            enum_type.clone(),
            enum_decl.span.clone(),
        ),
        "enum",
    );

    let children = enum_decl
        .variants
        .iter()
        .map(|x| MK_IR!(IrKind::Variant, Some(x.clone()), Some(enum_type.clone())))
        .collect::<Vec<IrNode>>();

    Ok(MK_IR!(
        IrKind::Enum,
        Some(enum_decl.name.clone()),
        Some(enum_type),
        children
    ))
}

fn type_check_type_alias(
    type_checker: &mut TypeChecker,
    type_alias: &TypeAliasStmt,
) -> Result<IrNode, Error> {
    TypeChecker::require_name(&type_alias.name, "type alias name", &type_alias.span)?;

    let target = match type_checker.resolve(&type_alias.target) {
        Some(target) => target,
        None => {
            type_checker.report(
                ErrorImpl::UnknownType {
                    type_: type_alias.target.to_string(),
                },
                &type_alias.span,
            );
            return Ok(IrNode::unit_placeholder());
        }
    };

    // Aliases are transparent: the symbol carries the target type.
    type_checker.declare_item(
        Symbol::new(
            SymbolKind::Type,
            &type_alias.name,
            target.clone(),
            type_alias.span.clone(),
        ),
        "type",
    );

    Ok(MK_IR!(
        IrKind::TypeAlias,
        Some(type_alias.name.clone()),
        Some(target)
    ))
}

/// Checks a condition expression, reporting anything that is not `bool`.
fn type_check_condition(
    type_checker: &mut TypeChecker,
    condition: &Expr,
    construct: &str,
) -> Result<IrNode, Error> {
    let node = type_check_expr(type_checker, condition)?;
    if let Some(ty) = node.get_type() {
        if !ty.is_boolean() {
            let received = ty.to_string();
            type_checker.report(
                ErrorImpl::ConditionNotBool {
                    construct: construct.to_string(),
                    received,
                },
                condition.get_span(),
            );
        }
    }
    Ok(node)
}

fn type_check_if(type_checker: &mut TypeChecker, if_stmt: &IfStmt) -> Result<IrNode, Error> {
    let mut children = vec![type_check_condition(type_checker, &if_stmt.condition, "if")?];
    children.push(type_check_block(type_checker, &if_stmt.then_body)?);
    if let Some(else_body) = &if_stmt.else_body {
        children.push(type_check_stmt(type_checker, else_body)?);
    }

    Ok(MK_IR!(IrKind::If, None, None, children))
}

fn type_check_while(
    type_checker: &mut TypeChecker,
    while_stmt: &WhileStmt,
) -> Result<IrNode, Error> {
    let condition = type_check_condition(type_checker, &while_stmt.condition, "while")?;
    let body = type_check_block(type_checker, &while_stmt.body)?;

    Ok(MK_IR!(IrKind::While, None, None, vec![condition, body]))
}

fn type_check_for(type_checker: &mut TypeChecker, for_stmt: &ForStmt) -> Result<IrNode, Error> {
    TypeChecker::require_name(&for_stmt.iterator, "loop variable", &for_stmt.span)?;

    let iterable = type_check_expr(type_checker, &for_stmt.iterable)?;

    // Arrays and slices, also behind a reference, yield their elements.
    // Anything else is iterated as a range of indices.
    let element_type = iterable
        .get_type()
        .and_then(|ty| ty.element().or_else(|| ty.referenced().and_then(|x| x.element())))
        .cloned()
        .unwrap_or_else(|| USIZE.clone());

    type_checker.scopes.push(Environment::new());
    type_checker.scopes.insert(Symbol::new(
        SymbolKind::Variable,
        &for_stmt.iterator,
        element_type.clone(),
        for_stmt.span.clone(),
    ));
    let body = type_check_block(type_checker, &for_stmt.body);
    type_checker.scopes.pop();

    Ok(MK_IR!(
        IrKind::For,
        Some(for_stmt.iterator.clone()),
        Some(element_type),
        vec![iterable, body?]
    ))
}

fn type_check_return(
    type_checker: &mut TypeChecker,
    return_stmt: &ReturnStmt,
) -> Result<IrNode, Error> {
    let value = match &return_stmt.value {
        Some(value) => Some(type_check_expr(type_checker, value)?),
        None => None,
    };

    let expected = match type_checker.scopes.return_type() {
        Some(expected) => expected.clone(),
        None => {
            type_checker.report(ErrorImpl::ReturnOutsideFunction, &return_stmt.span);
            return Ok(IrNode::placeholder());
        }
    };

    let received = match (&return_stmt.value, &value) {
        (Some(expr), Some(node)) => match node.get_type() {
            Some(received) => {
                if !is_assignable(expr, received, &expected) {
                    type_checker.report(
                        ErrorImpl::ReturnTypeMismatch {
                            expected: expected.to_string(),
                            received: received.to_string(),
                        },
                        &return_stmt.span,
                    );
                }
                Some(received.clone())
            }
            None => None,
        },
        _ => {
            if !expected.is_unit() {
                type_checker.report(
                    ErrorImpl::ReturnTypeMismatch {
                        expected: expected.to_string(),
                        received: UNIT.to_string(),
                    },
                    &return_stmt.span,
                );
            }
            Some(UNIT.clone())
        }
    };

    Ok(MK_IR!(
        IrKind::Return,
        None,
        received,
        value.into_iter().collect()
    ))
}

/// Runs the type checker over a whole program.
pub fn type_check(ast: &BlockStmt, options: TypeCheckerOptions) -> TypeCheckResult {
    let mut type_checker = TypeChecker::new(options);
    let ir = type_checker.check_program(ast);
    type_checker.finish(ir)
}
