//! Integration tests for end-to-end type checking.
//!
//! These tests build syntax trees the way the parser hands them over and
//! verify the typed IR, the diagnostics and the success flag of a full run.

use std::sync::Arc;

use semantic::{
    ast::{
        ast::{Expr, Stmt},
        expressions::BinaryOperator,
        statements::{BlockStmt, EnumDeclStmt, FnDeclStmt, IfStmt, StructDeclStmt, VarDeclStmt},
        types::TypeAnnotation,
    },
    errors::diagnostics::{DiagnosticKind, Severity},
    type_check,
    type_checker::typed_ast::IrKind,
    Span, TypeCheckResult, TypeCheckerOptions,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn span(line: u32, column: u32) -> Span {
    Span::at(line, column, Arc::new(String::from("main.lang")))
}

fn let_stmt(name: &str, value: Expr, line: u32) -> Stmt {
    Stmt::VarDecl(VarDeclStmt {
        identifier: name.to_string(),
        is_constant: false,
        explicit_type: None,
        assigned_value: Some(value),
        span: span(line, 1),
    })
}

fn fn_stmt(name: &str, parameters: &[(&str, &str)], return_type: &str, line: u32) -> Stmt {
    Stmt::FnDecl(FnDeclStmt {
        identifier: name.to_string(),
        parameters: parameters
            .iter()
            .map(|(name, ty)| (name.to_string(), Some(TypeAnnotation::from(*ty))))
            .collect(),
        return_type: Some(TypeAnnotation::from(return_type)),
        body: BlockStmt::new(vec![], span(line, 1)),
        span: span(line, 1),
    })
}

fn point_struct() -> Stmt {
    Stmt::StructDecl(StructDeclStmt {
        name: String::from("Point"),
        fields: vec![
            (String::from("x"), TypeAnnotation::named("i32")),
            (String::from("y"), TypeAnnotation::named("i32")),
        ],
        span: span(1, 1),
    })
}

fn option_enum() -> Stmt {
    Stmt::EnumDecl(EnumDeclStmt {
        name: String::from("Option"),
        variants: vec![String::from("Some"), String::from("None")],
        span: span(1, 1),
    })
}

fn run(body: Vec<Stmt>) -> TypeCheckResult {
    init_logger();
    type_check(&BlockStmt::new(body, span(1, 1)), TypeCheckerOptions::default())
}

fn literal_type(text: &str) -> String {
    let result = run(vec![Stmt::expression(Expr::literal(text, span(1, 1)))]);
    assert!(result.success, "{:?}", result.diagnostics);
    result.ir.children[0].ty.as_ref().unwrap().name.clone()
}

#[test]
fn test_integer_literal_width() {
    assert_eq!(literal_type("42"), "i32");
    assert_eq!(literal_type("2147483647"), "i32");
    assert_eq!(literal_type("-2147483648"), "i32");
    assert_eq!(literal_type("2147483648"), "i64");
    assert_eq!(literal_type("-2147483649"), "i64");
}

#[test]
fn test_literal_kinds() {
    assert_eq!(literal_type("true"), "bool");
    assert_eq!(literal_type("false"), "bool");
    assert_eq!(literal_type("3.14"), "f64");
    assert_eq!(literal_type("\"hi\""), "&str");
    assert_eq!(literal_type("'x'"), "char");
}

#[test]
fn test_function_redefinition() {
    let result = run(vec![
        fn_stmt("add", &[("x", "i32"), ("y", "i32")], "i32", 1),
        fn_stmt("add", &[("x", "i32"), ("y", "i32")], "i32", 2),
        Stmt::expression(Expr::call(
            "add",
            vec![Expr::literal("1", span(3, 5)), Expr::literal("2", span(3, 8))],
            span(3, 1),
        )),
    ]);

    assert!(!result.success);
    let semantic_errors = result
        .diagnostics
        .iter()
        .filter(|x| x.kind == DiagnosticKind::Semantic && x.severity == Severity::Error)
        .count();
    assert_eq!(semantic_errors, 1);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].location.line, 2);
    assert_eq!(result.ir.children[2].ty.as_ref().unwrap().name, "i32");
}

#[test]
fn test_struct_returning_call() {
    let result = run(vec![
        point_struct(),
        fn_stmt("make_point", &[("x", "i32"), ("y", "i32")], "Point", 2),
        Stmt::expression(Expr::call(
            "make_point",
            vec![Expr::literal("1", span(3, 12)), Expr::literal("2", span(3, 15))],
            span(3, 1),
        )),
    ]);

    assert!(result.success);
    assert!(result.diagnostics.is_empty());
    let call = &result.ir.children[2];
    assert_eq!(call.kind, IrKind::Call);
    assert_eq!(call.ty.as_ref().unwrap().name, "Point");
    assert_eq!(call.children.len(), 2);
}

#[test]
fn test_undefined_function() {
    let result = run(vec![
        Stmt::expression(Expr::call("undefined_func", vec![], span(1, 1))),
        let_stmt("after", Expr::literal("1", span(2, 13)), 2),
    ]);

    assert!(!result.success);
    assert_eq!(result.diagnostics.len(), 1);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::Semantic);
    assert_eq!(diagnostic.severity, Severity::Error);
    assert!(diagnostic.message.contains("undefined function"));
    assert_eq!(
        diagnostic.to_string(),
        "ERROR SEMANTIC: undefined function `undefined_func` at main.lang:1:1\n\
         Suggestion: Functions must be declared before they are called, `undefined_func` was not found"
    );

    assert!(result.ir.children[0].ty.is_none());
    assert_eq!(result.ir.children[1].kind, IrKind::VarDecl);
    assert_eq!(result.ir.children[1].ty.as_ref().unwrap().name, "i32");
}

#[test]
fn test_enum_variant_paths() {
    let result = run(vec![
        option_enum(),
        Stmt::expression(Expr::symbol("Option::Some", span(2, 1))),
    ]);
    assert!(result.success);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.ir.children[1].ty.as_ref().unwrap().name, "Option");

    let result = run(vec![
        option_enum(),
        Stmt::expression(Expr::symbol("Bogus::X", span(2, 1))),
    ]);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::Semantic);
    assert_eq!(result.diagnostics[0].severity, Severity::Error);
}

#[test]
fn test_sibling_statements_after_errors() {
    let result = run(vec![
        let_stmt("a", Expr::symbol("nope", span(1, 9)), 1),
        let_stmt(
            "b",
            Expr::binary(
                Expr::literal("1", span(2, 9)),
                BinaryOperator::Plus,
                Expr::literal("2.5", span(2, 13)),
                span(2, 9),
            ),
            2,
        ),
        Stmt::If(IfStmt {
            condition: Expr::symbol("b", span(3, 4)),
            then_body: BlockStmt::new(vec![], span(3, 6)),
            else_body: None,
            span: span(3, 1),
        }),
    ]);

    let kinds = result
        .diagnostics
        .iter()
        .map(|x| (x.kind, x.location.line))
        .collect::<Vec<(DiagnosticKind, u32)>>();
    assert_eq!(
        kinds,
        vec![
            (DiagnosticKind::Semantic, 1),
            (DiagnosticKind::Type, 1),
            (DiagnosticKind::Type, 3),
        ]
    );
    assert_eq!(result.ir.children[1].ty.as_ref().unwrap().name, "f64");
}

#[test]
fn test_idempotence() {
    let body = vec![
        point_struct(),
        option_enum(),
        fn_stmt("make_point", &[("x", "i32"), ("y", "i32")], "Point", 2),
        fn_stmt("make_point", &[("x", "i32")], "Point", 3),
        let_stmt("p", Expr::call("make_point", vec![], span(4, 9)), 4),
        let_stmt("q", Expr::symbol("Bogus::X", span(5, 9)), 5),
    ];

    let first = run(body.clone());
    let second = run(body);

    assert_eq!(first.ir, second.ir);
    assert_eq!(first.diagnostics, second.diagnostics);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_result_serializes() {
    let result = run(vec![
        point_struct(),
        let_stmt("n", Expr::literal("7", span(2, 9)), 2),
        Stmt::expression(Expr::symbol("missing", span(3, 1))),
    ]);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["ir"]["kind"], "Program");
    assert_eq!(json["ir"]["children"][0]["kind"], "Struct");
    assert_eq!(json["ir"]["children"][1]["ty"]["name"], "i32");
    assert_eq!(json["diagnostics"][0]["kind"], "Semantic");
    assert_eq!(json["diagnostics"][0]["location"]["line"], 3);
}

#[test]
fn test_options_limit_diagnostics() {
    init_logger();
    let body = (1..=10)
        .map(|x| Stmt::expression(Expr::symbol(&format!("v{}", x), span(x, 1))))
        .collect::<Vec<Stmt>>();

    let result = type_check(
        &BlockStmt::new(body, span(1, 1)),
        TypeCheckerOptions::default().with_max_diagnostics(3),
    );

    assert_eq!(result.diagnostics.len(), 3);
    assert_eq!(result.diagnostics[2].location.line, 3);
    assert!(!result.success);
}
