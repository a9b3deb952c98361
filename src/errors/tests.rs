//! Unit tests for error handling.
//!
//! This module contains tests for error types and the error context.

use crate::errors::diagnostics::{DiagnosticKind, ErrorContext, ErrorState, Severity};
use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::sync::Arc;

fn position(line: u32, column: u32) -> Position {
    Position::new(line, column, Arc::new("test.lang".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UndefinedVariable {
            variable: "foo".to_string(),
        },
        position(1, 10),
    );

    assert_eq!(error.get_error_name(), "UndefinedVariable");
    assert_eq!(error.get_position().column, 10);
    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::UndefinedVariable { variable } if variable == "foo"
    ));
}

#[test]
fn test_error_messages() {
    let error = Error::new(
        ErrorImpl::UndefinedFunction {
            function: "undefined_func".to_string(),
        },
        position(0, 0),
    );
    assert!(error.to_string().contains("undefined function"));

    let error = Error::new(
        ErrorImpl::ArgumentCountMismatch {
            function: "add".to_string(),
            expected: 2,
            received: 3,
        },
        position(0, 0),
    );
    assert!(error.to_string().contains("argument count mismatch"));

    let error = Error::new(
        ErrorImpl::Redefinition {
            item: "function".to_string(),
            name: "add".to_string(),
        },
        position(0, 0),
    );
    assert_eq!(error.to_string(), "function `add` redefined");
}

#[test]
fn test_error_kinds() {
    let semantic = Error::new(
        ErrorImpl::UnknownEnumVariant {
            path: "Bogus::X".to_string(),
        },
        position(0, 0),
    );
    assert_eq!(semantic.get_kind(), DiagnosticKind::Semantic);
    assert_eq!(semantic.get_severity(), Severity::Error);

    let type_error = Error::new(
        ErrorImpl::UnknownType {
            type_: "Foo".to_string(),
        },
        position(0, 0),
    );
    assert_eq!(type_error.get_kind(), DiagnosticKind::Type);

    let fatal = Error::new(
        ErrorImpl::MalformedTree {
            reason: "empty identifier".to_string(),
        },
        position(0, 0),
    );
    assert_eq!(fatal.get_severity(), Severity::Fatal);

    let warning = Error::new(
        ErrorImpl::VariableShadowed {
            variable: "x".to_string(),
        },
        position(0, 0),
    );
    assert_eq!(warning.get_severity(), Severity::Warning);
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(ErrorImpl::ReturnOutsideFunction, position(0, 0));

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::ArgumentTypeMatchError {
            position: 1,
            expected: "i32".to_string(),
            received: "&str".to_string(),
        },
        position(0, 0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(suggestion) => assert!(suggestion.contains("`i32`")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_context_starts_clean() {
    let context = ErrorContext::new(10);

    assert!(context.is_empty());
    assert!(context.can_recover());
    assert_eq!(context.state(), ErrorState::Clean);
}

#[test]
fn test_warning_does_not_change_state() {
    let mut context = ErrorContext::new(10);
    context.report(DiagnosticKind::Semantic, Severity::Warning, "unused", position(1, 1));
    context.report(DiagnosticKind::Semantic, Severity::Info, "note", position(1, 1));

    assert_eq!(context.len(), 2);
    assert!(!context.had_error());
    assert_eq!(context.state(), ErrorState::Clean);
}

#[test]
fn test_error_then_fatal() {
    let mut context = ErrorContext::new(10);
    context.report(DiagnosticKind::Type, Severity::Error, "mismatch", position(1, 1));
    assert_eq!(context.state(), ErrorState::Degraded);
    assert!(context.can_recover());

    context.report(DiagnosticKind::Syntax, Severity::Fatal, "corrupt", position(2, 1));
    assert_eq!(context.state(), ErrorState::Fatal);
    assert!(context.had_error());
    assert!(context.had_fatal());
    assert!(!context.can_recover());
}

#[test]
fn test_capacity_drops_silently() {
    let mut context = ErrorContext::new(2);
    assert!(context.report(DiagnosticKind::Semantic, Severity::Warning, "a", position(1, 1)));
    assert!(context.report(DiagnosticKind::Semantic, Severity::Warning, "b", position(2, 1)));

    // Dropped: not recorded and the error flag stays untouched.
    assert!(!context.report(DiagnosticKind::Semantic, Severity::Fatal, "c", position(3, 1)));

    assert_eq!(context.len(), 2);
    assert!(!context.had_error());
    assert!(!context.had_fatal());
    assert!(!context.can_recover());
}

#[test]
fn test_report_error_carries_suggestion() {
    let mut context = ErrorContext::new(10);
    context.report_error(&Error::new(
        ErrorImpl::UndefinedVariable {
            variable: "y".to_string(),
        },
        position(3, 7),
    ));

    let diagnostic = &context.diagnostics()[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::Semantic);
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(diagnostic.message, "undefined variable `y`");
    assert!(diagnostic.suggestion.is_some());
}

#[test]
fn test_diagnostic_display() {
    let mut context = ErrorContext::new(10);
    context.report(DiagnosticKind::Type, Severity::Error, "bad type", position(3, 7));

    assert_eq!(
        context.diagnostics()[0].to_string(),
        "ERROR TYPE: bad type at test.lang:3:7"
    );

    context.report_with_suggestion(
        DiagnosticKind::Semantic,
        Severity::Warning,
        "shadowed",
        position(4, 1),
        Some("rename it".to_string()),
    );
    assert_eq!(
        context.diagnostics()[1].to_string(),
        "WARNING SEMANTIC: shadowed at test.lang:4:1\nSuggestion: rename it"
    );
}

#[test]
fn test_stats() {
    let mut context = ErrorContext::new(10);
    context.report(DiagnosticKind::Type, Severity::Error, "a", position(1, 1));
    context.report(DiagnosticKind::Semantic, Severity::Error, "b", position(1, 1));
    context.report(DiagnosticKind::Semantic, Severity::Warning, "c", position(1, 1));

    let stats = context.stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.errors, 2);
    assert_eq!(stats.warnings, 1);
    assert_eq!(stats.count_of(DiagnosticKind::Semantic), 2);
    assert_eq!(stats.count_of(DiagnosticKind::Type), 1);
    assert_eq!(stats.count_of(DiagnosticKind::Lexical), 0);
}

#[test]
fn test_recovery_strategies() {
    assert_eq!(DiagnosticKind::Lexical.recovery_strategy(), "skip to next token");
    assert_eq!(DiagnosticKind::Syntax.recovery_strategy(), "skip to next statement");
    assert_eq!(DiagnosticKind::Type.recovery_strategy(), "substitute a default type");
    assert_eq!(
        DiagnosticKind::Semantic.recovery_strategy(),
        "skip the offending construct"
    );
    for kind in DiagnosticKind::ALL {
        assert_ne!(kind.recovery_strategy(), "none");
    }
}
