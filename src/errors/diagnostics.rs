use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;
use log::warn;
use serde::Serialize;

use crate::Position;

use super::errors::Error;

lazy_static! {
    /// Advisory recovery strategy for each diagnostic kind.
    ///
    /// Nothing in the error context acts on these, callers decide.
    pub static ref RECOVERY_STRATEGIES: HashMap<DiagnosticKind, &'static str> = {
        let mut map = HashMap::new();
        map.insert(DiagnosticKind::Lexical, "skip to next token");
        map.insert(DiagnosticKind::Syntax, "skip to next statement");
        map.insert(DiagnosticKind::Type, "substitute a default type");
        map.insert(DiagnosticKind::Semantic, "skip the offending construct");
        map.insert(DiagnosticKind::CodeGen, "abort code generation");
        map.insert(DiagnosticKind::Optimization, "skip the optimization pass");
        map.insert(DiagnosticKind::Stdlib, "fall back to the builtin declaration");
        map
    };
}

/// The compilation stage a diagnostic belongs to.
///
/// Only `Type` and `Semantic` (and `Syntax` for a corrupt tree) are produced
/// by the type checker, the rest share the shape for uniform reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    Type,
    Semantic,
    CodeGen,
    Optimization,
    Stdlib,
}

impl DiagnosticKind {
    pub const ALL: [DiagnosticKind; 7] = [
        DiagnosticKind::Lexical,
        DiagnosticKind::Syntax,
        DiagnosticKind::Type,
        DiagnosticKind::Semantic,
        DiagnosticKind::CodeGen,
        DiagnosticKind::Optimization,
        DiagnosticKind::Stdlib,
    ];

    pub fn recovery_strategy(&self) -> &'static str {
        RECOVERY_STRATEGIES.get(self).copied().unwrap_or("none")
    }

    fn index(&self) -> usize {
        match self {
            DiagnosticKind::Lexical => 0,
            DiagnosticKind::Syntax => 1,
            DiagnosticKind::Type => 2,
            DiagnosticKind::Semantic => 3,
            DiagnosticKind::CodeGen => 4,
            DiagnosticKind::Optimization => 5,
            DiagnosticKind::Stdlib => 6,
        }
    }
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DiagnosticKind::Lexical => "LEXICAL",
            DiagnosticKind::Syntax => "SYNTAX",
            DiagnosticKind::Type => "TYPE",
            DiagnosticKind::Semantic => "SEMANTIC",
            DiagnosticKind::CodeGen => "CODE_GEN",
            DiagnosticKind::Optimization => "OPTIMIZATION",
            DiagnosticKind::Stdlib => "STDLIB",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Fatal,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub location: Position,
    pub suggestion: Option<String>,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {} at {}",
            self.severity, self.kind, self.message, self.location
        )?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

/// Where an error context stands after the diagnostics reported so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorState {
    Clean,
    Degraded,
    Fatal,
}

/// Counts over the recorded diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorStats {
    pub total: usize,
    pub infos: usize,
    pub warnings: usize,
    pub errors: usize,
    pub fatals: usize,
    /// Indexed in `DiagnosticKind::ALL` order.
    pub by_kind: [usize; 7],
}

impl ErrorStats {
    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.by_kind[kind.index()]
    }
}

/// Ordered, bounded list of diagnostics.
///
/// Once `capacity` diagnostics are recorded every further report is dropped
/// without touching the flags.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    diagnostics: Vec<Diagnostic>,
    had_error: bool,
    had_fatal: bool,
    capacity: usize,
}

impl ErrorContext {
    pub fn new(capacity: usize) -> Self {
        ErrorContext {
            diagnostics: vec![],
            had_error: false,
            had_fatal: false,
            capacity,
        }
    }

    /// Records a diagnostic. Returns `false` if it was dropped.
    pub fn report(
        &mut self,
        kind: DiagnosticKind,
        severity: Severity,
        message: &str,
        location: Position,
    ) -> bool {
        self.report_with_suggestion(kind, severity, message, location, None)
    }

    pub fn report_with_suggestion(
        &mut self,
        kind: DiagnosticKind,
        severity: Severity,
        message: &str,
        location: Position,
        suggestion: Option<String>,
    ) -> bool {
        if self.is_full() {
            warn!(
                "diagnostic capacity of {} reached, dropping: {}",
                self.capacity, message
            );
            return false;
        }

        self.diagnostics.push(Diagnostic {
            kind,
            severity,
            message: message.to_string(),
            location,
            suggestion,
        });

        if severity >= Severity::Error {
            self.had_error = true;
        }
        if severity == Severity::Fatal {
            self.had_fatal = true;
        }

        true
    }

    pub fn report_error(&mut self, error: &Error) -> bool {
        self.report_with_suggestion(
            error.get_kind(),
            error.get_severity(),
            &error.to_string(),
            error.get_position().clone(),
            error.get_tip().into_option(),
        )
    }

    pub fn can_recover(&self) -> bool {
        !self.had_fatal && !self.is_full()
    }

    pub fn state(&self) -> ErrorState {
        if self.had_fatal {
            ErrorState::Fatal
        } else if self.had_error {
            ErrorState::Degraded
        } else {
            ErrorState::Clean
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_fatal(&self) -> bool {
        self.had_fatal
    }

    pub fn is_full(&self) -> bool {
        self.diagnostics.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn stats(&self) -> ErrorStats {
        let mut stats = ErrorStats::default();
        for diagnostic in self.diagnostics.iter() {
            stats.total += 1;
            match diagnostic.severity {
                Severity::Info => stats.infos += 1,
                Severity::Warning => stats.warnings += 1,
                Severity::Error => stats.errors += 1,
                Severity::Fatal => stats.fatals += 1,
            }
            stats.by_kind[diagnostic.kind.index()] += 1;
        }
        stats
    }
}
