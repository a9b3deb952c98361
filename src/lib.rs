#![allow(clippy::module_inception)]

use std::{fmt::Display, sync::Arc};

use serde::Serialize;

pub mod ast;
pub mod errors;
pub mod macros;
pub mod options;
pub mod type_checker;

extern crate regex;

pub use options::TypeCheckerOptions;
pub use type_checker::type_checker::{type_check, TypeCheckResult, TypeChecker};

/// A location in a source file, as reported by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub filename: Arc<String>,
}

impl Position {
    pub fn new(line: u32, column: u32, filename: Arc<String>) -> Self {
        Position {
            line,
            column,
            filename,
        }
    }

    pub fn null() -> Self {
        Position::new(0, 0, Arc::new(String::from("<null>")))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// A zero-width span at `line:column`.
    pub fn at(line: u32, column: u32, filename: Arc<String>) -> Self {
        let position = Position::new(line, column, filename);
        Span {
            start: position.clone(),
            end: position,
        }
    }

    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}
