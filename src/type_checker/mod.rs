//! Type checking and semantic analysis module.
//!
//! This module walks the syntax tree handed over by the parser and lowers it
//! into a typed IR while:
//!
//! - Resolving names through nested scopes
//! - Resolving type annotations into canonical types
//! - Inferring the types of literals, calls and operators
//! - Checking declarations for redefinitions and mismatches
//!
//! Problems are recorded in the error context and checking continues; only a
//! corrupt tree stops the pass.

pub mod infer;
pub mod resolver;
pub mod scope;
pub mod type_checker;
pub mod typed_ast;
pub mod types;
