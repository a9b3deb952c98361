//! Error types and error handling for the type checker.
//!
//! This module defines everything a failed check can produce:
//!
//! - Error structures with source position information
//! - Specific error variants with messages and suggestions
//! - Diagnostics and the bounded error context that collects them
//! - Advisory recovery strategies per diagnostic kind

pub mod diagnostics;
pub mod errors;

#[cfg(test)]
mod tests;
