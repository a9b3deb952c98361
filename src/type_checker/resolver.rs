//! Turns type annotations into canonical types.
//!
//! Builtin keywords are checked first. Composite spellings (`&T`, `*mut T`,
//! `[T; N]`, `[T]`, `(A, B)`) recurse on their parts. Anything else must name
//! a struct, enum or alias declared in the global scope; user types are never
//! scoped.

use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::types::TypeAnnotation;

use super::{
    scope::ScopeStack,
    types::{Type, TypeRef, BUILTIN_LOOKUP, UNIT},
};

lazy_static! {
    /// Inside of an array annotation: `T; N`. Greedy so nested arrays keep
    /// their own `;`.
    static ref ARRAY_PATTERN: Regex = Regex::new(r"^(.+);\s*(\d+)$").unwrap();
}

/// Resolves `annotation`, returning `None` if any part of it is unknown.
pub fn resolve_type(scopes: &ScopeStack, annotation: &TypeAnnotation) -> Option<TypeRef> {
    match annotation {
        TypeAnnotation::Text(text) => resolve_text(scopes, text, text.len()),
        TypeAnnotation::Named(name) => resolve_name(scopes, name.trim()),
        TypeAnnotation::Unit => Some(UNIT.clone()),
        TypeAnnotation::Reference { mutable, inner } => {
            resolve_type(scopes, inner).map(|ty| Type::reference(ty, *mutable))
        }
        TypeAnnotation::Pointer { mutable, inner } => {
            resolve_type(scopes, inner).map(|ty| Type::pointer(ty, *mutable))
        }
        TypeAnnotation::Array { element, size } => {
            resolve_type(scopes, element).map(|ty| Type::array(ty, *size))
        }
        TypeAnnotation::Slice(element) => resolve_type(scopes, element).map(Type::slice),
        TypeAnnotation::Tuple(elements) => {
            let mut resolved = vec![];
            for element in elements.iter() {
                resolved.push(resolve_type(scopes, element)?);
            }
            Some(Type::tuple(resolved))
        }
    }
}

/// `budget` shrinks on every level so malformed text always terminates.
fn resolve_text(scopes: &ScopeStack, text: &str, budget: usize) -> Option<TypeRef> {
    let text = text.trim();
    if budget == 0 || text.is_empty() {
        return None;
    }

    if let Some(builtin) = BUILTIN_LOOKUP.get(text) {
        return Some(builtin.clone());
    }

    if let Some(rest) = text.strip_prefix("&mut ") {
        return resolve_text(scopes, rest, budget - 1).map(|ty| Type::reference(ty, true));
    }
    if let Some(rest) = text.strip_prefix('&') {
        return resolve_text(scopes, rest, budget - 1).map(|ty| Type::reference(ty, false));
    }
    if let Some(rest) = text.strip_prefix("*const ") {
        return resolve_text(scopes, rest, budget - 1).map(|ty| Type::pointer(ty, false));
    }
    if let Some(rest) = text.strip_prefix("*mut ") {
        return resolve_text(scopes, rest, budget - 1).map(|ty| Type::pointer(ty, true));
    }

    if let Some(inner) = text.strip_prefix('[').and_then(|x| x.strip_suffix(']')) {
        if let Some(captures) = ARRAY_PATTERN.captures(inner) {
            let size = captures[2].parse::<usize>().ok()?;
            return resolve_text(scopes, &captures[1], budget - 1).map(|ty| Type::array(ty, size));
        }
        return resolve_text(scopes, inner, budget - 1).map(Type::slice);
    }

    if let Some(inner) = text.strip_prefix('(').and_then(|x| x.strip_suffix(')')) {
        let mut elements = vec![];
        for part in split_top_level(inner) {
            elements.push(resolve_text(scopes, part, budget - 1)?);
        }
        return Some(Type::tuple(elements));
    }

    resolve_name(scopes, text)
}

fn resolve_name(scopes: &ScopeStack, name: &str) -> Option<TypeRef> {
    if let Some(builtin) = BUILTIN_LOOKUP.get(name) {
        return Some(builtin.clone());
    }

    scopes
        .lookup_global(name)
        .filter(|symbol| symbol.kind.is_type())
        .map(|symbol| symbol.ty.clone())
}

/// Splits on commas that are not nested in brackets or parentheses.
/// A trailing comma (`(i32,)`) does not produce an empty element.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = vec![];
    let mut depth = 0usize;
    let mut start = 0;

    for (index, character) in text.char_indices() {
        match character {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }

    let last = &text[start..];
    if !last.trim().is_empty() {
        parts.push(last);
    }
    parts
}
