//! Scope management.
//!
//! Scopes form a stack of environments. Index 0 is the global environment,
//! created with the checker and living as long as it; every function body and
//! block pushes a child that is popped when the body is done. The parent of
//! an environment is simply the one below it on the stack.

use std::collections::HashMap;

use log::debug;

use crate::Span;

use super::types::TypeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    Struct,
    Enum,
    Type,
    Const,
}

impl SymbolKind {
    /// Kinds that name a type and can appear in an annotation.
    pub fn is_type(&self) -> bool {
        matches!(self, SymbolKind::Struct | SymbolKind::Enum | SymbolKind::Type)
    }

    /// Kinds that take part in the global redefinition check.
    pub fn is_item(&self) -> bool {
        matches!(
            self,
            SymbolKind::Function | SymbolKind::Struct | SymbolKind::Enum
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    pub ty: TypeRef,
    /// Span of the declaring node.
    pub span: Span,
}

impl Symbol {
    pub fn new(kind: SymbolKind, name: &str, ty: TypeRef, span: Span) -> Self {
        Symbol {
            kind,
            name: name.to_string(),
            ty,
            span,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub symbol_lookup: HashMap<String, Symbol>,
    /// Declared return type when this environment is a function body.
    pub return_type: Option<TypeRef>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    pub fn for_function(return_type: TypeRef) -> Self {
        Environment {
            symbol_lookup: HashMap::new(),
            return_type: Some(return_type),
        }
    }

    /// Inserts `symbol`, replacing any entry with the same name.
    ///
    /// Returns the replaced entry.
    pub fn declare(&mut self, symbol: Symbol) -> Option<Symbol> {
        self.symbol_lookup.insert(symbol.name.clone(), symbol)
    }

    pub fn get_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbol_lookup.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbol_lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbol_lookup.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ScopeStack {
    environments: Vec<Environment>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        ScopeStack::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack::with_global(Environment::new())
    }

    /// Starts from an existing global environment, e.g. a snapshot taken from
    /// another checker before splitting work across threads.
    pub fn with_global(global: Environment) -> Self {
        ScopeStack {
            environments: vec![global],
        }
    }

    pub fn push(&mut self, environment: Environment) {
        self.environments.push(environment);
        debug!("entered scope at depth {}", self.depth());
    }

    /// Discards the innermost scope. The global scope is never popped.
    pub fn pop(&mut self) -> Option<Environment> {
        if self.environments.len() == 1 {
            return None;
        }
        debug!("leaving scope at depth {}", self.depth());
        self.environments.pop()
    }

    /// Number of scopes above the global one.
    pub fn depth(&self) -> usize {
        self.environments.len() - 1
    }

    /// Inserts into the innermost scope. Returns whether the name was already
    /// declared in that scope.
    pub fn insert(&mut self, symbol: Symbol) -> bool {
        self.current_mut().declare(symbol).is_some()
    }

    /// Inserts into the global scope and returns the replaced entry.
    pub fn insert_global(&mut self, symbol: Symbol) -> Option<Symbol> {
        self.global_mut().declare(symbol)
    }

    /// Innermost-first lookup.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get_symbol(name))
    }

    pub fn lookup_global(&self, name: &str) -> Option<&Symbol> {
        self.global().get_symbol(name)
    }

    /// Lookup skipping the innermost scope.
    pub fn lookup_enclosing(&self, name: &str) -> Option<&Symbol> {
        let outer = self.environments.len() - 1;
        self.environments[..outer]
            .iter()
            .rev()
            .find_map(|environment| environment.get_symbol(name))
    }

    /// Return type of the innermost enclosing function, if any.
    pub fn return_type(&self) -> Option<&TypeRef> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.return_type.as_ref())
    }

    fn current_mut(&mut self) -> &mut Environment {
        let last = self.environments.len() - 1;
        &mut self.environments[last]
    }

    pub fn global(&self) -> &Environment {
        &self.environments[0]
    }

    fn global_mut(&mut self) -> &mut Environment {
        &mut self.environments[0]
    }
}
