//! Configuration for a type checking run.

/// Knobs for a single run of the type checker.
///
/// ```ignore
/// let options = TypeCheckerOptions::default()
///     .with_max_diagnostics(20)
///     .with_warn_on_shadow(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCheckerOptions {
    /// Capacity of the error context. Further diagnostics are dropped.
    pub max_diagnostics: usize,
    /// Deepest statement/expression nesting accepted before the tree is
    /// treated as corrupt.
    pub max_depth: usize,
    /// Emit a warning when a variable shadows one from an enclosing scope.
    pub warn_on_shadow: bool,
}

impl Default for TypeCheckerOptions {
    fn default() -> Self {
        TypeCheckerOptions {
            max_diagnostics: 100,
            max_depth: 256,
            warn_on_shadow: false,
        }
    }
}

impl TypeCheckerOptions {
    pub fn with_max_diagnostics(mut self, max_diagnostics: usize) -> Self {
        self.max_diagnostics = max_diagnostics;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_warn_on_shadow(mut self, warn_on_shadow: bool) -> Self {
        self.warn_on_shadow = warn_on_shadow;
        self
    }
}
