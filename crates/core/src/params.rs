//! Evaluation parameters.
//!
//! Contains EvalParams for bounding and configuring calculator evaluation.

/// Parameters for PostScript calculator evaluation.
///
/// Controls resource limits and how strictly malformed programs are treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalParams {
    /// Maximum number of live operands. A pending procedure body counts as
    /// one operand however many tokens it holds.
    pub max_stack_depth: usize,

    /// Maximum number of tokens held in pending procedure bodies.
    pub max_procedure_size: usize,

    /// Maximum `{ ... }` nesting depth, counting the outer function wrapper.
    pub max_nesting: usize,

    /// If set, unparseable numbers and unknown operator names abort the
    /// evaluation instead of being skipped with a warning.
    pub strict: bool,
}

impl Default for EvalParams {
    fn default() -> Self {
        Self {
            max_stack_depth: 100,
            max_procedure_size: 65_536,
            max_nesting: 64,
            strict: false,
        }
    }
}

impl EvalParams {
    /// Creates new evaluation parameters with the specified values.
    ///
    /// # Panics
    /// Panics if either limit is zero.
    pub fn new(max_stack_depth: usize, max_nesting: usize, strict: bool) -> Self {
        assert!(max_stack_depth >= 1, "max_stack_depth must be at least 1");
        assert!(max_nesting >= 1, "max_nesting must be at least 1");

        Self {
            max_stack_depth,
            max_nesting,
            strict,
            ..Self::default()
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// # Panics
    /// Panics if `limit` is zero.
    pub fn with_max_stack_depth(mut self, limit: usize) -> Self {
        assert!(limit >= 1, "max_stack_depth must be at least 1");
        self.max_stack_depth = limit;
        self
    }

    /// # Panics
    /// Panics if `limit` is zero.
    pub fn with_max_procedure_size(mut self, limit: usize) -> Self {
        assert!(limit >= 1, "max_procedure_size must be at least 1");
        self.max_procedure_size = limit;
        self
    }

    /// # Panics
    /// Panics if `limit` is zero.
    pub fn with_max_nesting(mut self, limit: usize) -> Self {
        assert!(limit >= 1, "max_nesting must be at least 1");
        self.max_nesting = limit;
        self
    }
}
