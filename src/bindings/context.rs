//! Variant context: the point of the parameter space one expansion models.

use super::error::BindingError;

/// Selects one expansion of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantContext {
    arity: usize,
    max_arity: usize,
    is_const: bool,
    has_return: bool,
}

impl VariantContext {
    /// Build a context, enforcing `arity <= max_arity`.
    pub fn new(
        arity: usize,
        max_arity: usize,
        is_const: bool,
        has_return: bool,
    ) -> Result<Self, BindingError> {
        if arity > max_arity {
            return Err(BindingError::ArityOutOfRange { arity, max_arity });
        }
        Ok(VariantContext {
            arity,
            max_arity,
            is_const,
            has_return,
        })
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn max_arity(&self) -> usize {
        self.max_arity
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    pub fn has_return(&self) -> bool {
        self.has_return
    }
}

/// The `(is_const, has_return)` combinations in driver order.
pub const FLAG_ORDER: [(bool, bool); 4] = [(false, false), (false, true), (true, false), (true, true)];
