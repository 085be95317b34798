//! Errors raised by the binding generator.

use super::diagnostics::TemplateDiagnostic;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    ArityOutOfRange { arity: usize, max_arity: usize },
    /// Strict mode refused a run that produced diagnostics.
    Diagnostics(Vec<TemplateDiagnostic>),
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::ArityOutOfRange { arity, max_arity } => {
                write!(f, "arity {} exceeds maximum arity {}", arity, max_arity)
            }
            BindingError::Diagnostics(diagnostics) => {
                write!(f, "{} template diagnostic(s) in strict mode", diagnostics.len())?;
                for diagnostic in diagnostics {
                    write!(f, "\n  {}", diagnostic)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for BindingError {}
