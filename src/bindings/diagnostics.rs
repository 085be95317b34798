//! Diagnostics collected while expanding templates.
//!
//! Expansion itself stays lenient: an unknown command contributes no text and
//! an unterminated directive drops the rest of the template. The conditions
//! are recorded here so a run can report them, or refuse to emit in strict
//! mode.

use super::templates::Shape;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    UnknownCommand { command: String, offset: usize },
    UnterminatedDirective { offset: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownCommand { command, offset } => {
                write!(f, "unknown directive '{}' at byte {}", command, offset)
            }
            Diagnostic::UnterminatedDirective { offset } => {
                write!(
                    f,
                    "unterminated directive at byte {}, rest of template dropped",
                    offset
                )
            }
        }
    }
}

/// A diagnostic attributed to the template that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TemplateDiagnostic {
    pub shape: Shape,
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

impl fmt::Display for TemplateDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} template: {}", self.shape, self.diagnostic)
    }
}
