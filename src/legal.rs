//! Legal information generators
//!
//! Turns the project's copyright ledger, license text and contributor lists
//! into C headers that the editor's about dialog reads.

pub mod contributors;
pub mod copyright;
pub mod license_header;

pub use contributors::{
    parse_contributors, render_contributors, ContributorGroup, Section, AUTHORS_SECTIONS,
    DONORS_SECTIONS,
};
pub use copyright::{parse_copyright, CopyrightLedger, LicensePart, Project, StandaloneLicense};
pub use license_header::render_license_header;

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegalError {
    /// A part attached to a project lacks one of `Files`, `Copyright`, `License`.
    MissingField {
        project: String,
        field: &'static str,
        line: usize,
    },
}

impl fmt::Display for LegalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegalError::MissingField {
                project,
                field,
                line,
            } => write!(
                f,
                "copyright paragraph for '{}' ending at line {} has no {} field",
                project, line, field
            ),
        }
    }
}

impl std::error::Error for LegalError {}
