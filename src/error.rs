//! Crate-level error type
//!
//! Each generator has its own error enum; `GenError` wraps them so the
//! command-line front end can report any failure the same way.

use crate::bindings::BindingError;
use crate::certs::CertsError;
use crate::legal::LegalError;
use crate::version::VersionError;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GenError {
    Io { path: PathBuf, source: io::Error },
    Config(config::ConfigError),
    Binding(BindingError),
    Legal(LegalError),
    Version(VersionError),
    Certs(CertsError),
    Report(serde_json::Error),
}

impl GenError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            GenError::Config(e) => write!(f, "Configuration error: {}", e),
            GenError::Binding(e) => write!(f, "Binding generation failed: {}", e),
            GenError::Legal(e) => write!(f, "Legal info generation failed: {}", e),
            GenError::Version(e) => write!(f, "Version generation failed: {}", e),
            GenError::Certs(e) => write!(f, "Certificate generation failed: {}", e),
            GenError::Report(e) => write!(f, "Report serialization failed: {}", e),
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenError::Io { source, .. } => Some(source),
            GenError::Config(e) => Some(e),
            GenError::Binding(e) => Some(e),
            GenError::Legal(e) => Some(e),
            GenError::Version(e) => Some(e),
            GenError::Certs(e) => Some(e),
            GenError::Report(e) => Some(e),
        }
    }
}

impl From<config::ConfigError> for GenError {
    fn from(err: config::ConfigError) -> Self {
        GenError::Config(err)
    }
}

impl From<BindingError> for GenError {
    fn from(err: BindingError) -> Self {
        GenError::Binding(err)
    }
}

impl From<LegalError> for GenError {
    fn from(err: LegalError) -> Self {
        GenError::Legal(err)
    }
}

impl From<VersionError> for GenError {
    fn from(err: VersionError) -> Self {
        GenError::Version(err)
    }
}

impl From<CertsError> for GenError {
    fn from(err: CertsError) -> Self {
        GenError::Certs(err)
    }
}

impl From<serde_json::Error> for GenError {
    fn from(err: serde_json::Error) -> Self {
        GenError::Report(err)
    }
}
