//! Shared configuration loader for the methodgen generators.
//!
//! `defaults/methodgen.default.toml` is embedded into the binary so that the
//! documented defaults and runtime behavior stay in sync. [`Loader`] puts the
//! project's `methodgen.toml` (or an explicit file) and any flag overrides on
//! top before deserializing into [`MethodgenConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/methodgen.default.toml");

/// Top-level configuration consumed by the generators.
#[derive(Debug, Clone, Deserialize)]
pub struct MethodgenConfig {
    pub bindings: BindingsConfig,
    pub legal: LegalConfig,
    pub version: VersionConfig,
    pub modules: ModulesConfig,
    pub certs: CertsConfig,
}

/// Knobs for the method-bind variant driver.
#[derive(Debug, Clone, Deserialize)]
pub struct BindingsConfig {
    pub max_arity: usize,
    /// Arities at or above this value are routed to the overflow unit.
    pub overflow_threshold: usize,
    /// Fail the run instead of warning when a template has diagnostics.
    pub strict: bool,
    pub outputs: BindingOutputs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BindingOutputs {
    pub primary: PathBuf,
    pub overflow: PathBuf,
    pub freefunc: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegalConfig {
    pub copyright: PathBuf,
    pub license: PathBuf,
    pub authors: PathBuf,
    pub donors: PathBuf,
    pub outputs: LegalOutputs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegalOutputs {
    pub license: PathBuf,
    pub authors: PathBuf,
    pub donors: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionConfig {
    pub manifest: PathBuf,
    /// Directory that holds (or points to) the `.git` metadata.
    pub repo_root: PathBuf,
    /// Suffix appended to the manifest's module config string.
    pub module_config: String,
    pub outputs: VersionOutputs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionOutputs {
    pub header: PathBuf,
    pub hash: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModulesConfig {
    pub outputs: ModulesOutputs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModulesOutputs {
    pub register: PathBuf,
    pub enabled: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CertsConfig {
    pub bundle: PathBuf,
    pub builtin: bool,
    pub system_certs_path: String,
    pub outputs: CertsOutputs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CertsOutputs {
    pub header: PathBuf,
    pub script_key: PathBuf,
}

/// File picked up from the project directory when no explicit config is given.
pub const PROJECT_FILE: &str = "methodgen.toml";

/// Layers the embedded defaults, one config file, and flag overrides.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// The embedded defaults with nothing on top.
    pub fn embedded() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// The embedded defaults, then `explicit` if given, else `PROJECT_FILE`
    /// in `project_dir`. An explicit file must exist; the project file is
    /// skipped when absent.
    pub fn for_project(project_dir: &Path, explicit: Option<&Path>) -> Self {
        let source = match explicit {
            Some(path) => File::from(path).required(true),
            None => File::from(project_dir.join(PROJECT_FILE)).required(false),
        };
        let builder = Self::embedded()
            .builder
            .add_source(source.format(FileFormat::Toml));
        Self { builder }
    }

    /// Set one dotted key, as given by a command-line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<MethodgenConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}
