//! Version metadata
//!
//! Combines the version manifest, environment-supplied overrides and the
//! current git commit into `version_generated.gen.h` and
//! `version_hash.gen.cpp`.

use crate::cxx::GENERATED_BANNER;
use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_BUILD_NAME: &str = "custom_build";

fn default_docs_url() -> String {
    "https://docs.godotengine.org/en/".to_string()
}

#[derive(Debug)]
pub enum VersionError {
    Manifest(ConfigError),
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for VersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionError::Manifest(e) => write!(f, "invalid version manifest: {}", e),
            VersionError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for VersionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VersionError::Manifest(e) => Some(e),
            VersionError::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for VersionError {
    fn from(err: ConfigError) -> Self {
        VersionError::Manifest(err)
    }
}

/// The checked-in description of the release being built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionManifest {
    pub short_name: String,
    pub name: String,
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub status: String,
    pub module_config: String,
    pub year: u32,
    pub website: String,
    /// Documentation branch, e.g. `3.5` or `latest`.
    pub docs: String,
    #[serde(default = "default_docs_url")]
    pub docs_url: String,
}

impl VersionManifest {
    pub fn load(path: &Path) -> Result<Self, VersionError> {
        let manifest = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()?
            .try_deserialize()?;
        Ok(manifest)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, VersionError> {
        let manifest = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(manifest)
    }
}

/// Values that replace manifest fields for a single build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionOverrides {
    pub build_name: Option<String>,
    pub status: Option<String>,
}

/// Everything the version header needs, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub short_name: String,
    pub name: String,
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub status: String,
    pub build: String,
    pub module_config: String,
    pub year: u32,
    pub website: String,
    pub docs_branch: String,
    pub docs_url: String,
    pub git_hash: String,
}

impl VersionInfo {
    pub fn resolve(
        manifest: VersionManifest,
        overrides: VersionOverrides,
        module_config_suffix: &str,
        repo_root: &Path,
    ) -> Result<Self, VersionError> {
        let git_hash = resolve_git_hash(repo_root)?;
        debug!(%git_hash, "resolved git hash");
        Ok(VersionInfo {
            short_name: manifest.short_name,
            name: manifest.name,
            major: manifest.major,
            minor: manifest.minor,
            patch: manifest.patch,
            status: overrides.status.unwrap_or(manifest.status),
            build: overrides
                .build_name
                .unwrap_or_else(|| DEFAULT_BUILD_NAME.to_string()),
            module_config: manifest.module_config + module_config_suffix,
            year: manifest.year,
            website: manifest.website,
            docs_branch: manifest.docs,
            docs_url: manifest.docs_url,
            git_hash,
        })
    }
}

/// First line of `path`, trimmed, or `None` when it is not a file.
fn read_first_line(path: &Path) -> Result<Option<String>, VersionError> {
    if !path.is_file() {
        return Ok(None);
    }
    let text = fs::read_to_string(path).map_err(|source| VersionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(text.lines().next().unwrap_or("").trim().to_string()))
}

/// Find the commit hash checked out under `repo_root`.
///
/// Returns an empty string when there is no repository or the ref cannot be
/// found.
pub fn resolve_git_hash(repo_root: &Path) -> Result<String, VersionError> {
    let dot_git = repo_root.join(".git");
    let mut git_dir = dot_git.clone();
    if let Some(line) = read_first_line(&dot_git)? {
        if let Some(target) = line.strip_prefix("gitdir: ") {
            git_dir = repo_root.join(target);
        }
    }

    let Some(head) = read_first_line(&git_dir.join("HEAD"))? else {
        return Ok(String::new());
    };
    let Some(reference) = head.strip_prefix("ref: ") else {
        return Ok(head);
    };

    if let Some(hash) = read_first_line(&git_dir.join(reference))? {
        return Ok(hash);
    }

    let packed = git_dir.join("packed-refs");
    if !packed.is_file() {
        return Ok(String::new());
    }
    let text = fs::read_to_string(&packed).map_err(|source| VersionError::Io {
        path: packed.clone(),
        source,
    })?;
    let hash = text
        .lines()
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split_once(' '))
        .find(|(_, name)| *name == reference)
        .map(|(hash, _)| hash.to_string())
        .unwrap_or_default();
    Ok(hash)
}

pub fn render_version_header(info: &VersionInfo) -> String {
    format!(
        "{banner}#ifndef VERSION_GENERATED_GEN_H
#define VERSION_GENERATED_GEN_H
#define VERSION_SHORT_NAME \"{short_name}\"
#define VERSION_NAME \"{name}\"
#define VERSION_MAJOR {major}
#define VERSION_MINOR {minor}
#define VERSION_PATCH {patch}
#define VERSION_STATUS \"{status}\"
#define VERSION_BUILD \"{build}\"
#define VERSION_MODULE_CONFIG \"{module_config}\"
#define VERSION_YEAR {year}
#define VERSION_WEBSITE \"{website}\"
#define VERSION_DOCS_BRANCH \"{docs_branch}\"
#define VERSION_DOCS_URL \"{docs_url}\" VERSION_DOCS_BRANCH
#endif // VERSION_GENERATED_GEN_H
",
        banner = GENERATED_BANNER,
        short_name = info.short_name,
        name = info.name,
        major = info.major,
        minor = info.minor,
        patch = info.patch,
        status = info.status,
        build = info.build,
        module_config = info.module_config,
        year = info.year,
        website = info.website,
        docs_branch = info.docs_branch,
        docs_url = info.docs_url,
    )
}

pub fn render_version_hash(info: &VersionInfo) -> String {
    format!(
        "{}#include \"core/version.h\"\nconst char *const VERSION_HASH = \"{}\";\n",
        GENERATED_BANNER, info.git_hash
    )
}
