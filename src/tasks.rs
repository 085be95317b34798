//! Generator tasks
//!
//! One function per subcommand: read the inputs the configuration names,
//! run the generator, and return the artifacts to write. Nothing here
//! touches the output directory or the process environment.

use crate::bindings::{generate_bindings, GeneratedBindings, GenerationParams, TemplateSet};
use crate::certs::{render_certs_header, render_script_key};
use crate::emit::Artifact;
use crate::error::GenError;
use crate::legal::{
    parse_contributors, parse_copyright, render_contributors, render_license_header,
    AUTHORS_SECTIONS, DONORS_SECTIONS,
};
use crate::modules::{render_modules_enabled, render_register_module_types};
use crate::version::{
    render_version_hash, render_version_header, VersionInfo, VersionManifest, VersionOverrides,
};
use methodgen_config::{BindingsConfig, CertsConfig, LegalConfig, ModulesConfig, VersionConfig};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

fn read_text(path: &Path) -> Result<String, GenError> {
    fs::read_to_string(path).map_err(|e| GenError::io(path, e))
}

/// Expand the built-in method-bind templates.
///
/// Diagnostics are logged; in strict mode they fail the run instead.
pub fn bindings(config: &BindingsConfig) -> Result<GeneratedBindings, GenError> {
    let params = GenerationParams {
        max_arity: config.max_arity,
        overflow_threshold: config.overflow_threshold,
    };
    let generated = generate_bindings(TemplateSet::builtin(), &params)?;
    for diagnostic in &generated.diagnostics {
        warn!("{}", diagnostic);
    }
    if config.strict {
        return Ok(generated.into_strict()?);
    }
    Ok(generated)
}

pub fn binding_artifacts(config: &BindingsConfig, generated: &GeneratedBindings) -> Vec<Artifact> {
    vec![
        Artifact::new(&config.outputs.primary, generated.primary.as_str()),
        Artifact::new(&config.outputs.overflow, generated.overflow.as_str()),
        Artifact::new(&config.outputs.freefunc, generated.freefunc.as_str()),
    ]
}

/// The run summary as pretty-printed JSON.
pub fn render_report(generated: &GeneratedBindings) -> Result<String, GenError> {
    Ok(serde_json::to_string_pretty(&generated.summary())?)
}

pub fn legal(config: &LegalConfig) -> Result<Vec<Artifact>, GenError> {
    let ledger = parse_copyright(&read_text(&config.copyright)?)?;
    debug!(
        projects = ledger.projects.len(),
        licenses = ledger.licenses.len(),
        "parsed copyright ledger"
    );
    let license = render_license_header(&ledger, &read_text(&config.license)?);

    let authors = parse_contributors(&read_text(&config.authors)?, AUTHORS_SECTIONS);
    let donors = parse_contributors(&read_text(&config.donors)?, DONORS_SECTIONS);

    Ok(vec![
        Artifact::new(&config.outputs.license, license),
        Artifact::new(
            &config.outputs.authors,
            render_contributors(&authors, "_EDITOR_AUTHORS_H"),
        ),
        Artifact::new(
            &config.outputs.donors,
            render_contributors(&donors, "_EDITOR_DONORS_H"),
        ),
    ])
}

pub fn version(
    config: &VersionConfig,
    overrides: VersionOverrides,
) -> Result<Vec<Artifact>, GenError> {
    let manifest = VersionManifest::load(&config.manifest)?;
    let info = VersionInfo::resolve(
        manifest,
        overrides,
        &config.module_config,
        &config.repo_root,
    )?;
    Ok(vec![
        Artifact::new(&config.outputs.header, render_version_header(&info)),
        Artifact::new(&config.outputs.hash, render_version_hash(&info)),
    ])
}

pub fn modules(config: &ModulesConfig, names: &[String]) -> Vec<Artifact> {
    vec![
        Artifact::new(
            &config.outputs.register,
            render_register_module_types(names),
        ),
        Artifact::new(&config.outputs.enabled, render_modules_enabled(names)),
    ]
}

/// The bundle is only read when built-in certificates are enabled.
pub fn certs(config: &CertsConfig, script_key: Option<&str>) -> Result<Vec<Artifact>, GenError> {
    let key = render_script_key(script_key)?;
    let bundle = if config.builtin {
        Some(fs::read(&config.bundle).map_err(|e| GenError::io(&config.bundle, e))?)
    } else {
        None
    };
    let header = render_certs_header(bundle.as_deref(), &config.system_certs_path)?;
    Ok(vec![
        Artifact::new(&config.outputs.script_key, key),
        Artifact::new(&config.outputs.header, header),
    ])
}
