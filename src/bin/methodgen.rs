//! Command-line interface for methodgen
//! Generates the engine's build-time C++ sources into an output directory.
//!
//! Usage:
//!   methodgen bindings [--max-arity N] [--overflow-threshold N] [--strict]  - Method-bind templates
//!   methodgen legal [--copyright P] [--license P] [--authors P] [--donors P] - License/authors/donors headers
//!   methodgen version [--manifest P] [--repo-root P] [--module-config S]     - Version headers
//!   methodgen modules `<name>...`                                             - Module registry
//!   methodgen certs [--bundle P] [--builtin] [--system-certs-path P]          - Certificates and script key
//!
//! Settings come from the built-in defaults, then `methodgen.toml` in the
//! working directory (or the file given with `--config`), then flags.

use clap::{Arg, ArgAction, ArgMatches, Command};
use methodgen::emit::{write_all, Artifact};
use methodgen::error::GenError;
use methodgen::tasks;
use methodgen::version::VersionOverrides;
use methodgen_config::{Loader, MethodgenConfig};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("methodgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates build-time C++ sources for the engine core")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults")
                .global(true),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .short('o')
                .help("Directory generated files are written to")
                .default_value(".")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log output (-v info, -vv debug)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("bindings")
                .about("Expand the method-bind templates")
                .arg(
                    Arg::new("max-arity")
                        .long("max-arity")
                        .help("Largest argument count to generate")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("overflow-threshold")
                        .long("overflow-threshold")
                        .help("First arity written to the overflow unit")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Fail instead of warning on template diagnostics")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .help("Print a run report to stdout")
                        .value_parser(["json"]),
                ),
        )
        .subcommand(
            Command::new("legal")
                .about("Generate the license, authors and donors headers")
                .arg(Arg::new("copyright").long("copyright").help("Copyright ledger"))
                .arg(Arg::new("license").long("license").help("License text"))
                .arg(Arg::new("authors").long("authors").help("Authors list"))
                .arg(Arg::new("donors").long("donors").help("Donors list")),
        )
        .subcommand(
            Command::new("version")
                .about("Generate the version headers")
                .arg(Arg::new("manifest").long("manifest").help("Version manifest (TOML)"))
                .arg(
                    Arg::new("repo-root")
                        .long("repo-root")
                        .help("Directory containing the .git metadata"),
                )
                .arg(
                    Arg::new("module-config")
                        .long("module-config")
                        .help("Suffix appended to the module config string"),
                ),
        )
        .subcommand(
            Command::new("modules")
                .about("Generate the module registry")
                .arg(
                    Arg::new("names")
                        .help("Enabled module names")
                        .num_args(0..)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("certs")
                .about("Generate the certificate header and script encryption key")
                .arg(Arg::new("bundle").long("bundle").help("CA certificate bundle"))
                .arg(
                    Arg::new("builtin")
                        .long("builtin")
                        .help("Embed the certificate bundle")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("system-certs-path")
                        .long("system-certs-path")
                        .help("Platform certificate store the editor should use"),
                ),
        )
        .get_matches();

    let (name, sub) = match matches.subcommand() {
        Some(pair) => pair,
        None => unreachable!(),
    };
    init_tracing(sub.get_count("verbose"));

    if let Err(e) = run(name, sub) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(name: &str, sub: &ArgMatches) -> Result<(), GenError> {
    let out_dir = sub
        .get_one::<String>("out-dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let config = load_config(sub.get_one::<String>("config"), name, sub)?;

    let artifacts = match name {
        "bindings" => handle_bindings_command(&config, sub)?,
        "legal" => tasks::legal(&config.legal)?,
        "version" => tasks::version(&config.version, version_overrides())?,
        "modules" => {
            let names: Vec<String> = sub
                .get_many::<String>("names")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            info!(count = names.len(), "modules generated");
            tasks::modules(&config.modules, &names)
        }
        "certs" => {
            let key = std::env::var("SCRIPT_AES256_ENCRYPTION_KEY").ok();
            tasks::certs(&config.certs, key.as_deref())?
        }
        _ => unreachable!(),
    };

    write_all(&out_dir, &artifacts)
}

/// Layer defaults, the config file, then the subcommand's flags.
fn load_config(
    config_file: Option<&String>,
    name: &str,
    sub: &ArgMatches,
) -> Result<MethodgenConfig, GenError> {
    let mut loader = Loader::for_project(Path::new("."), config_file.map(Path::new));

    let string_flags: &[(&str, &str)] = match name {
        "legal" => &[
            ("copyright", "legal.copyright"),
            ("license", "legal.license"),
            ("authors", "legal.authors"),
            ("donors", "legal.donors"),
        ],
        "version" => &[
            ("manifest", "version.manifest"),
            ("repo-root", "version.repo_root"),
            ("module-config", "version.module_config"),
        ],
        "certs" => &[
            ("bundle", "certs.bundle"),
            ("system-certs-path", "certs.system_certs_path"),
        ],
        _ => &[],
    };
    for (flag, key) in string_flags {
        if let Some(value) = sub.get_one::<String>(flag) {
            loader = loader.set_override(key, value.as_str())?;
        }
    }

    if name == "bindings" {
        if let Some(n) = sub.get_one::<u32>("max-arity") {
            loader = loader.set_override("bindings.max_arity", i64::from(*n))?;
        }
        if let Some(n) = sub.get_one::<u32>("overflow-threshold") {
            loader = loader.set_override("bindings.overflow_threshold", i64::from(*n))?;
        }
        if sub.get_flag("strict") {
            loader = loader.set_override("bindings.strict", true)?;
        }
    }
    if name == "certs" && sub.get_flag("builtin") {
        loader = loader.set_override("certs.builtin", true)?;
    }

    Ok(loader.build()?)
}

/// Handle the bindings command
fn handle_bindings_command(
    config: &MethodgenConfig,
    sub: &ArgMatches,
) -> Result<Vec<Artifact>, GenError> {
    let generated = tasks::bindings(&config.bindings)?;
    if sub.get_one::<String>("report").is_some() {
        println!("{}", tasks::render_report(&generated)?);
    }
    Ok(tasks::binding_artifacts(&config.bindings, &generated))
}

fn version_overrides() -> VersionOverrides {
    VersionOverrides {
        build_name: env_value("BUILD_NAME"),
        status: env_value("GODOT_VERSION_STATUS"),
    }
}

fn env_value(name: &str) -> Option<String> {
    let value = std::env::var(name).ok();
    if let Some(value) = &value {
        info!(variable = name, %value, "using environment override");
    }
    value
}
