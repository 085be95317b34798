//! # methodgen
//!
//! Build-time source generator for the engine's C++ core. The main job is
//! the method-bind family: a handful of templates written in a small
//! `$command payload$` directive language are expanded once per
//! (arity, constness, return) point and split over three output units.
//!
//! The same binary also produces the smaller generated headers the build
//! needs: legal information, version metadata, the module registry, and the
//! certificate bundle with the script encryption key.
//!
//! Each generator is a pure function from inputs to text; [`tasks`] reads
//! the inputs named by a [`methodgen_config::MethodgenConfig`] and [`emit`]
//! writes the results.

pub mod bindings;
pub mod certs;
pub mod cxx;
pub mod emit;
pub mod error;
pub mod legal;
pub mod modules;
pub mod tasks;
pub mod version;

pub use bindings::{generate_bindings, GeneratedBindings, GenerationParams, TemplateSet};
pub use emit::Artifact;
pub use error::GenError;
