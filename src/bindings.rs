//! Method-bind generator
//!
//! Templates are expanded by a small directive language: `$command payload$`
//! spans are evaluated against a [`VariantContext`] and replaced by their
//! output, everything else is copied through.
//!
//!     scanner      logos-based split into literal and directive nodes
//!     interpreter  the command table and whole-template expansion
//!     templates    the built-in template bodies, keyed by shape
//!     driver       walks the parameter space in a fixed order
//!     partition    routes expansions to the output units

pub mod context;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod interpreter;
pub mod partition;
pub mod scanner;
pub mod templates;

pub use context::VariantContext;
pub use diagnostics::{Diagnostic, TemplateDiagnostic};
pub use driver::{generate_bindings, GeneratedBindings, GenerationParams, RunSummary};
pub use error::BindingError;
pub use interpreter::{evaluate, expand, Command, Expansion};
pub use partition::{Bucket, Buckets, Partitioner};
pub use scanner::{scan, Directive, Node, Scanner};
pub use templates::{Shape, Template, TemplateSet};
