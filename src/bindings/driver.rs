//! Variant driver
//!
//! Walks the arity × constness × return-presence space and expands every
//! template once per point. The enumeration order is fixed: downstream
//! reviews diff the generated files, so two runs over the same inputs must
//! produce byte-identical output.

use super::context::{VariantContext, FLAG_ORDER};
use super::diagnostics::{Diagnostic, TemplateDiagnostic};
use super::error::BindingError;
use super::interpreter::expand;
use super::partition::{Bucket, Buckets, Partitioner};
use super::templates::{Shape, TemplateSet};
use serde::Serialize;
use tracing::debug;

/// Shapes expanded per point for the receiver-bound units, in output order.
const RECEIVER_SHAPES: [Shape; 2] = [Shape::ErasedReceiver, Shape::StaticReceiver];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    pub max_arity: usize,
    pub overflow_threshold: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        GenerationParams {
            max_arity: 13,
            overflow_threshold: 6,
        }
    }
}

/// The three output units of one run and the diagnostics seen on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBindings {
    pub primary: String,
    pub overflow: String,
    pub freefunc: String,
    pub diagnostics: Vec<TemplateDiagnostic>,
}

impl GeneratedBindings {
    pub fn get(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::Primary => &self.primary,
            Bucket::Overflow => &self.overflow,
            Bucket::FreeFunc => &self.freefunc,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Reject the run if any template produced a diagnostic.
    pub fn into_strict(self) -> Result<Self, BindingError> {
        if self.is_clean() {
            Ok(self)
        } else {
            Err(BindingError::Diagnostics(self.diagnostics))
        }
    }

    /// Sizes and diagnostics, for machine-readable run reports.
    pub fn summary(&self) -> RunSummary<'_> {
        RunSummary {
            primary_bytes: self.primary.len(),
            overflow_bytes: self.overflow.len(),
            freefunc_bytes: self.freefunc.len(),
            diagnostics: &self.diagnostics,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub primary_bytes: usize,
    pub overflow_bytes: usize,
    pub freefunc_bytes: usize,
    pub diagnostics: &'a [TemplateDiagnostic],
}

/// Expand every template over the whole parameter space.
pub fn generate_bindings(
    templates: &TemplateSet,
    params: &GenerationParams,
) -> Result<GeneratedBindings, BindingError> {
    let partitioner = Partitioner::new(params.overflow_threshold);
    let mut buckets = Buckets::new();
    let mut diagnostics: Vec<TemplateDiagnostic> = Vec::new();

    let mut record = |shape: Shape, found: Vec<Diagnostic>| {
        for diagnostic in found {
            let entry = TemplateDiagnostic { shape, diagnostic };
            if !diagnostics.contains(&entry) {
                diagnostics.push(entry);
            }
        }
    };

    buckets.append(Bucket::FreeFunc, templates.freefunc_prologue());

    for arity in 0..=params.max_arity {
        // All eight receiver expansions of one arity land contiguously in
        // the same bucket.
        for (is_const, has_return) in FLAG_ORDER {
            let ctx = VariantContext::new(arity, params.max_arity, is_const, has_return)?;
            for shape in RECEIVER_SHAPES {
                let expansion = expand(templates.get(shape).body(), &ctx);
                buckets.append(partitioner.route(shape, arity), &expansion.text);
                record(shape, expansion.diagnostics);
            }
        }

        for (is_const, has_return) in FLAG_ORDER {
            let ctx = VariantContext::new(arity, params.max_arity, is_const, has_return)?;
            let expansion = expand(templates.get(Shape::FreeFunction).body(), &ctx);
            buckets.append(
                partitioner.route(Shape::FreeFunction, arity),
                &expansion.text,
            );
            record(Shape::FreeFunction, expansion.diagnostics);
        }

        debug!(
            arity,
            bucket = %partitioner.route(Shape::StaticReceiver, arity),
            "expanded arity"
        );
    }

    buckets.append(Bucket::FreeFunc, templates.freefunc_epilogue());

    let (primary, overflow, freefunc) = buckets.into_parts();
    Ok(GeneratedBindings {
        primary,
        overflow,
        freefunc,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker_set() -> TemplateSet {
        TemplateSet::new(
            "[S$argc$$ifconst c$$ifret r$]",
            "[E$argc$$ifconst c$$ifret r$]",
            "[F$argc$]",
        )
    }

    #[test]
    fn test_enumeration_order_within_arity() {
        let params = GenerationParams {
            max_arity: 0,
            overflow_threshold: 6,
        };
        let out = generate_bindings(&marker_set(), &params).unwrap();
        assert_eq!(out.primary, "[E0][S0][E0r][S0r][E0c][S0c][E0cr][S0cr]");
        assert_eq!(out.overflow, "");
        assert_eq!(out.freefunc, "[F0][F0][F0][F0]");
    }

    #[test]
    fn test_split_at_threshold() {
        let params = GenerationParams {
            max_arity: 3,
            overflow_threshold: 2,
        };
        let out = generate_bindings(&marker_set(), &params).unwrap();
        assert!(out.primary.contains("[E1]") && !out.primary.contains("[E2]"));
        assert!(out.overflow.starts_with("[E2]"));
        assert!(out.overflow.contains("[S3cr]"));
        assert_eq!(out.freefunc.matches("[F").count(), 16);
    }

    #[test]
    fn test_freefunc_frame_wraps_all_expansions() {
        let set = marker_set().with_freefunc_frame("<<", ">>");
        let out = generate_bindings(
            &set,
            &GenerationParams {
                max_arity: 1,
                overflow_threshold: 6,
            },
        )
        .unwrap();
        assert_eq!(out.freefunc, "<<[F0][F0][F0][F0][F1][F1][F1][F1]>>");
        assert!(!out.primary.contains("<<"));
    }

    #[test]
    fn test_diagnostics_are_deduplicated_per_shape() {
        let set = TemplateSet::new("$tpyo$", "ok", "$tpyo$ $open");
        let out = generate_bindings(&set, &GenerationParams::default()).unwrap();
        assert_eq!(
            out.diagnostics,
            vec![
                TemplateDiagnostic {
                    shape: Shape::StaticReceiver,
                    diagnostic: Diagnostic::UnknownCommand {
                        command: "tpyo".to_string(),
                        offset: 0
                    }
                },
                TemplateDiagnostic {
                    shape: Shape::FreeFunction,
                    diagnostic: Diagnostic::UnknownCommand {
                        command: "tpyo".to_string(),
                        offset: 0
                    }
                },
                TemplateDiagnostic {
                    shape: Shape::FreeFunction,
                    diagnostic: Diagnostic::UnterminatedDirective { offset: 7 }
                },
            ]
        );
        assert!(matches!(
            out.into_strict(),
            Err(BindingError::Diagnostics(found)) if found.len() == 3
        ));
    }

    #[test]
    fn test_builtin_run_is_clean() {
        let out = generate_bindings(TemplateSet::builtin(), &GenerationParams::default()).unwrap();
        assert!(out.is_clean());
        assert!(out.into_strict().is_ok());
    }
}
