//! Output partitioning
//!
//! The method-bind declarations are split over several compilation units so
//! they can be compiled in parallel. The split point carries no meaning of
//! its own.

use super::templates::Shape;
use serde::Serialize;
use std::fmt;

/// Named output accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bucket {
    Primary,
    Overflow,
    FreeFunc,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Primary, Bucket::Overflow, Bucket::FreeFunc];

    pub fn name(self) -> &'static str {
        match self {
            Bucket::Primary => "primary",
            Bucket::Overflow => "overflow",
            Bucket::FreeFunc => "freefunc",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Routes expansions to buckets by shape and arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioner {
    overflow_threshold: usize,
}

impl Partitioner {
    pub fn new(overflow_threshold: usize) -> Self {
        Partitioner { overflow_threshold }
    }

    pub fn route(&self, shape: Shape, arity: usize) -> Bucket {
        match shape {
            Shape::FreeFunction => Bucket::FreeFunc,
            Shape::StaticReceiver | Shape::ErasedReceiver if arity < self.overflow_threshold => {
                Bucket::Primary
            }
            Shape::StaticReceiver | Shape::ErasedReceiver => Bucket::Overflow,
        }
    }
}

/// Append-only text accumulators, one per bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    primary: String,
    overflow: String,
    freefunc: String,
}

impl Buckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, bucket: Bucket, text: &str) {
        self.slot(bucket).push_str(text);
    }

    pub fn get(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::Primary => &self.primary,
            Bucket::Overflow => &self.overflow,
            Bucket::FreeFunc => &self.freefunc,
        }
    }

    /// Consume the accumulators as `(primary, overflow, freefunc)`.
    pub fn into_parts(self) -> (String, String, String) {
        (self.primary, self.overflow, self.freefunc)
    }

    fn slot(&mut self, bucket: Bucket) -> &mut String {
        match bucket {
            Bucket::Primary => &mut self.primary,
            Bucket::Overflow => &mut self.overflow,
            Bucket::FreeFunc => &mut self.freefunc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_by_threshold() {
        let partitioner = Partitioner::new(6);
        assert_eq!(partitioner.route(Shape::ErasedReceiver, 0), Bucket::Primary);
        assert_eq!(partitioner.route(Shape::StaticReceiver, 5), Bucket::Primary);
        assert_eq!(partitioner.route(Shape::StaticReceiver, 6), Bucket::Overflow);
        assert_eq!(partitioner.route(Shape::ErasedReceiver, 13), Bucket::Overflow);
    }

    #[test]
    fn test_free_functions_ignore_threshold() {
        let partitioner = Partitioner::new(6);
        assert_eq!(partitioner.route(Shape::FreeFunction, 0), Bucket::FreeFunc);
        assert_eq!(partitioner.route(Shape::FreeFunction, 13), Bucket::FreeFunc);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let everything_overflows = Partitioner::new(0);
        assert_eq!(
            everything_overflows.route(Shape::ErasedReceiver, 0),
            Bucket::Overflow
        );
        let nothing_overflows = Partitioner::new(100);
        assert_eq!(
            nothing_overflows.route(Shape::StaticReceiver, 13),
            Bucket::Primary
        );
    }

    #[test]
    fn test_buckets_append_in_order() {
        let mut buckets = Buckets::new();
        buckets.append(Bucket::Primary, "a");
        buckets.append(Bucket::FreeFunc, "x");
        buckets.append(Bucket::Primary, "b");
        assert_eq!(buckets.get(Bucket::Primary), "ab");
        assert_eq!(buckets.get(Bucket::Overflow), "");
        assert_eq!(buckets.into_parts(), ("ab".into(), "".into(), "x".into()));
    }
}
