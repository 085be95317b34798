//! Template table
//!
//! One template body per [`Shape`]. The built-in bodies live next to this
//! module as `.tmpl` files and are compiled into the binary; the table is
//! initialised once and only ever read afterwards.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Which binder kind a template produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// Method pointer on the statically known receiver class.
    StaticReceiver,
    /// Method pointer cast onto a type-erased receiver class.
    ErasedReceiver,
    /// Free function taking the receiver as its first argument.
    FreeFunction,
}

impl Shape {
    pub const ALL: [Shape; 3] = [
        Shape::StaticReceiver,
        Shape::ErasedReceiver,
        Shape::FreeFunction,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Shape::StaticReceiver => "static-receiver",
            Shape::ErasedReceiver => "erased-receiver",
            Shape::FreeFunction => "free-function",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A template body tagged with its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    shape: Shape,
    body: Cow<'static, str>,
}

impl Template {
    pub fn new(shape: Shape, body: impl Into<Cow<'static, str>>) -> Self {
        Template {
            shape,
            body: body.into(),
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// The three templates consumed by the variant driver, plus the text that
/// frames the free-function output unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    static_receiver: Template,
    erased_receiver: Template,
    free_function: Template,
    freefunc_prologue: Cow<'static, str>,
    freefunc_epilogue: Cow<'static, str>,
}

const STATIC_RECEIVER_BODY: &str = include_str!("templates/static_receiver.tmpl");
const ERASED_RECEIVER_BODY: &str = include_str!("templates/erased_receiver.tmpl");
const FREE_FUNCTION_BODY: &str = include_str!("templates/free_function.tmpl");

const FREEFUNC_PROLOGUE: &str = "#ifndef METHOD_BIND_FREE_FUNC_H\n\
#define METHOD_BIND_FREE_FUNC_H\n\
\n\
//including this header file allows method binding to use free functions\n\
//note that the free function must have a pointer to an instance of the class as its first parameter\n";

const FREEFUNC_EPILOGUE: &str = "#endif";

static BUILTIN: Lazy<TemplateSet> = Lazy::new(|| {
    TemplateSet::new(
        STATIC_RECEIVER_BODY,
        ERASED_RECEIVER_BODY,
        FREE_FUNCTION_BODY,
    )
    .with_freefunc_frame(FREEFUNC_PROLOGUE, FREEFUNC_EPILOGUE)
});

impl TemplateSet {
    /// Build a set from three bodies, with no free-function frame.
    pub fn new(
        static_receiver: impl Into<Cow<'static, str>>,
        erased_receiver: impl Into<Cow<'static, str>>,
        free_function: impl Into<Cow<'static, str>>,
    ) -> Self {
        TemplateSet {
            static_receiver: Template::new(Shape::StaticReceiver, static_receiver),
            erased_receiver: Template::new(Shape::ErasedReceiver, erased_receiver),
            free_function: Template::new(Shape::FreeFunction, free_function),
            freefunc_prologue: Cow::Borrowed(""),
            freefunc_epilogue: Cow::Borrowed(""),
        }
    }

    /// Set the text written before and after the free-function expansions.
    pub fn with_freefunc_frame(
        mut self,
        prologue: impl Into<Cow<'static, str>>,
        epilogue: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.freefunc_prologue = prologue.into();
        self.freefunc_epilogue = epilogue.into();
        self
    }

    /// The method-bind templates shipped with the generator.
    pub fn builtin() -> &'static TemplateSet {
        &BUILTIN
    }

    pub fn get(&self, shape: Shape) -> &Template {
        match shape {
            Shape::StaticReceiver => &self.static_receiver,
            Shape::ErasedReceiver => &self.erased_receiver,
            Shape::FreeFunction => &self.free_function,
        }
    }

    pub fn freefunc_prologue(&self) -> &str {
        &self.freefunc_prologue
    }

    pub fn freefunc_epilogue(&self) -> &str {
        &self.freefunc_epilogue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::scanner::{scan, Node};

    #[test]
    fn test_builtin_lookup_by_shape() {
        let set = TemplateSet::builtin();
        for shape in Shape::ALL {
            assert_eq!(set.get(shape).shape(), shape);
        }
        assert!(set
            .get(Shape::ErasedReceiver)
            .body()
            .contains("__UnexistingClass"));
        assert!(set.get(Shape::FreeFunction).body().contains("FunctionBind"));
        assert!(set
            .get(Shape::StaticReceiver)
            .body()
            .contains("#ifdef TYPED_METHOD_BIND"));
    }

    #[test]
    fn test_builtin_bodies_start_on_fresh_line() {
        for shape in Shape::ALL {
            assert!(TemplateSet::builtin().get(shape).body().starts_with('\n'));
        }
    }

    #[test]
    fn test_builtin_bodies_are_well_formed() {
        for shape in Shape::ALL {
            let body = TemplateSet::builtin().get(shape).body();
            assert!(
                scan(body).all(|node| !matches!(node, Node::Unterminated { .. })),
                "{} template has an unterminated directive",
                shape
            );
        }
    }

    #[test]
    fn test_custom_set_has_no_frame() {
        let set = TemplateSet::new("a", "b", "c");
        assert_eq!(set.freefunc_prologue(), "");
        assert_eq!(set.freefunc_epilogue(), "");
        assert_eq!(set.get(Shape::ErasedReceiver).body(), "b");
    }
}
