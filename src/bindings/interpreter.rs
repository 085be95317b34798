//! Directive interpreter
//!
//! Maps a directive command and payload to the text it contributes for one
//! [`VariantContext`]. Command names match exactly, so at most one rule
//! applies to any directive.

use super::context::VariantContext;
use super::diagnostics::Diagnostic;
use super::scanner::{scan, Node};

/// The directive commands understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `argc`: the decimal arity.
    ArgCount,
    /// `ifret`
    IfReturn,
    /// `ifnoret`
    IfNoReturn,
    /// `ifargs`
    IfArgs,
    /// `ifretargs`
    IfReturnArgs,
    /// `ifconst`
    IfConst,
    /// `ifnoconst`
    IfNoConst,
    /// `iftempl`: the declaration needs a template parameter list.
    IfTemplate,
    /// `arg,`: one copy per argument, comma separated.
    ArgList,
    /// `arg`: one copy per argument, concatenated.
    ArgRepeat,
    /// `noarg`: one copy per unused argument slot up to the maximum arity.
    ArgTail,
}

impl Command {
    pub const ALL: [Command; 11] = [
        Command::ArgCount,
        Command::IfReturn,
        Command::IfNoReturn,
        Command::IfArgs,
        Command::IfReturnArgs,
        Command::IfConst,
        Command::IfNoConst,
        Command::IfTemplate,
        Command::ArgList,
        Command::ArgRepeat,
        Command::ArgTail,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name {
            "argc" => Command::ArgCount,
            "ifret" => Command::IfReturn,
            "ifnoret" => Command::IfNoReturn,
            "ifargs" => Command::IfArgs,
            "ifretargs" => Command::IfReturnArgs,
            "ifconst" => Command::IfConst,
            "ifnoconst" => Command::IfNoConst,
            "iftempl" => Command::IfTemplate,
            "arg," => Command::ArgList,
            "arg" => Command::ArgRepeat,
            "noarg" => Command::ArgTail,
            _ => return None,
        };
        Some(command)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::ArgCount => "argc",
            Command::IfReturn => "ifret",
            Command::IfNoReturn => "ifnoret",
            Command::IfArgs => "ifargs",
            Command::IfReturnArgs => "ifretargs",
            Command::IfConst => "ifconst",
            Command::IfNoConst => "ifnoconst",
            Command::IfTemplate => "iftempl",
            Command::ArgList => "arg,",
            Command::ArgRepeat => "arg",
            Command::ArgTail => "noarg",
        }
    }

    /// Append this command's output for `payload` to `out`.
    pub fn apply(self, payload: &str, ctx: &VariantContext, out: &mut String) {
        let arity = ctx.arity();
        let guard = |emit: bool, out: &mut String| {
            if emit {
                out.push_str(payload);
            }
        };
        match self {
            Command::ArgCount => out.push_str(&arity.to_string()),
            Command::IfReturn => guard(ctx.has_return(), out),
            Command::IfNoReturn => guard(!ctx.has_return(), out),
            Command::IfArgs => guard(arity > 0, out),
            Command::IfReturnArgs => guard(arity > 0 && ctx.has_return(), out),
            Command::IfConst => guard(ctx.is_const(), out),
            Command::IfNoConst => guard(!ctx.is_const(), out),
            Command::IfTemplate => guard(arity > 0 || ctx.has_return(), out),
            Command::ArgList => {
                for i in 1..=arity {
                    if i > 1 {
                        out.push_str(", ");
                    }
                    push_indexed(payload, i, out);
                }
            }
            Command::ArgRepeat => {
                for i in 1..=arity {
                    push_indexed(payload, i, out);
                }
            }
            Command::ArgTail => {
                for i in arity + 1..=ctx.max_arity() {
                    push_indexed(payload, i, out);
                }
            }
        }
    }
}

/// Push `payload` with every `@` replaced by `index`.
fn push_indexed(payload: &str, index: usize, out: &mut String) {
    out.push_str(&payload.replace('@', &index.to_string()));
}

/// Evaluate a single directive. Unknown commands produce no text.
pub fn evaluate(command: &str, payload: &str, ctx: &VariantContext) -> String {
    let mut out = String::new();
    if let Some(command) = Command::from_name(command) {
        command.apply(payload, ctx, &mut out);
    }
    out
}

/// Result of expanding a whole template for one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Expand a template body for one context.
pub fn expand(template: &str, ctx: &VariantContext) -> Expansion {
    let mut text = String::with_capacity(template.len());
    let mut diagnostics = Vec::new();

    for node in scan(template) {
        match node {
            Node::Literal(literal) => text.push_str(literal),
            Node::Directive(directive) => match Command::from_name(directive.command) {
                Some(command) => command.apply(directive.payload, ctx, &mut text),
                None => diagnostics.push(Diagnostic::UnknownCommand {
                    command: directive.command.to_string(),
                    offset: directive.offset,
                }),
            },
            Node::Unterminated { offset } => {
                diagnostics.push(Diagnostic::UnterminatedDirective { offset })
            }
        }
    }

    Expansion { text, diagnostics }
}
