//! Directive scanner for binding templates
//!
//! A template is literal text interleaved with `$`-delimited directives. The
//! raw split into literal runs and directive spans is done by logos; this
//! module turns those spans into [`Node`]s and splits each directive into
//! its command and payload.
use logos::Logos;

/// Raw tokens produced by logos.
///
/// A `$` that is never closed matches neither pattern, which surfaces as a
/// lexer error at the offset of the opening delimiter.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum RawToken {
    #[regex(r"\$[^$]*\$")]
    Directive,

    #[regex(r"[^$]+")]
    Literal,
}

/// A parsed directive span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    pub command: &'a str,
    pub payload: &'a str,
    /// Byte offset of the opening `$` in the template.
    pub offset: usize,
}

impl<'a> Directive<'a> {
    /// Split the text between the delimiters at the first space.
    fn split(inner: &'a str, offset: usize) -> Self {
        let (command, payload) = inner.split_once(' ').unwrap_or((inner, ""));
        Directive {
            command,
            payload,
            offset,
        }
    }
}

/// One node of a scanned template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    Literal(&'a str),
    Directive(Directive<'a>),
    /// A `$` with no closing delimiter. Always the last node; the rest of
    /// the template is not scanned.
    Unterminated { offset: usize },
}

/// Lazy left-to-right scan over a template.
pub struct Scanner<'a> {
    lexer: logos::Lexer<'a, RawToken>,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(template: &'a str) -> Self {
        Scanner {
            lexer: RawToken::lexer(template),
            done: false,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.lexer.next()?;
        let span = self.lexer.span();
        match token {
            Ok(RawToken::Literal) => Some(Node::Literal(self.lexer.slice())),
            Ok(RawToken::Directive) => {
                let slice = self.lexer.slice();
                let inner = &slice[1..slice.len() - 1];
                Some(Node::Directive(Directive::split(inner, span.start)))
            }
            Err(()) => {
                self.done = true;
                Some(Node::Unterminated { offset: span.start })
            }
        }
    }
}

/// Scan a template into nodes.
pub fn scan(template: &str) -> Scanner<'_> {
    Scanner::new(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(template: &str) -> Vec<Node<'_>> {
        scan(template).collect()
    }

    #[test]
    fn test_plain_literal() {
        assert_eq!(nodes("class Foo {};"), vec![Node::Literal("class Foo {};")]);
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(nodes(""), vec![]);
    }

    #[test]
    fn test_directive_without_payload() {
        assert_eq!(
            nodes("Bind$argc$;"),
            vec![
                Node::Literal("Bind"),
                Node::Directive(Directive {
                    command: "argc",
                    payload: "",
                    offset: 4
                }),
                Node::Literal(";"),
            ]
        );
    }

    #[test]
    fn test_payload_splits_at_first_space_only() {
        let scanned = nodes("$arg, class P@$");
        assert_eq!(
            scanned,
            vec![Node::Directive(Directive {
                command: "arg,",
                payload: "class P@",
                offset: 0
            })]
        );
    }

    #[test]
    fn test_payload_keeps_newlines_and_tabs() {
        let scanned = nodes("$arg CHECK_ARG(@);\n\t\t$");
        match scanned.as_slice() {
            [Node::Directive(d)] => {
                assert_eq!(d.command, "arg");
                assert_eq!(d.payload, "CHECK_ARG(@);\n\t\t");
            }
            other => panic!("unexpected nodes: {:?}", other),
        }
    }

    #[test]
    fn test_adjacent_directives() {
        let scanned = nodes("$ifconst true$$ifnoconst false$");
        assert_eq!(scanned.len(), 2);
        assert!(matches!(
            scanned[1],
            Node::Directive(Directive {
                command: "ifnoconst",
                payload: "false",
                offset: 14
            })
        ));
    }

    #[test]
    fn test_empty_directive() {
        assert_eq!(
            nodes("a$$b"),
            vec![
                Node::Literal("a"),
                Node::Directive(Directive {
                    command: "",
                    payload: "",
                    offset: 1
                }),
                Node::Literal("b"),
            ]
        );
    }

    #[test]
    fn test_unterminated_directive_stops_scan() {
        assert_eq!(
            nodes("head $ifret tail without close"),
            vec![Node::Literal("head "), Node::Unterminated { offset: 5 }]
        );
    }

    #[test]
    fn test_unterminated_after_complete_directive() {
        let scanned = nodes("$argc$ x $oops");
        assert_eq!(scanned.len(), 3);
        assert_eq!(scanned[2], Node::Unterminated { offset: 9 });
    }

    #[test]
    fn test_scanner_is_fused_after_unterminated() {
        let mut scanner = scan("$open");
        assert_eq!(scanner.next(), Some(Node::Unterminated { offset: 0 }));
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.next(), None);
    }
}
