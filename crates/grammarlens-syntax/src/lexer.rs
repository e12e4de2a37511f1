//! Lexer for grammar source text.
//!
//! Produces span-based tokens without storing text. Trivia (whitespace,
//! newlines, comments) is dropped, so indices in the resulting stream only
//! count significant tokens.
//!
//! ## Post-processing
//!
//! - `{` opens an action block that is consumed up to its matching `}` and
//!   becomes a single `Block` token. Nested braces and quoted literals inside
//!   the action are respected.
//! - Consecutive unrecognized characters are coalesced into one `Garbage` token.

use grammarlens_core::{DiagnosticKind, Diagnostics};
use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

use crate::token::{LineIndex, Token, TokenStream};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    /// Lexer-internal: replaced by `Block` during post-processing.
    #[token("{")]
    #[doc(hidden)]
    BraceOpen,

    /// `::` in scoped action names (`@parser::members`). Defined before `Colon`.
    #[token("::")]
    DoubleColon,

    #[token(":")]
    Colon,

    #[token(";")]
    Semi,

    #[token("|")]
    Pipe,

    #[token("@")]
    At,

    /// Rewrite arrow `->`.
    #[token("->")]
    Arrow,

    /// Operators and other punctuation with no structural meaning here.
    #[token("..")]
    #[token("=>")]
    #[token("+=")]
    #[token("}")]
    #[regex(r"[*+?~.=!^<>,$&#%/\[\]-]")]
    Op,

    /// Character or string literal in single quotes: `'a'`, `'while'`.
    #[regex(r"'(?:[^'\\]|\\.)*'")]
    Char,

    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    String,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Id,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    /// Closes at the first `*/`, including runs of stars such as `**/`.
    #[regex(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
    BlockComment,

    /// Action or options content `{ ... }`, one token including both braces.
    Block,

    /// Coalesced unrecognized characters.
    Garbage,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::Newline | Self::LineComment | Self::BlockComment
        )
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes grammar source into a [`TokenStream`].
///
/// Unterminated blocks and unrecognized characters are reported, never fatal.
pub fn lex(source: &str) -> (TokenStream, Diagnostics) {
    let lines = LineIndex::new(source);
    let mut diagnostics = Diagnostics::new();
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    let push = |tokens: &mut Vec<Token>, kind: TokenKind, range: Range<usize>| {
        let last_byte = range.end.saturating_sub(1).max(range.start);
        tokens.push(Token {
            kind,
            span: range_to_text_range(range.clone()),
            start_line: lines.line_of(range.start),
            end_line: lines.line_of(last_byte),
        });
    };

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    report_garbage(&mut diagnostics, source, start..end);
                    push(&mut tokens, TokenKind::Garbage, start..end);
                }

                let span = lexer.span();
                if kind == TokenKind::BraceOpen {
                    let (len, terminated) = scan_block(&source[span.end..]);
                    lexer.bump(len);
                    let block = span.start..span.end + len;
                    if !terminated {
                        diagnostics
                            .report(
                                DiagnosticKind::UnterminatedBlock,
                                range_to_text_range(span.clone()),
                            )
                            .emit();
                    }
                    push(&mut tokens, TokenKind::Block, block);
                } else if !kind.is_trivia() {
                    push(&mut tokens, kind, span);
                }
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    report_garbage(&mut diagnostics, source, start..source.len());
                    push(&mut tokens, TokenKind::Garbage, start..source.len());
                }
                break;
            }
        }
    }

    (TokenStream::new(source, tokens), diagnostics)
}

fn report_garbage(diagnostics: &mut Diagnostics, source: &str, range: Range<usize>) {
    diagnostics
        .report(
            DiagnosticKind::UnexpectedCharacter,
            range_to_text_range(range.clone()),
        )
        .message(format!("`{}`", &source[range]))
        .emit();
}

/// Scans an action body following its opening `{`.
///
/// Returns the number of bytes consumed (including the closing `}`) and
/// whether the block was closed before the end of input.
fn scan_block(rest: &str) -> (usize, bool) {
    let bytes = rest.as_bytes();
    let mut depth = 1usize;
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' => quote = Some(b),
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return (i + 1, true);
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }

    (bytes.len(), false)
}
