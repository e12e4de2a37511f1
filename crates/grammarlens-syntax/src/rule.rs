//! One grammar rule and the structural queries over its token span.
//!
//! A rule covers tokens `[start, end)` of a [`TokenStream`], where `end` is
//! the terminating `;`. Its body is everything after the first `:` token.
//!
//! ```text
//! expr options {k=2;} : expr '+' term | term ;
//! ^start               ^colon                ^end
//! ```
//!
//! Queries never fail: a span without a `:` token yields no alternatives and
//! no left recursion.

use grammarlens_core::utils::is_lexer_name;
use grammarlens_core::{Error, GrammarError, Result};
use rowan::TextRange;

use crate::lexer::TokenKind;
use crate::token::{Token, TokenStream};

/// Token indices delimiting a rule: `start <= colon < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSpan {
    pub start: usize,
    pub colon: usize,
    pub end: usize,
}

impl RuleSpan {
    pub fn new(start: usize, colon: usize, end: usize) -> Self {
        Self { start, colon, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Lexer,
    Parser,
}

impl RuleKind {
    pub fn from_name(name: &str) -> Self {
        if is_lexer_name(name) {
            Self::Lexer
        } else {
            Self::Parser
        }
    }
}

/// One `|`-delimited branch of a rule body, as token indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alternative {
    tokens: Vec<usize>,
}

impl Alternative {
    fn push(&mut self, index: usize) {
        self.tokens.push(index);
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Token indices in source order.
    pub fn indices(&self) -> &[usize] {
        &self.tokens
    }

    pub fn first(&self) -> Option<usize> {
        self.tokens.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.tokens.last().copied()
    }

    pub fn tokens<'s>(&self, stream: &'s TokenStream) -> impl Iterator<Item = &'s Token> {
        self.tokens.iter().filter_map(|&i| stream.get(i))
    }

    /// Token texts, one per token.
    pub fn texts<'s>(&self, stream: &'s TokenStream) -> Vec<&'s str> {
        self.tokens.iter().map(|&i| stream.text_at(i)).collect()
    }

    /// Source text from the first to the last token.
    pub fn text<'s>(&self, stream: &'s TokenStream) -> &'s str {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => stream.text_between(first, last),
            _ => "",
        }
    }

    /// Source text after the first token, `None` when nothing follows it.
    pub fn suffix_text<'s>(&self, stream: &'s TokenStream) -> Option<&'s str> {
        match self.tokens.as_slice() {
            [_, second, .., last] => Some(stream.text_between(*second, *last)),
            [_, only] => Some(stream.text_at(*only)),
            _ => None,
        }
    }

    /// Whether this branch starts with a call to `rule`.
    pub fn starts_with(&self, stream: &TokenStream, rule: &str) -> bool {
        self.first().is_some_and(|i| stream.text_at(i) == rule)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    span: RuleSpan,
    kind: RuleKind,
    pub(crate) expanded: bool,
    pub(crate) breakpoint: bool,
    left_recursive: bool,
    errors: Vec<GrammarError>,
    /// Range into the owning grammar's reference list.
    pub(crate) references: std::ops::Range<usize>,
}

impl Rule {
    /// Create a rule over `span` of `stream`.
    ///
    /// Fails only on a span that violates `start <= colon < end` or runs past
    /// the stream. Call [`Rule::completed`] once the rule is fully parsed.
    pub fn new(name: impl Into<String>, span: RuleSpan, stream: &TokenStream) -> Result<Self> {
        if !(span.start <= span.colon && span.colon < span.end) {
            return Err(Error::InvalidRuleSpan {
                start: span.start,
                colon: span.colon,
                end: span.end,
            });
        }
        if span.end >= stream.len() {
            return Err(Error::TokenOutOfRange {
                index: span.end,
                len: stream.len(),
            });
        }

        let name = name.into();
        Ok(Self {
            kind: RuleKind::from_name(&name),
            name,
            span,
            expanded: true,
            breakpoint: false,
            left_recursive: false,
            errors: Vec::new(),
            references: 0..0,
        })
    }

    /// Compute derived flags. Called once when parsing completes the rule.
    pub fn completed(&mut self, stream: &TokenStream) {
        self.left_recursive = self.detect_left_recursion(stream);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn span(&self) -> RuleSpan {
        self.span
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn is_lexer(&self) -> bool {
        self.kind == RuleKind::Lexer
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    pub fn is_breakpoint(&self) -> bool {
        self.breakpoint
    }

    pub fn set_breakpoint(&mut self, breakpoint: bool) {
        self.breakpoint = breakpoint;
    }

    /// Left-recursion flag computed by [`Rule::completed`].
    pub fn has_left_recursion(&self) -> bool {
        self.left_recursive
    }

    // ─────────────────────────────────────────────────────────────────────
    // Errors
    // ─────────────────────────────────────────────────────────────────────

    pub fn set_errors(&mut self, errors: Vec<GrammarError>) {
        self.errors = errors;
    }

    pub fn errors(&self) -> &[GrammarError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_message(&self, index: usize) -> Option<&str> {
        self.errors.get(index).map(|e| e.message.as_str())
    }

    /// All error messages, one per line.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ─────────────────────────────────────────────────────────────────────
    // Offsets
    // ─────────────────────────────────────────────────────────────────────

    /// Tokens `[start, end)`; the terminating `;` is not included.
    pub fn tokens<'s>(&self, stream: &'s TokenStream) -> &'s [Token] {
        stream.slice(self.span.start..self.span.end)
    }

    pub fn start_offset(&self, stream: &TokenStream) -> usize {
        stream
            .get(self.span.start)
            .map_or(0, |t| usize::from(t.start()))
    }

    /// End of the terminating token.
    pub fn end_offset(&self, stream: &TokenStream) -> usize {
        stream.get(self.span.end).map_or(0, |t| usize::from(t.end()))
    }

    pub fn len(&self, stream: &TokenStream) -> usize {
        self.end_offset(stream)
            .saturating_sub(self.start_offset(stream))
    }

    /// Whether `offset` falls within the rule, both ends inclusive.
    pub fn contains_offset(&self, stream: &TokenStream, offset: usize) -> bool {
        offset >= self.start_offset(stream) && offset <= self.end_offset(stream)
    }

    /// Source range of the body: first token after `:` up to the token before `;`.
    pub fn body_range(&self, stream: &TokenStream) -> Option<TextRange> {
        let colon = self.find_colon(stream)?;
        let first = stream.get(colon + 1)?;
        let last = stream.get(self.span.end.checked_sub(1)?)?;
        if colon + 1 >= self.span.end {
            return None;
        }
        Some(TextRange::new(first.start(), last.end()))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Segmentation
    // ─────────────────────────────────────────────────────────────────────

    /// Index of the first `:` token in the span.
    fn find_colon(&self, stream: &TokenStream) -> Option<usize> {
        (self.span.start..self.span.end).find(|&i| stream.text_at(i) == ":")
    }

    /// Split the body into alternatives at top-level `|`.
    ///
    /// Parentheses nest: a `|` inside `( ... )` does not split. Block tokens
    /// are skipped. An empty branch between two separators is kept; a
    /// trailing empty branch is dropped.
    pub fn alternatives(&self, stream: &TokenStream) -> Vec<Alternative> {
        let Some(colon) = self.find_colon(stream) else {
            return Vec::new();
        };

        let mut alternatives = Vec::new();
        let mut current = Alternative::default();
        let mut level = 0i32;

        for index in colon + 1..self.span.end {
            let Some(token) = stream.get(index) else {
                break;
            };
            if token.kind == TokenKind::Block {
                continue;
            }

            match stream.text(token) {
                "(" => level += 1,
                ")" => level -= 1,
                "|" if level == 0 => {
                    alternatives.push(std::mem::take(&mut current));
                    continue;
                }
                _ => {}
            }
            current.push(index);
        }

        if !current.is_empty() {
            alternatives.push(current);
        }
        alternatives
    }

    /// Immediate left recursion: some non-empty alternative starts with the rule's own name.
    ///
    /// Only the first token is inspected. Recursion behind an optional prefix
    /// (`e : ('-')? e ...`) is not detected.
    pub fn detect_left_recursion(&self, stream: &TokenStream) -> bool {
        self.alternatives(stream)
            .iter()
            .any(|alt| alt.starts_with(stream, &self.name))
    }

    /// Rewrite the body without immediate left recursion.
    ///
    /// Non-recursive alternatives form the head; recursive ones contribute
    /// the text after their leading self-call to the starred tail:
    ///
    /// ```text
    /// e : e '+' t | e '*' t | t ;   =>   (t) ('+' t | '*' t)*
    /// ```
    pub fn left_recursion_removed_text(&self, stream: &TokenStream) -> String {
        let mut head: Vec<&str> = Vec::new();
        let mut star: Vec<&str> = Vec::new();

        for alt in self.alternatives(stream) {
            if alt.is_empty() {
                continue;
            }
            if alt.starts_with(stream, &self.name) {
                if let Some(suffix) = alt.suffix_text(stream) {
                    star.push(suffix);
                }
            } else {
                head.push(alt.text(stream));
            }
        }

        format!("({}) ({})*", head.join(" | "), star.join(" | "))
    }

    /// Block tokens in the span, except the block of an `options` clause.
    pub fn blocks(&self, stream: &TokenStream) -> Vec<Token> {
        let mut blocks = Vec::new();
        let mut previous: Option<&Token> = None;

        for token in self.tokens(stream) {
            if token.kind == TokenKind::Block {
                let after_options = previous
                    .is_some_and(|p| p.kind == TokenKind::Id && stream.text(p) == "options");
                if after_options {
                    continue;
                }
                blocks.push(*token);
            }
            previous = Some(token);
        }

        blocks
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
