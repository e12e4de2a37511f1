//! Span-based tokens and the stream that owns them.

use rowan::{TextRange, TextSize};

use crate::lexer::TokenKind;

/// Zero-copy token: kind + span + lines, text retrieved via [`TokenStream::text`].
///
/// Lines are 0-based. `end_line` is the line holding the token's last byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
    pub start_line: u32,
    pub end_line: u32,
}

impl Token {
    #[inline]
    pub fn start(&self) -> TextSize {
        self.span.start()
    }

    #[inline]
    pub fn end(&self) -> TextSize {
        self.span.end()
    }
}

/// Ordered, indexable tokens of one source text.
///
/// Single owner of the tokens: rules and alternatives refer to them by index.
/// Replaced wholesale on every parse.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    source: String,
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(source: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            source: source.into(),
            tokens,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Tokens in `range`, clamped to the stream.
    pub fn slice(&self, range: std::ops::Range<usize>) -> &[Token] {
        let end = range.end.min(self.tokens.len());
        let start = range.start.min(end);
        &self.tokens[start..end]
    }

    /// Retrieves the text slice for a token. O(1) slice into source.
    #[inline]
    pub fn text(&self, token: &Token) -> &str {
        &self.source[std::ops::Range::<usize>::from(token.span)]
    }

    /// Text of the token at `index`, empty when out of range.
    pub fn text_at(&self, index: usize) -> &str {
        self.get(index).map_or("", |t| self.text(t))
    }

    /// Source text from the start of token `first` to the end of token `last`.
    ///
    /// Includes whatever lies between them (trivia, skipped tokens).
    pub fn text_between(&self, first: usize, last: usize) -> &str {
        match (self.get(first), self.get(last)) {
            (Some(a), Some(b)) if a.start() <= b.end() => {
                &self.source[usize::from(a.start())..usize::from(b.end())]
            }
            _ => "",
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Token)> {
        self.tokens.iter().enumerate()
    }
}

/// Byte offset → 0-based line lookup.
#[derive(Debug, Clone)]
pub(crate) struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(line_break_offsets(source));
        Self { line_starts }
    }

    pub(crate) fn line_of(&self, offset: usize) -> u32 {
        (self.line_starts.partition_point(|&start| start <= offset) - 1) as u32
    }
}

fn line_break_offsets(source: &str) -> impl Iterator<Item = usize> + '_ {
    source
        .bytes()
        .enumerate()
        .filter(|&(_, b)| b == b'\n')
        .map(|(i, _)| i + 1)
}
