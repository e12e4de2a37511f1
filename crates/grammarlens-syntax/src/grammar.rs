//! Rule discovery over a grammar token stream.
//!
//! This is a structural scan, not a grammar parser: it only needs to find
//! where each rule starts, where its `:` is and which `;` ends it.
//!
//! ```text
//! grammar Expr;                 header, skipped
//! options { language=Java; }    options block, skipped
//! @header { package x; }        named action, skipped
//! fragment DIGIT : '0'..'9' ;   rule (modifier skipped)
//! ```

use grammarlens_core::{DiagnosticKind, Diagnostics, GrammarError};
use indexmap::IndexMap;
use rowan::TextRange;

use crate::lexer::{TokenKind, lex};
use crate::rule::{Rule, RuleSpan};
use crate::token::TokenStream;

const RULE_MODIFIERS: &[&str] = &["fragment", "public", "protected", "private"];
const GRAMMAR_KINDS: &[&str] = &["lexer", "parser", "tree", "combined"];
const SECTION_KEYWORDS: &[&str] = &["scope", "catch", "finally"];

/// An identifier in a rule body that names a rule of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    /// Index of the identifier token.
    pub token: usize,
    /// Index of the referenced rule in [`GrammarSyntax::rules`].
    pub rule: usize,
}

/// All rules of one grammar source plus the token stream they index into.
#[derive(Debug, Clone, Default)]
pub struct GrammarSyntax {
    stream: TokenStream,
    rules: Vec<Rule>,
    by_name: IndexMap<String, usize>,
    references: Vec<Reference>,
}

impl GrammarSyntax {
    /// Lex and scan `source`.
    ///
    /// Rules without a `:` are reported as [`DiagnosticKind::MalformedRule`]
    /// and left out; scanning continues after their `;`.
    pub fn parse(source: &str) -> (Self, Diagnostics) {
        let (stream, mut diagnostics) = lex(source);
        let grammar = Self::from_stream(stream, &mut diagnostics);
        (grammar, diagnostics)
    }

    /// Parse `source`, keeping the expanded/breakpoint flags of rules that
    /// already existed in `previous` (matched by name).
    pub fn reparse(source: &str, previous: &GrammarSyntax) -> (Self, Diagnostics) {
        let (mut grammar, diagnostics) = Self::parse(source);
        grammar.restore_flags_from(previous);
        (grammar, diagnostics)
    }

    pub fn from_stream(stream: TokenStream, diagnostics: &mut Diagnostics) -> Self {
        let mut grammar = Self {
            stream,
            ..Self::default()
        };
        grammar.scan_rules(diagnostics);
        grammar.link_references();
        grammar
    }

    pub fn stream(&self) -> &TokenStream {
        &self.stream
    }

    pub fn source(&self) -> &str {
        self.stream.source()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut [Rule] {
        &mut self.rules
    }

    /// Rules ordered by name.
    pub fn rules_by_name(&self) -> Vec<&Rule> {
        let mut sorted: Vec<&Rule> = self.rules.iter().collect();
        sorted.sort_by(|a, b| a.name().cmp(b.name()));
        sorted
    }

    /// First rule declared under `name`.
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.by_name.get(name).map(|&i| &self.rules[i])
    }

    pub fn rule_mut(&mut self, name: &str) -> Option<&mut Rule> {
        self.by_name.get(name).map(|&i| &mut self.rules[i])
    }

    /// Rule covering source `offset`, if any.
    pub fn rule_at_offset(&self, offset: usize) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|r| r.contains_offset(&self.stream, offset))
    }

    /// References made from within `rule`'s body, in source order.
    pub fn references(&self, rule: &Rule) -> &[Reference] {
        self.references
            .get(rule.references.clone())
            .unwrap_or_default()
    }

    /// Names of the rules `rule` refers to, in source order, with repeats.
    pub fn referenced_names(&self, rule: &Rule) -> Vec<&str> {
        self.references(rule)
            .iter()
            .map(|r| self.rules[r.rule].name())
            .collect()
    }

    pub fn restore_flags_from(&mut self, previous: &GrammarSyntax) {
        for rule in &mut self.rules {
            if let Some(old) = previous.rule(rule.name()) {
                rule.restore_from(old);
            }
        }
    }

    /// Attach each error to every rule it names. Replaces earlier errors.
    pub fn attach_errors(&mut self, errors: &[GrammarError]) {
        for rule in &mut self.rules {
            let mine: Vec<GrammarError> = errors
                .iter()
                .filter(|e| e.rules.iter().any(|r| r == rule.name()))
                .cloned()
                .collect();
            rule.set_errors(mine);
        }
    }

    fn scan_rules(&mut self, diagnostics: &mut Diagnostics) {
        let stream = &self.stream;
        let len = stream.len();
        let mut i = 0;

        while i < len {
            let Some(token) = stream.get(i) else {
                break;
            };
            let text = stream.text(token);

            match token.kind {
                TokenKind::Id if text == "grammar" || text == "import" => {
                    i = skip_past_semi(stream, i);
                }
                TokenKind::Id if GRAMMAR_KINDS.contains(&text) && next_is(stream, i, "grammar") => {
                    i = skip_past_semi(stream, i);
                }
                TokenKind::Id
                    if (text == "options" || text == "tokens")
                        && stream.get(i + 1).is_some_and(|t| t.kind == TokenKind::Block) =>
                {
                    i += 2;
                }
                TokenKind::At => {
                    i = skip_through_block(stream, i);
                }
                TokenKind::Id if SECTION_KEYWORDS.contains(&text) => {
                    i = skip_through_block(stream, i);
                }
                TokenKind::Id if RULE_MODIFIERS.contains(&text) => {
                    i += 1;
                }
                TokenKind::Id => {
                    let name = text.to_string();
                    let (colon, Some(end)) = rule_bounds(stream, i) else {
                        report_malformed(diagnostics, stream, &name, i, len - 1);
                        break;
                    };

                    match colon {
                        Some(colon) => {
                            if let Ok(mut rule) = Rule::new(name, RuleSpan::new(i, colon, end), stream)
                            {
                                rule.completed(stream);
                                tracing::trace!(
                                    rule = rule.name(),
                                    left_recursive = rule.has_left_recursion(),
                                    "rule completed"
                                );
                                self.by_name
                                    .entry(rule.name().to_string())
                                    .or_insert(self.rules.len());
                                self.rules.push(rule);
                            }
                        }
                        None => report_malformed(diagnostics, stream, &name, i, end),
                    }
                    i = end + 1;
                }
                _ => i += 1,
            }
        }
    }

    fn link_references(&mut self) {
        let stream = &self.stream;
        let mut references = Vec::new();

        for rule in &mut self.rules {
            let first = references.len();
            let span = rule.span();
            for index in span.colon + 1..span.end {
                let Some(token) = stream.get(index) else {
                    break;
                };
                if token.kind != TokenKind::Id {
                    continue;
                }
                if let Some(&target) = self.by_name.get(stream.text(token)) {
                    references.push(Reference {
                        token: index,
                        rule: target,
                    });
                }
            }
            rule.references = first..references.len();
        }

        self.references = references;
    }
}

fn next_is(stream: &TokenStream, index: usize, text: &str) -> bool {
    stream.text_at(index + 1) == text
}

/// Index just past the next `;` at or after `index`.
fn skip_past_semi(stream: &TokenStream, index: usize) -> usize {
    (index..stream.len())
        .find(|&j| stream.text_at(j) == ";")
        .map_or(stream.len(), |j| j + 1)
}

/// The `:` and the terminating `;` of the rule whose name is at `index`.
///
/// A `scope A, B;` clause before the `:` is passed over, so its `;` does not
/// end the rule.
fn rule_bounds(stream: &TokenStream, index: usize) -> (Option<usize>, Option<usize>) {
    let len = stream.len();
    let mut colon = None;
    let mut j = index + 1;

    while j < len {
        match stream.text_at(j) {
            ":" if colon.is_none() => colon = Some(j),
            ";" => return (colon, Some(j)),
            "scope"
                if colon.is_none()
                    && stream.get(j + 1).is_some_and(|t| t.kind == TokenKind::Id) =>
            {
                let Some(semi) = (j + 1..len).find(|&k| stream.text_at(k) == ";") else {
                    return (colon, None);
                };
                j = semi;
            }
            _ => {}
        }
        j += 1;
    }

    (colon, None)
}

/// Skip a top-level section that ends with a block: `@name { ... }`,
/// `@parser::members { ... }`, `scope Symbols { ... }`, `catch [E e] { ... }`.
///
/// Stops early at a `;` or `:` so a missing block cannot swallow the next rule.
fn skip_through_block(stream: &TokenStream, index: usize) -> usize {
    let mut j = index + 1;
    while let Some(token) = stream.get(j) {
        match token.kind {
            TokenKind::Block => return j + 1,
            TokenKind::Semi | TokenKind::Colon => return j,
            _ => j += 1,
        }
    }
    j
}

fn report_malformed(
    diagnostics: &mut Diagnostics,
    stream: &TokenStream,
    name: &str,
    start: usize,
    last: usize,
) {
    let (Some(first), Some(last)) = (stream.get(start), stream.get(last)) else {
        return;
    };
    tracing::debug!(rule = name, "rule without `:`");
    diagnostics
        .report(
            DiagnosticKind::MalformedRule,
            TextRange::new(first.start(), last.end()),
        )
        .message(name)
        .emit();
}
