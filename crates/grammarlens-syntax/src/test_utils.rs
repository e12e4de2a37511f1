use crate::{GrammarSyntax, Rule, TokenStream};

/// Parse a grammar that must come out without diagnostics.
pub fn parse_clean(source: &str) -> GrammarSyntax {
    let (grammar, diagnostics) = GrammarSyntax::parse(source);
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics:\n{}",
        diagnostics.render(source)
    );
    grammar
}

/// The first rule of `source` together with the stream it indexes into.
pub fn first_rule(source: &str) -> (TokenStream, Rule) {
    let grammar = parse_clean(source);
    let rule = grammar.rules()[0].clone();
    (grammar.stream().clone(), rule)
}

/// One line per alternative: its token texts joined by spaces.
pub fn alternatives_snapshot(stream: &TokenStream, rule: &Rule) -> String {
    rule.alternatives(stream)
        .iter()
        .map(|alt| format!("[{}]", alt.texts(stream).join(" ")))
        .collect::<Vec<_>>()
        .join("\n")
}
