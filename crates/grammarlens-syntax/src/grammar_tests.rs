use grammarlens_core::{DiagnosticKind, GrammarError, StateId};
use indoc::indoc;

use crate::GrammarSyntax;
use crate::test_utils::parse_clean;

fn rule_names(grammar: &GrammarSyntax) -> Vec<&str> {
    grammar.rules().iter().map(|r| r.name()).collect()
}

#[test]
fn prologue_is_skipped() {
    let grammar = parse_clean(indoc! {"
        grammar Expr;
        options { language=Java; }
        tokens { PLUS='+'; }
        @header { package x; }
        @lexer::members { int n; }

        expr : expr '+' term | term ;
        fragment DIGIT : '0'..'9' ;
        term : ID ;
    "});
    assert_eq!(rule_names(&grammar), vec!["expr", "DIGIT", "term"]);
}

#[test]
fn banner_comment_is_not_a_rule() {
    let grammar = parse_clean(indoc! {"
        /****
         * Expr grammar
         ****/
        expr : term ;
        term : ID ;
    "});
    assert_eq!(rule_names(&grammar), vec!["expr", "term"]);
}

#[test]
fn rule_prelude_scope_list() {
    let grammar = parse_clean(indoc! {"
        r scope Symbols, Types; : a ;
        a : 'x' ;
        s scope { int n; } : a ;
    "});
    assert_eq!(rule_names(&grammar), vec!["r", "a", "s"]);

    let r = grammar.rule("r").unwrap();
    assert_eq!(grammar.stream().text_at(r.span().colon), ":");
    assert_eq!(grammar.referenced_names(r), vec!["a"]);
    let texts: Vec<Vec<&str>> = r
        .alternatives(grammar.stream())
        .iter()
        .map(|alt| alt.texts(grammar.stream()))
        .collect();
    assert_eq!(texts, vec![vec!["a"]]);
}

#[test]
fn combined_grammar_header() {
    let grammar = parse_clean("lexer grammar L;\nID : ('a'..'z')+ ;");
    assert_eq!(rule_names(&grammar), vec!["ID"]);
}

#[test]
fn scopes_and_handlers_are_skipped() {
    let grammar = parse_clean(indoc! {"
        scope Symbols { List names; }
        r : a ;
        catch [RecognitionException e] { throw e; }
        finally { cleanup(); }
        s : b ;
    "});
    assert_eq!(rule_names(&grammar), vec!["r", "s"]);
}

#[test]
fn rule_without_colon_is_reported() {
    let (grammar, diagnostics) = GrammarSyntax::parse("a b ;\nc : d ;");
    assert_eq!(rule_names(&grammar), vec!["c"]);
    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"error at 0..5: rule `a` has no `:` (hint: a rule is written `name : alternative | ... ;`)"
    );
}

#[test]
fn unterminated_rule_is_reported() {
    let (grammar, diagnostics) = GrammarSyntax::parse("a : b ;\nc : d");
    assert_eq!(rule_names(&grammar), vec!["a"]);
    assert!(diagnostics.contains(DiagnosticKind::MalformedRule));
}

#[test]
fn lexical_problems_do_not_stop_scanning() {
    let (grammar, diagnostics) = GrammarSyntax::parse("a : b \u{a4} c ;\nd : e ;");
    assert_eq!(rule_names(&grammar), vec!["a", "d"]);
    assert!(diagnostics.contains(DiagnosticKind::UnexpectedCharacter));
}

#[test]
fn lookup_by_name() {
    let grammar = parse_clean("b : x ;\na : y ;\nb : z ;");
    assert_eq!(grammar.rules().len(), 3);

    let first = grammar.rule("b").unwrap();
    assert_eq!(first.span().start, 0);
    assert!(grammar.rule("missing").is_none());

    let sorted: Vec<&str> = grammar.rules_by_name().iter().map(|r| r.name()).collect();
    assert_eq!(sorted, vec!["a", "b", "b"]);
}

#[test]
fn references() {
    let grammar = parse_clean("e : e '+' t | t ;\nt : ID | '(' e ')' ;");
    let e = grammar.rule("e").unwrap();
    let t = grammar.rule("t").unwrap();
    assert_eq!(grammar.referenced_names(e), vec!["e", "t", "t"]);
    assert_eq!(grammar.referenced_names(t), vec!["e"]);
    assert_eq!(grammar.references(t)[0].rule, 0);
}

#[test]
fn rule_at_offset() {
    let source = "a : b ;\n\nc : d ;";
    let grammar = parse_clean(source);
    assert_eq!(grammar.rule_at_offset(2).map(|r| r.name()), Some("a"));
    assert_eq!(grammar.rule_at_offset(10).map(|r| r.name()), Some("c"));
    assert!(grammar.rule_at_offset(8).is_none());
}

#[test]
fn reparse_keeps_flags() {
    let mut old = parse_clean("a : b ;\nc : d ;");
    old.rule_mut("c").unwrap().set_breakpoint(true);
    old.rule_mut("a").unwrap().set_expanded(false);

    let (new, diagnostics) = GrammarSyntax::reparse("x : y ;\nc : d | e ;\na : b ;", &old);
    assert!(diagnostics.is_empty());
    assert!(new.rule("c").unwrap().is_breakpoint());
    assert!(!new.rule("a").unwrap().is_expanded());
    assert!(new.rule("x").unwrap().is_expanded());
    assert!(!new.rule("x").unwrap().is_breakpoint());
}

#[test]
fn attach_errors_by_rule_name() {
    let mut grammar = parse_clean("a : b ;\nc : d ;\ne : f ;");
    let errors = vec![
        GrammarError::new("ambiguous")
            .with_rule("a")
            .with_rule("c")
            .with_path([StateId::from_raw(1)]),
        GrammarError::new("unreachable").with_rule("c"),
    ];
    grammar.attach_errors(&errors);

    assert_eq!(grammar.rule("a").unwrap().error_summary(), "ambiguous");
    assert_eq!(
        grammar.rule("c").unwrap().error_summary(),
        "ambiguous\nunreachable"
    );
    assert!(!grammar.rule("e").unwrap().has_errors());

    grammar.attach_errors(&[]);
    assert!(!grammar.rule("c").unwrap().has_errors());
}
