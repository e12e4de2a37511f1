use grammarlens_core::{DiagnosticKind, Diagnostics, GrammarError, StateId};

use crate::assembler::{GraphAssembler, Visualization};
use crate::automaton::Automaton;
use crate::config::AssemblerConfig;
use crate::dump::GroupPrinter;

fn s(n: u32) -> StateId {
    StateId::from_raw(n)
}

/// Rules `a : x ;`, `b : y ;` and `c : z ;`.
///
/// Optimized graphs: a = {S2, S0, S3}, b = {S6, S4, S7}, c = {S10, S8, S11}.
/// S1, S5 and S9 only exist in unoptimized graphs.
fn three_rules() -> Automaton {
    let mut automaton = Automaton::new();
    for (rule, symbol) in [("a", "x"), ("b", "y"), ("c", "z")] {
        let body = automaton.symbol(symbol);
        automaton.define_rule(rule, body);
    }
    automaton
}

fn assembler() -> GraphAssembler {
    GraphAssembler::new(AssemblerConfig::default())
}

fn graph_names(group: &crate::GraphGroup) -> Vec<&str> {
    group.graphs().iter().map(|g| g.name()).collect()
}

#[test]
fn build_for_rule() {
    let automaton = three_rules();
    let mut diagnostics = Diagnostics::new();

    let graphs = assembler()
        .build_for_rule(&automaton, "b", &mut diagnostics)
        .unwrap();

    assert_eq!(graphs.len(), 1);
    assert_eq!(graphs[0].name(), "b");
    assert_eq!(graphs[0].node_count(), 3);
    assert!(diagnostics.is_empty());
}

#[test]
fn unknown_rule_is_not_found() {
    let automaton = three_rules();
    let mut diagnostics = Diagnostics::new();

    let graphs = assembler().build_for_rule(&automaton, "nope", &mut diagnostics);

    assert!(graphs.is_none());
    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"warning: rule `nope` has no automaton start state"
    );
}

#[test]
fn builds_are_idempotent() {
    let automaton = three_rules();
    let assembler = assembler();
    let mut diagnostics = Diagnostics::new();

    let first = assembler.build_for_rule(&automaton, "a", &mut diagnostics).unwrap();
    let second = assembler.build_for_rule(&automaton, "a", &mut diagnostics).unwrap();

    assert_eq!(first[0].name(), second[0].name());
    assert_eq!(first[0].node_count(), second[0].node_count());
    assert_eq!(first[0].edge_count(), second[0].edge_count());
    assert_eq!(first, second);
}

#[test]
fn toggle_affects_only_later_builds() {
    let automaton = three_rules();
    let mut assembler = assembler();
    let mut diagnostics = Diagnostics::new();

    let optimized = assembler.build_for_rule(&automaton, "a", &mut diagnostics).unwrap();
    assert!(!assembler.toggle_optimization());
    let plain = assembler.build_for_rule(&automaton, "a", &mut diagnostics).unwrap();

    assert_eq!(optimized[0].node_count(), 3);
    assert_eq!(plain[0].node_count(), 4);
    assert!(assembler.toggle_optimization());
    assert!(assembler.is_optimizing());

    assembler.set_optimize(false);
    assert_eq!(assembler.config(), &AssemblerConfig { optimize: false });
}

#[test]
fn group_keeps_only_graphs_on_a_path() {
    let automaton = three_rules();
    let mut diagnostics = Diagnostics::new();
    let error = GrammarError::new("ambiguous")
        .with_rule("a")
        .with_rule("b")
        .with_rule("c")
        .with_path([s(2), s(0)])
        .with_path([s(10)]);

    let group = assembler().build_graph_group(&automaton, &error, &mut diagnostics);

    assert_eq!(graph_names(&group), vec!["a", "c"]);
    assert!(diagnostics.is_empty());
}

#[test]
fn first_path_is_visible() {
    let automaton = three_rules();
    let mut diagnostics = Diagnostics::new();
    let error = GrammarError::new("ambiguous")
        .with_rule("a")
        .with_path([s(0)])
        .with_path([s(2)])
        .with_path([s(3)]);

    let group = assembler().build_graph_group(&automaton, &error, &mut diagnostics);

    let visible: Vec<usize> = group.visible_paths().map(|(i, _)| i).collect();
    assert_eq!(visible, vec![0]);
    assert_eq!(group.path_count(), 3);
}

#[test]
fn no_paths_means_nothing_visible() {
    let automaton = three_rules();
    let mut diagnostics = Diagnostics::new();
    let error = GrammarError::new("unreachable alternative").with_rule("a");

    let group = assembler().build_graph_group(&automaton, &error, &mut diagnostics);

    assert_eq!(group.visible_count(), 0);
    assert!(group.graphs().is_empty());
    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"warning: diagnostic has no paths: unreachable alternative"
    );
}

#[test]
fn unresolved_rule_is_skipped() {
    let automaton = three_rules();
    let mut diagnostics = Diagnostics::new();
    let error = GrammarError::new("ambiguous")
        .with_rule("missing")
        .with_rule("b")
        .with_path([s(4)]);

    let group = assembler().build_graph_group(&automaton, &error, &mut diagnostics);

    assert_eq!(graph_names(&group), vec!["b"]);
    assert!(diagnostics.contains(DiagnosticKind::UnresolvedRule));
    assert!(!diagnostics.has_errors());
}

#[test]
fn disabled_flags_carry_over() {
    let automaton = three_rules();
    let mut diagnostics = Diagnostics::new();
    let mut error = GrammarError::new("ambiguous")
        .with_rule("a")
        .with_path([s(0)])
        .with_disabled_path([s(2)])
        .with_path([s(3)]);
    error.paths_disabled.truncate(2);

    let group = assembler().build_graph_group(&automaton, &error, &mut diagnostics);

    let enabled: Vec<bool> = group.paths().iter().map(|p| p.enabled).collect();
    assert_eq!(enabled, vec![true, false, true]);
}

#[test]
fn path_membership_depends_on_optimization() {
    let automaton = three_rules();
    let mut diagnostics = Diagnostics::new();
    let error = GrammarError::new("ambiguous").with_rule("a").with_path([s(1)]);

    let mut assembler = assembler();
    let optimized = assembler.build_graph_group(&automaton, &error, &mut diagnostics);
    assembler.set_optimize(false);
    let plain = assembler.build_graph_group(&automaton, &error, &mut diagnostics);

    assert!(optimized.graphs().is_empty());
    assert_eq!(graph_names(&plain), vec!["a"]);
}

#[test]
fn group_dump() {
    let automaton = three_rules();
    let mut diagnostics = Diagnostics::new();
    let error = GrammarError::new("ambiguous")
        .with_rule("a")
        .with_rule("b")
        .with_rule("c")
        .with_path([s(2), s(0)])
        .with_disabled_path([s(10), s(8)]);

    let group = assembler().build_graph_group(&automaton, &error, &mut diagnostics);

    insta::assert_snapshot!(GroupPrinter::new(&group).dump(), @r#"
    group "ambiguous"
    graph a
      S2 @0: ε → S0
      S0 @1: x → S3
      S3 @2 accept: ∅
    graph c
      S10 @0: ε → S8
      S8 @1: z → S11
      S11 @2 accept: ∅
    path 0 visible: S2 S0
    path 1 disabled: S10 S8
    "#);
}

#[test]
fn without_errors_builds_the_rule_graph() {
    let automaton = three_rules();
    let mut diagnostics = Diagnostics::new();

    let result = assembler().build_for_rule_with_errors(&automaton, "a", &[], &mut diagnostics);

    match result {
        Some(Visualization::Graphs(graphs)) => assert_eq!(graphs[0].name(), "a"),
        other => panic!("expected graphs, got {other:?}"),
    }
    assert!(
        assembler()
            .build_for_rule_with_errors(&automaton, "nope", &[], &mut diagnostics)
            .is_none()
    );
}

#[test]
fn with_errors_builds_one_group_per_error() {
    let automaton = three_rules();
    let mut diagnostics = Diagnostics::new();
    let errors = vec![
        GrammarError::new("first").with_rule("a").with_path([s(0)]),
        GrammarError::new("second").with_rule("b").with_path([s(4)]),
    ];

    let result = assembler().build_for_rule_with_errors(&automaton, "a", &errors, &mut diagnostics);

    let Some(Visualization::Groups(groups)) = result else {
        panic!("expected groups");
    };
    let names: Vec<&str> = groups.iter().map(|g| g.name()).collect();
    assert_eq!(names, vec!["first", "second"]);
    assert_eq!(graph_names(&groups[1]), vec!["b"]);
}

#[test]
fn errors_from_json() {
    let automaton = three_rules();
    let mut diagnostics = Diagnostics::new();
    let errors = GrammarError::list_from_json(
        r#"[{ "message": "ambiguous", "rules": ["a", "c"], "paths": [[0], [8]], "pathsDisabled": [false, true] }]"#,
    )
    .unwrap();

    let group = assembler().build_graph_group(&automaton, &errors[0], &mut diagnostics);

    assert_eq!(graph_names(&group), vec!["a", "c"]);
    assert!(!group.path(1).unwrap().enabled);
}
