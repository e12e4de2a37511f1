use grammarlens_core::StateId;

use crate::automaton::{Automaton, AutomatonProvider};
use crate::dump::GraphPrinter;
use crate::optimize::{AutomatonGraph, OptimizeStats, build_graph};
use crate::render::{GraphRenderer, PlainRenderer};

fn dump(graph: &AutomatonGraph) -> String {
    let mut out = String::new();
    for state in graph.states() {
        out.push_str(&state.id.to_string());
        if state.accepting {
            out.push_str(" accept");
        }
        out.push_str(": ");
        if state.transitions.is_empty() {
            out.push('∅');
        }
        let edges: Vec<String> = state
            .transitions
            .iter()
            .map(|t| format!("{} → {}", t.label, t.target))
            .collect();
        out.push_str(&edges.join(", "));
        out.push('\n');
    }
    out
}

/// `r : a b ;` with start S4 and stop S5.
fn sequence_rule() -> Automaton {
    let mut a = Automaton::new();
    let f1 = a.symbol("a");
    let f2 = a.symbol("b");
    let body = a.sequence(&[f1, f2]);
    a.define_rule("r", body);
    a
}

#[test]
fn unoptimized_keeps_every_reachable_state() {
    let a = sequence_rule();
    let graph = a.build(StateId::from_raw(4), false);

    assert_eq!(graph.stats(), OptimizeStats::default());
    insta::assert_snapshot!(dump(&graph), @r"
    S4: ε → S0
    S0: a → S1
    S1: ε → S2
    S2: b → S3
    S3: ε → S5
    S5 accept: ∅
    ");
}

#[test]
fn pass_through_epsilons_are_eliminated() {
    let a = sequence_rule();
    let graph = a.build(StateId::from_raw(4), true);

    assert_eq!(
        graph.stats(),
        OptimizeStats {
            epsilons_eliminated: 2,
            epsilons_kept: 1,
        }
    );
    insta::assert_snapshot!(dump(&graph), @r"
    S4: ε → S0
    S0: a → S2
    S2: b → S5
    S5 accept: ∅
    ");
}

#[test]
fn branch_points_are_kept() {
    let mut a = Automaton::new();
    let f1 = a.symbol("a");
    let f2 = a.symbol("b");
    let body = a.alternation(&[f1, f2]);
    let rule = a.define_rule("r", body);

    let graph = build_graph(&a, rule.start, true);

    assert_eq!(graph.stats().epsilons_eliminated, 3);
    assert_eq!(graph.stats().epsilons_kept, 2);
    insta::assert_snapshot!(dump(&graph), @r"
    S6: ε → S4
    S4: ε → S0, ε → S2
    S0: a → S7
    S2: b → S7
    S7 accept: ∅
    ");
}

#[test]
fn loops_survive_elimination() {
    let mut a = Automaton::new();
    let f = a.symbol("a");
    let body = a.zero_or_more(f);
    let rule = a.define_rule("r", body);

    let graph = build_graph(&a, rule.start, true);

    insta::assert_snapshot!(dump(&graph), @r"
    S4: ε → S2
    S2: ε → S0, ε → S5
    S0: a → S2
    S5 accept: ∅
    ");
}

#[test]
fn rule_references_are_not_entered() {
    let mut a = Automaton::new();
    let inner = a.symbol("x");
    a.define_rule("t", inner);
    let call = a.rule_ref("t");
    let outer = a.define_rule("r", call);

    let graph = build_graph(&a, outer.start, false);

    assert_eq!(graph.len(), 4);
    assert!(!graph.contains(StateId::from_raw(0)));
    assert_eq!(graph.transition_count(), 3);
}

#[test]
fn unknown_start_yields_empty_graph() {
    let a = sequence_rule();
    let graph = build_graph(&a, StateId::from_raw(99), true);
    assert!(graph.is_empty());
    assert_eq!(graph.start(), StateId::from_raw(99));
}

#[test]
fn rendered_ranks_follow_bfs_depth() {
    let a = sequence_rule();
    let graph = PlainRenderer.render("r", &a.build(StateId::from_raw(4), true));

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 3);
    insta::assert_snapshot!(GraphPrinter::new(&graph).dump(), @r"
    graph r
      S4 @0: ε → S0
      S0 @1: a → S2
      S2 @2: b → S5
      S5 @3 accept: ∅
    ");
}
