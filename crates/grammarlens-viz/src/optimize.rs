//! Automaton build: reachable-state collection and epsilon elimination.
//!
//! # Algorithm
//!
//! 1. Breadth-first walk from the start state. Rule-reference transitions
//!    lead to the follow state, so the walk never leaves the rule.
//! 2. When optimizing, for each state with exactly one outgoing transition,
//!    labelled epsilon:
//!    - redirect all its predecessors to its successor
//!    - drop it from the graph
//!
//! The start state and accept states are never eliminated, nor is an epsilon
//! self-loop.

use std::collections::{HashMap, HashSet, VecDeque};

use grammarlens_core::StateId;

use crate::automaton::{Automaton, Transition};

/// Statistics from epsilon elimination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizeStats {
    pub epsilons_eliminated: usize,
    /// Epsilon-only states that had to stay (branch points, start, accept).
    pub epsilons_kept: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphState {
    pub id: StateId,
    pub accepting: bool,
    pub transitions: Vec<Transition>,
}

impl GraphState {
    fn is_epsilon_only(&self) -> bool {
        !self.transitions.is_empty() && self.transitions.iter().all(|t| t.label.is_epsilon())
    }

    fn sole_epsilon_target(&self) -> Option<StateId> {
        match self.transitions.as_slice() {
            [t] if t.label.is_epsilon() => Some(t.target),
            _ => None,
        }
    }
}

/// The states of one rule's automaton, in breadth-first order from `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomatonGraph {
    start: StateId,
    states: Vec<GraphState>,
    stats: OptimizeStats,
}

impl AutomatonGraph {
    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn states(&self) -> &[GraphState] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> Option<&GraphState> {
        self.states.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.states.iter().any(|s| s.id == id)
    }

    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().map(|s| s.id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    pub fn stats(&self) -> OptimizeStats {
        self.stats
    }
}

/// Build the graph of states reachable from `start`.
///
/// An unknown `start` yields an empty graph.
pub fn build_graph(automaton: &Automaton, start: StateId, optimize: bool) -> AutomatonGraph {
    let mut states = collect_reachable(automaton, start);
    let stats = if optimize {
        eliminate_epsilons(&mut states, start)
    } else {
        OptimizeStats::default()
    };

    tracing::debug!(
        %start,
        states = states.len(),
        eliminated = stats.epsilons_eliminated,
        kept = stats.epsilons_kept,
        "automaton built"
    );

    AutomatonGraph {
        start,
        states,
        stats,
    }
}

fn collect_reachable(automaton: &Automaton, start: StateId) -> Vec<GraphState> {
    let mut out = Vec::new();
    if automaton.get(start).is_none() {
        return out;
    }

    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(id) = queue.pop_front() {
        let Some(state) = automaton.get(id) else {
            continue;
        };
        for t in &state.transitions {
            if seen.insert(t.target) {
                queue.push_back(t.target);
            }
        }
        out.push(GraphState {
            id,
            accepting: state.accepting,
            transitions: state.transitions.clone(),
        });
    }

    out
}

/// Remove pass-through epsilon states in place.
pub fn eliminate_epsilons(states: &mut Vec<GraphState>, start: StateId) -> OptimizeStats {
    let mut stats = OptimizeStats::default();
    let mut dead: HashSet<StateId> = HashSet::new();
    let position: HashMap<StateId, usize> =
        states.iter().enumerate().map(|(i, s)| (s.id, i)).collect();
    let mut predecessors = build_predecessor_map(states);

    // Reverse order eliminates the tail of a chain before its head.
    for i in (0..states.len()).rev() {
        let id = states[i].id;
        let Some(successor) = states[i].sole_epsilon_target() else {
            continue;
        };
        if id == start || states[i].accepting || successor == id {
            continue;
        }

        let preds = predecessors.remove(&id).unwrap_or_default();
        for pred in preds {
            if dead.contains(&pred) {
                continue;
            }
            let Some(&p) = position.get(&pred) else {
                continue;
            };
            for t in &mut states[p].transitions {
                if t.target == id {
                    t.target = successor;
                }
            }
            predecessors.entry(successor).or_default().push(pred);
        }

        tracing::trace!(state = %id, into = %successor, "epsilon eliminated");
        dead.insert(id);
        stats.epsilons_eliminated += 1;
    }

    states.retain(|s| !dead.contains(&s.id));
    stats.epsilons_kept = states.iter().filter(|s| s.is_epsilon_only()).count();
    stats
}

fn build_predecessor_map(states: &[GraphState]) -> HashMap<StateId, Vec<StateId>> {
    let mut predecessors: HashMap<StateId, Vec<StateId>> = HashMap::new();
    for state in states {
        for t in &state.transitions {
            predecessors.entry(t.target).or_default().push(state.id);
        }
    }
    predecessors
}
