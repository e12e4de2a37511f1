//! Turning automaton graphs into drawable graphs.

use std::collections::{HashMap, VecDeque};

use grammarlens_core::StateId;

use crate::graph::{Edge, Graph, Node};
use crate::optimize::AutomatonGraph;

/// Lays out an automaton graph as a [`Graph`].
pub trait GraphRenderer {
    fn render(&self, name: &str, automaton: &AutomatonGraph) -> Graph;
}

/// One node per state and one edge per transition, ranked by BFS depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl GraphRenderer for PlainRenderer {
    fn render(&self, name: &str, automaton: &AutomatonGraph) -> Graph {
        let ranks = rank_states(automaton);

        let nodes = automaton
            .states()
            .iter()
            .map(|s| Node {
                state: s.id,
                label: s.id.to_string(),
                accepting: s.accepting,
                rank: ranks.get(&s.id).copied().unwrap_or(0),
            })
            .collect();

        let edges = automaton
            .states()
            .iter()
            .flat_map(|s| {
                s.transitions.iter().map(move |t| Edge {
                    from: s.id,
                    to: t.target,
                    label: t.label.clone(),
                })
            })
            .collect();

        Graph::new(name, nodes, edges)
    }
}

fn rank_states(automaton: &AutomatonGraph) -> HashMap<StateId, u32> {
    let mut ranks = HashMap::new();
    if automaton.is_empty() {
        return ranks;
    }

    let start = automaton.start();
    ranks.insert(start, 0);
    let mut queue = VecDeque::from([start]);

    while let Some(id) = queue.pop_front() {
        let rank = ranks[&id];
        let Some(state) = automaton.state(id) else {
            continue;
        };
        for t in &state.transitions {
            if !ranks.contains_key(&t.target) {
                ranks.insert(t.target, rank + 1);
                queue.push_back(t.target);
            }
        }
    }

    ranks
}
