//! Renderable view of one rule's automaton.

use grammarlens_core::StateId;

use crate::automaton::Label;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub state: StateId,
    pub label: String,
    pub accepting: bool,
    /// Breadth-first distance from the start state; drives horizontal layout.
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: StateId,
    pub to: StateId,
    pub label: Label,
}

/// Graph derived 1:1 from the states and transitions of one rule automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    name: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(name: impl Into<String>, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            name: name.into(),
            nodes,
            edges,
        }
    }

    /// Name of the rule the graph was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, state: StateId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.state == state)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_state(&self, state: StateId) -> bool {
        self.node(state).is_some()
    }

    /// Whether any of `states` is drawn in this graph.
    pub fn contains_any_state(&self, states: &[StateId]) -> bool {
        states.iter().any(|&s| self.contains_state(s))
    }
}
