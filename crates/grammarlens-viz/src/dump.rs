//! Text dumps of graphs and graph groups for inspection and snapshot tests.
//!
//! ```text
//! graph expr
//!   S0 @0: ε → S2
//!   S2 @1: ID → S3
//!   S1 @3 accept: ∅
//! ```

use std::fmt::Write;

use crate::graph::Graph;
use crate::group::GraphGroup;

pub struct GraphPrinter<'a> {
    graph: &'a Graph,
    show_ranks: bool,
}

impl<'a> GraphPrinter<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            show_ranks: true,
        }
    }

    pub fn show_ranks(mut self, show: bool) -> Self {
        self.show_ranks = show;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> std::fmt::Result {
        writeln!(w, "graph {}", self.graph.name())?;

        for node in self.graph.nodes() {
            write!(w, "  {}", node.label)?;
            if self.show_ranks {
                write!(w, " @{}", node.rank)?;
            }
            if node.accepting {
                w.push_str(" accept");
            }
            w.push_str(": ");

            let mut edges = self
                .graph
                .edges()
                .iter()
                .filter(|e| e.from == node.state)
                .peekable();
            if edges.peek().is_none() {
                w.push('∅');
            }
            for (i, edge) in edges.enumerate() {
                if i > 0 {
                    w.push_str(", ");
                }
                write!(w, "{} → {}", edge.label, edge.to)?;
            }
            w.push('\n');
        }

        Ok(())
    }
}

pub struct GroupPrinter<'a> {
    group: &'a GraphGroup,
    show_ranks: bool,
}

impl<'a> GroupPrinter<'a> {
    pub fn new(group: &'a GraphGroup) -> Self {
        Self {
            group,
            show_ranks: true,
        }
    }

    pub fn show_ranks(mut self, show: bool) -> Self {
        self.show_ranks = show;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> std::fmt::Result {
        writeln!(w, "group {:?}", self.group.name())?;

        for graph in self.group.graphs() {
            let printed = GraphPrinter::new(graph).show_ranks(self.show_ranks).dump();
            w.push_str(&printed);
        }

        for (i, path) in self.group.paths().iter().enumerate() {
            write!(w, "path {i}")?;
            if path.visible {
                w.push_str(" visible");
            }
            if !path.enabled {
                w.push_str(" disabled");
            }
            w.push(':');
            for state in &path.states {
                write!(w, " {state}")?;
            }
            w.push('\n');
        }

        Ok(())
    }
}
