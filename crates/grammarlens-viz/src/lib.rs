#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Rule automata and their graph views.
//!
//! - `automaton` - state arena, fragment combinators, the [`AutomatonProvider`] seam
//! - `optimize` - reachable-state collection and epsilon elimination
//! - `render` - [`AutomatonGraph`] to [`Graph`]
//! - `group` - graphs bundled with the diagnostic paths of one error
//! - `assembler` - per-rule graphs and per-error groups
//! - `dump` - text output for inspection and tests
//!
//! # Example
//!
//! ```
//! use grammarlens_core::Diagnostics;
//! use grammarlens_viz::{AssemblerConfig, Automaton, GraphAssembler};
//!
//! // e : t ('+' t)* ;
//! let mut automaton = Automaton::new();
//! let head = automaton.rule_ref("t");
//! let plus = automaton.symbol("'+'");
//! let operand = automaton.rule_ref("t");
//! let tail = automaton.sequence(&[plus, operand]);
//! let repeat = automaton.zero_or_more(tail);
//! let body = automaton.sequence(&[head, repeat]);
//! automaton.define_rule("e", body);
//!
//! let assembler = GraphAssembler::new(AssemblerConfig::default());
//! let mut diagnostics = Diagnostics::new();
//! let graphs = assembler
//!     .build_for_rule(&automaton, "e", &mut diagnostics)
//!     .unwrap();
//! assert_eq!(graphs[0].name(), "e");
//! assert!(assembler.build_for_rule(&automaton, "missing", &mut diagnostics).is_none());
//! ```

pub mod assembler;
pub mod automaton;
pub mod config;
pub mod dump;
pub mod graph;
pub mod group;
pub mod optimize;
pub mod render;

#[cfg(test)]
mod assembler_tests;
#[cfg(test)]
mod optimize_tests;

pub use assembler::{GraphAssembler, Visualization};
pub use automaton::{Automaton, AutomatonProvider, Fragment, Label, RuleAutomaton, State, Transition};
pub use config::AssemblerConfig;
pub use dump::{GraphPrinter, GroupPrinter};
pub use graph::{Edge, Graph, Node};
pub use group::{GraphGroup, Path};
pub use optimize::{AutomatonGraph, GraphState, OptimizeStats};
pub use render::{GraphRenderer, PlainRenderer};
