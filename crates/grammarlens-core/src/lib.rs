#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the grammarlens crates.
//!
//! - [`StateId`]: handle to an automaton state, shared by diagnostic paths and graphs
//! - [`GrammarError`]: an analysis finding that implicates rules and automaton paths
//! - [`Diagnostics`]: findings that degrade a result instead of aborting it
//! - [`utils`]: naming and identity helpers for grammar rules

pub mod diagnostics;
mod grammar_error;
mod ids;
pub mod utils;

#[cfg(test)]
mod utils_tests;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use grammar_error::GrammarError;
pub use ids::StateId;

/// Errors raised on API misuse.
///
/// Structural problems inside a grammar never surface here; those degrade
/// to empty results and are reported through [`Diagnostics`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rule span does not satisfy `start <= colon < end`.
    #[error("invalid rule span: start {start}, colon {colon}, end {end}")]
    InvalidRuleSpan {
        start: usize,
        colon: usize,
        end: usize,
    },

    /// Token index past the end of the token stream.
    #[error("token index {index} out of range (stream has {len} tokens)")]
    TokenOutOfRange { index: usize, len: usize },

    /// Configuration or error record could not be deserialized.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for grammarlens operations.
pub type Result<T> = std::result::Result<T, Error>;
