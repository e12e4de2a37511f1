//! Grammar analysis findings (ambiguities, unreachable alternatives, ...).
//!
//! A `GrammarError` comes from the external grammar analyzer. It names the
//! rules involved and carries one or more automaton paths that illustrate
//! the problem. Records deserialize from JSON so analyzers in other
//! processes can hand them over.

use serde::{Deserialize, Serialize};

use crate::StateId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrammarError {
    pub message: String,
    /// Rules implicated by this error, in declaration order.
    pub rules: Vec<String>,
    /// Diagnostic paths, each an ordered sequence of automaton states.
    pub paths: Vec<Vec<StateId>>,
    /// Parallel to `paths`: `true` when the path is disabled.
    pub paths_disabled: Vec<bool>,
}

impl GrammarError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Append an enabled path.
    pub fn with_path(self, states: impl IntoIterator<Item = StateId>) -> Self {
        self.with_path_flag(states, false)
    }

    /// Append a path that starts out disabled.
    pub fn with_disabled_path(self, states: impl IntoIterator<Item = StateId>) -> Self {
        self.with_path_flag(states, true)
    }

    fn with_path_flag(mut self, states: impl IntoIterator<Item = StateId>, disabled: bool) -> Self {
        self.paths.push(states.into_iter().collect());
        self.paths_disabled.push(disabled);
        self
    }

    /// Whether the path at `index` is disabled. Missing flags read as enabled.
    pub fn is_path_disabled(&self, index: usize) -> bool {
        self.paths_disabled.get(index).copied().unwrap_or(false)
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a JSON array of error records.
    pub fn list_from_json(json: &str) -> crate::Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}
