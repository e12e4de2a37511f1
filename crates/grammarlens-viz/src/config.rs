//! Assembler configuration.

use serde::{Deserialize, Serialize};

/// Settings owned by a [`crate::GraphAssembler`].
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Eliminate pass-through epsilon states when building automata.
    pub optimize: bool,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self { optimize: true }
    }
}

impl AssemblerConfig {
    pub fn from_json(json: &str) -> grammarlens_core::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
