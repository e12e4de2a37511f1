/// A lightweight handle to an automaton state.
///
/// States live in an arena owned by the automaton provider; the id is the
/// index into that arena. Ordered by creation.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct StateId(u32);

impl StateId {
    /// Raw index for lookups/debugging.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Create a StateId from a raw index.
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "S{}", self.0)
    }
}
