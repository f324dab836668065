//! Wire identifiers.

use serde::{Deserialize, Serialize};

/// Index of a wire within a circuit's declaration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct WireId(pub u32);

impl WireId {
    /// The wire's position in the circuit's `.v` declaration.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for WireId {
    fn from(value: u32) -> Self {
        WireId(value)
    }
}

impl std::fmt::Display for WireId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "w{}", self.0)
    }
}
