//! Error types for the IR crate.

use thiserror::Error;

use crate::wire::WireId;

/// Errors that can occur when building circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A wire name was declared twice.
    #[error("Duplicate wire name '{0}'")]
    DuplicateWire(String),

    /// A gate referenced a wire the circuit does not declare.
    #[error("Wire {wire} out of range for circuit with {num_wires} wires")]
    WireOutOfRange {
        /// The offending wire.
        wire: WireId,
        /// Number of declared wires.
        num_wires: usize,
    },

    /// A gate listed the same wire more than once.
    #[error("Wire {wire} repeated in '{gate}' arguments")]
    DuplicateArgument {
        /// The repeated wire.
        wire: WireId,
        /// Symbol of the gate.
        gate: &'static str,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
