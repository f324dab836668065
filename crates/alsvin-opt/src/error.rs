//! Error types for the optimiser.

use thiserror::Error;

use crate::phase::MAX_EXPONENT;

/// Errors that can occur during characterisation or synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OptError {
    /// A gate that is grammatical but outside the optimiser's gate set.
    #[error("Gate {index}: '{symbol}' with {arity} argument(s) is not supported by this pipeline")]
    GateUnsupported {
        /// Position of the gate in the input gate list.
        index: usize,
        /// Gate symbol.
        symbol: &'static str,
        /// Number of arguments it was given.
        arity: usize,
    },

    /// A rotation exponent beyond the configured cap.
    #[error("Rotation exponent {exp} exceeds the maximum of {MAX_EXPONENT}")]
    ExponentOverflow {
        /// The offending exponent.
        exp: u32,
    },

    /// A phase coefficient left the representable range while rescaling.
    #[error("Phase coefficient overflow while renormalising a rotation class")]
    CoefficientOverflow,

    /// The partitioner produced a class the oracle rejects.
    #[error("Internal invariant violated: partition class {indices:?} fails the independence oracle")]
    DependentClass {
        /// Offending term indices.
        indices: Vec<usize>,
    },

    /// A wire-state rank grew past the variable count.
    #[error("Internal invariant violated: wire rank {rank} exceeds the {vars} ambient variables")]
    RankOverflow {
        /// Computed rank.
        rank: usize,
        /// Number of ambient variables (`n + h`).
        vars: usize,
    },

    /// Two states that must span the same space do not.
    #[error("Internal invariant violated: {context} states span different parity spaces")]
    SpanMismatch {
        /// Where the mismatch was detected.
        context: &'static str,
    },

    /// A phase class lost its partition bookkeeping mid-synthesis.
    #[error("Internal invariant violated: no partition state for phase class '{key}'")]
    UnknownClass {
        /// The missing class key.
        key: String,
    },

    /// Error from circuit construction.
    #[error("Circuit error: {0}")]
    Ir(#[from] alsvin_ir::IrError),
}

/// Result type for optimiser operations.
pub type OptResult<T> = Result<T, OptError>;
