//! Phase-polynomial T-gate optimisation for Clifford+T circuits.
//!
//! The pipeline translates the CNOT + phase fragments of a circuit into a
//! *phase polynomial* — a list of `(coefficient, parity)` rotations over
//! GF(2) affine functions of the inputs — with Hadamards recorded as
//! rank-increasing events. Phase terms are then grouped into a minimum
//! number of linearly independent classes by matroid partitioning, and each
//! class is re-emitted as one parity network around a single T layer.
//!
//! ```text
//! Circuit ──characterize──▶ (phase table, Hadamard events, outputs)
//!                                │
//!                     matroid partitioning
//!                                │
//!         ◀──synthesize── CNOT+T blocks ∥ H ∥ CNOT+T blocks …
//! ```
//!
//! # Example
//!
//! ```rust
//! use alsvin_ir::{Circuit, Gate, WireId};
//!
//! let mut circuit = Circuit::new();
//! let a = circuit.add_wire("a", true).unwrap();
//! circuit.push(Gate::T(a)).unwrap();
//! circuit.push(Gate::T(a)).unwrap();
//!
//! // Two eighth-turns are a quarter-turn: the T gates fuse into one P.
//! let optimized = alsvin_opt::optimize(&circuit).unwrap();
//! assert_eq!(optimized.gates(), &[Gate::P(a)]);
//! ```

mod characterize;
mod error;
mod linalg;
mod oracle;
mod parity;
mod partition;
mod peephole;
mod phase;
mod segment;
mod synthesize;

pub use characterize::{characterize, Characterization, HadamardStep};
pub use error::{OptError, OptResult};
pub use linalg::{rank, reduce, row_ops_to_gates, RowOp};
pub use oracle::IndependenceOracle;
pub use parity::ParityVec;
pub use partition::Partition;
pub use peephole::{remove_ids, remove_swaps};
pub use phase::{PhaseClass, PhaseTable, PhaseTerm, MAX_EXPONENT};
pub use segment::optimize_segments;
pub use synthesize::synthesize;

use alsvin_ir::Circuit;
use tracing::debug;

/// Run the full pipeline: characterise the whole circuit (Hadamards
/// included), re-synthesise it, and clean the result up.
pub fn optimize(circuit: &Circuit) -> OptResult<Circuit> {
    let ch = characterize(circuit)?;
    debug!("characterised circuit:\n{ch}");
    let mut out = synthesize(&ch)?;
    remove_swaps(&mut out);
    remove_ids(&mut out);
    Ok(out)
}

/// Run the segmenting pipeline: optimise only maximal CNOT+T sub-blocks,
/// leaving everything else (including gates the full pipeline rejects)
/// untouched.
pub fn optimize_no_h(circuit: &Circuit) -> OptResult<Circuit> {
    let mut out = optimize_segments(circuit)?;
    remove_swaps(&mut out);
    remove_ids(&mut out);
    Ok(out)
}
