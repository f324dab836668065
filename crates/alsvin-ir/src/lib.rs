//! Gate-list IR for Clifford+T circuits in the `.qc` dialect.
//!
//! A [`Circuit`] is a flat, ordered list of [`Gate`]s over a set of named
//! wires. Wires are classified as *primary inputs* (initial state unknown)
//! or *ancillas* (initial state |0⟩); that split is what the optimiser's
//! phase-polynomial translation keys on.
//!
//! # Example
//!
//! ```rust
//! use alsvin_ir::{Circuit, Gate};
//!
//! let mut circuit = Circuit::new();
//! let a = circuit.add_wire("a", true).unwrap();
//! let b = circuit.add_wire("b", true).unwrap();
//! circuit.push(Gate::T(a)).unwrap();
//! circuit.push(Gate::cnot(a, b)).unwrap();
//! circuit.push(Gate::T(b)).unwrap();
//!
//! assert_eq!(circuit.stats().t, 2);
//! ```

mod circuit;
mod error;
mod gate;
mod stats;
mod wire;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, Rotation};
pub use stats::CircuitStats;
pub use wire::WireId;
