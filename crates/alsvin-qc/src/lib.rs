//! Parser and emitter for the `.qc` circuit format.
//!
//! The format is line-oriented:
//!
//! ```text
//! .v a b c        # all wires
//! .i a b          # wires that are primary inputs
//! .o a b c        # outputs (accepted, not semantically used)
//!
//! BEGIN
//! T a
//! tof a b ;
//! H c
//! END
//! ```
//!
//! Gate symbols: `H X Y Z P P* T T* tof TOF` and `Rz(base^k)`. `TOF` is
//! normalised to `tof`, and a one-argument `tof` to `X`.
//!
//! # Example
//!
//! ```rust
//! use alsvin_qc::{parse, emit};
//!
//! let circuit = parse(".v a b\n.i a b\nBEGIN\nT a\ntof a b\nEND\n").unwrap();
//! assert_eq!(circuit.num_wires(), 2);
//!
//! let text = emit(&circuit);
//! let reparsed = parse(&text).unwrap();
//! assert_eq!(circuit, reparsed);
//! ```

mod emitter;
mod error;
mod lexer;
mod parser;

pub use emitter::emit;
pub use error::{ParseError, ParseResult};
pub use parser::parse;
