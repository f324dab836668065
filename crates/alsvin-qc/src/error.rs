//! Error types for the `.qc` parser.

use thiserror::Error;

/// Errors that can occur while parsing `.qc` text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A required header section or keyword was missing.
    #[error("Line {line}: expected {expected}, found {found}")]
    Unexpected {
        /// 1-based source line.
        line: usize,
        /// What the parser was looking for.
        expected: &'static str,
        /// What it found instead.
        found: String,
    },

    /// The source ended before the circuit was closed.
    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(&'static str),

    /// A gate line referenced a wire not declared in `.v`.
    #[error("Line {line}: no such qubit \"{name}\"")]
    UnknownQubit {
        /// 1-based source line.
        line: usize,
        /// The undeclared name.
        name: String,
    },

    /// A gate symbol outside the accepted set.
    #[error("Line {line}: unrecognised gate '{symbol}'")]
    UnknownGate {
        /// 1-based source line.
        line: usize,
        /// The offending symbol.
        symbol: String,
    },

    /// A gate was given the wrong number of arguments.
    #[error("Line {line}: gate '{gate}' expects {expected} argument(s), got {got}")]
    WrongArity {
        /// 1-based source line.
        line: usize,
        /// Gate symbol.
        gate: String,
        /// Expected arity description.
        expected: &'static str,
        /// Arguments supplied.
        got: usize,
    },

    /// An `Rz(...)` argument that does not follow `base^exp`.
    #[error("Line {line}: malformed rotation '{token}'")]
    MalformedRotation {
        /// 1-based source line.
        line: usize,
        /// The whole token.
        token: String,
    },

    /// Error from circuit construction.
    #[error("Circuit error: {0}")]
    Ir(#[from] alsvin_ir::IrError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
