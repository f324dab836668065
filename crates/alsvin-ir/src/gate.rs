//! Gate types for the `.qc` dialect.

use serde::{Deserialize, Serialize};

use crate::wire::WireId;

/// A single gate application.
///
/// The variants cover exactly the `.qc` gate set the optimiser understands.
/// `tof` with two arguments is represented as [`Gate::Cnot`]; `tof` with one
/// argument is normalised to [`Gate::X`] by the parser. `Z` carries its
/// argument list because a three-wire `Z` denotes the doubly-controlled Z
/// realised through the seven-T Clifford+T expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate {
    /// Hadamard.
    H(WireId),
    /// Pauli-X.
    X(WireId),
    /// Pauli-Y.
    Y(WireId),
    /// Pauli-Z with zero or more controls; arity 1 is plain Z, arity 3 is
    /// the doubly-controlled Z.
    Z(Vec<WireId>),
    /// Phase gate S.
    P(WireId),
    /// Inverse phase gate S†.
    Pdg(WireId),
    /// T gate.
    T(WireId),
    /// Inverse T gate T†.
    Tdg(WireId),
    /// Controlled-NOT: `target ^= control`.
    Cnot {
        /// Control wire.
        control: WireId,
        /// Target wire.
        target: WireId,
    },
    /// Multiply-controlled X with three or more arguments. Carried through
    /// the IR but rejected by the optimiser.
    Tof(Vec<WireId>),
    /// Z-axis rotation by a named angle family, `Rz(base^exp)`.
    Rz(Rotation, WireId),
}

/// The angle of an [`Gate::Rz`]: a named base scaled by a dyadic exponent,
/// with the sign kept separate so phase bookkeeping can fold it into a
/// coefficient.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rotation {
    /// True when the angle carried a leading `-`.
    pub negative: bool,
    /// Rotation-class key, e.g. `pi` for dyadic rotations.
    pub base: String,
    /// Dyadic exponent: the rotation is by `base / 2^exp`.
    pub exp: u32,
}

impl Rotation {
    /// Create a rotation from a possibly sign-prefixed base string.
    pub fn new(base: impl Into<String>, exp: u32) -> Self {
        let base = base.into();
        match base.strip_prefix('-') {
            Some(stripped) => Rotation {
                negative: true,
                base: stripped.to_string(),
                exp,
            },
            None => Rotation {
                negative: false,
                base,
                exp,
            },
        }
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(f, "{}{}^{}", sign, self.base, self.exp)
    }
}

impl Gate {
    /// Convenience constructor for CNOT.
    pub fn cnot(control: WireId, target: WireId) -> Self {
        Gate::Cnot { control, target }
    }

    /// The gate's `.qc` symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Gate::H(_) => "H",
            Gate::X(_) => "X",
            Gate::Y(_) => "Y",
            Gate::Z(_) => "Z",
            Gate::P(_) => "P",
            Gate::Pdg(_) => "P*",
            Gate::T(_) => "T",
            Gate::Tdg(_) => "T*",
            Gate::Cnot { .. } | Gate::Tof(_) => "tof",
            Gate::Rz(..) => "Rz",
        }
    }

    /// The wires this gate acts on, in argument order.
    pub fn wires(&self) -> Vec<WireId> {
        match self {
            Gate::H(q)
            | Gate::X(q)
            | Gate::Y(q)
            | Gate::P(q)
            | Gate::Pdg(q)
            | Gate::T(q)
            | Gate::Tdg(q)
            | Gate::Rz(_, q) => vec![*q],
            Gate::Z(qs) | Gate::Tof(qs) => qs.clone(),
            Gate::Cnot { control, target } => vec![*control, *target],
        }
    }

    /// Apply a wire renaming in place.
    pub fn map_wires(&mut self, mut f: impl FnMut(WireId) -> WireId) {
        match self {
            Gate::H(q)
            | Gate::X(q)
            | Gate::Y(q)
            | Gate::P(q)
            | Gate::Pdg(q)
            | Gate::T(q)
            | Gate::Tdg(q)
            | Gate::Rz(_, q) => *q = f(*q),
            Gate::Z(qs) | Gate::Tof(qs) => {
                for q in qs.iter_mut() {
                    *q = f(*q);
                }
            }
            Gate::Cnot { control, target } => {
                *control = f(*control);
                *target = f(*target);
            }
        }
    }

    /// Whether this gate counts as a T (or T†) for T-count purposes.
    #[inline]
    pub fn is_t(&self) -> bool {
        matches!(self, Gate::T(_) | Gate::Tdg(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_sign_split() {
        let r = Rotation::new("-pi", 3);
        assert!(r.negative);
        assert_eq!(r.base, "pi");
        assert_eq!(r.to_string(), "-pi^3");

        let r = Rotation::new("theta", 0);
        assert!(!r.negative);
        assert_eq!(r.to_string(), "theta^0");
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Gate::T(WireId(0)).symbol(), "T");
        assert_eq!(Gate::Tdg(WireId(0)).symbol(), "T*");
        assert_eq!(Gate::cnot(WireId(0), WireId(1)).symbol(), "tof");
        assert_eq!(Gate::Z(vec![WireId(0), WireId(1), WireId(2)]).symbol(), "Z");
    }

    #[test]
    fn test_wires_order() {
        let g = Gate::cnot(WireId(3), WireId(1));
        assert_eq!(g.wires(), vec![WireId(3), WireId(1)]);
    }

    #[test]
    fn test_map_wires() {
        let mut g = Gate::cnot(WireId(0), WireId(1));
        g.map_wires(|w| WireId(w.0 + 10));
        assert_eq!(g, Gate::cnot(WireId(10), WireId(11)));
    }
}
