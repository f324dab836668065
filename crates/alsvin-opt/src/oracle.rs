//! Linear-independence oracle for the partition matroid.

use crate::linalg;
use crate::phase::PhaseTerm;

/// Decides whether a set of phase terms can share a single T layer.
///
/// A set `S` is independent when its parities can be placed on distinct
/// wires while the remaining wires still complete the ambient space: the
/// machine has `wires` physical wires, the reachable parity space has
/// dimension `dim`, so after dedicating `|S|` wires to the set there must
/// be at least `dim − rank(S)` wires left to carry the missing dimensions.
#[derive(Debug, Clone, Copy)]
pub struct IndependenceOracle {
    wires: usize,
    dim: usize,
    vars: usize,
}

impl IndependenceOracle {
    /// Create an oracle for `wires` physical wires, ambient dimension
    /// `dim`, and `vars` value variables.
    pub fn new(wires: usize, dim: usize, vars: usize) -> Self {
        IndependenceOracle { wires, dim, vars }
    }

    /// Current ambient dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Grow the ambient dimension after a Hadamard introduces a value that
    /// becomes reachable.
    pub fn set_dim(&mut self, dim: usize) {
        self.dim = dim;
    }

    /// Whether the term set indexed by `set` is independent.
    pub fn admits(&self, set: &[usize], terms: &[PhaseTerm]) -> bool {
        if set.len() > self.wires {
            return false;
        }
        if set.len() == 1 || self.wires - set.len() >= self.dim {
            return true;
        }
        let mut scratch: Vec<_> = set.iter().map(|&i| terms[i].parity.clone()).collect();
        let rank = linalg::rank_in_place(&mut scratch, self.vars);
        self.wires - set.len() >= self.dim.saturating_sub(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parity::ParityVec;

    fn term(width: usize, bits: &[usize]) -> PhaseTerm {
        let mut parity = ParityVec::zero(width);
        for &b in bits {
            parity.set(b);
        }
        PhaseTerm { coeff: 1, parity }
    }

    #[test]
    fn test_singleton_always_admitted() {
        let oracle = IndependenceOracle::new(1, 1, 2);
        let terms = vec![term(3, &[0]), term(3, &[1])];
        assert!(oracle.admits(&[0], &terms));
        assert!(oracle.admits(&[1], &terms));
    }

    #[test]
    fn test_more_terms_than_wires_rejected() {
        let oracle = IndependenceOracle::new(1, 1, 2);
        let terms = vec![term(3, &[0]), term(3, &[1])];
        assert!(!oracle.admits(&[0, 1], &terms));
    }

    #[test]
    fn test_full_rank_set_admitted() {
        let oracle = IndependenceOracle::new(2, 2, 2);
        let terms = vec![term(3, &[0]), term(3, &[0, 1])];
        assert!(oracle.admits(&[0, 1], &terms));
    }

    #[test]
    fn test_dependent_set_needs_spare_wires() {
        // Three pairwise-sum parities on three wires span only rank 2, so a
        // third wire cannot complete the 3-dimensional space.
        let oracle = IndependenceOracle::new(3, 3, 3);
        let terms = vec![
            term(4, &[0, 1]),
            term(4, &[0, 2]),
            term(4, &[1, 2]),
            term(4, &[0, 1, 2]),
        ];
        assert!(oracle.admits(&[0, 1], &terms));
        assert!(!oracle.admits(&[0, 1, 2], &terms));
        // Swapping in the full-sum parity raises the rank and fits.
        assert!(oracle.admits(&[0, 1, 3], &terms));
    }

    #[test]
    fn test_spare_wires_allow_dependent_sets() {
        // With an ancilla the machine has 3 wires for a 2-dimensional
        // space; two equal parities still leave a wire to span the rest.
        let oracle = IndependenceOracle::new(3, 2, 2);
        let terms = vec![term(3, &[0]), term(3, &[0])];
        assert!(oracle.admits(&[0, 1], &terms));
    }
}
