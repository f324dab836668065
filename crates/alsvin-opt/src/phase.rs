//! The phase table: coefficients attached to parity functions, grouped by
//! rotation class.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{OptError, OptResult};
use crate::parity::ParityVec;

/// Hard cap on a class's denominator exponent; past it a coefficient
/// rescale would overflow, which surfaces as an invariant failure rather
/// than silent truncation.
pub const MAX_EXPONENT: u32 = 24;

/// One phase term: `coeff · exp(πi · parity / 2^max_exp)` within its class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTerm {
    /// Signed multiple of the class's base rotation. Zero after a merge
    /// cancels; such terms stay in the table but are skipped downstream.
    pub coeff: i32,
    /// The parity function the rotation applies to.
    pub parity: ParityVec,
}

/// All terms of one rotation class, held at a common denominator
/// `2^max_exp`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseClass {
    /// Common denominator exponent for every coefficient in `terms`.
    pub max_exp: u32,
    /// Terms in insertion order. Indices into this list are the partition
    /// currency and stay stable once created.
    pub terms: Vec<PhaseTerm>,
}

impl PhaseClass {
    /// Insert a rotation of `parity` by `±base/2^exp`, merging into an
    /// existing term with an equal parity.
    pub fn insert(&mut self, negative: bool, exp: u32, parity: ParityVec) -> OptResult<()> {
        if exp > MAX_EXPONENT {
            return Err(OptError::ExponentOverflow { exp });
        }

        if exp > self.max_exp {
            let shift = exp - self.max_exp;
            for term in &mut self.terms {
                term.coeff = term
                    .coeff
                    .checked_shl(shift)
                    .filter(|c| c.unsigned_abs() < 1u32 << MAX_EXPONENT)
                    .ok_or(OptError::CoefficientOverflow)?;
            }
            self.max_exp = exp;
        }

        let value = 1i32 << (self.max_exp - exp);
        let value = if negative { -value } else { value };

        match self.terms.iter_mut().find(|t| t.parity == parity) {
            Some(term) => {
                term.coeff = term
                    .coeff
                    .checked_add(value)
                    .ok_or(OptError::CoefficientOverflow)?;
                if term.coeff == 0 {
                    debug!("phase term cancelled to zero coefficient");
                }
            }
            None => self.terms.push(PhaseTerm {
                coeff: value,
                parity,
            }),
        }
        Ok(())
    }
}

/// Phase classes keyed by rotation base (`"pi"` for the dyadic T/P/Z
/// family). Ordered so that every walk over classes is deterministic.
#[derive(Debug, Clone, Default)]
pub struct PhaseTable {
    classes: BTreeMap<String, PhaseClass>,
}

impl PhaseTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a term into the class named `base`.
    pub fn insert(
        &mut self,
        base: &str,
        negative: bool,
        exp: u32,
        parity: ParityVec,
    ) -> OptResult<()> {
        self.classes
            .entry(base.to_string())
            .or_default()
            .insert(negative, exp, parity)
    }

    /// The class for `base`, if any term was ever inserted.
    pub fn class(&self, base: &str) -> Option<&PhaseClass> {
        self.classes.get(base)
    }

    /// Iterate classes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PhaseClass)> {
        self.classes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether no class holds any term.
    pub fn is_empty(&self) -> bool {
        self.classes.values().all(|c| c.terms.is_empty())
    }

    /// Total number of terms across classes, cancelled ones included.
    pub fn num_terms(&self) -> usize {
        self.classes.values().map(|c| c.terms.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parity(bits: &[usize]) -> ParityVec {
        let mut v = ParityVec::zero(4);
        for &b in bits {
            v.set(b);
        }
        v
    }

    #[test]
    fn test_merge_equal_parities() {
        let mut class = PhaseClass::default();
        class.insert(false, 2, parity(&[0])).unwrap();
        class.insert(false, 2, parity(&[0])).unwrap();
        assert_eq!(class.terms.len(), 1);
        assert_eq!(class.terms[0].coeff, 2);
        assert_eq!(class.max_exp, 2);
    }

    #[test]
    fn test_cancel_keeps_term() {
        let mut class = PhaseClass::default();
        class.insert(false, 2, parity(&[0])).unwrap();
        class.insert(true, 2, parity(&[0])).unwrap();
        assert_eq!(class.terms.len(), 1);
        assert_eq!(class.terms[0].coeff, 0);
    }

    #[test]
    fn test_rescale_on_exponent_growth() {
        let mut class = PhaseClass::default();
        // A Z (exp 0) then a T (exp 2) on the same parity: the Z coefficient
        // rescales to 4 quarter-turns.
        class.insert(false, 0, parity(&[0])).unwrap();
        class.insert(false, 2, parity(&[0])).unwrap();
        assert_eq!(class.max_exp, 2);
        assert_eq!(class.terms[0].coeff, 5);
    }

    #[test]
    fn test_lower_exponent_scales_value() {
        let mut class = PhaseClass::default();
        class.insert(false, 2, parity(&[0])).unwrap();
        // P at exp 1 is worth two T units at the common denominator.
        class.insert(false, 1, parity(&[0])).unwrap();
        assert_eq!(class.max_exp, 2);
        assert_eq!(class.terms[0].coeff, 3);
    }

    #[test]
    fn test_distinct_parities_not_merged() {
        let mut class = PhaseClass::default();
        class.insert(false, 2, parity(&[0])).unwrap();
        class.insert(false, 2, parity(&[0, 1])).unwrap();
        assert_eq!(class.terms.len(), 2);
    }

    #[test]
    fn test_exponent_cap() {
        let mut class = PhaseClass::default();
        let err = class.insert(false, MAX_EXPONENT + 1, parity(&[0]));
        assert!(matches!(err, Err(OptError::ExponentOverflow { .. })));
    }

    #[test]
    fn test_table_is_ordered_by_key() {
        let mut table = PhaseTable::new();
        table.insert("zeta", false, 0, parity(&[0])).unwrap();
        table.insert("pi", false, 2, parity(&[1])).unwrap();
        let keys: Vec<_> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["pi", "zeta"]);
    }
}
