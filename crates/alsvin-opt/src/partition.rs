//! Matroid partitioning of phase terms into T-parallel classes.

use crate::oracle::IndependenceOracle;
use crate::phase::PhaseTerm;

/// A partition of phase-term indices into independent classes.
///
/// Each class is a set of indices into one phase class's term list whose
/// parities the oracle accepts as a single T layer. Classes keep creation
/// order, and indices keep insertion order within a class; the number of
/// classes upper-bounds the T-depth contributed by the phase class.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    classes: Vec<Vec<usize>>,
}

impl Partition {
    /// Create an empty partition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a term index into the first class that stays independent
    /// with it; open a new class when none does.
    pub fn add(&mut self, index: usize, terms: &[PhaseTerm], oracle: &IndependenceOracle) {
        for class in &mut self.classes {
            class.push(index);
            if oracle.admits(class, terms) {
                return;
            }
            class.pop();
        }
        self.classes.push(vec![index]);
    }

    /// Split off every index satisfying `pred` into a partition of its own,
    /// preserving class grouping; emptied classes are dropped.
    pub fn freeze(&mut self, mut pred: impl FnMut(usize) -> bool) -> Partition {
        let mut frozen = Vec::new();
        for class in &mut self.classes {
            let (take, keep): (Vec<usize>, Vec<usize>) =
                class.iter().copied().partition(|&i| pred(i));
            if !take.is_empty() {
                frozen.push(take);
            }
            *class = keep;
        }
        self.classes.retain(|c| !c.is_empty());
        Partition { classes: frozen }
    }

    /// Dissolve every class and re-add each index in the prior order.
    ///
    /// Required after the ambient dimension grows: classes built at a lower
    /// dimension may now accept more terms, so fewer classes can suffice.
    pub fn repartition(&mut self, terms: &[PhaseTerm], oracle: &IndependenceOracle) {
        let indices: Vec<usize> = self.classes.drain(..).flatten().collect();
        for index in indices {
            self.add(index, terms, oracle);
        }
    }

    /// The classes, in creation order.
    pub fn classes(&self) -> &[Vec<usize>] {
        &self.classes
    }

    /// Number of classes.
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Total number of indices across classes.
    pub fn num_terms(&self) -> usize {
        self.classes.iter().map(Vec::len).sum()
    }

    /// Whether no class exists.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
