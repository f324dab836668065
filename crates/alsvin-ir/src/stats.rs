//! Circuit statistics.

use serde::{Deserialize, Serialize};

/// Per-kind gate counts and both T-depth measures for a circuit.
///
/// `t_depth_partitions` counts maximal runs of T gates in program order
/// (each run is one parallel T layer); `t_depth_critical` is the largest
/// T-weighted path through the circuit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitStats {
    /// Declared wires.
    pub qubits: usize,
    /// Wires that appear in at least one gate.
    pub qubits_used: usize,
    /// Hadamard count.
    pub h: usize,
    /// CNOT count (including the 7 per doubly-controlled Z).
    pub cnot: usize,
    /// X count (plain X and multiply-controlled tof).
    pub x: usize,
    /// T and T† count (including the 7 per doubly-controlled Z).
    pub t: usize,
    /// P and P† count.
    pub p: usize,
    /// Single-wire Z count.
    pub z: usize,
    /// T-depth by T-layer runs.
    pub t_depth_partitions: usize,
    /// T-depth by critical path.
    pub t_depth_critical: usize,
}

impl std::fmt::Display for CircuitStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "#   qubits: {}", self.qubits)?;
        writeln!(f, "#   qubits used: {}", self.qubits_used)?;
        writeln!(f, "#   H: {}", self.h)?;
        writeln!(f, "#   cnot: {}", self.cnot)?;
        writeln!(f, "#   X: {}", self.x)?;
        writeln!(f, "#   T: {}", self.t)?;
        writeln!(f, "#   P: {}", self.p)?;
        writeln!(f, "#   Z: {}", self.z)?;
        writeln!(f, "#   tdepth (by partitions): {}", self.t_depth_partitions)?;
        write!(f, "#   tdepth (by critical paths): {}", self.t_depth_critical)
    }
}
