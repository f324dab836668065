//! The circuit container.

use rustc_hash::FxHashSet;

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::stats::CircuitStats;
use crate::wire::WireId;

/// An ordered gate list over a set of named wires.
///
/// Wires keep the order of the `.v` declaration. Each wire is either a
/// *primary input* (`.i`, initial state unknown) or an *ancilla* prepared
/// in |0⟩.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circuit {
    names: Vec<String>,
    primary: Vec<bool>,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a wire. `primary` marks it as a `.i` input rather than a
    /// zero-initialised ancilla.
    pub fn add_wire(&mut self, name: impl Into<String>, primary: bool) -> IrResult<WireId> {
        let name = name.into();
        if self.names.iter().any(|n| *n == name) {
            return Err(IrError::DuplicateWire(name));
        }
        let id = WireId(self.names.len() as u32);
        self.names.push(name);
        self.primary.push(primary);
        Ok(id)
    }

    /// Look up a wire by name.
    pub fn wire(&self, name: &str) -> Option<WireId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| WireId(i as u32))
    }

    /// Name of a wire.
    pub fn name(&self, wire: WireId) -> &str {
        &self.names[wire.index()]
    }

    /// All wire names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether the wire is a primary input.
    pub fn is_primary(&self, wire: WireId) -> bool {
        self.primary[wire.index()]
    }

    /// Whether the wire starts in |0⟩.
    pub fn is_ancilla(&self, wire: WireId) -> bool {
        !self.primary[wire.index()]
    }

    /// Reclassify a wire. Used by the segmenting pipeline, where a wire
    /// that has been touched upstream is no longer a fresh ancilla.
    pub fn set_primary(&mut self, wire: WireId, primary: bool) {
        self.primary[wire.index()] = primary;
    }

    /// Total number of declared wires.
    pub fn num_wires(&self) -> usize {
        self.names.len()
    }

    /// Number of primary inputs.
    pub fn num_inputs(&self) -> usize {
        self.primary.iter().filter(|p| **p).count()
    }

    /// Number of ancillas.
    pub fn num_ancillas(&self) -> usize {
        self.num_wires() - self.num_inputs()
    }

    /// Append a gate, validating its wire references.
    pub fn push(&mut self, gate: Gate) -> IrResult<()> {
        let wires = gate.wires();
        for (i, &w) in wires.iter().enumerate() {
            if w.index() >= self.num_wires() {
                return Err(IrError::WireOutOfRange {
                    wire: w,
                    num_wires: self.num_wires(),
                });
            }
            if wires[..i].contains(&w) {
                return Err(IrError::DuplicateArgument {
                    wire: w,
                    gate: gate.symbol(),
                });
            }
        }
        self.gates.push(gate);
        Ok(())
    }

    /// The gate list.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Mutable access to the gate list, for rewrite passes.
    pub fn gates_mut(&mut self) -> &mut Vec<Gate> {
        &mut self.gates
    }

    /// Replace the gate list wholesale.
    pub fn set_gates(&mut self, gates: Vec<Gate>) {
        self.gates = gates;
    }

    /// Number of Hadamard gates.
    pub fn count_h(&self) -> usize {
        self.gates
            .iter()
            .filter(|g| matches!(g, Gate::H(_)))
            .count()
    }

    /// Number of T and T† gates.
    pub fn count_t(&self) -> usize {
        self.gates.iter().filter(|g| g.is_t()).count()
    }

    /// Gather per-kind gate counts and the partition-style T-depth.
    ///
    /// The partition-style depth counts maximal runs of T/T† gates, plus 3
    /// for every 3-wire Z (whose expansion also contributes 7 to the T and
    /// CNOT counts).
    pub fn stats(&self) -> CircuitStats {
        let mut s = CircuitStats {
            qubits: self.num_wires(),
            ..CircuitStats::default()
        };
        let mut used: FxHashSet<WireId> = FxHashSet::default();
        let mut t_layer = false;

        for gate in &self.gates {
            used.extend(gate.wires());
            match gate {
                Gate::T(_) | Gate::Tdg(_) => {
                    s.t += 1;
                    if !t_layer {
                        t_layer = true;
                        s.t_depth_partitions += 1;
                    }
                }
                Gate::P(_) | Gate::Pdg(_) => s.p += 1,
                Gate::Z(qs) if qs.len() == 3 => {
                    s.t_depth_partitions += 3;
                    s.t += 7;
                    s.cnot += 7;
                }
                Gate::Z(_) => s.z += 1,
                Gate::Cnot { .. } => {
                    s.cnot += 1;
                    t_layer = false;
                }
                Gate::X(_) | Gate::Tof(_) => {
                    s.x += 1;
                    t_layer = false;
                }
                Gate::H(_) => {
                    s.h += 1;
                    t_layer = false;
                }
                Gate::Y(_) | Gate::Rz(..) => t_layer = false,
            }
        }

        s.qubits_used = used.len();
        s.t_depth_critical = self.critical_t_depth();
        s
    }

    /// Critical-path T-depth: the largest T-weighted path through the
    /// reversed gate list, with T/T† weighing 1 and Z of arity ≥ 3
    /// weighing 3.
    pub fn critical_t_depth(&self) -> usize {
        let mut depth = vec![0usize; self.num_wires()];

        for gate in self.gates.iter().rev() {
            let wires = gate.wires();
            let mut d = wires
                .iter()
                .map(|w| depth[w.index()])
                .max()
                .unwrap_or(0);
            match gate {
                Gate::T(_) | Gate::Tdg(_) => d += 1,
                Gate::Z(qs) if qs.len() >= 3 => d += 3,
                _ => {}
            }
            for w in wires {
                depth[w.index()] = d;
            }
        }

        depth.into_iter().max().unwrap_or(0)
    }
}
