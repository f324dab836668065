//! The no-Hadamard pipeline: optimise maximal CNOT+T sub-blocks in place.

use alsvin_ir::{Circuit, Gate, WireId};
use tracing::debug;

use crate::characterize::characterize;
use crate::error::OptResult;
use crate::synthesize::synthesize;

/// Split the circuit into maximal CNOT+T and opaque segments, optimise each
/// CNOT+T segment as its own closed circuit, and reassemble.
///
/// A wire counts as an ancilla for a segment only while nothing upstream
/// has touched it; once used it enters later segments as an unknown input.
pub fn optimize_segments(circuit: &Circuit) -> OptResult<Circuit> {
    let mut out = circuit.clone();
    let mut gates: Vec<Gate> = Vec::new();

    for seg in split(circuit) {
        if seg.cnot_t {
            debug!(gates = seg.gates.len(), "optimising CNOT+T segment");
            gates.extend(optimize_one(circuit, &seg)?);
        } else {
            gates.extend(seg.gates);
        }
    }

    out.set_gates(gates);
    Ok(out)
}

struct Segment {
    cnot_t: bool,
    gates: Vec<Gate>,
    /// Per parent wire: still untouched (|0⟩) when the segment starts.
    zero_at_start: Vec<bool>,
}

/// Gate predicate for the CNOT+T pipeline: phase gates, Paulis, plain and
/// doubly-controlled Z, and CNOT; `H` and `Rz` are opaque.
fn is_cnot_t(gate: &Gate) -> bool {
    match gate {
        Gate::T(_)
        | Gate::Tdg(_)
        | Gate::P(_)
        | Gate::Pdg(_)
        | Gate::X(_)
        | Gate::Y(_)
        | Gate::Cnot { .. } => true,
        Gate::Z(qs) => qs.len() == 1 || qs.len() == 3,
        Gate::H(_) | Gate::Tof(_) | Gate::Rz(..) => false,
    }
}

fn split(circuit: &Circuit) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut zero_now: Vec<bool> = (0..circuit.num_wires())
        .map(|i| circuit.is_ancilla(WireId(i as u32)))
        .collect();
    let mut acc: Vec<Gate> = Vec::new();
    let mut acc_zero = zero_now.clone();
    let mut current: Option<bool> = None;

    for gate in circuit.gates() {
        let kind = is_cnot_t(gate);
        if current != Some(kind) {
            if let Some(prev) = current {
                segments.push(Segment {
                    cnot_t: prev,
                    gates: std::mem::take(&mut acc),
                    zero_at_start: acc_zero,
                });
            }
            acc_zero = zero_now.clone();
            current = Some(kind);
        }
        for w in gate.wires() {
            zero_now[w.index()] = false;
        }
        acc.push(gate.clone());
    }
    if let Some(prev) = current {
        segments.push(Segment {
            cnot_t: prev,
            gates: acc,
            zero_at_start: acc_zero,
        });
    }

    segments
}

/// Optimise one CNOT+T segment as a closed circuit over the wires it uses
/// plus every still-untouched ancilla, then map the result back onto the
/// parent's wires.
fn optimize_one(parent: &Circuit, seg: &Segment) -> OptResult<Vec<Gate>> {
    // Wires in first-use order, then the remaining untouched ancillas.
    let mut wire_map: Vec<WireId> = Vec::new();
    for gate in &seg.gates {
        for w in gate.wires() {
            if !wire_map.contains(&w) {
                wire_map.push(w);
            }
        }
    }
    for i in 0..parent.num_wires() {
        let w = WireId(i as u32);
        if seg.zero_at_start[i] && !wire_map.contains(&w) {
            wire_map.push(w);
        }
    }

    let mut sub = Circuit::new();
    for &w in &wire_map {
        sub.add_wire(parent.name(w), !seg.zero_at_start[w.index()])?;
    }
    for gate in &seg.gates {
        let mut gate = gate.clone();
        gate.map_wires(|w| {
            WireId(wire_map.iter().position(|&p| p == w).unwrap_or_default() as u32)
        });
        sub.push(gate)?;
    }

    let optimized = synthesize(&characterize(&sub)?)?;

    Ok(optimized
        .gates()
        .iter()
        .cloned()
        .map(|mut gate| {
            gate.map_wires(|w| wire_map[w.index()]);
            gate
        })
        .collect())
}
