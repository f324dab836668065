//! Re-synthesis of a characterised circuit as CNOT+T blocks around the
//! source circuit's Hadamards.

use std::collections::{BTreeMap, BTreeSet};

use alsvin_ir::{Circuit, Gate, Rotation, WireId};
use tracing::debug;

use crate::characterize::Characterization;
use crate::error::{OptError, OptResult};
use crate::linalg;
use crate::oracle::IndependenceOracle;
use crate::parity::ParityVec;
use crate::partition::Partition;
use crate::phase::{PhaseClass, PhaseTerm};

/// Synthesise an equivalent circuit from a characterisation.
///
/// Walks the Hadamard events in source order. Ahead of each event the
/// partition classes that interact with it are frozen and emitted as
/// CNOT+T blocks, the wire state is realigned to the event's snapshot, and
/// the Hadamard is replayed; when the reachable space grows, the oracle is
/// updated and every partition rebuilt. Terms whose variables are not all
/// prepared yet wait in per-class `remaining` lists.
pub fn synthesize(ch: &Characterization) -> OptResult<Circuit> {
    let q = ch.num_wires();
    let vars = ch.num_vars();
    let width = vars + 1;

    let mut circuit = Circuit::new();
    for (name, &zero) in ch.names.iter().zip(&ch.zero) {
        circuit.add_wire(name.clone(), !zero)?;
    }

    // Initial wire state, and the mask of value variables prepared so far
    // (the affine constant always counts as prepared).
    let mut wires = Vec::with_capacity(q);
    let mut mask = ParityVec::zero(width);
    mask.set(vars);
    let mut next_value = 0;
    for &zero in &ch.zero {
        let mut parity = ParityVec::zero(width);
        if !zero {
            parity.set(next_value);
            mask.set(next_value);
            next_value += 1;
        }
        wires.push(parity);
    }

    let mut dim = ch.n;
    let mut oracle = IndependenceOracle::new(q, dim, vars);

    let mut partitions: BTreeMap<&str, Partition> = BTreeMap::new();
    let mut remaining: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (key, class) in ch.table.iter() {
        partitions.insert(key, Partition::new());
        remaining.insert(
            key,
            class
                .terms
                .iter()
                .enumerate()
                .filter(|(_, t)| t.coeff != 0)
                .map(|(i, _)| i)
                .collect(),
        );
    }
    let total_terms: usize = remaining.values().map(Vec::len).sum();

    let mut gates: Vec<Gate> = Vec::new();

    for (key, class) in ch.table.iter() {
        let waiting = remaining
            .get_mut(key)
            .ok_or_else(|| OptError::UnknownClass { key: key.to_string() })?;
        let partition = partitions
            .get_mut(key)
            .ok_or_else(|| OptError::UnknownClass { key: key.to_string() })?;
        drain_remaining(waiting, &mask, &class.terms, partition, &oracle);
    }
    debug!(
        partitioned = total_terms - remaining.values().map(Vec::len).sum::<usize>(),
        total = total_terms,
        "phase rotations partitioned"
    );

    for (step_no, step) in ch.steps.iter().enumerate() {
        debug!("hadamard {}/{}", step_no + 1, ch.steps.len());

        // Evacuate every term that interacts with this Hadamard.
        for (key, class) in ch.table.iter() {
            let empty = BTreeSet::new();
            let lost = step.inputs.get(key).unwrap_or(&empty);
            let frozen = partitions
                .get_mut(key)
                .ok_or_else(|| OptError::UnknownClass { key: key.to_string() })?
                .freeze(|i| lost.contains(&i));
            for set in frozen.classes() {
                emit_block(&mut gates, class, key, set, &wires, vars, &oracle)?;
            }
        }

        // Realign so the Hadamard acts on the parity it saw in the source.
        align(&mut gates, &mut wires, &step.snapshot, vars)?;

        gates.push(Gate::H(WireId(step.qubit as u32)));
        wires[step.qubit].clear();
        wires[step.qubit].set(step.prep);
        mask.set(step.prep);

        let rank = linalg::rank(&wires, vars);
        if rank > vars {
            return Err(OptError::RankOverflow { rank, vars });
        }
        if rank > dim {
            debug!(dim = rank, "dimension increased, rebuilding partitions");
            dim = rank;
            oracle.set_dim(dim);
            for (key, class) in ch.table.iter() {
                partitions
                    .get_mut(key)
                    .ok_or_else(|| OptError::UnknownClass { key: key.to_string() })?
                    .repartition(&class.terms, &oracle);
            }
        }

        for (key, class) in ch.table.iter() {
            let waiting = remaining
                .get_mut(key)
                .ok_or_else(|| OptError::UnknownClass { key: key.to_string() })?;
            let partition = partitions
                .get_mut(key)
                .ok_or_else(|| OptError::UnknownClass { key: key.to_string() })?;
            drain_remaining(waiting, &mask, &class.terms, partition, &oracle);
        }
        debug!(
            partitioned = total_terms - remaining.values().map(Vec::len).sum::<usize>(),
            total = total_terms,
            "phase rotations partitioned"
        );
    }

    // Residual blocks, then transform the wires into the recorded outputs.
    for (key, class) in ch.table.iter() {
        let partition = partitions
            .get(key)
            .ok_or_else(|| OptError::UnknownClass { key: key.to_string() })?;
        for set in partition.classes() {
            emit_block(&mut gates, class, key, set, &wires, vars, &oracle)?;
        }
    }
    align(&mut gates, &mut wires, &ch.outputs, vars)?;

    for gate in gates {
        circuit.push(gate)?;
    }
    Ok(circuit)
}

/// Move every term whose variables are all prepared from `remaining` into
/// the partition.
fn drain_remaining(
    remaining: &mut Vec<usize>,
    mask: &ParityVec,
    terms: &[PhaseTerm],
    partition: &mut Partition,
    oracle: &IndependenceOracle,
) {
    remaining.retain(|&i| {
        if terms[i].parity.is_subset_of(mask) {
            partition.add(i, terms, oracle);
            false
        } else {
            true
        }
    });
}

/// Emit one CNOT+T block realising the phase terms of `set` and restoring
/// the wire state.
///
/// The block is built from two canonical reductions: `ops(state→echelon)`
/// followed by `reverse(ops(target→echelon))` drives the machine into a
/// state whose first `|set|` wires hold the class parities; the phase gates
/// land there; the mirror image restores the incoming state.
fn emit_block(
    gates: &mut Vec<Gate>,
    class: &PhaseClass,
    key: &str,
    set: &[usize],
    wires: &[ParityVec],
    vars: usize,
    oracle: &IndependenceOracle,
) -> OptResult<()> {
    if set.is_empty() {
        return Ok(());
    }
    if !oracle.admits(set, &class.terms) {
        return Err(OptError::DependentClass {
            indices: set.to_vec(),
        });
    }

    let dim = linalg::rank(wires, vars);

    // The parities first, extended with wire rows to a basis of the
    // current space, zero rows below.
    let mut target: Vec<ParityVec> = set
        .iter()
        .map(|&i| class.terms[i].parity.clone())
        .collect();
    let mut rank = linalg::rank(&target, vars);
    for row in wires {
        if rank == dim || target.len() == wires.len() {
            break;
        }
        target.push(row.clone());
        let grown = linalg::rank(&target, vars);
        if grown > rank {
            rank = grown;
        } else {
            target.pop();
        }
    }
    if rank != dim {
        return Err(OptError::SpanMismatch { context: "block" });
    }
    while target.len() < wires.len() {
        target.push(ParityVec::zero(vars + 1));
    }

    let mut state_echelon = wires.to_vec();
    let state_ops = linalg::reduce(&mut state_echelon, vars);
    let mut target_echelon = target;
    let target_ops = linalg::reduce(&mut target_echelon, vars);
    if state_echelon != target_echelon {
        return Err(OptError::SpanMismatch { context: "block" });
    }

    let into_echelon = linalg::row_ops_to_gates(&state_ops);
    let from_echelon = linalg::row_ops_to_gates(&target_ops);

    gates.extend(into_echelon.iter().cloned());
    gates.extend(from_echelon.iter().rev().cloned());
    for (pos, &term) in set.iter().enumerate() {
        phase_gates(gates, key, class.max_exp, class.terms[term].coeff, WireId(pos as u32));
    }
    gates.extend(from_echelon.iter().cloned());
    gates.extend(into_echelon.iter().rev().cloned());
    Ok(())
}

/// Emit the CNOT/X program transforming the current wire state into
/// `target`, and update `wires` to it.
fn align(
    gates: &mut Vec<Gate>,
    wires: &mut Vec<ParityVec>,
    target: &[ParityVec],
    vars: usize,
) -> OptResult<()> {
    if wires.as_slice() == target {
        return Ok(());
    }

    let mut state_echelon = wires.clone();
    let state_ops = linalg::reduce(&mut state_echelon, vars);
    let mut target_echelon = target.to_vec();
    let target_ops = linalg::reduce(&mut target_echelon, vars);
    if state_echelon != target_echelon {
        return Err(OptError::SpanMismatch {
            context: "alignment",
        });
    }

    gates.extend(linalg::row_ops_to_gates(&state_ops));
    let from_echelon = linalg::row_ops_to_gates(&target_ops);
    gates.extend(from_echelon.iter().rev().cloned());

    *wires = target.to_vec();
    Ok(())
}

/// Emit the phase gates realising `coeff` units of `base/2^max_exp` on one
/// wire.
///
/// For the dyadic `pi` class each set bit of the magnitude lands on the
/// T/P/Z ladder (starred when negative); bits past the exponent are whole
/// turns and vanish. Other bases have no 2π reduction, so every bit emits
/// an `Rz`, with whole base-units at exponent 0.
fn phase_gates(gates: &mut Vec<Gate>, key: &str, max_exp: u32, coeff: i32, wire: WireId) {
    if coeff == 0 {
        return;
    }
    let negative = coeff < 0;
    let magnitude = coeff.unsigned_abs();

    for bit in 0..u32::BITS {
        if magnitude >> bit & 1 == 0 {
            continue;
        }
        let eff = i64::from(max_exp) - i64::from(bit);
        if key == "pi" {
            match eff {
                2 => gates.push(if negative { Gate::Tdg(wire) } else { Gate::T(wire) }),
                1 => gates.push(if negative { Gate::Pdg(wire) } else { Gate::P(wire) }),
                0 => gates.push(Gate::Z(vec![wire])),
                eff if eff > 2 => gates.push(Gate::Rz(
                    Rotation {
                        negative,
                        base: key.to_string(),
                        exp: eff as u32,
                    },
                    wire,
                )),
                _ => {}
            }
        } else if eff >= 0 {
            gates.push(Gate::Rz(
                Rotation {
                    negative,
                    base: key.to_string(),
                    exp: eff as u32,
                },
                wire,
            ));
        } else {
            for _ in 0..1u64 << (-eff).min(20) {
                gates.push(Gate::Rz(
                    Rotation {
                        negative,
                        base: key.to_string(),
                        exp: 0,
                    },
                    wire,
                ));
            }
        }
    }
}
