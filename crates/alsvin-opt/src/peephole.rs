//! Cosmetic rewrites on the output gate list.

use alsvin_ir::{Circuit, Gate, WireId};
use rustc_hash::FxHashSet;

/// Collapse three-CNOT swap patterns into a wire renaming.
///
/// The parity-network synthesiser lowers row swaps to `tof a b; tof b a;
/// tof a b`; this pass deletes the pattern and renames the wires of every
/// later gate instead. Any permutation still pending at the end of the
/// circuit is realised as explicit swap triples so the output wire
/// labelling is unchanged.
pub fn remove_swaps(circuit: &mut Circuit) {
    let num_wires = circuit.num_wires();
    let gates = std::mem::take(circuit.gates_mut());
    let mut out: Vec<Gate> = Vec::with_capacity(gates.len());
    let mut perm: Vec<WireId> = (0..num_wires as u32).map(WireId).collect();

    for mut gate in gates {
        gate.map_wires(|w| perm[w.index()]);
        out.push(gate);

        if let Some((a, b)) = trailing_swap(&out) {
            out.truncate(out.len() - 3);
            for w in perm.iter_mut() {
                if *w == a {
                    *w = b;
                } else if *w == b {
                    *w = a;
                }
            }
        }
    }

    // Restore the labelling: wire i's output currently sits on perm[i].
    for i in 0..num_wires {
        if perm[i].index() == i {
            continue;
        }
        let j = perm[i];
        let w = WireId(i as u32);
        out.push(Gate::cnot(w, j));
        out.push(Gate::cnot(j, w));
        out.push(Gate::cnot(w, j));
        let k = perm
            .iter()
            .position(|&p| p.index() == i)
            .unwrap_or(i);
        perm[i] = w;
        perm[k] = j;
    }

    circuit.set_gates(out);
}

/// If the last three gates form `tof a b; tof b a; tof a b`, return `(a, b)`.
fn trailing_swap(gates: &[Gate]) -> Option<(WireId, WireId)> {
    let [first, second, third] = gates.get(gates.len().checked_sub(3)?..)? else {
        return None;
    };
    match (first, second, third) {
        (
            Gate::Cnot {
                control: a1,
                target: b1,
            },
            Gate::Cnot {
                control: b2,
                target: a2,
            },
            Gate::Cnot {
                control: a3,
                target: b3,
            },
        ) if a1 == a2 && a1 == a3 && b1 == b2 && b1 == b3 => Some((*a1, *b1)),
        _ => None,
    }
}

/// Remove adjacent self-inverse gate pairs with identical argument lists.
///
/// Two gates cancel when nothing touching their wires sits between them:
/// the scan from each gate stops at the first later gate that shares a
/// wire. Repeats until no pair is found.
pub fn remove_ids(circuit: &mut Circuit) {
    let gates = circuit.gates_mut();

    loop {
        let Some((i, j)) = find_cancelling_pair(gates) else {
            break;
        };
        gates.remove(j);
        gates.remove(i);
    }
}

fn find_cancelling_pair(gates: &[Gate]) -> Option<(usize, usize)> {
    for i in 0..gates.len() {
        let wires: FxHashSet<WireId> = gates[i].wires().into_iter().collect();
        for (j, other) in gates.iter().enumerate().skip(i + 1) {
            if cancels(&gates[i], other) {
                return Some((i, j));
            }
            if other.wires().iter().any(|w| wires.contains(w)) {
                break;
            }
        }
    }
    None
}

/// Whether two gates with identical argument lists undo each other.
fn cancels(a: &Gate, b: &Gate) -> bool {
    match (a, b) {
        (Gate::H(x), Gate::H(y))
        | (Gate::X(x), Gate::X(y))
        | (Gate::Y(x), Gate::Y(y))
        | (Gate::P(x), Gate::Pdg(y))
        | (Gate::Pdg(x), Gate::P(y))
        | (Gate::T(x), Gate::Tdg(y))
        | (Gate::Tdg(x), Gate::T(y)) => x == y,
        (Gate::Z(xs), Gate::Z(ys)) => xs == ys,
        (
            Gate::Cnot {
                control: c1,
                target: t1,
            },
            Gate::Cnot {
                control: c2,
                target: t2,
            },
        ) => c1 == c2 && t1 == t2,
        (Gate::Tof(xs), Gate::Tof(ys)) => xs == ys,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circuit(wires: usize, gates: &[Gate]) -> Circuit {
        let mut c = Circuit::new();
        for i in 0..wires {
            c.add_wire(format!("q{i}"), true).unwrap();
        }
        for gate in gates {
            c.push(gate.clone()).unwrap();
        }
        c
    }

    #[test]
    fn test_swap_folds_into_renaming() {
        let (a, b) = (WireId(0), WireId(1));
        let mut c = circuit(
            2,
            &[
                Gate::cnot(a, b),
                Gate::cnot(b, a),
                Gate::cnot(a, b),
                Gate::T(a),
                Gate::cnot(a, b),
                Gate::cnot(b, a),
                Gate::cnot(a, b),
            ],
        );
        remove_swaps(&mut c);
        // The two swaps cancel; the T lands on the renamed wire.
        assert_eq!(c.gates(), &[Gate::T(b)]);
    }

    #[test]
    fn test_unbalanced_swap_restored_at_end() {
        let (a, b) = (WireId(0), WireId(1));
        let mut c = circuit(
            2,
            &[Gate::cnot(a, b), Gate::cnot(b, a), Gate::cnot(a, b), Gate::T(a)],
        );
        remove_swaps(&mut c);
        // T moves to b, and the permutation is re-materialised at the end.
        assert_eq!(
            c.gates(),
            &[
                Gate::T(b),
                Gate::cnot(a, b),
                Gate::cnot(b, a),
                Gate::cnot(a, b),
            ]
        );
    }

    #[test]
    fn test_non_swap_cnots_untouched() {
        let (a, b) = (WireId(0), WireId(1));
        let mut c = circuit(2, &[Gate::cnot(a, b), Gate::cnot(a, b), Gate::cnot(b, a)]);
        remove_swaps(&mut c);
        assert_eq!(c.gates().len(), 3);
    }

    #[test]
    fn test_adjacent_inverses_cancel() {
        let a = WireId(0);
        let mut c = circuit(1, &[Gate::T(a), Gate::Tdg(a)]);
        remove_ids(&mut c);
        assert!(c.gates().is_empty());

        let mut c = circuit(1, &[Gate::H(a), Gate::H(a), Gate::X(a), Gate::X(a)]);
        remove_ids(&mut c);
        assert!(c.gates().is_empty());
    }

    #[test]
    fn test_cancellation_through_disjoint_gates() {
        let (a, b) = (WireId(0), WireId(1));
        let mut c = circuit(2, &[Gate::H(a), Gate::T(b), Gate::H(a)]);
        remove_ids(&mut c);
        assert_eq!(c.gates(), &[Gate::T(b)]);
    }

    #[test]
    fn test_overlapping_gate_blocks_cancellation() {
        let (a, b) = (WireId(0), WireId(1));
        let mut c = circuit(
            2,
            &[Gate::H(a), Gate::cnot(a, b), Gate::H(a)],
        );
        remove_ids(&mut c);
        assert_eq!(c.gates().len(), 3);
    }

    #[test]
    fn test_cascading_cancellation() {
        let a = WireId(0);
        // Removing the inner pair exposes the outer pair.
        let mut c = circuit(1, &[Gate::T(a), Gate::H(a), Gate::H(a), Gate::Tdg(a)]);
        remove_ids(&mut c);
        assert!(c.gates().is_empty());
    }

    #[test]
    fn test_same_kind_not_inverse() {
        let a = WireId(0);
        let mut c = circuit(1, &[Gate::T(a), Gate::T(a)]);
        remove_ids(&mut c);
        assert_eq!(c.gates().len(), 2);
    }

    #[test]
    fn test_cnot_direction_matters() {
        let (a, b) = (WireId(0), WireId(1));
        let mut c = circuit(2, &[Gate::cnot(a, b), Gate::cnot(b, a)]);
        remove_ids(&mut c);
        assert_eq!(c.gates().len(), 2);
    }
}
