//! Gauss–Jordan elimination over GF(2) with recorded row operations.
//!
//! Row operations correspond one-to-one to gates on the physical wires the
//! rows describe: adding row `s` into row `t` is `CNOT s t`, swapping two
//! rows is the three-CNOT swap, and clearing a row's affine constant bit
//! is an `X`. Reducing a wire state to its canonical echelon form therefore
//! yields a gate program that performs that reduction on the machine.

use alsvin_ir::{Gate, WireId};

use crate::parity::ParityVec;

/// A recorded elementary row operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOp {
    /// Clear the affine constant bit of a row.
    Not(usize),
    /// Exchange two rows.
    Swap(usize, usize),
    /// XOR row `src` into row `tgt`.
    Add {
        /// Source row (CNOT control).
        src: usize,
        /// Target row (CNOT target).
        tgt: usize,
    },
}

/// Rank of the rows over the first `vars` columns, without mutating them.
pub fn rank(rows: &[ParityVec], vars: usize) -> usize {
    let mut scratch = rows.to_vec();
    rank_in_place(&mut scratch, vars)
}

/// Forward elimination; leaves `rows` in (non-canonical) echelon form and
/// returns the rank over the first `vars` columns.
pub fn rank_in_place(rows: &mut [ParityVec], vars: usize) -> usize {
    let mut r = 0;
    for col in 0..vars {
        if r == rows.len() {
            break;
        }
        let Some(pivot) = (r..rows.len()).find(|&i| rows[i].test(col)) else {
            continue;
        };
        rows.swap(pivot, r);
        for i in r + 1..rows.len() {
            if rows[i].test(col) {
                let (head, tail) = rows.split_at_mut(i);
                tail[0] ^= &head[r];
            }
        }
        r += 1;
    }
    r
}

/// Reduce `rows` to the canonical form for their affine row space and
/// return the operations performed, in execution order.
///
/// Canonical means: constant bits cleared, reduced row echelon over the
/// `vars` variable columns, pivot rows first, zero rows last. Two row sets
/// spanning the same affine space reduce to the identical matrix, which is
/// what lets two reductions be glued into a state-to-state gate program.
pub fn reduce(rows: &mut [ParityVec], vars: usize) -> Vec<RowOp> {
    let mut ops = Vec::new();

    for (i, row) in rows.iter_mut().enumerate() {
        if row.test(vars) {
            row.flip(vars);
            ops.push(RowOp::Not(i));
        }
    }

    let mut r = 0;
    for col in 0..vars {
        if r == rows.len() {
            break;
        }
        let Some(pivot) = (r..rows.len()).find(|&i| rows[i].test(col)) else {
            continue;
        };
        if pivot != r {
            rows.swap(pivot, r);
            ops.push(RowOp::Swap(pivot, r));
        }
        for i in 0..rows.len() {
            if i != r && rows[i].test(col) {
                let (src, tgt) = index_pair(rows, r, i);
                *tgt ^= src;
                ops.push(RowOp::Add { src: r, tgt: i });
            }
        }
        r += 1;
    }

    ops
}

/// Lower recorded row operations to gates on the corresponding wires.
pub fn row_ops_to_gates(ops: &[RowOp]) -> Vec<Gate> {
    let mut gates = Vec::new();
    for op in ops {
        match *op {
            RowOp::Not(i) => gates.push(Gate::X(WireId(i as u32))),
            RowOp::Swap(i, j) => {
                let (a, b) = (WireId(i as u32), WireId(j as u32));
                gates.push(Gate::cnot(a, b));
                gates.push(Gate::cnot(b, a));
                gates.push(Gate::cnot(a, b));
            }
            RowOp::Add { src, tgt } => {
                gates.push(Gate::cnot(WireId(src as u32), WireId(tgt as u32)));
            }
        }
    }
    gates
}

fn index_pair(rows: &mut [ParityVec], src: usize, tgt: usize) -> (&ParityVec, &mut ParityVec) {
    debug_assert_ne!(src, tgt);
    if src < tgt {
        let (head, tail) = rows.split_at_mut(tgt);
        (&head[src], &mut tail[0])
    } else {
        let (head, tail) = rows.split_at_mut(src);
        (&tail[0], &mut head[tgt])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pv(width: usize, bits: &[usize]) -> ParityVec {
        let mut v = ParityVec::zero(width);
        for &b in bits {
            v.set(b);
        }
        v
    }

    fn replay(rows: &mut [ParityVec], ops: &[RowOp], vars: usize) {
        for op in ops {
            match *op {
                RowOp::Not(i) => rows[i].flip(vars),
                RowOp::Swap(i, j) => rows.swap(i, j),
                RowOp::Add { src, tgt } => {
                    let s = rows[src].clone();
                    rows[tgt] ^= &s;
                }
            }
        }
    }

    #[test]
    fn test_rank_basic() {
        let rows = vec![pv(4, &[0]), pv(4, &[1]), pv(4, &[0, 1])];
        assert_eq!(rank(&rows, 3), 2);

        let rows = vec![pv(4, &[0, 2]), pv(4, &[1]), pv(4, &[2])];
        assert_eq!(rank(&rows, 3), 3);
    }

    #[test]
    fn test_rank_ignores_constant_column() {
        // Width 3 = two variables plus the constant bit at index 2.
        let rows = vec![pv(3, &[2]), pv(3, &[0, 2])];
        assert_eq!(rank(&rows, 2), 1);
    }

    #[test]
    fn test_reduce_replays() {
        let vars = 3;
        let original = vec![pv(4, &[1, 2, 3]), pv(4, &[0, 1]), pv(4, &[1])];
        let mut reduced = original.clone();
        let ops = reduce(&mut reduced, vars);

        let mut replayed = original;
        replay(&mut replayed, &ops, vars);
        assert_eq!(replayed, reduced);
    }

    #[test]
    fn test_reduce_is_canonical() {
        let vars = 3;
        // Same affine row space, different presentations.
        let mut a = vec![pv(4, &[0]), pv(4, &[0, 1]), pv(4, &[2, 3])];
        let mut b = vec![pv(4, &[2, 3]), pv(4, &[1]), pv(4, &[0, 1])];
        reduce(&mut a, vars);
        reduce(&mut b, vars);
        assert_eq!(a, b);
    }

    #[test]
    fn test_reduce_zero_rows_sink() {
        let vars = 2;
        let mut rows = vec![pv(3, &[]), pv(3, &[1]), pv(3, &[0])];
        reduce(&mut rows, vars);
        assert_eq!(rows, vec![pv(3, &[0]), pv(3, &[1]), pv(3, &[])]);
    }

    #[test]
    fn test_constant_bit_lowered_to_x() {
        let vars = 1;
        let mut rows = vec![pv(2, &[0, 1])];
        let ops = reduce(&mut rows, vars);
        assert_eq!(ops, vec![RowOp::Not(0)]);
        assert_eq!(rows, vec![pv(2, &[0])]);
        assert_eq!(row_ops_to_gates(&ops), vec![Gate::X(WireId(0))]);
    }

    #[test]
    fn test_swap_lowering() {
        let gates = row_ops_to_gates(&[RowOp::Swap(2, 0)]);
        assert_eq!(
            gates,
            vec![
                Gate::cnot(WireId(2), WireId(0)),
                Gate::cnot(WireId(0), WireId(2)),
                Gate::cnot(WireId(2), WireId(0)),
            ]
        );
    }
}
