//! Translation of a CNOT+T gate list into the phase-polynomial form.

use std::collections::{BTreeMap, BTreeSet};

use alsvin_ir::{Circuit, Gate};
use tracing::debug;

use crate::error::{OptError, OptResult};
use crate::linalg;
use crate::parity::ParityVec;
use crate::phase::PhaseTable;

/// A Hadamard in the source circuit, recorded as a rank event.
///
/// Everything the synthesiser needs to replay the discontinuity: which wire
/// was hit, which fresh value it prepares, the whole wire state on entry,
/// and which phase terms would fall out of the reachable space once the
/// wire resets.
#[derive(Debug, Clone)]
pub struct HadamardStep {
    /// Wire the Hadamard acts on.
    pub qubit: usize,
    /// Fresh value variable this Hadamard introduces, in `[n, n+h)`.
    pub prep: usize,
    /// Wire state at the event, before the reset.
    pub snapshot: Vec<ParityVec>,
    /// Per phase class, the indices of terms whose parity depends on the
    /// wire's pre-Hadamard value.
    pub inputs: BTreeMap<String, BTreeSet<usize>>,
}

/// The phase-polynomial characterisation of a CNOT+T circuit with
/// Hadamards recorded as events.
#[derive(Debug, Clone)]
pub struct Characterization {
    /// Primary input count.
    pub n: usize,
    /// Ancilla count.
    pub m: usize,
    /// Hadamard count.
    pub h: usize,
    /// Wire names, in declaration order (`n + m` entries).
    pub names: Vec<String>,
    /// Which wires start in |0⟩.
    pub zero: Vec<bool>,
    /// Names of the `n + h` value variables, inputs first, then one per
    /// Hadamard (the wire name with the prep index appended).
    pub value_names: Vec<String>,
    /// The phase table.
    pub table: PhaseTable,
    /// Hadamard events in source order.
    pub steps: Vec<HadamardStep>,
    /// Final parity carried by each wire.
    pub outputs: Vec<ParityVec>,
}

impl Characterization {
    /// Number of physical wires.
    pub fn num_wires(&self) -> usize {
        self.n + self.m
    }

    /// Number of value variables (`n + h`).
    pub fn num_vars(&self) -> usize {
        self.n + self.h
    }
}

/// Translate a gate list into its phase polynomial.
///
/// Fails on gates outside the CNOT+T pipeline's set (`tof` of arity ≥ 3,
/// `Z` of arity 2 or ≥ 4) and on phase-table overflow.
pub fn characterize(circuit: &Circuit) -> OptResult<Characterization> {
    let n = circuit.num_inputs();
    let m = circuit.num_ancillas();
    let h = circuit.count_h();
    let vars = n + h;
    let width = vars + 1;

    let mut wires = Vec::with_capacity(n + m);
    let mut value_names = vec![String::new(); vars];
    let mut next_value = 0;
    for (i, name) in circuit.names().iter().enumerate() {
        let mut parity = ParityVec::zero(width);
        if circuit.is_primary(alsvin_ir::WireId(i as u32)) {
            parity.set(next_value);
            value_names[next_value] = name.clone();
            next_value += 1;
        }
        wires.push(parity);
    }

    let mut table = PhaseTable::new();
    let mut steps: Vec<HadamardStep> = Vec::with_capacity(h);

    for (index, gate) in circuit.gates().iter().enumerate() {
        match gate {
            Gate::T(q) => table.insert("pi", false, 2, wires[q.index()].clone())?,
            Gate::Tdg(q) => table.insert("pi", true, 2, wires[q.index()].clone())?,
            Gate::P(q) => table.insert("pi", false, 1, wires[q.index()].clone())?,
            Gate::Pdg(q) => table.insert("pi", true, 1, wires[q.index()].clone())?,
            Gate::Rz(rotation, q) => table.insert(
                &rotation.base,
                rotation.negative,
                rotation.exp,
                wires[q.index()].clone(),
            )?,
            Gate::X(q) => wires[q.index()].flip(vars),
            Gate::Y(q) => {
                wires[q.index()].flip(vars);
                table.insert("pi", false, 0, wires[q.index()].clone())?;
            }
            Gate::Cnot { control, target } => {
                let src = wires[control.index()].clone();
                wires[target.index()] ^= &src;
            }
            Gate::Z(qs) if qs.len() == 1 => {
                table.insert("pi", false, 0, wires[qs[0].index()].clone())?;
            }
            Gate::Z(qs) if qs.len() == 3 => {
                // Doubly-controlled Z in the standard seven-T expansion:
                // + on singles, − on pair sums, + on the triple sum.
                let a = wires[qs[0].index()].clone();
                let b = wires[qs[1].index()].clone();
                let c = wires[qs[2].index()].clone();
                let mut ab = a.clone();
                ab ^= &b;
                let mut ac = a.clone();
                ac ^= &c;
                let mut bc = b.clone();
                bc ^= &c;
                let mut abc = ab.clone();
                abc ^= &c;
                table.insert("pi", false, 2, a)?;
                table.insert("pi", false, 2, b)?;
                table.insert("pi", false, 2, c)?;
                table.insert("pi", true, 2, ab)?;
                table.insert("pi", true, 2, ac)?;
                table.insert("pi", true, 2, bc)?;
                table.insert("pi", false, 2, abc)?;
            }
            Gate::Z(qs) => {
                return Err(OptError::GateUnsupported {
                    index,
                    symbol: "Z",
                    arity: qs.len(),
                });
            }
            Gate::Tof(qs) => {
                return Err(OptError::GateUnsupported {
                    index,
                    symbol: "tof",
                    arity: qs.len(),
                });
            }
            Gate::H(q) => {
                let q = q.index();
                let prep = n + steps.len();
                let snapshot = wires.clone();

                // A term is lost across this Hadamard when its parity
                // depended on the wire's pre-reset value: substituting it
                // for the reset wire raises the state's rank.
                wires[q].clear();
                let base_rank = linalg::rank(&wires, vars);
                let mut inputs: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();
                for (key, class) in table.iter() {
                    for (i, term) in class.terms.iter().enumerate() {
                        if term.coeff == 0 {
                            continue;
                        }
                        wires[q] = term.parity.clone();
                        if linalg::rank(&wires, vars) > base_rank {
                            inputs.entry(key.to_string()).or_default().insert(i);
                        }
                    }
                }

                wires[q].clear();
                wires[q].set(prep);
                value_names[prep] = format!("{}{}", circuit.names()[q], prep);

                debug!(
                    qubit = %circuit.names()[q],
                    prep,
                    lost = inputs.values().map(BTreeSet::len).sum::<usize>(),
                    "hadamard event"
                );
                steps.push(HadamardStep {
                    qubit: q,
                    prep,
                    snapshot,
                    inputs,
                });
            }
        }
    }

    Ok(Characterization {
        n,
        m,
        h,
        names: circuit.names().to_vec(),
        zero: (0..circuit.num_wires())
            .map(|i| circuit.is_ancilla(alsvin_ir::WireId(i as u32)))
            .collect(),
        value_names,
        table,
        steps,
        outputs: wires,
    })
}

impl std::fmt::Display for Characterization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let vars = self.num_vars();

        write!(f, "U|")?;
        for (i, name) in self.names.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            if self.zero[i] {
                write!(f, "()")?;
            } else {
                write!(f, "{name}")?;
            }
        }
        write!(f, "> --> w^(")?;

        let mut first = true;
        for (key, class) in self.table.iter() {
            for term in &class.terms {
                if !first {
                    write!(f, "+")?;
                }
                first = false;
                write!(f, "{}*", term.coeff)?;
                if key != "pi" {
                    write!(f, "[{}/2^{}]", key, class.max_exp)?;
                }
                if term.parity.test(vars) {
                    write!(f, "~")?;
                }
                for bit in term.parity.ones().filter(|&b| b < vars) {
                    write!(f, "{}", self.value_names[bit])?;
                }
            }
        }
        write!(f, ")|")?;

        for output in &self.outputs {
            write!(f, "(")?;
            if output.test(vars) {
                write!(f, "~")?;
            }
            let mut first = true;
            for bit in output.ones().filter(|&b| b < vars) {
                if !first {
                    write!(f, " ")?;
                }
                first = false;
                write!(f, "{}", self.value_names[bit])?;
            }
            write!(f, ")")?;
        }
        writeln!(f, ">")?;

        for step in &self.steps {
            writeln!(f, "H:{}-->{}", self.names[step.qubit], step.prep)?;
        }
        Ok(())
    }
}
