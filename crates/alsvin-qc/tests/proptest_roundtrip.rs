//! Property-based tests for `.qc` roundtrip conversion.
//!
//! Tests that parse → emit → parse is the identity on circuits, and that
//! emission is a fixed point (emit ∘ parse ∘ emit == emit).

use alsvin_ir::{Circuit, Gate, Rotation, WireId};
use alsvin_qc::{emit, parse};
use proptest::prelude::*;

/// Gate shapes the generator can produce.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    X(u32),
    Y(u32),
    Z(u32),
    P(u32),
    Pdg(u32),
    T(u32),
    Tdg(u32),
    Cnot(u32, u32),
    Ccz(u32, u32, u32),
    Rz(bool, u32, u32),
}

impl GateOp {
    fn apply(self, circuit: &mut Circuit) {
        let gate = match self {
            GateOp::H(q) => Gate::H(WireId(q)),
            GateOp::X(q) => Gate::X(WireId(q)),
            GateOp::Y(q) => Gate::Y(WireId(q)),
            GateOp::Z(q) => Gate::Z(vec![WireId(q)]),
            GateOp::P(q) => Gate::P(WireId(q)),
            GateOp::Pdg(q) => Gate::Pdg(WireId(q)),
            GateOp::T(q) => Gate::T(WireId(q)),
            GateOp::Tdg(q) => Gate::Tdg(WireId(q)),
            GateOp::Cnot(c, t) => Gate::cnot(WireId(c), WireId(t)),
            GateOp::Ccz(a, b, c) => Gate::Z(vec![WireId(a), WireId(b), WireId(c)]),
            GateOp::Rz(negative, exp, q) => Gate::Rz(
                Rotation {
                    negative,
                    base: "phi".to_string(),
                    exp,
                },
                WireId(q),
            ),
        };
        circuit.push(gate).unwrap();
    }
}

fn arb_gate_op(num_wires: u32) -> impl Strategy<Value = GateOp> {
    let single = prop_oneof![
        (0..num_wires).prop_map(GateOp::H),
        (0..num_wires).prop_map(GateOp::X),
        (0..num_wires).prop_map(GateOp::Y),
        (0..num_wires).prop_map(GateOp::Z),
        (0..num_wires).prop_map(GateOp::P),
        (0..num_wires).prop_map(GateOp::Pdg),
        (0..num_wires).prop_map(GateOp::T),
        (0..num_wires).prop_map(GateOp::Tdg),
        (any::<bool>(), 0..6u32, 0..num_wires)
            .prop_map(|(neg, exp, q)| GateOp::Rz(neg, exp, q)),
    ];
    if num_wires < 2 {
        single.boxed()
    } else if num_wires < 3 {
        prop_oneof![
            single,
            (0..num_wires, 0..num_wires)
                .prop_filter("distinct wires", |(c, t)| c != t)
                .prop_map(|(c, t)| GateOp::Cnot(c, t)),
        ]
        .boxed()
    } else {
        prop_oneof![
            single,
            (0..num_wires, 0..num_wires)
                .prop_filter("distinct wires", |(c, t)| c != t)
                .prop_map(|(c, t)| GateOp::Cnot(c, t)),
            (0..num_wires, 0..num_wires, 0..num_wires)
                .prop_filter("distinct wires", |(a, b, c)| a != b && b != c && a != c)
                .prop_map(|(a, b, c)| GateOp::Ccz(a, b, c)),
        ]
        .boxed()
    }
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (1u32..=5, 0u32..=2).prop_flat_map(|(inputs, ancillas)| {
        let num_wires = inputs + ancillas;
        prop::collection::vec(arb_gate_op(num_wires), 0..=12).prop_map(move |ops| {
            let mut circuit = Circuit::new();
            for i in 0..inputs {
                circuit.add_wire(format!("q{i}"), true).unwrap();
            }
            for i in 0..ancillas {
                circuit.add_wire(format!("anc{i}"), false).unwrap();
            }
            for op in ops {
                op.apply(&mut circuit);
            }
            circuit
        })
    })
}

proptest! {
    /// parse(emit(c)) reproduces the circuit exactly.
    #[test]
    fn test_emit_parse_roundtrip(circuit in arb_circuit()) {
        let text = emit(&circuit);
        let reparsed = parse(&text).expect("emitted text failed to parse");
        prop_assert_eq!(reparsed, circuit);
    }

    /// Emission is deterministic and a fixed point of parse∘emit.
    #[test]
    fn test_emit_fixed_point(circuit in arb_circuit()) {
        let once = emit(&circuit);
        let twice = emit(&parse(&once).unwrap());
        prop_assert_eq!(once, twice);
    }
}

/// Hand-written source round-trips up to whitespace and TOF→tof
/// normalisation.
#[test]
fn test_source_normalisation() {
    let source = ".v a b c\n.i a b\nBEGIN\nTOF a b ;\ntof c\n T  a\nEND\n";
    let circuit = parse(source).unwrap();
    let text = emit(&circuit);
    assert_eq!(
        text,
        ".v a b c\n.i a b\n.o a b c\n\nBEGIN\ntof a b\nX c\nT a\nEND\n"
    );
}
