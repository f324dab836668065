//! Emitter for the `.qc` format.

use alsvin_ir::{Circuit, Gate};

/// Emit a circuit as `.qc` text.
///
/// The `.o` line lists every wire; `.qc` consumers treat it as cosmetic
/// metadata and so does the parser.
pub fn emit(circuit: &Circuit) -> String {
    let mut out = String::new();

    out.push_str(".v");
    for name in circuit.names() {
        out.push(' ');
        out.push_str(name);
    }

    out.push_str("\n.i");
    for (i, name) in circuit.names().iter().enumerate() {
        if circuit.is_primary(alsvin_ir::WireId(i as u32)) {
            out.push(' ');
            out.push_str(name);
        }
    }

    out.push_str("\n.o");
    for name in circuit.names() {
        out.push(' ');
        out.push_str(name);
    }

    out.push_str("\n\nBEGIN\n");
    for gate in circuit.gates() {
        emit_gate(&mut out, circuit, gate);
    }
    out.push_str("END\n");

    out
}

fn emit_gate(out: &mut String, circuit: &Circuit, gate: &Gate) {
    match gate {
        Gate::Rz(rotation, _) => {
            out.push_str(&format!("Rz({rotation})"));
        }
        _ => out.push_str(gate.symbol()),
    }
    for wire in gate.wires() {
        out.push(' ');
        out.push_str(circuit.name(wire));
    }
    out.push('\n');
}
