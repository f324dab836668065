//! The optimise / optimise-no-h command.

use std::fs;
use std::io::Read;

use anyhow::{Context, Result};
use console::style;
use serde_json::json;

/// Run the pipeline over one `.qc` file.
pub fn execute(
    input: &str,
    output: Option<&str>,
    stats: bool,
    json: bool,
    no_hadamards: bool,
) -> Result<()> {
    let source = read_source(input)?;
    let circuit = alsvin_qc::parse(&source).with_context(|| format!("failed to parse {input}"))?;

    eprintln!(
        "{} Optimising {} ({} qubits, {} gates)",
        style("→").cyan().bold(),
        style(input).green(),
        circuit.num_wires(),
        circuit.gates().len(),
    );

    let optimized = if no_hadamards {
        alsvin_opt::optimize_no_h(&circuit)
    } else {
        alsvin_opt::optimize(&circuit)
    }
    .with_context(|| format!("failed to optimise {input}"))?;

    let before = circuit.stats();
    let after = optimized.stats();
    eprintln!(
        "{} T-count {} -> {}, T-depth {} -> {}",
        style("✓").green().bold(),
        before.t,
        after.t,
        before.t_depth_partitions,
        after.t_depth_partitions,
    );

    let mut text = String::new();
    if stats {
        if json {
            let report = json!({ "input": before, "output": after });
            text.push_str(&serde_json::to_string_pretty(&report)?);
            text.push('\n');
        } else {
            text.push_str("# Input circuit:\n");
            text.push_str(&before.to_string());
            text.push_str("\n# Output circuit:\n");
            text.push_str(&after.to_string());
            text.push('\n');
        }
    }
    text.push_str(&alsvin_qc::emit(&optimized));

    write_output(output, &text)
}

fn read_source(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
    }
}

fn write_output(output: Option<&str>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {path}"))?;
            eprintln!("  Output: {}", style(path).green());
        }
        None => print!("{text}"),
    }
    Ok(())
}
