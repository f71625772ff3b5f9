//! `bitbattle sim`: one propagation pass over a circuit.

use bitbattle_common::{Bit, Label};
use bitbattle_sim::{InputAssignment, Propagator};

use crate::project::read_circuit;
use crate::{GlobalArgs, SimArgs};

/// Parses a `LETTER=BIT` assignment such as `A=1`.
pub fn parse_assignment(s: &str) -> Result<(Label, Bit), String> {
    let (label, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected LETTER=BIT, found '{s}'"))?;
    let label: Label = label.trim().parse().map_err(|e| format!("{e}"))?;
    let mut chars = value.trim().chars();
    let bit = match (chars.next(), chars.next()) {
        (Some(c), None) => Bit::from_char(c),
        _ => None,
    }
    .ok_or_else(|| format!("expected 0 or 1 for {label}, found '{value}'"))?;
    Ok((label, bit))
}

/// Runs the `bitbattle sim` command.
///
/// Prints every gate's output and path depth, then every wire's signal.
pub fn run(args: &SimArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let netlist = read_circuit(&args.circuit)?;
    let inputs: InputAssignment = args.set.iter().copied().collect();

    if !global.quiet {
        eprintln!(
            "   Simulating {} ({} gate(s), {} wire(s))",
            args.circuit.display(),
            netlist.gate_count(),
            netlist.wire_count()
        );
    }

    let mut propagator = Propagator::new(&netlist);
    let state = propagator.propagate(&inputs);

    for (id, gate) in netlist.gates() {
        let gs = state.gate(id);
        let label = gate.label.map(|l| l.to_string()).unwrap_or_default();
        let output = gs.output.map_or_else(|| "-".to_string(), |b| b.to_string());
        println!(
            "{:>6} {:<6} {label:<1} out={output} depth={}",
            id.to_string(),
            gate.kind.name(),
            gs.path.depth
        );
    }
    for (id, _) in netlist.wires() {
        let ws = state.wire(id);
        println!(
            "{:>6} {} {}",
            id.to_string(),
            ws.signal,
            if ws.visited { "visited" } else { "idle" }
        );
    }
    Ok(0)
}
