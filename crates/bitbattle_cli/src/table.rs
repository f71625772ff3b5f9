//! `bitbattle table`: print a generated truth table.

use bitbattle_sim::TruthTable;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::project::load_config;
use crate::{GlobalArgs, TableArgs};

/// Runs the `bitbattle table` command.
///
/// Shape defaults come from `[table]`; a seed makes the output columns
/// reproducible.
pub fn run(args: &TableArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(global)?;
    let inputs = args.inputs.unwrap_or(config.table.inputs);
    let outputs = args.outputs.unwrap_or(config.table.outputs);

    let table = match args.seed {
        Some(seed) => TruthTable::random(inputs, outputs, &mut StdRng::seed_from_u64(seed))?,
        None => TruthTable::generate(inputs, outputs)?,
    };
    println!("{}", table.to_json_pretty()?);
    Ok(0)
}
