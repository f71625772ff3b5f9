//! `bitbattle pack` / `bitbattle unpack`: the compact circuit archive.

use bitbattle_netlist::{archive, NetlistSnapshot};

use crate::project::read_circuit;
use crate::{GlobalArgs, PackArgs, UnpackArgs};

/// Runs the `bitbattle pack` command.
pub fn pack(args: &PackArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let netlist = read_circuit(&args.circuit)?;
    archive::pack_to_file(&netlist, &args.output)?;
    if !global.quiet {
        eprintln!(
            "   Packed {} gate(s) and {} wire(s) into {}",
            netlist.gate_count(),
            netlist.wire_count(),
            args.output.display()
        );
    }
    Ok(0)
}

/// Runs the `bitbattle unpack` command.
pub fn unpack(args: &UnpackArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let netlist = archive::unpack_file(&args.archive)?;
    let json = NetlistSnapshot::from(&netlist).to_json_pretty()?;
    match args.output {
        Some(ref path) => {
            std::fs::write(path, json)?;
            if !global.quiet {
                eprintln!("   Unpacked {} into {}", args.archive.display(), path.display());
            }
        }
        None => println!("{json}"),
    }
    Ok(0)
}
