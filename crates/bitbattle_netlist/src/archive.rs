//! Compact compressed storage for solved circuits.
//!
//! Gates are stored by placement only (`x`, `y`, kind `e`, rotation `n`,
//! label `d`, and arity `a` for variable-arity kinds); connector points are
//! re-derived from the gate geometry on unpack. Archives written by the
//! editor carry no `a`, and their gates get every connector of the kind's
//! footprint. Wires keep their endpoints. The JSON document is
//! zlib-compressed.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::NetlistError;
use crate::geometry::footprint;
use crate::kind::GateKind;
use crate::netlist::{Gate, Netlist, Wire};
use crate::point::Point;
use crate::snapshot::{check_coord, check_rotation, GateTag};

#[derive(Debug, Serialize, Deserialize)]
struct CompactCircuit {
    g: Vec<CompactGate>,
    w: Vec<CompactWire>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CompactGate {
    x: i32,
    y: i32,
    e: GateKind,
    #[serde(default)]
    n: u16,
    #[serde(default)]
    d: Option<GateTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    a: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CompactWire {
    #[serde(rename = "Xt")]
    start_x: i32,
    #[serde(rename = "Yt")]
    start_y: i32,
    #[serde(rename = "Xd")]
    end_x: i32,
    #[serde(rename = "Yd")]
    end_y: i32,
}

/// Packs a netlist into a compressed archive.
///
/// Only placements are stored, so gates whose connectors were not derived
/// from their placement come back with geometry-derived connectors.
pub fn pack(netlist: &Netlist) -> Result<Vec<u8>, NetlistError> {
    let circuit = CompactCircuit {
        g: netlist
            .gates()
            .map(|(_, gate)| CompactGate {
                x: gate.position.x,
                y: gate.position.y,
                e: gate.kind,
                n: gate.rotation,
                d: gate.label.map(GateTag::from),
                a: (gate.kind.arity().count() > 1).then(|| gate.arity()),
            })
            .collect(),
        w: netlist
            .wires()
            .map(|(_, wire)| CompactWire {
                start_x: wire.start.x,
                start_y: wire.start.y,
                end_x: wire.end.x,
                end_y: wire.end.y,
            })
            .collect(),
    };

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    serde_json::to_writer(&mut encoder, &circuit)?;
    let bytes = encoder.finish()?;
    debug!(
        gates = circuit.g.len(),
        wires = circuit.w.len(),
        bytes = bytes.len(),
        "packed circuit"
    );
    Ok(bytes)
}

/// Unpacks a compressed archive.
///
/// Gates stored without an arity get the full footprint's connectors.
pub fn unpack(bytes: &[u8]) -> Result<Netlist, NetlistError> {
    let mut json = Vec::new();
    ZlibDecoder::new(bytes).read_to_end(&mut json)?;
    let circuit: CompactCircuit = serde_json::from_slice(&json)?;

    let mut netlist = Netlist::new();
    for g in circuit.g {
        let position = Point::new(check_coord(g.x)?, check_coord(g.y)?);
        let arity = g.a.unwrap_or_else(|| footprint(g.e).inputs.len());
        let mut gate = Gate::placed(g.e, position, check_rotation(g.n)?, arity)?;
        gate.label = match g.d {
            Some(tag) => tag.into_label()?,
            None => None,
        };
        netlist.add_gate(gate)?;
    }
    for w in circuit.w {
        let start = Point::new(check_coord(w.start_x)?, check_coord(w.start_y)?);
        let end = Point::new(check_coord(w.end_x)?, check_coord(w.end_y)?);
        netlist.add_wire(Wire::new(start, end));
    }
    Ok(netlist)
}

/// Writes a packed archive to `path`.
pub fn pack_to_file(netlist: &Netlist, path: &std::path::Path) -> Result<(), NetlistError> {
    let bytes = pack(netlist)?;
    std::fs::File::create(path)?.write_all(&bytes)?;
    Ok(())
}

/// Reads and unpacks an archive from `path`.
pub fn unpack_file(path: &std::path::Path) -> Result<Netlist, NetlistError> {
    let bytes = std::fs::read(path)?;
    unpack(&bytes)
}
