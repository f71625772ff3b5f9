//! Programmatic circuit construction.
//!
//! [`NetlistBuilder`] lays gates out left to right on the grid and routes
//! every connection through a per-source splice point, so one output can
//! fan out to any number of inputs the way wire splitting does in the editor.

use std::collections::HashMap;

use bitbattle_common::Label;

use crate::error::NetlistError;
use crate::ids::{GateId, WireId};
use crate::kind::GateKind;
use crate::netlist::{Gate, Netlist, Wire};
use crate::point::Point;

/// Horizontal distance between consecutive gate placements.
const COLUMN_PITCH: i32 = 200;
/// Horizontal distance from an output connector to its splice point.
const SPLICE_REACH: i32 = 40;

/// Builds a [`Netlist`] gate by gate.
///
/// ```
/// use bitbattle_common::Label;
/// use bitbattle_netlist::{GateKind, NetlistBuilder};
///
/// let mut b = NetlistBuilder::new();
/// let a = b.input(Label::new('A').unwrap()).unwrap();
/// let inv = b.gate(GateKind::Not, &[a]).unwrap();
/// b.output(Label::new('N').unwrap(), inv).unwrap();
/// let netlist = b.finish();
/// assert_eq!(netlist.interior_gate_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct NetlistBuilder {
    netlist: Netlist,
    column: i32,
    splices: HashMap<GateId, Point>,
}

impl NetlistBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a gate of `kind` with `arity` input slots and no wiring.
    pub fn place(&mut self, kind: GateKind, arity: usize) -> Result<GateId, NetlistError> {
        let position = Point::new(self.column * COLUMN_PITCH, 0);
        let gate = Gate::placed(kind, position, 0, arity)?;
        let id = self.netlist.add_gate(gate)?;
        self.column += 1;
        Ok(id)
    }

    /// Places a labelled INPUT gate.
    pub fn input(&mut self, label: Label) -> Result<GateId, NetlistError> {
        self.place_labelled(GateKind::Input, 0, label)
    }

    /// Places a labelled OUTPUT gate fed by `source`.
    pub fn output(&mut self, label: Label, source: GateId) -> Result<GateId, NetlistError> {
        let id = self.place_labelled(GateKind::Output, 1, label)?;
        self.connect(source, id, 0)?;
        Ok(id)
    }

    /// Places a logic gate with one slot per source, wiring source `i` into slot `i`.
    pub fn gate(&mut self, kind: GateKind, sources: &[GateId]) -> Result<GateId, NetlistError> {
        let id = self.place(kind, sources.len())?;
        for (slot, &source) in sources.iter().enumerate() {
            self.connect(source, id, slot)?;
        }
        Ok(id)
    }

    /// Wires `source`'s output into input `slot` of `target`.
    ///
    /// The first connection from a source adds a stub from its output
    /// connector to its splice point; every connection then runs from the
    /// splice point to the target connector.
    pub fn connect(
        &mut self,
        source: GateId,
        target: GateId,
        slot: usize,
    ) -> Result<WireId, NetlistError> {
        let splice = self.splice(source)?;
        let target_gate = self
            .netlist
            .gate(target)
            .ok_or(NetlistError::UnknownGate(target))?;
        let to = *target_gate
            .inputs
            .get(slot)
            .ok_or_else(|| NetlistError::InvalidField {
                field: "slot",
                value: format!("{target}:{slot}"),
            })?;
        Ok(self.netlist.add_wire(Wire::new(splice, to)))
    }

    /// Adds a free-standing wire segment.
    pub fn wire(&mut self, start: Point, end: Point) -> WireId {
        self.netlist.add_wire(Wire::new(start, end))
    }

    /// The netlist built so far.
    pub fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    /// Consumes the builder and returns the netlist.
    pub fn finish(self) -> Netlist {
        self.netlist
    }

    fn place_labelled(
        &mut self,
        kind: GateKind,
        arity: usize,
        label: Label,
    ) -> Result<GateId, NetlistError> {
        let position = Point::new(self.column * COLUMN_PITCH, 0);
        let gate = Gate::placed(kind, position, 0, arity)?.with_label(label);
        let id = self.netlist.add_gate(gate)?;
        self.column += 1;
        Ok(id)
    }

    fn splice(&mut self, source: GateId) -> Result<Point, NetlistError> {
        if let Some(&p) = self.splices.get(&source) {
            return Ok(p);
        }
        let gate = self
            .netlist
            .gate(source)
            .ok_or(NetlistError::UnknownGate(source))?;
        let out = gate.output.ok_or_else(|| NetlistError::InvalidField {
            field: "source",
            value: gate.kind.to_string(),
        })?;
        let splice = out.offset(SPLICE_REACH, 0);
        self.netlist.add_wire(Wire::new(out, splice));
        self.splices.insert(source, splice);
        Ok(splice)
    }
}
