//! Placed gates, placed wires, and the netlist that owns them.
//!
//! The netlist is the editor's single-writer view of a circuit. It holds
//! topology only; per-pass simulation state lives in the simulator's own
//! tables, keyed by [`GateId`] and [`WireId`].

use bitbattle_common::Label;
use tracing::debug;

use crate::arena::Arena;
use crate::connectors::ConnectorIndex;
use crate::error::NetlistError;
use crate::geometry;
use crate::ids::{GateId, WireId};
use crate::kind::GateKind;
use crate::point::Point;

/// A gate placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    /// The gate kind.
    pub kind: GateKind,
    /// Truth-table letter for INPUT/OUTPUT gates; `None` for interior gates.
    pub label: Option<Label>,
    /// Top-left corner of the footprint. Carried for the editor only.
    pub position: Point,
    /// Rotation in degrees. Carried for the editor only.
    pub rotation: u16,
    /// Input connector points, one per input slot, in slot order.
    pub inputs: Vec<Point>,
    /// Output connector point; always `None` for OUTPUT gates.
    pub output: Option<Point>,
}

impl Gate {
    /// Creates a gate with explicit connector points.
    ///
    /// The position defaults to the origin. An output point given to an
    /// OUTPUT gate is dropped.
    pub fn new(kind: GateKind, inputs: Vec<Point>, output: Option<Point>) -> Self {
        Self {
            kind,
            label: None,
            position: Point::default(),
            rotation: 0,
            inputs,
            output: output.filter(|_| kind.has_output()),
        }
    }

    /// Creates a gate whose connector points are derived from its placement.
    pub fn placed(
        kind: GateKind,
        position: Point,
        rotation: u16,
        arity: usize,
    ) -> Result<Self, NetlistError> {
        let (inputs, output) = geometry::connectors(kind, position, rotation, arity)?;
        Ok(Self {
            kind,
            label: None,
            position,
            rotation,
            inputs,
            output,
        })
    }

    /// Attaches a truth-table label.
    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    /// Number of input slots.
    pub fn arity(&self) -> usize {
        self.inputs.len()
    }
}

/// A straight wire segment between two grid points.
///
/// Wires are undirected for connectivity; `start` and `end` only record how
/// the segment was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wire {
    /// Where the segment was started.
    pub start: Point,
    /// Where the segment was finished.
    pub end: Point,
}

impl Wire {
    /// Creates a wire segment.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Both endpoints, start first.
    pub fn endpoints(&self) -> [Point; 2] {
        [self.start, self.end]
    }

    /// Returns `true` if either endpoint lies on `p`.
    pub fn touches(&self, p: Point) -> bool {
        self.start == p || self.end == p
    }
}

/// The complete topology of placed gates and wires.
///
/// Iteration follows insertion order, and IDs stay valid across removals.
#[derive(Debug, Clone, Default)]
pub struct Netlist {
    gates: Arena<GateId, Gate>,
    wires: Arena<WireId, Wire>,
}

impl Netlist {
    /// Creates an empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a gate, checking its slot count against the gate catalog.
    pub fn add_gate(&mut self, mut gate: Gate) -> Result<GateId, NetlistError> {
        if !gate.kind.accepts_arity(gate.arity()) {
            return Err(NetlistError::InvalidArity {
                kind: gate.kind,
                slots: gate.arity(),
            });
        }
        if !gate.kind.has_output() {
            gate.output = None;
        }
        let id = self.gates.alloc(gate);
        debug!(gate = %id, "placed gate");
        Ok(id)
    }

    /// Places a wire segment.
    pub fn add_wire(&mut self, wire: Wire) -> WireId {
        self.wires.alloc(wire)
    }

    /// Removes a gate. Wires attached to it stay in place.
    pub fn remove_gate(&mut self, id: GateId) -> Result<Gate, NetlistError> {
        self.gates.remove(id).ok_or(NetlistError::UnknownGate(id))
    }

    /// Removes a wire segment.
    pub fn remove_wire(&mut self, id: WireId) -> Result<Wire, NetlistError> {
        self.wires.remove(id).ok_or(NetlistError::UnknownWire(id))
    }

    /// Looks up a placed gate.
    pub fn gate(&self, id: GateId) -> Option<&Gate> {
        self.gates.get(id)
    }

    /// Looks up a placed wire.
    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(id)
    }

    /// Iterates over placed gates in insertion order.
    pub fn gates(&self) -> impl Iterator<Item = (GateId, &Gate)> {
        self.gates.iter()
    }

    /// Iterates over placed wires in insertion order.
    pub fn wires(&self) -> impl Iterator<Item = (WireId, &Wire)> {
        self.wires.iter()
    }

    /// Iterates over placed gates of one kind in insertion order.
    pub fn gates_of_kind(&self, kind: GateKind) -> impl Iterator<Item = (GateId, &Gate)> {
        self.gates.iter().filter(move |(_, g)| g.kind == kind)
    }

    /// Number of placed gates.
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Number of placed wires.
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Number of placed logic gates, excluding INPUT and OUTPUT pins.
    ///
    /// This is the gate-count score metric.
    pub fn interior_gate_count(&self) -> usize {
        self.gates.values().filter(|g| g.kind.is_interior()).count()
    }

    /// Number of placed gates of one kind.
    pub fn count_kind(&self, kind: GateKind) -> usize {
        self.gates_of_kind(kind).count()
    }

    /// Finds the first gate carrying `label`.
    pub fn find_label(&self, label: Label) -> Option<GateId> {
        self.gates
            .iter()
            .find(|(_, g)| g.label == Some(label))
            .map(|(id, _)| id)
    }

    /// Upper bound (exclusive) of raw gate indices, for side tables.
    pub fn gate_capacity(&self) -> usize {
        self.gates.capacity()
    }

    /// Upper bound (exclusive) of raw wire indices, for side tables.
    pub fn wire_capacity(&self) -> usize {
        self.wires.capacity()
    }

    /// Checks that no gate input connector has more than one wire attached.
    ///
    /// Unwired slots, undriven inputs and cycles are not errors; they simply
    /// resolve to default values during propagation.
    pub fn validate(&self) -> Result<(), NetlistError> {
        let index = ConnectorIndex::build(self);
        match index.contended_inputs(self).into_iter().next() {
            Some((gate, slot, point)) => Err(NetlistError::ContendedInput { gate, slot, point }),
            None => Ok(()),
        }
    }
}
