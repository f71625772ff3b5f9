//! Per-pass simulation state, kept apart from the netlist topology.
//!
//! Every table is indexed by the raw gate or wire ID, so vacated arena slots
//! simply hold default entries that nothing reads.

use bitbattle_common::{Bit, SignalState};
use bitbattle_netlist::{ConnectorIndex, Gate, GateId, Netlist, WireId};
use serde::Serialize;

/// The longest upstream gate chain feeding a node.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
pub struct PathMetric {
    /// The INPUT gate at the head of the chain, once one has been recorded.
    pub source: Option<GateId>,
    /// Number of gates in the chain.
    pub depth: u32,
}

impl PathMetric {
    /// A chain headed by `source` with no gates yet.
    pub fn seed(source: GateId) -> Self {
        Self {
            source: Some(source),
            depth: 0,
        }
    }

    /// Adopts `incoming` if it is strictly deeper, or if nothing has been
    /// recorded yet. Ties keep the existing metric.
    pub fn absorb(&mut self, incoming: PathMetric) {
        if incoming.depth > self.depth || (self.source.is_none() && self.depth == 0) {
            *self = incoming;
        }
    }
}

/// Resolution state of one gate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GateState {
    /// One entry per declared input slot; `None` until a value is delivered.
    pub slots: Vec<Option<Bit>>,
    /// The evaluated output, once every required slot is set.
    pub output: Option<Bit>,
    /// Longest chain feeding this gate, including it once evaluated.
    pub path: PathMetric,
    #[serde(skip)]
    pending: usize,
}

impl GateState {
    fn unset(arity: usize, required: usize) -> Self {
        Self {
            slots: vec![None; arity],
            output: None,
            path: PathMetric::default(),
            pending: required,
        }
    }

    /// Stores `value` in `slot`. Returns `true` once the last required slot is filled.
    pub(crate) fn deliver(&mut self, slot: usize, value: Bit) -> bool {
        let Some(entry) = self.slots.get_mut(slot) else {
            return false;
        };
        if entry.is_some() {
            return false;
        }
        *entry = Some(value);
        self.pending -= 1;
        self.pending == 0
    }

    /// The resolved input values in slot order. Unwired slots are skipped.
    pub fn inputs(&self) -> Vec<Bit> {
        self.slots.iter().flatten().copied().collect()
    }

    /// Returns `true` once the gate has an output value.
    pub fn is_resolved(&self) -> bool {
        self.output.is_some()
    }
}

/// Resolution state of one wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WireState {
    /// The carried signal.
    pub signal: SignalState,
    /// Set once the wire has been reached in this pass.
    pub visited: bool,
    /// Longest chain feeding this wire.
    pub path: PathMetric,
}

/// Number of deliveries a gate needs before it fires.
///
/// AND, OR and XOR gates use only their wired connectors, so an editor gate
/// with three connectors and two wires is a two-input gate. If fewer wires
/// than the kind's minimum fan-in are attached, every declared slot is
/// required and the gate never fires. Fixed-arity kinds always require every
/// slot.
fn required_slots(gate: &Gate, index: &ConnectorIndex) -> usize {
    let arity = gate.arity();
    let range = gate.kind.arity();
    if range.start() == range.end() {
        return arity;
    }
    let wired = (0..arity)
        .filter(|&slot| index.slot_wire(gate, slot).is_some())
        .count();
    if wired >= *range.start() {
        wired
    } else {
        arity
    }
}

/// Gate and wire state for one propagation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimState {
    gates: Vec<GateState>,
    wires: Vec<WireState>,
}

impl SimState {
    /// Creates reset state sized for `netlist`.
    pub fn new(netlist: &Netlist, index: &ConnectorIndex) -> Self {
        let mut state = Self::default();
        state.reset(netlist, index);
        state
    }

    /// Clears every slot, signal, visited flag and path metric.
    ///
    /// `index` must have been built from `netlist`; it decides which input
    /// slots a gate waits on.
    pub fn reset(&mut self, netlist: &Netlist, index: &ConnectorIndex) {
        self.gates.clear();
        self.gates
            .resize_with(netlist.gate_capacity(), GateState::default);
        for (id, gate) in netlist.gates() {
            self.gates[id.index()] = GateState::unset(gate.arity(), required_slots(gate, index));
        }
        self.wires.clear();
        self.wires
            .resize(netlist.wire_capacity(), WireState::default());
    }

    /// State of one gate.
    ///
    /// # Panics
    ///
    /// Panics if `id` was allocated after this state was sized.
    pub fn gate(&self, id: GateId) -> &GateState {
        &self.gates[id.index()]
    }

    /// State of one wire.
    ///
    /// # Panics
    ///
    /// Panics if `id` was allocated after this state was sized.
    pub fn wire(&self, id: WireId) -> &WireState {
        &self.wires[id.index()]
    }

    pub(crate) fn gate_mut(&mut self, id: GateId) -> &mut GateState {
        &mut self.gates[id.index()]
    }

    pub(crate) fn wire_mut(&mut self, id: WireId) -> &mut WireState {
        &mut self.wires[id.index()]
    }

    /// The value an OUTPUT gate reads: its input, or 0 if nothing arrived.
    pub fn output_value(&self, id: GateId) -> Bit {
        self.gate(id).output.unwrap_or_default()
    }

    /// Number of wires reached in this pass.
    pub fn visited_wires(&self) -> usize {
        self.wires.iter().filter(|w| w.visited).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitbattle_netlist::{GateKind, Point, Wire};

    #[test]
    fn absorb_keeps_ties() {
        let a = GateId::from_raw(0);
        let b = GateId::from_raw(1);
        let mut m = PathMetric {
            source: Some(a),
            depth: 2,
        };
        m.absorb(PathMetric {
            source: Some(b),
            depth: 2,
        });
        assert_eq!(m.source, Some(a));
        m.absorb(PathMetric {
            source: Some(b),
            depth: 3,
        });
        assert_eq!(m, PathMetric { source: Some(b), depth: 3 });
    }

    #[test]
    fn absorb_fills_empty_metric() {
        let mut m = PathMetric::default();
        m.absorb(PathMetric::seed(GateId::from_raw(4)));
        assert_eq!(m.source, Some(GateId::from_raw(4)));
        assert_eq!(m.depth, 0);
    }

    #[test]
    fn deliver_counts_down_pending_slots() {
        let mut g = GateState::unset(2, 2);
        assert!(!g.deliver(0, Bit::One));
        // A second delivery to the same slot is ignored.
        assert!(!g.deliver(0, Bit::Zero));
        assert!(g.deliver(1, Bit::Zero));
        assert_eq!(g.inputs(), vec![Bit::One, Bit::Zero]);
        assert!(!g.deliver(5, Bit::One));
    }

    #[test]
    fn reset_sizes_tables_from_netlist() {
        let mut n = Netlist::new();
        let and = n
            .add_gate(Gate::placed(GateKind::And, Point::new(0, 0), 0, 3).unwrap())
            .unwrap();
        let state = SimState::new(&n, &ConnectorIndex::build(&n));
        assert_eq!(state.gate(and).slots, vec![None, None, None]);
        assert_eq!(state.output_value(and), Bit::Zero);
        assert_eq!(state.visited_wires(), 0);
    }

    fn three_connector_and(wired: &[usize]) -> (Netlist, GateId) {
        let mut n = Netlist::new();
        let gate = Gate::placed(GateKind::And, Point::new(100, 0), 0, 3).unwrap();
        let connectors = gate.inputs.clone();
        let and = n.add_gate(gate).unwrap();
        for &slot in wired {
            let at = connectors[slot];
            n.add_wire(Wire::new(at.offset(-40, 0), at));
        }
        (n, and)
    }

    #[test]
    fn variable_arity_gate_waits_on_wired_slots_only() {
        let (n, and) = three_connector_and(&[0, 2]);
        let index = ConnectorIndex::build(&n);
        let mut state = SimState::new(&n, &index);
        let g = state.gate_mut(and);
        assert!(!g.deliver(0, Bit::One));
        assert!(g.deliver(2, Bit::One));
        assert_eq!(g.inputs(), vec![Bit::One, Bit::One]);
    }

    #[test]
    fn single_wire_does_not_make_and_ready() {
        let (n, and) = three_connector_and(&[1]);
        let gate = n.gate(and).unwrap();
        assert_eq!(required_slots(gate, &ConnectorIndex::build(&n)), 3);
    }

    #[test]
    fn fixed_arity_requires_every_slot() {
        let mut n = Netlist::new();
        let not = n
            .add_gate(Gate::placed(GateKind::Not, Point::new(0, 0), 0, 1).unwrap())
            .unwrap();
        let gate = n.gate(not).unwrap();
        assert_eq!(required_slots(gate, &ConnectorIndex::build(&n)), 1);
    }
}
