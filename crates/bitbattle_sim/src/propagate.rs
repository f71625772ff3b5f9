//! The signal propagation engine.
//!
//! A pass floods each INPUT gate's driven value through the wiring with an
//! explicit depth-first worklist. Each wire is finalised the first time it
//! is reached. A wire whose endpoint is a gate input delivers its value to
//! that slot and goes no further; a gate fires once every wired slot holds
//! a value and then floods its own output wire. A wire with no gate
//! input at either end is a splice and fans out to every wire sharing one
//! of its endpoint coordinates.

use std::collections::{BTreeMap, HashMap};

use bitbattle_common::{Bit, Label, SignalState};
use bitbattle_netlist::{ConnectorIndex, GateId, GateKind, InputConnector, Netlist, WireId};
use tracing::{debug, warn};

use crate::state::{PathMetric, SimState};

/// Driven values for INPUT gates.
///
/// A value set for a specific gate takes precedence over one set for its
/// label. INPUT gates with neither are driven with 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputAssignment {
    by_label: BTreeMap<Label, Bit>,
    by_gate: HashMap<GateId, Bit>,
}

impl InputAssignment {
    /// An assignment that drives every INPUT with 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drives INPUT gates labelled `label`.
    pub fn set_label(&mut self, label: Label, value: Bit) -> &mut Self {
        self.by_label.insert(label, value);
        self
    }

    /// Drives one INPUT gate regardless of its label.
    pub fn set_gate(&mut self, gate: GateId, value: Bit) -> &mut Self {
        self.by_gate.insert(gate, value);
        self
    }

    /// The value supplied for an INPUT gate, if any.
    pub fn driven(&self, gate: GateId, label: Option<Label>) -> Option<Bit> {
        self.by_gate
            .get(&gate)
            .or_else(|| label.and_then(|l| self.by_label.get(&l)))
            .copied()
    }
}

impl FromIterator<(Label, Bit)> for InputAssignment {
    fn from_iter<T: IntoIterator<Item = (Label, Bit)>>(iter: T) -> Self {
        Self {
            by_label: iter.into_iter().collect(),
            by_gate: HashMap::new(),
        }
    }
}

/// A wire waiting to be reached, with the value and chain it carries.
#[derive(Clone, Copy, Debug)]
struct Visit {
    wire: WireId,
    value: Bit,
    from: PathMetric,
}

/// Runs propagation passes over one netlist.
///
/// The connector index is built once; the netlist must not change while a
/// propagator borrows it.
#[derive(Debug)]
pub struct Propagator<'n> {
    netlist: &'n Netlist,
    index: ConnectorIndex,
    state: SimState,
}

impl<'n> Propagator<'n> {
    /// Indexes `netlist` and prepares reset state.
    pub fn new(netlist: &'n Netlist) -> Self {
        let index = ConnectorIndex::build(netlist);
        let state = SimState::new(netlist, &index);
        Self {
            netlist,
            index,
            state,
        }
    }

    /// The netlist being simulated.
    pub fn netlist(&self) -> &'n Netlist {
        self.netlist
    }

    /// The connector index built for the netlist.
    pub fn index(&self) -> &ConnectorIndex {
        &self.index
    }

    /// State left by the most recent pass.
    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Resets all state and runs one full pass for `inputs`.
    ///
    /// INPUT gates are flooded in insertion order, each to exhaustion before
    /// the next. Repeating a pass with the same assignment yields the same
    /// state.
    pub fn propagate(&mut self, inputs: &InputAssignment) -> &SimState {
        self.state.reset(self.netlist, &self.index);
        let mut fired = 0usize;

        let netlist = self.netlist;
        for (id, gate) in netlist.gates_of_kind(GateKind::Input) {
            let value = GateKind::Input.evaluate(&[], inputs.driven(id, gate.label));
            self.state.gate_mut(id).output = Some(value);
            let Some(wire) = self.index.output_wire(gate) else {
                debug!(gate = %id, "INPUT has no outgoing wire");
                continue;
            };
            fired += self.flood(Visit {
                wire,
                value,
                from: PathMetric::seed(id),
            });
        }

        debug!(
            wires = self.state.visited_wires(),
            gates = fired,
            "propagation pass complete"
        );
        &self.state
    }

    /// Floods from one wire to exhaustion. Returns the number of gates fired.
    fn flood(&mut self, start: Visit) -> usize {
        let netlist = self.netlist;
        let mut stack = vec![start];
        let mut fired = 0;

        while let Some(Visit { wire, value, from }) = stack.pop() {
            let ws = self.state.wire_mut(wire);
            if ws.visited {
                continue;
            }
            ws.visited = true;
            ws.signal = SignalState::from(value);
            ws.path.absorb(from);
            let path = ws.path;

            let Some(w) = netlist.wire(wire) else {
                continue;
            };

            if let Some(target) = self.index.fed_input(w) {
                if let Some(next) = self.deliver(target, wire, value, path) {
                    fired += 1;
                    stack.extend(next);
                }
                continue;
            }

            // Reverse so the first neighbour is reached first.
            let neighbours: Vec<WireId> = self.index.neighbours(wire, w).collect();
            stack.extend(neighbours.into_iter().rev().map(|n| Visit {
                wire: n,
                value,
                from: path,
            }));
        }
        fired
    }

    /// Delivers `value` into a gate input. If that completes the gate, it is
    /// evaluated and the visit for its output wire (if any) is returned.
    fn deliver(
        &mut self,
        target: InputConnector,
        wire: WireId,
        value: Bit,
        path: PathMetric,
    ) -> Option<Option<Visit>> {
        let netlist = self.netlist;
        let gate = netlist.gate(target.gate)?;
        if self.index.slot_wire(gate, target.slot) != Some(wire) {
            warn!(
                gate = %target.gate,
                slot = target.slot,
                wire = %wire,
                "ignoring delivery from a wire not bound to this input"
            );
            self.state.wire_mut(wire).signal = SignalState::Invalid;
            return None;
        }

        let gs = self.state.gate_mut(target.gate);
        gs.path.absorb(path);
        if !gs.deliver(target.slot, value) {
            return None;
        }

        let out = gate.kind.evaluate(&gs.inputs(), None);
        gs.output = Some(out);
        gs.path.depth += 1;
        let from = gs.path;

        Some(self.index.output_wire(gate).map(|wire| Visit {
            wire,
            value: out,
            from,
        }))
    }
}
