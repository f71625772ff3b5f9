//! Coordinate lookup from wire endpoints to gate connectors.
//!
//! Connectors are not stored on their own. [`ConnectorIndex`] derives them
//! from the gates' connector points so the simulator can answer "which gate
//! input does this wire feed" and "which wires meet here" in O(1).

use std::collections::HashMap;

use crate::ids::{GateId, WireId};
use crate::netlist::{Gate, Netlist, Wire};
use crate::point::Point;

/// An addressable gate input: the gate and the slot index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct InputConnector {
    /// The gate owning the connector.
    pub gate: GateId,
    /// The input slot index.
    pub slot: usize,
}

/// Point-keyed index over a netlist snapshot.
///
/// Built once per simulation session; it must be rebuilt after the netlist
/// changes.
#[derive(Debug, Clone, Default)]
pub struct ConnectorIndex {
    /// Wires with an endpoint at each point, in wire insertion order.
    wires_at: HashMap<Point, Vec<WireId>>,
    /// The first gate input (by gate insertion order, then slot) at each point.
    input_at: HashMap<Point, InputConnector>,
}

impl ConnectorIndex {
    /// Indexes every wire endpoint and gate input connector of `netlist`.
    pub fn build(netlist: &Netlist) -> Self {
        let mut wires_at: HashMap<Point, Vec<WireId>> = HashMap::new();
        for (id, wire) in netlist.wires() {
            wires_at.entry(wire.start).or_default().push(id);
            if wire.end != wire.start {
                wires_at.entry(wire.end).or_default().push(id);
            }
        }

        let mut input_at = HashMap::new();
        for (gate, g) in netlist.gates() {
            for (slot, &p) in g.inputs.iter().enumerate() {
                input_at.entry(p).or_insert(InputConnector { gate, slot });
            }
        }

        Self { wires_at, input_at }
    }

    /// Wires with an endpoint at `p`, in insertion order.
    pub fn wires_at(&self, p: Point) -> &[WireId] {
        self.wires_at.get(&p).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The gate input connector at `p`, if any.
    pub fn input_at(&self, p: Point) -> Option<InputConnector> {
        self.input_at.get(&p).copied()
    }

    /// The wire a gate drives: the first wire touching its output connector.
    pub fn output_wire(&self, gate: &Gate) -> Option<WireId> {
        gate.output.and_then(|p| self.wires_at(p).first().copied())
    }

    /// The wire bound to an input slot: the first wire touching its connector.
    pub fn slot_wire(&self, gate: &Gate, slot: usize) -> Option<WireId> {
        gate.inputs
            .get(slot)
            .and_then(|&p| self.wires_at(p).first().copied())
    }

    /// The gate input fed by `wire`, looked up at its start, then its end.
    pub fn fed_input(&self, wire: &Wire) -> Option<InputConnector> {
        self.input_at(wire.start).or_else(|| self.input_at(wire.end))
    }

    /// Other wires sharing an endpoint with `wire`: those at its start first,
    /// then those at its end, each group in insertion order.
    pub fn neighbours<'a>(
        &'a self,
        id: WireId,
        wire: &Wire,
    ) -> impl Iterator<Item = WireId> + 'a {
        self.wires_at(wire.start)
            .iter()
            .chain(self.wires_at(wire.end))
            .copied()
            .filter(move |&other| other != id)
    }

    /// Gate input connectors with more than one wire attached, as
    /// `(gate, slot, point)` in gate insertion order.
    pub fn contended_inputs(&self, netlist: &Netlist) -> Vec<(GateId, usize, Point)> {
        netlist
            .gates()
            .flat_map(|(id, g)| {
                g.inputs
                    .iter()
                    .enumerate()
                    .filter(move |(_, p)| self.wires_at(**p).len() > 1)
                    .map(move |(slot, p)| (id, slot, *p))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::GateKind;

    fn not_gate(x: i32) -> Gate {
        Gate::new(
            GateKind::Not,
            vec![Point::new(x, 0)],
            Some(Point::new(x + 20, 0)),
        )
    }

    #[test]
    fn output_and_fed_input_lookup() {
        let mut n = Netlist::new();
        let a = n.add_gate(not_gate(0)).unwrap();
        let b = n.add_gate(not_gate(100)).unwrap();
        let w = n.add_wire(Wire::new(Point::new(20, 0), Point::new(100, 0)));
        let index = ConnectorIndex::build(&n);

        assert_eq!(index.output_wire(n.gate(a).unwrap()), Some(w));
        assert_eq!(index.output_wire(n.gate(b).unwrap()), None);
        assert_eq!(
            index.fed_input(n.wire(w).unwrap()),
            Some(InputConnector { gate: b, slot: 0 })
        );
        assert_eq!(index.slot_wire(n.gate(b).unwrap(), 0), Some(w));
    }

    #[test]
    fn fed_input_matches_either_endpoint() {
        let mut n = Netlist::new();
        let g = n.add_gate(not_gate(0)).unwrap();
        // Drawn from the gate's input outward.
        let w = n.add_wire(Wire::new(Point::new(0, 0), Point::new(-40, 0)));
        let index = ConnectorIndex::build(&n);
        assert_eq!(index.fed_input(n.wire(w).unwrap()).map(|c| c.gate), Some(g));
    }

    #[test]
    fn neighbours_share_coordinates() {
        let mut n = Netlist::new();
        let a = n.add_wire(Wire::new(Point::new(0, 0), Point::new(10, 0)));
        let b = n.add_wire(Wire::new(Point::new(10, 0), Point::new(10, 10)));
        let c = n.add_wire(Wire::new(Point::new(20, 0), Point::new(10, 0)));
        let d = n.add_wire(Wire::new(Point::new(50, 50), Point::new(60, 50)));
        let index = ConnectorIndex::build(&n);
        let around_a: Vec<_> = index.neighbours(a, n.wire(a).unwrap()).collect();
        assert_eq!(around_a, vec![b, c]);
        assert_eq!(index.neighbours(d, n.wire(d).unwrap()).count(), 0);
    }

    #[test]
    fn first_gate_wins_shared_input_point() {
        let mut n = Netlist::new();
        let first = n.add_gate(not_gate(0)).unwrap();
        n.add_gate(not_gate(0)).unwrap();
        let index = ConnectorIndex::build(&n);
        assert_eq!(index.input_at(Point::new(0, 0)).map(|c| c.gate), Some(first));
    }

    #[test]
    fn contended_inputs_listed() {
        let mut n = Netlist::new();
        let g = n.add_gate(not_gate(0)).unwrap();
        n.add_wire(Wire::new(Point::new(-10, 0), Point::new(0, 0)));
        n.add_wire(Wire::new(Point::new(0, 0), Point::new(0, 10)));
        let index = ConnectorIndex::build(&n);
        assert_eq!(
            index.contended_inputs(&n),
            vec![(g, 0, Point::new(0, 0))]
        );
    }
}
