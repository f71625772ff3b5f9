//! End-to-end behaviour of the propagation engine and the truth-table runner.

use std::io::Write;

use bitbattle_common::{Bit, Label, SignalState};
use bitbattle_netlist::{
    archive, Gate, GateKind, Netlist, NetlistBuilder, NetlistSnapshot, Point, Wire,
};
use bitbattle_sim::{InputAssignment, Propagator, TestRunner, TruthTable};
use flate2::write::ZlibEncoder;
use flate2::Compression;

fn label(c: char) -> Label {
    Label::new(c).unwrap()
}

fn bit(v: u8) -> Bit {
    Bit::try_from(v).unwrap()
}

fn table(json: &str) -> TruthTable {
    TruthTable::from_json(json).unwrap()
}

/// INPUT A (and B for two-input kinds) -> gate -> OUTPUT N.
fn single_gate(kind: GateKind) -> Netlist {
    let mut b = NetlistBuilder::new();
    let a = b.input(label('A')).unwrap();
    let g = if kind == GateKind::Not {
        b.gate(kind, &[a]).unwrap()
    } else {
        let c = b.input(label('B')).unwrap();
        b.gate(kind, &[a, c]).unwrap()
    };
    b.output(label('N'), g).unwrap();
    b.finish()
}

fn output_for(netlist: &Netlist, inputs: &[(char, u8)]) -> Bit {
    let assignment: InputAssignment = inputs.iter().map(|&(c, v)| (label(c), bit(v))).collect();
    let out = netlist.find_label(label('N')).unwrap();
    Propagator::new(netlist).propagate(&assignment).output_value(out)
}

#[test]
fn two_input_gate_truth_tables() {
    let cases = [
        (GateKind::And, [0, 0, 0, 1]),
        (GateKind::Or, [0, 1, 1, 1]),
        (GateKind::Xor, [0, 1, 1, 0]),
    ];
    for (kind, expected) in cases {
        let netlist = single_gate(kind);
        for (row, want) in expected.into_iter().enumerate() {
            let a = (row >> 1) as u8 & 1;
            let b = row as u8 & 1;
            assert_eq!(
                output_for(&netlist, &[('A', a), ('B', b)]),
                bit(want),
                "{kind}({a}, {b})"
            );
        }
    }
}

#[test]
fn not_gate_truth_table() {
    let netlist = single_gate(GateKind::Not);
    assert_eq!(output_for(&netlist, &[('A', 0)]), Bit::One);
    assert_eq!(output_for(&netlist, &[('A', 1)]), Bit::Zero);
}

#[test]
fn three_input_xor_is_one_hot() {
    let mut b = NetlistBuilder::new();
    let a = b.input(label('A')).unwrap();
    let c = b.input(label('B')).unwrap();
    let d = b.input(label('C')).unwrap();
    let x = b.gate(GateKind::Xor, &[a, c, d]).unwrap();
    b.output(label('N'), x).unwrap();
    let netlist = b.finish();

    assert_eq!(output_for(&netlist, &[('A', 1), ('B', 1), ('C', 1)]), Bit::Zero);
    assert_eq!(output_for(&netlist, &[('A', 0), ('B', 0), ('C', 1)]), Bit::One);
}

#[test]
fn and_circuit_longest_path_counts_the_and_gate() {
    let netlist = single_gate(GateKind::And);
    let report = TestRunner::new(&netlist)
        .run(&table(r#"{"A":[0,0,1,1],"B":[0,1,0,1],"N":[0,0,0,1]}"#))
        .unwrap();

    assert_eq!(report.rows.len(), 4);
    assert!(report.rows.iter().all(|r| r.passed));
    assert!(report.passed());
    assert_eq!(report.gate_count, 1);
    // The OUTPUT pin adds a level like every evaluated gate, so the single
    // AND between the pins reports 1 rather than 0.
    assert_eq!(report.longest_path, 1);
}

#[test]
fn mismatched_rows_fail_without_aborting() {
    let netlist = single_gate(GateKind::Or);
    let report = TestRunner::new(&netlist)
        .run(&table(r#"{"A":[0,0,1,1],"B":[0,1,0,1],"N":[0,0,0,1]}"#))
        .unwrap();

    let verdicts: Vec<_> = report.rows.iter().map(|r| (r.row, r.passed)).collect();
    assert_eq!(verdicts, vec![(0, true), (1, false), (2, false), (3, true)]);
    assert!(!report.passed());
}

#[test]
fn path_depth_counts_interior_gates() {
    let mut b = NetlistBuilder::new();
    let a = b.input(label('A')).unwrap();
    let n1 = b.gate(GateKind::Not, &[a]).unwrap();
    let n2 = b.gate(GateKind::Not, &[n1]).unwrap();
    b.output(label('Z'), n2).unwrap();
    let chain = b.finish();
    let report = TestRunner::new(&chain)
        .run(&table(r#"{"A":[0,1],"Z":[0,1]}"#))
        .unwrap();
    assert!(report.passed());
    assert_eq!(report.longest_path, 2);

    let mut b = NetlistBuilder::new();
    let a = b.input(label('A')).unwrap();
    b.output(label('Z'), a).unwrap();
    let direct = b.finish();
    let report = TestRunner::new(&direct)
        .run(&table(r#"{"A":[0,1],"Z":[0,1]}"#))
        .unwrap();
    assert!(report.passed());
    assert_eq!(report.longest_path, 0);
    assert_eq!(report.gate_count, 0);
}

#[test]
fn longest_path_takes_the_deeper_branch() {
    // N = AND(A, NOT(NOT(B))): the B branch is two gates deeper.
    let mut b = NetlistBuilder::new();
    let a = b.input(label('A')).unwrap();
    let c = b.input(label('B')).unwrap();
    let n1 = b.gate(GateKind::Not, &[c]).unwrap();
    let n2 = b.gate(GateKind::Not, &[n1]).unwrap();
    let and = b.gate(GateKind::And, &[a, n2]).unwrap();
    let out = b.output(label('N'), and).unwrap();
    let netlist = b.finish();

    let mut p = Propagator::new(&netlist);
    let state = p.propagate(&[(label('A'), Bit::One), (label('B'), Bit::One)].into_iter().collect());
    assert_eq!(state.output_value(out), Bit::One);
    assert_eq!(state.gate(and).path.depth, 3);
    assert_eq!(state.gate(and).path.source, Some(c));

    let report = TestRunner::new(&netlist)
        .run(&table(r#"{"A":[0,0,1,1],"B":[0,1,0,1],"N":[0,0,0,1]}"#))
        .unwrap();
    assert!(report.passed());
    assert_eq!(report.longest_path, 3);
}

#[test]
fn unconnected_output_reads_zero() {
    let mut b = NetlistBuilder::new();
    let a = b.input(label('A')).unwrap();
    let inv = b.gate(GateKind::Not, &[a]).unwrap();
    b.output(label('Y'), inv).unwrap();
    let lonely = b.place(GateKind::Output, 1).unwrap();
    let mut netlist = b.finish();
    let lonely_gate = netlist.remove_gate(lonely).unwrap();
    netlist.add_gate(lonely_gate.with_label(label('Z'))).unwrap();

    let report = TestRunner::new(&netlist)
        .run(&table(r#"{"A":[0,1],"Y":[1,0],"Z":[0,0]}"#))
        .unwrap();
    assert!(report.passed());

    let report = TestRunner::new(&netlist)
        .run(&table(r#"{"A":[0,1],"Y":[1,0],"Z":[1,1]}"#))
        .unwrap();
    assert_eq!(report.passed_rows(), 0);
}

#[test]
fn unwired_input_starves_gate() {
    // A 2-slot AND with only slot 0 wired never fires: one wire is below
    // the kind's minimum fan-in.
    let mut b = NetlistBuilder::new();
    let a = b.input(label('A')).unwrap();
    let and = b.place(GateKind::And, 2).unwrap();
    b.connect(a, and, 0).unwrap();
    let out = b.output(label('N'), and).unwrap();
    let netlist = b.finish();

    let mut p = Propagator::new(&netlist);
    let state = p.propagate(&[(label('A'), Bit::One)].into_iter().collect());
    assert!(!state.gate(and).is_resolved());
    assert_eq!(state.gate(and).slots, vec![Some(Bit::One), None]);
    assert_eq!(state.output_value(out), Bit::Zero);
}

#[test]
fn propagation_is_deterministic() {
    let netlist = single_gate(GateKind::Xor);
    let inputs: InputAssignment = [(label('A'), Bit::One), (label('B'), Bit::Zero)]
        .into_iter()
        .collect();
    let mut p = Propagator::new(&netlist);
    let first = p.propagate(&inputs).clone();
    for _ in 0..3 {
        assert_eq!(p.propagate(&inputs), &first);
    }
    let mut fresh = Propagator::new(&netlist);
    assert_eq!(fresh.propagate(&inputs), &first);
}

#[test]
fn cyclic_wiring_terminates() {
    // An OR and a NOT wired in a ring, with the OR also feeding an OUTPUT.
    let mut b = NetlistBuilder::new();
    let a = b.input(label('A')).unwrap();
    let or = b.place(GateKind::Or, 2).unwrap();
    let inv = b.place(GateKind::Not, 1).unwrap();
    b.connect(a, or, 0).unwrap();
    b.connect(inv, or, 1).unwrap();
    b.connect(or, inv, 0).unwrap();
    b.output(label('N'), or).unwrap();
    let netlist = b.finish();

    let report = TestRunner::new(&netlist)
        .run(&table(r#"{"A":[0,1],"N":[0,1]}"#))
        .unwrap();
    // The OR waits forever on the ring, so N reads 0 in both rows.
    let verdicts: Vec<_> = report.rows.iter().map(|r| r.passed).collect();
    assert_eq!(verdicts, vec![true, false]);
}

#[test]
fn junction_splits_one_signal_to_many_inputs() {
    let mut b = NetlistBuilder::new();
    let a = b.input(label('A')).unwrap();
    let n1 = b.gate(GateKind::Not, &[a]).unwrap();
    let n2 = b.gate(GateKind::Not, &[a]).unwrap();
    b.output(label('Y'), n1).unwrap();
    b.output(label('Z'), n2).unwrap();
    let netlist = b.finish();

    let report = TestRunner::new(&netlist)
        .run(&table(r#"{"A":[0,1],"Y":[1,0],"Z":[1,0]}"#))
        .unwrap();
    assert!(report.passed());
    assert_eq!(report.gate_count, 2);
}

#[test]
fn wire_states_follow_signal() {
    let mut n = Netlist::new();
    n.add_gate(
        Gate::placed(GateKind::Input, Point::new(0, 0), 0, 0)
            .unwrap()
            .with_label(label('A')),
    )
    .unwrap();
    let w = n.add_wire(Wire::new(Point::new(20, 10), Point::new(80, 10)));
    let idle = n.add_wire(Wire::new(Point::new(500, 500), Point::new(520, 500)));

    let mut p = Propagator::new(&n);
    let state = p.propagate(&[(label('A'), Bit::One)].into_iter().collect());
    assert_eq!(state.wire(w).signal, SignalState::On);
    assert!(state.wire(w).visited);
    assert_eq!(state.wire(idle).signal, SignalState::Off);
    assert!(!state.wire(idle).visited);
}

#[test]
fn editor_snapshot_runs_end_to_end() {
    let json = r#"{
        "gates": [
            {"x": 0, "y": 0, "type": "INPUT", "id": "A", "inputs": [], "output": {"x": 20, "y": 10}},
            {"x": 0, "y": 100, "type": "INPUT", "id": "B", "inputs": [], "output": {"x": 20, "y": 110}},
            {"x": 100, "y": 0, "type": "AND", "rotation": 0, "id": 3,
             "inputs": [{"x": 100, "y": 10}, {"x": 100, "y": 30}], "output": {"x": 160, "y": 30}},
            {"x": 200, "y": 20, "type": "OUTPUT", "id": "N", "inputs": [{"x": 200, "y": 30}], "output": {}}
        ],
        "wires": [
            {"startX": 20, "startY": 10, "endX": 100, "endY": 10},
            {"startX": 20, "startY": 110, "endX": 60, "endY": 110},
            {"startX": 60, "startY": 110, "endX": 60, "endY": 30},
            {"startX": 100, "startY": 30, "endX": 60, "endY": 30},
            {"startX": 160, "startY": 30, "endX": 200, "endY": 30}
        ]
    }"#;
    let netlist = NetlistSnapshot::from_json(json)
        .unwrap()
        .into_netlist()
        .unwrap();
    let report = TestRunner::new(&netlist)
        .run(&table(r#"{"A":[0,0,1,1],"B":[0,1,0,1],"N":[0,0,0,1]}"#))
        .unwrap();
    assert!(report.passed());
    assert_eq!(report.gate_count, 1);
    assert_eq!(report.longest_path, 1);
}

#[test]
fn editor_and_with_spare_connector_fires_on_wired_slots() {
    // Editor AND records always carry three connectors; only two are wired.
    let json = r#"{
        "gates": [
            {"x": 0, "y": 0, "type": "INPUT", "id": "A", "inputs": [], "output": {"x": 20, "y": 10}},
            {"x": 0, "y": 100, "type": "INPUT", "id": "B", "inputs": [], "output": {"x": 20, "y": 110}},
            {"x": 100, "y": 0, "type": "AND", "rotation": 0, "id": 3,
             "inputs": [{"x": 100, "y": 10}, {"x": 100, "y": 30}, {"x": 100, "y": 50}],
             "output": {"x": 160, "y": 30}},
            {"x": 200, "y": 20, "type": "OUTPUT", "id": "N", "inputs": [{"x": 200, "y": 30}], "output": {}}
        ],
        "wires": [
            {"startX": 20, "startY": 10, "endX": 100, "endY": 10},
            {"startX": 20, "startY": 110, "endX": 60, "endY": 110},
            {"startX": 60, "startY": 110, "endX": 60, "endY": 30},
            {"startX": 100, "startY": 30, "endX": 60, "endY": 30},
            {"startX": 160, "startY": 30, "endX": 200, "endY": 30}
        ]
    }"#;
    let netlist = NetlistSnapshot::from_json(json)
        .unwrap()
        .into_netlist()
        .unwrap();
    let report = TestRunner::new(&netlist)
        .run(&table(r#"{"A":[0,0,1,1],"B":[0,1,0,1],"N":[0,0,0,1]}"#))
        .unwrap();
    let verdicts: Vec<bool> = report.rows.iter().map(|r| r.passed).collect();
    assert_eq!(verdicts, vec![true, true, true, true]);
    assert_eq!(report.longest_path, 1);
}

#[test]
fn three_connector_and_uses_third_slot() {
    // Inputs on slots 0 and 2 with slot 1 left open.
    let mut b = NetlistBuilder::new();
    let a = b.input(label('A')).unwrap();
    let c = b.input(label('B')).unwrap();
    let and = b.place(GateKind::And, 3).unwrap();
    b.connect(a, and, 0).unwrap();
    b.connect(c, and, 2).unwrap();
    b.output(label('N'), and).unwrap();
    let netlist = b.finish();

    let report = TestRunner::new(&netlist)
        .run(&table(r#"{"A":[0,0,1,1],"B":[0,1,0,1],"N":[0,0,0,1]}"#))
        .unwrap();
    assert!(report.passed());
}

#[test]
fn editor_archive_runs_with_third_input_wired() {
    // Editor archives carry no slot count; B feeds the AND's third connector.
    let doc = r#"{"g": [
        {"x": 0, "y": 0, "e": "INPUT", "n": 0, "d": "A"},
        {"x": 0, "y": 100, "e": "INPUT", "n": 0, "d": "B"},
        {"x": 100, "y": 0, "e": "AND", "n": 0, "d": null},
        {"x": 200, "y": 20, "e": "OUTPUT", "n": 0, "d": "N"}
    ], "w": [
        {"Xt": 20, "Yt": 10, "Xd": 100, "Yd": 10},
        {"Xt": 20, "Yt": 110, "Xd": 100, "Yd": 50},
        {"Xt": 160, "Yt": 30, "Xd": 200, "Yd": 30}
    ]}"#;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(doc.as_bytes()).unwrap();
    let netlist = archive::unpack(&encoder.finish().unwrap()).unwrap();

    let report = TestRunner::new(&netlist)
        .run(&table(r#"{"A":[0,0,1,1],"B":[0,1,0,1],"N":[0,0,0,1]}"#))
        .unwrap();
    let verdicts: Vec<bool> = report.rows.iter().map(|r| r.passed).collect();
    assert_eq!(verdicts, vec![true, true, true, true]);
}
