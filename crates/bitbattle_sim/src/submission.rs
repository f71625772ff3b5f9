//! The payload sent to the scoring backend.

use bitbattle_netlist::{Netlist, NetlistSnapshot};
use serde::{Deserialize, Serialize};

use crate::runner::RunReport;

/// A circuit snapshot with the verdict and metrics it earned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// The submitted circuit.
    pub circuit: NetlistSnapshot,
    /// `true` iff every row passed.
    pub passed: bool,
    /// Interior gate count.
    pub gate_count: usize,
    /// Longest path reported by the runner.
    pub longest_path: u32,
}

impl Submission {
    /// Pairs a netlist with the report of a run over it.
    pub fn new(netlist: &Netlist, report: &RunReport) -> Self {
        Self {
            circuit: NetlistSnapshot::from(netlist),
            passed: report.passed(),
            gate_count: report.gate_count,
            longest_path: report.longest_path,
        }
    }

    /// Renders the payload as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::TestRunner;
    use crate::truth_table::TruthTable;
    use bitbattle_common::Label;
    use bitbattle_netlist::{GateKind, NetlistBuilder};

    #[test]
    fn payload_carries_circuit_and_metrics() {
        let mut b = NetlistBuilder::new();
        let a = b.input(Label::new('A').unwrap()).unwrap();
        let inv = b.gate(GateKind::Not, &[a]).unwrap();
        b.output(Label::new('Z').unwrap(), inv).unwrap();
        let netlist = b.finish();
        let table = TruthTable::from_json(r#"{"A":[0,1],"Z":[1,0]}"#).unwrap();
        let report = TestRunner::new(&netlist).run(&table).unwrap();

        let submission = Submission::new(&netlist, &report);
        let value: serde_json::Value = serde_json::from_str(&submission.to_json().unwrap()).unwrap();
        assert_eq!(value["passed"], true);
        assert_eq!(value["gateCount"], 1);
        assert_eq!(value["longestPath"], 1);
        assert_eq!(value["circuit"]["gates"].as_array().unwrap().len(), 3);
        assert_eq!(value["circuit"]["wires"][0]["startX"], 20);

        let back: Submission = serde_json::from_value(value).unwrap();
        assert_eq!(back, submission);
    }
}
