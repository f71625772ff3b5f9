//! The truth-table test runner.
//!
//! A run checks its preconditions first (no contended inputs, gate budget,
//! every pin's letter present in the table), then evaluates the rows
//! strictly in order. A failing row never aborts the run.

use std::thread;
use std::time::Duration;

use bitbattle_common::{Bit, Label};
use bitbattle_netlist::{GateId, GateKind, Netlist};
use serde::Serialize;
use tracing::{debug, info};

use crate::budget::GateBudget;
use crate::error::{SimError, TruthTableError};
use crate::propagate::Propagator;
use crate::truth_table::{Row, TruthTable};

/// Runner settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunnerOptions {
    /// Pause between consecutive rows. Zero runs headless.
    pub row_delay: Duration,
    /// Per-kind gate limits checked before the first row.
    pub budget: GateBudget,
}

/// The comparison made at one OUTPUT gate for one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OutputCheck {
    /// The OUTPUT gate.
    pub gate: GateId,
    /// Its truth-table letter.
    pub label: Label,
    /// The value the table expects.
    pub expected: Bit,
    /// The value the gate read.
    pub actual: Bit,
    /// The gate's path depth in this row.
    pub depth: u32,
}

impl OutputCheck {
    /// Returns `true` if the gate read the expected value.
    pub fn matches(&self) -> bool {
        self.expected == self.actual
    }
}

/// The verdict for one row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowResult {
    /// Zero-based row index.
    #[serde(rename = "rowIndex")]
    pub row: usize,
    /// `true` iff every OUTPUT gate matched.
    pub passed: bool,
    /// Every OUTPUT comparison, in gate insertion order.
    #[serde(skip)]
    pub checks: Vec<OutputCheck>,
}

/// The end-of-run summary handed to result reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// `true` iff every row passed.
    pub overall_passed: bool,
    /// Number of interior gates placed.
    pub gate_count: usize,
    /// Gates strictly between INPUT and OUTPUT on the longest chain seen.
    pub longest_path: u32,
}

/// Everything a run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Row verdicts in order.
    pub rows: Vec<RowResult>,
    /// Longest path over every OUTPUT gate in every row.
    pub longest_path: u32,
    /// Number of interior gates placed.
    pub gate_count: usize,
}

impl RunReport {
    /// Returns `true` iff every row passed.
    pub fn passed(&self) -> bool {
        self.rows.iter().all(|r| r.passed)
    }

    /// Number of rows that passed.
    pub fn passed_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.passed).count()
    }

    /// The summary payload.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            overall_passed: self.passed(),
            gate_count: self.gate_count,
            longest_path: self.longest_path,
        }
    }
}

/// Receives verdicts as a run progresses.
pub trait RunObserver {
    /// Called after each row, before the next one starts.
    fn row_finished(&mut self, _row: &RowResult) {}

    /// Called once after the last row.
    fn run_finished(&mut self, _summary: &RunSummary) {}
}

impl RunObserver for () {}

/// Drives the propagation engine through a truth table.
#[derive(Debug)]
pub struct TestRunner<'n> {
    propagator: Propagator<'n>,
    options: RunnerOptions,
}

impl<'n> TestRunner<'n> {
    /// Creates a runner with default options.
    pub fn new(netlist: &'n Netlist) -> Self {
        Self::with_options(netlist, RunnerOptions::default())
    }

    /// Creates a runner with explicit options.
    pub fn with_options(netlist: &'n Netlist, options: RunnerOptions) -> Self {
        Self {
            propagator: Propagator::new(netlist),
            options,
        }
    }

    /// Runs every row of `table`.
    pub fn run(&mut self, table: &TruthTable) -> Result<RunReport, SimError> {
        self.run_with(table, &mut ())
    }

    /// Runs every row of `table`, reporting each verdict to `observer`.
    pub fn run_with(
        &mut self,
        table: &TruthTable,
        observer: &mut dyn RunObserver,
    ) -> Result<RunReport, SimError> {
        let netlist = self.propagator.netlist();
        let outputs = self.check_preconditions(table)?;

        let mut rows = Vec::with_capacity(table.row_count());
        let mut longest_path = 0;
        for row in table.rows() {
            if row.index > 0 && !self.options.row_delay.is_zero() {
                thread::sleep(self.options.row_delay);
            }
            let result = self.run_row(&row, &outputs)?;
            longest_path = result
                .checks
                .iter()
                .map(|c| c.depth.saturating_sub(1))
                .fold(longest_path, u32::max);
            debug!(row = result.row, passed = result.passed, "row finished");
            observer.row_finished(&result);
            rows.push(result);
        }

        let report = RunReport {
            rows,
            longest_path,
            gate_count: netlist.interior_gate_count(),
        };
        let summary = report.summary();
        info!(
            passed = summary.overall_passed,
            rows = report.rows.len(),
            gates = summary.gate_count,
            longest_path = summary.longest_path,
            "truth-table run complete"
        );
        observer.run_finished(&summary);
        Ok(report)
    }

    /// Returns the OUTPUT gates with their labels, in insertion order.
    fn check_preconditions(&self, table: &TruthTable) -> Result<Vec<(GateId, Label)>, SimError> {
        let netlist = self.propagator.netlist();
        netlist.validate()?;
        self.options.budget.check(netlist)?;

        for (_, gate) in netlist.gates_of_kind(GateKind::Input) {
            if let Some(label) = gate.label {
                if !label.is_output() && !table.has_column(label) {
                    return Err(TruthTableError::MissingColumn(label).into());
                }
            }
        }

        netlist
            .gates_of_kind(GateKind::Output)
            .map(|(id, gate)| {
                let label = gate.label.ok_or(SimError::UnlabelledOutput(id))?;
                if !label.is_output() || !table.has_column(label) {
                    return Err(SimError::MissingExpectation(label));
                }
                Ok((id, label))
            })
            .collect()
    }

    fn run_row(&mut self, row: &Row, outputs: &[(GateId, Label)]) -> Result<RowResult, SimError> {
        let state = self.propagator.propagate(&row.inputs);
        let checks = outputs
            .iter()
            .map(|&(gate, label)| {
                let expected = *row
                    .expected
                    .get(&label)
                    .ok_or(SimError::MissingExpectation(label))?;
                Ok(OutputCheck {
                    gate,
                    label,
                    expected,
                    actual: state.output_value(gate),
                    depth: state.gate(gate).path.depth,
                })
            })
            .collect::<Result<Vec<_>, SimError>>()?;
        Ok(RowResult {
            row: row.index,
            passed: checks.iter().all(OutputCheck::matches),
            checks,
        })
    }
}
