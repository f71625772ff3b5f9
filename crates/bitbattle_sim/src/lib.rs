//! Signal propagation and truth-table testing for the bitbattle sandbox.
//!
//! This crate evaluates a placed [`Netlist`](bitbattle_netlist::Netlist)
//! for an input assignment, drives it through every row of a
//! [`TruthTable`], and reports per-row verdicts together with the gate-count
//! and longest-path metrics used for scoring.
//!
//! # Usage
//!
//! ```
//! use bitbattle_common::Label;
//! use bitbattle_netlist::{GateKind, NetlistBuilder};
//! use bitbattle_sim::{TestRunner, TruthTable};
//!
//! let mut b = NetlistBuilder::new();
//! let a = b.input(Label::new('A').unwrap()).unwrap();
//! let c = b.input(Label::new('B').unwrap()).unwrap();
//! let and = b.gate(GateKind::And, &[a, c]).unwrap();
//! b.output(Label::new('N').unwrap(), and).unwrap();
//! let netlist = b.finish();
//!
//! let table = TruthTable::from_json(r#"{"A":[0,0,1,1],"B":[0,1,0,1],"N":[0,0,0,1]}"#).unwrap();
//! let report = TestRunner::new(&netlist).run(&table).unwrap();
//! assert!(report.passed());
//! assert_eq!(report.gate_count, 1);
//! ```
//!
//! # Modules
//!
//! - `state`: per-pass gate and wire state, kept apart from topology
//! - `propagate`: the depth-first flood from INPUT gates
//! - `truth_table`: parsing, validation, row splitting and generation
//! - `runner`: the row-by-row test runner and its observer hook
//! - `budget`: per-kind gate limits
//! - `score`: daily, leaderboard and battle scoring
//! - `submission`: the scoring backend payload

#![warn(missing_docs)]

pub mod budget;
pub mod error;
pub mod propagate;
pub mod runner;
pub mod score;
pub mod state;
pub mod submission;
pub mod truth_table;

pub use budget::GateBudget;
pub use error::{SimError, TruthTableError};
pub use propagate::{InputAssignment, Propagator};
pub use runner::{
    OutputCheck, RowResult, RunObserver, RunReport, RunSummary, RunnerOptions, TestRunner,
};
pub use score::{Metrics, ScoreWeights};
pub use state::{GateState, PathMetric, SimState, WireState};
pub use submission::Submission;
pub use truth_table::{Row, TruthTable};
