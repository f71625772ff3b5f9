//! Error types for truth tables and test runs.
//!
//! Topology gaps and cyclic wiring are not errors; they resolve to default
//! values during propagation. Everything here stops a run before any row
//! is evaluated.

use bitbattle_common::{Label, LabelError};
use bitbattle_netlist::{GateId, GateKind, NetlistError};

/// Errors raised while building or validating a truth table.
#[derive(Debug, thiserror::Error)]
pub enum TruthTableError {
    /// The table has no columns, or its columns have no rows.
    #[error("truth table has no rows")]
    Empty,

    /// A column required by the circuit is absent from the table.
    #[error("truth table has no column '{0}'")]
    MissingColumn(Label),

    /// Two columns have different row counts.
    #[error("truth table column '{label}' has {found} rows, expected {expected}")]
    UnequalLengths {
        /// The column whose length disagrees with the first column.
        label: Label,
        /// The row count of the first column.
        expected: usize,
        /// The row count of this column.
        found: usize,
    },

    /// A column key is not a single uppercase letter.
    #[error("invalid truth table column: {0}")]
    InvalidLabel(#[from] LabelError),

    /// A generator was asked for more columns than the alphabet half allows.
    #[error("cannot generate {requested} {role} column(s); at most {max} are available")]
    TooManyColumns {
        /// `"input"` or `"output"`.
        role: &'static str,
        /// The requested column count.
        requested: usize,
        /// The largest supported column count.
        max: usize,
    },

    /// The table could not be parsed as JSON.
    #[error("truth table payload error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that prevent a truth-table run from starting.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The netlist is not simulatable as placed.
    #[error(transparent)]
    Netlist(#[from] NetlistError),

    /// The truth table is malformed.
    #[error(transparent)]
    TruthTable(#[from] TruthTableError),

    /// An OUTPUT gate carries no label, so no column can check it.
    #[error("OUTPUT gate {0} has no label")]
    UnlabelledOutput(GateId),

    /// An OUTPUT gate's label has no expected column in the truth table.
    #[error("truth table has no expected values for output '{0}'")]
    MissingExpectation(Label),

    /// The circuit uses more gates of one kind than the challenge allows.
    #[error("{kind} gate budget exceeded: {used} placed, {limit} allowed")]
    GateBudgetExceeded {
        /// The gate kind.
        kind: GateKind,
        /// Gates of this kind in the netlist.
        used: usize,
        /// The challenge limit.
        limit: usize,
    },
}
