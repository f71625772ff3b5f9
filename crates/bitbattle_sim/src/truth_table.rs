//! Truth tables: validated letter-to-column maps, row splitting, and generation.

use std::collections::BTreeMap;

use bitbattle_common::{Bit, Label, LabelRole};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TruthTableError;
use crate::propagate::InputAssignment;

/// Number of letters on each side of the input/output split.
pub const MAX_COLUMNS: usize = 13;

/// A target truth table.
///
/// Every column has the same number of rows, and there is at least one
/// row. Input columns (`A`–`M`) drive INPUT gates; output columns (`N`–`Z`)
/// are checked at OUTPUT gates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<Bit>>",
    into = "BTreeMap<Label, Vec<Bit>>"
)]
pub struct TruthTable {
    columns: BTreeMap<Label, Vec<Bit>>,
    rows: usize,
}

/// One row of a truth table, split by label role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Zero-based row index.
    pub index: usize,
    /// Driven values for INPUT gates.
    pub inputs: InputAssignment,
    /// Expected OUTPUT values by label.
    pub expected: BTreeMap<Label, Bit>,
}

impl TruthTable {
    /// Validates and wraps a column map.
    pub fn new(columns: BTreeMap<Label, Vec<Bit>>) -> Result<Self, TruthTableError> {
        let mut lengths = columns.iter().map(|(label, col)| (*label, col.len()));
        let (_, rows) = lengths.next().ok_or(TruthTableError::Empty)?;
        if rows == 0 {
            return Err(TruthTableError::Empty);
        }
        if let Some((label, found)) = lengths.find(|&(_, len)| len != rows) {
            return Err(TruthTableError::UnequalLengths {
                label,
                expected: rows,
                found,
            });
        }
        Ok(Self { columns, rows })
    }

    /// Parses a table from a JSON object such as `{"A": [0, 1], "Z": [1, 0]}`.
    pub fn from_json(text: &str) -> Result<Self, TruthTableError> {
        let raw: BTreeMap<String, Vec<Bit>> = serde_json::from_str(text)?;
        Self::try_from(raw)
    }

    /// Renders the table as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, TruthTableError> {
        Ok(serde_json::to_string_pretty(&self.columns)?)
    }

    /// Builds a table whose input columns enumerate every combination of
    /// `inputs` bits and whose output columns `Z`, `Y`, ... are `outputs`.
    pub fn with_outputs(inputs: usize, outputs: Vec<Vec<Bit>>) -> Result<Self, TruthTableError> {
        check_width("input", inputs)?;
        check_width("output", outputs.len())?;
        let mut columns = input_columns(inputs);
        for (i, col) in outputs.into_iter().enumerate() {
            columns.insert(output_label(i)?, col);
        }
        Self::new(columns)
    }

    /// Builds a table of `inputs` enumerated columns and `outputs` random columns.
    pub fn random<R: Rng>(
        inputs: usize,
        outputs: usize,
        rng: &mut R,
    ) -> Result<Self, TruthTableError> {
        check_width("input", inputs)?;
        check_width("output", outputs)?;
        let rows = 1usize << inputs;
        let cols: Vec<Vec<Bit>> = (0..outputs)
            .map(|_| (0..rows).map(|_| Bit::from(rng.gen::<bool>())).collect())
            .collect();
        Self::with_outputs(inputs, cols)
    }

    /// Builds a random table using the thread-local generator.
    pub fn generate(inputs: usize, outputs: usize) -> Result<Self, TruthTableError> {
        Self::random(inputs, outputs, &mut rand::thread_rng())
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// The column for `label`, if present.
    pub fn column(&self, label: Label) -> Option<&[Bit]> {
        self.columns.get(&label).map(Vec::as_slice)
    }

    /// Returns `true` if the table has a column for `label`.
    pub fn has_column(&self, label: Label) -> bool {
        self.columns.contains_key(&label)
    }

    /// Input labels in alphabetical order.
    pub fn input_labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.labels_with(LabelRole::Input)
    }

    /// Output labels in alphabetical order.
    pub fn output_labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.labels_with(LabelRole::Output)
    }

    /// Splits row `index` into driven inputs and expected outputs.
    pub fn row(&self, index: usize) -> Option<Row> {
        if index >= self.rows {
            return None;
        }
        let mut inputs = InputAssignment::new();
        let mut expected = BTreeMap::new();
        for (&label, col) in &self.columns {
            let bit = col[index];
            match label.role() {
                LabelRole::Input => {
                    inputs.set_label(label, bit);
                }
                LabelRole::Output => {
                    expected.insert(label, bit);
                }
            }
        }
        Some(Row {
            index,
            inputs,
            expected,
        })
    }

    /// Every row in order.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        (0..self.rows).filter_map(|i| self.row(i))
    }

    fn labels_with(&self, role: LabelRole) -> impl Iterator<Item = Label> + '_ {
        self.columns.keys().copied().filter(move |l| l.role() == role)
    }
}

impl TryFrom<BTreeMap<String, Vec<Bit>>> for TruthTable {
    type Error = TruthTableError;

    fn try_from(raw: BTreeMap<String, Vec<Bit>>) -> Result<Self, Self::Error> {
        let columns = raw
            .into_iter()
            .map(|(key, col)| Ok((key.parse::<Label>()?, col)))
            .collect::<Result<_, TruthTableError>>()?;
        Self::new(columns)
    }
}

impl From<TruthTable> for BTreeMap<Label, Vec<Bit>> {
    fn from(table: TruthTable) -> Self {
        table.columns
    }
}

fn check_width(role: &'static str, requested: usize) -> Result<(), TruthTableError> {
    if requested > MAX_COLUMNS {
        return Err(TruthTableError::TooManyColumns {
            role,
            requested,
            max: MAX_COLUMNS,
        });
    }
    Ok(())
}

/// Columns `A`.. enumerating all rows in binary counting order, `A` most significant.
fn input_columns(inputs: usize) -> BTreeMap<Label, Vec<Bit>> {
    let rows = 1usize << inputs;
    (0..inputs)
        .filter_map(|i| {
            let shift = inputs - i - 1;
            let col: Vec<Bit> = (0..rows).map(|r| Bit::from((r >> shift) & 1 == 1)).collect();
            Label::nth(i).map(|label| (label, col))
        })
        .collect()
}

/// The `i`-th output label counting back from `Z`.
fn output_label(i: usize) -> Result<Label, TruthTableError> {
    25usize
        .checked_sub(i)
        .and_then(Label::nth)
        .filter(|l| l.is_output())
        .ok_or(TruthTableError::TooManyColumns {
            role: "output",
            requested: i + 1,
            max: MAX_COLUMNS,
        })
}
