//! The gate catalog: arity and evaluation for every gate kind.
//!
//! The catalog is closed and pure. No kind carries state of its own; an
//! INPUT gate's value is supplied by the caller for each propagation pass.

use bitbattle_common::Bit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Largest number of input slots a variable-arity gate may declare.
pub const MAX_FAN_IN: usize = 3;

/// The kind of a placed gate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    /// 1 iff every input is 1.
    And,
    /// 1 iff at least one input is 1.
    Or,
    /// 1 iff the single input is 0.
    Not,
    /// 1 iff exactly one input is 1 (one-hot, not parity).
    Xor,
    /// Driven externally; no input slots.
    Input,
    /// Reads its single input; no output connector.
    Output,
}

impl GateKind {
    /// All kinds, in catalog order.
    pub const ALL: [GateKind; 6] = [
        GateKind::And,
        GateKind::Or,
        GateKind::Not,
        GateKind::Xor,
        GateKind::Input,
        GateKind::Output,
    ];

    /// The range of input-slot counts a gate of this kind may declare.
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            GateKind::And | GateKind::Or | GateKind::Xor => 2..=MAX_FAN_IN,
            GateKind::Not | GateKind::Output => 1..=1,
            GateKind::Input => 0..=0,
        }
    }

    /// Returns `true` if `slots` is an allowed input-slot count for this kind.
    pub fn accepts_arity(self, slots: usize) -> bool {
        self.arity().contains(&slots)
    }

    /// Returns `true` for the logic kinds that count towards a circuit's gate count.
    pub fn is_interior(self) -> bool {
        matches!(
            self,
            GateKind::And | GateKind::Or | GateKind::Not | GateKind::Xor
        )
    }

    /// Returns `true` if gates of this kind drive an output connector.
    pub fn has_output(self) -> bool {
        self != GateKind::Output
    }

    /// Evaluates the gate's output from fully resolved inputs.
    ///
    /// `driven` is only read by [`GateKind::Input`], which yields it (or 0 when
    /// the caller supplied nothing). An AND with no inputs yields 0, and an
    /// OUTPUT with no input reads 0.
    pub fn evaluate(self, inputs: &[Bit], driven: Option<Bit>) -> Bit {
        match self {
            GateKind::And => Bit::from(!inputs.is_empty() && inputs.iter().all(|b| b.is_one())),
            GateKind::Or => Bit::from(inputs.iter().any(|b| b.is_one())),
            GateKind::Xor => Bit::from(inputs.iter().filter(|b| b.is_one()).count() == 1),
            GateKind::Not => Bit::from(inputs.first() == Some(&Bit::Zero)),
            GateKind::Input => driven.unwrap_or_default(),
            GateKind::Output => inputs.first().copied().unwrap_or_default(),
        }
    }

    /// The editor's name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Not => "NOT",
            GateKind::Xor => "XOR",
            GateKind::Input => "INPUT",
            GateKind::Output => "OUTPUT",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| s.to_string())
    }
}
