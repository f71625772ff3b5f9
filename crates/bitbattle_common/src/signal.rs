//! Display state of a wire after a propagation pass.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bit::Bit;

/// The state a wire shows to the editor.
///
/// `Off` is also the state of every wire that no driven INPUT reached.
/// `Invalid` marks a wire that reached a gate input already bound to another
/// wire; its value was discarded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalState {
    /// Carrying 0, or not reached.
    #[default]
    Off,
    /// Carrying 1.
    On,
    /// Value discarded at a contended gate input.
    Invalid,
}

impl SignalState {
    /// Returns the bit this state carries, if it carries one.
    pub fn bit(self) -> Option<Bit> {
        match self {
            SignalState::Off => Some(Bit::Zero),
            SignalState::On => Some(Bit::One),
            SignalState::Invalid => None,
        }
    }
}

impl From<Bit> for SignalState {
    fn from(b: Bit) -> Self {
        match b {
            Bit::Zero => SignalState::Off,
            Bit::One => SignalState::On,
        }
    }
}

impl fmt::Display for SignalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalState::Off => write!(f, "off"),
            SignalState::On => write!(f, "on"),
            SignalState::Invalid => write!(f, "invalid"),
        }
    }
}
