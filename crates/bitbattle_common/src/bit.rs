//! Two-state binary values carried by wires and gate input slots.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Not;

/// A resolved binary signal value.
///
/// Serialized as the integers `0` and `1`, which is how truth tables and
/// editor payloads encode values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Bit {
    /// Logic low.
    #[default]
    Zero = 0,
    /// Logic high.
    One = 1,
}

impl Bit {
    /// Returns `true` for [`Bit::One`].
    pub fn is_one(self) -> bool {
        self == Bit::One
    }

    /// Converts a character to a [`Bit`]. Accepts `'0'` and `'1'`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        if b {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl From<Bit> for bool {
    fn from(b: Bit) -> Self {
        b.is_one()
    }
}

impl From<Bit> for u8 {
    fn from(b: Bit) -> Self {
        b as u8
    }
}

impl TryFrom<u8> for Bit {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            other => Err(format!("expected 0 or 1, found {other}")),
        }
    }
}

impl Not for Bit {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}
