//! Single-letter identifiers shared by truth-table columns and INPUT/OUTPUT gates.
//!
//! Letters up to and including [`OUTPUT_SPLIT`] (`A`–`M`) name inputs; letters
//! after it (`N`–`Z`) name outputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The last letter that still names an input. Any letter whose code point is
/// greater than this one (77) names an output.
pub const OUTPUT_SPLIT: char = 'M';

/// Whether a label drives an INPUT gate or is checked at an OUTPUT gate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LabelRole {
    /// `A`–`M`: drives INPUT gates.
    Input,
    /// `N`–`Z`: checked at OUTPUT gates.
    Output,
}

/// Errors produced when parsing a [`Label`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    /// The string was not exactly one character long.
    #[error("label must be a single letter, found '{0}'")]
    NotSingleChar(String),
    /// The character is not an uppercase ASCII letter.
    #[error("label must be an uppercase letter A-Z, found '{0}'")]
    NotUppercase(char),
}

/// An uppercase ASCII letter identifying a truth-table column.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label(char);

impl Label {
    /// Creates a label from a character, rejecting anything outside `A`–`Z`.
    pub fn new(c: char) -> Result<Self, LabelError> {
        if c.is_ascii_uppercase() {
            Ok(Self(c))
        } else {
            Err(LabelError::NotUppercase(c))
        }
    }

    /// Returns the `index`-th letter of the alphabet (`0` is `A`).
    pub fn nth(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .filter(|i| *i < 26)
            .map(|i| Self(char::from(b'A' + i)))
    }

    /// Returns the underlying character.
    pub fn as_char(self) -> char {
        self.0
    }

    /// Returns whether this label names an input or an output.
    pub fn role(self) -> LabelRole {
        if self.0 > OUTPUT_SPLIT {
            LabelRole::Output
        } else {
            LabelRole::Input
        }
    }

    /// Returns `true` if this label names an output column.
    pub fn is_output(self) -> bool {
        self.role() == LabelRole::Output
    }
}

impl FromStr for Label {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => Err(LabelError::NotSingleChar(s.to_string())),
        }
    }
}

impl TryFrom<String> for Label {
    type Error = LabelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Label> for String {
    fn from(l: Label) -> Self {
        l.0.to_string()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_point_is_m() {
        assert_eq!(Label::new('A').unwrap().role(), LabelRole::Input);
        assert_eq!(Label::new('M').unwrap().role(), LabelRole::Input);
        assert_eq!(Label::new('N').unwrap().role(), LabelRole::Output);
        assert_eq!(Label::new('Z').unwrap().role(), LabelRole::Output);
    }

    #[test]
    fn rejects_lowercase_and_digits() {
        assert_eq!(Label::new('a'), Err(LabelError::NotUppercase('a')));
        assert_eq!(Label::new('1'), Err(LabelError::NotUppercase('1')));
    }

    #[test]
    fn parse_single_letter() {
        assert_eq!("Q".parse::<Label>().unwrap().as_char(), 'Q');
        assert!(matches!(
            "AB".parse::<Label>(),
            Err(LabelError::NotSingleChar(_))
        ));
        assert!("".parse::<Label>().is_err());
    }

    #[test]
    fn nth_letter() {
        assert_eq!(Label::nth(0).unwrap().as_char(), 'A');
        assert_eq!(Label::nth(25).unwrap().as_char(), 'Z');
        assert!(Label::nth(26).is_none());
    }

    #[test]
    fn ordering_follows_alphabet() {
        let a = Label::new('A').unwrap();
        let z = Label::new('Z').unwrap();
        assert!(a < z);
    }

    #[test]
    fn serde_as_string() {
        let l = Label::new('N').unwrap();
        assert_eq!(serde_json::to_string(&l).unwrap(), "\"N\"");
        let back: Label = serde_json::from_str("\"N\"").unwrap();
        assert_eq!(back, l);
        assert!(serde_json::from_str::<Label>("\"n\"").is_err());
    }
}
