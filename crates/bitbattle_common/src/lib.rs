//! Shared foundational types used across the bitbattle circuit sandbox.
//!
//! This crate provides the binary signal value carried by wires, the three-way
//! display state of a wire, and the single-letter labels that tie truth-table
//! columns to INPUT and OUTPUT gates.

#![warn(missing_docs)]

pub mod bit;
pub mod label;
pub mod signal;

pub use bit::Bit;
pub use label::{Label, LabelError, LabelRole, OUTPUT_SPLIT};
pub use signal::SignalState;
