//! Error types for netlist construction, validation and payload decoding.

use crate::ids::{GateId, WireId};
use crate::kind::GateKind;
use crate::point::Point;

/// Errors that can occur while building, validating or decoding a netlist.
#[derive(Debug, thiserror::Error)]
pub enum NetlistError {
    /// A gate declared a number of input slots its kind does not allow.
    #[error("{kind} gate cannot have {slots} input slot(s)")]
    InvalidArity {
        /// The gate kind.
        kind: GateKind,
        /// The number of input slots declared.
        slots: usize,
    },

    /// A gate ID does not refer to a placed gate.
    #[error("gate {0} is not placed in this netlist")]
    UnknownGate(GateId),

    /// A wire ID does not refer to a placed wire.
    #[error("wire {0} is not placed in this netlist")]
    UnknownWire(WireId),

    /// More than one wire is attached to a single gate input connector.
    #[error("gate {gate} input {slot} at {point} has more than one input wire")]
    ContendedInput {
        /// The gate owning the connector.
        gate: GateId,
        /// The input slot index.
        slot: usize,
        /// The connector position.
        point: Point,
    },

    /// An editor payload field holds a value outside its allowed domain.
    #[error("invalid circuit data: '{value}' is not a valid {field}")]
    InvalidField {
        /// The payload field name.
        field: &'static str,
        /// The offending value, rendered for display.
        value: String,
    },

    /// Connector geometry cannot be derived for the requested rotation.
    #[error("cannot derive connectors for rotation {rotation}; only quarter turns are supported")]
    Geometry {
        /// The rotation in degrees.
        rotation: u16,
    },

    /// A payload could not be encoded or decoded as JSON.
    #[error("circuit payload error: {0}")]
    Json(#[from] serde_json::Error),

    /// A compressed archive could not be read or written.
    #[error("circuit archive I/O error: {0}")]
    Io(#[from] std::io::Error),
}
