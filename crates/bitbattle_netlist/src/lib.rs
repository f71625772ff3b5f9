//! The netlist model and gate catalog for the bitbattle circuit sandbox.
//!
//! This crate defines [`Netlist`], [`Gate`] and [`Wire`], the [`GateKind`]
//! catalog with its evaluation function, the [`ConnectorIndex`] that maps
//! wire endpoints to gate connectors by coordinate, and the editor-facing
//! payload formats ([`NetlistSnapshot`] and the compact [`archive`]).

#![warn(missing_docs)]

pub mod arena;
pub mod archive;
pub mod builder;
pub mod connectors;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod kind;
pub mod netlist;
pub mod point;
pub mod snapshot;

pub use arena::{Arena, ArenaId};
pub use builder::NetlistBuilder;
pub use connectors::{ConnectorIndex, InputConnector};
pub use error::NetlistError;
pub use ids::{GateId, WireId};
pub use kind::{GateKind, MAX_FAN_IN};
pub use netlist::{Gate, Netlist, Wire};
pub use point::Point;
pub use snapshot::NetlistSnapshot;
