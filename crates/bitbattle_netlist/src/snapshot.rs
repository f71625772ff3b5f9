//! The JSON snapshot exchanged with the editor and the submission endpoint.
//!
//! A snapshot carries topology only. Transient simulation fields the editor
//! may attach to its objects (`inputStates`, `state`, `visited`, `path`) are
//! ignored on input and never written.

use bitbattle_common::Label;
use serde::{Deserialize, Serialize};

use crate::error::NetlistError;
use crate::kind::GateKind;
use crate::netlist::{Gate, Netlist, Wire};
use crate::point::Point;

/// Exclusive bound on the magnitude of any coordinate in a payload.
pub const COORD_LIMIT: i32 = 100_000;
/// Largest rotation, in degrees, a payload may carry.
pub const MAX_ROTATION: u16 = 360;

/// A complete `{gates, wires}` circuit snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetlistSnapshot {
    /// Placed gates in insertion order.
    #[serde(default)]
    pub gates: Vec<GateRecord>,
    /// Placed wires in insertion order.
    #[serde(default)]
    pub wires: Vec<WireRecord>,
}

/// One placed gate as the editor serialises it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRecord {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Gate kind.
    #[serde(rename = "type")]
    pub kind: GateKind,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: u16,
    /// Truth-table letter, or the editor's numeric tag for interior gates.
    #[serde(default)]
    pub id: Option<GateTag>,
    /// Input connector points in slot order.
    #[serde(default)]
    pub inputs: Vec<Point>,
    /// Output connector point.
    #[serde(default)]
    pub output: Option<OutputPoint>,
}

/// The editor's `id` field: a letter for pins, a number for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GateTag {
    /// A truth-table letter.
    Letter(String),
    /// A numeric tag with no simulation meaning.
    Index(u32),
}

/// The editor's `output` field, which is `{}` for gates without an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputPoint {
    /// A connector point.
    At(Point),
    /// An empty object.
    Unset {},
}

/// One placed wire segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRecord {
    /// Start x.
    pub start_x: i32,
    /// Start y.
    pub start_y: i32,
    /// End x.
    pub end_x: i32,
    /// End y.
    pub end_y: i32,
}

impl NetlistSnapshot {
    /// Parses a snapshot from JSON text.
    pub fn from_json(text: &str) -> Result<Self, NetlistError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Renders the snapshot as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, NetlistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates every field and rebuilds the netlist in record order.
    pub fn into_netlist(self) -> Result<Netlist, NetlistError> {
        let mut netlist = Netlist::new();
        for record in self.gates {
            netlist.add_gate(record.into_gate()?)?;
        }
        for record in self.wires {
            netlist.add_wire(record.into_wire()?);
        }
        Ok(netlist)
    }
}

impl From<&Netlist> for NetlistSnapshot {
    fn from(netlist: &Netlist) -> Self {
        Self {
            gates: netlist.gates().map(|(_, g)| GateRecord::from(g)).collect(),
            wires: netlist.wires().map(|(_, w)| WireRecord::from(w)).collect(),
        }
    }
}

impl GateRecord {
    /// Checks the record and converts it to a [`Gate`].
    pub fn into_gate(self) -> Result<Gate, NetlistError> {
        check_coord(self.x)?;
        check_coord(self.y)?;
        check_rotation(self.rotation)?;
        for p in &self.inputs {
            check_point(*p)?;
        }
        let output = match self.output {
            Some(OutputPoint::At(p)) => Some(check_point(p)?),
            Some(OutputPoint::Unset {}) | None => None,
        };
        let label = match self.id {
            Some(tag) => tag.into_label()?,
            None => None,
        };
        let mut gate = Gate::new(self.kind, self.inputs, output);
        gate.position = Point::new(self.x, self.y);
        gate.rotation = self.rotation;
        gate.label = label;
        Ok(gate)
    }
}

impl From<&Gate> for GateRecord {
    fn from(gate: &Gate) -> Self {
        Self {
            x: gate.position.x,
            y: gate.position.y,
            kind: gate.kind,
            rotation: gate.rotation,
            id: gate.label.map(GateTag::from),
            inputs: gate.inputs.clone(),
            output: Some(gate.output.map_or(OutputPoint::Unset {}, OutputPoint::At)),
        }
    }
}

impl GateTag {
    /// The truth-table label this tag names, if it is a letter.
    ///
    /// Numeric tags are accepted below [`COORD_LIMIT`] and carry no label.
    pub fn into_label(self) -> Result<Option<Label>, NetlistError> {
        match self {
            GateTag::Letter(s) => s
                .parse::<Label>()
                .map(Some)
                .map_err(|_| invalid("id", s)),
            GateTag::Index(n) if n < COORD_LIMIT as u32 => Ok(None),
            GateTag::Index(n) => Err(invalid("id", n.to_string())),
        }
    }
}

impl From<Label> for GateTag {
    fn from(label: Label) -> Self {
        GateTag::Letter(label.to_string())
    }
}

impl WireRecord {
    /// Checks the record and converts it to a [`Wire`].
    pub fn into_wire(self) -> Result<Wire, NetlistError> {
        let start = check_point(Point::new(self.start_x, self.start_y))?;
        let end = check_point(Point::new(self.end_x, self.end_y))?;
        Ok(Wire::new(start, end))
    }
}

impl From<&Wire> for WireRecord {
    fn from(wire: &Wire) -> Self {
        Self {
            start_x: wire.start.x,
            start_y: wire.start.y,
            end_x: wire.end.x,
            end_y: wire.end.y,
        }
    }
}

fn invalid(field: &'static str, value: impl Into<String>) -> NetlistError {
    NetlistError::InvalidField {
        field,
        value: value.into(),
    }
}

pub(crate) fn check_coord(v: i32) -> Result<i32, NetlistError> {
    if v.unsigned_abs() < COORD_LIMIT as u32 {
        Ok(v)
    } else {
        Err(invalid("coordinate", v.to_string()))
    }
}

pub(crate) fn check_point(p: Point) -> Result<Point, NetlistError> {
    check_coord(p.x)?;
    check_coord(p.y)?;
    Ok(p)
}

pub(crate) fn check_rotation(rotation: u16) -> Result<u16, NetlistError> {
    if rotation <= MAX_ROTATION {
        Ok(rotation)
    } else {
        Err(invalid("rotation", rotation.to_string()))
    }
}
