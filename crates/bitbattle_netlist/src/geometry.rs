//! Editor geometry used to derive connector points from a gate placement.
//!
//! Only connectivity depends on this: a gate's input and output connectors
//! are its footprint offsets, rotated about the footprint centre. Rotations
//! are limited to quarter turns so every derived point stays on the grid.

use crate::error::NetlistError;
use crate::kind::GateKind;
use crate::point::Point;

/// Edge length of one grid cell.
pub const GRID_SIZE: i32 = 20;

/// The editor footprint of a gate kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    /// Edge length in grid cells.
    pub size: i32,
    /// Input connector offsets from the gate's top-left corner, in slot order.
    pub inputs: &'static [(i32, i32)],
    /// Output connector offset, if the kind has one.
    pub output: Option<(i32, i32)>,
}

const WIDE_INPUTS: [(i32, i32); 3] = [(0, 10), (0, 30), (0, 50)];
const NARROW_INPUTS: [(i32, i32); 1] = [(0, 10)];

/// Returns the footprint of a gate kind.
pub fn footprint(kind: GateKind) -> Footprint {
    match kind {
        GateKind::And | GateKind::Or | GateKind::Xor => Footprint {
            size: 3,
            inputs: &WIDE_INPUTS,
            output: Some((60, 30)),
        },
        GateKind::Not => Footprint {
            size: 1,
            inputs: &NARROW_INPUTS,
            output: Some((20, 10)),
        },
        GateKind::Input => Footprint {
            size: 1,
            inputs: &[],
            output: Some((20, 10)),
        },
        GateKind::Output => Footprint {
            size: 1,
            inputs: &NARROW_INPUTS,
            output: None,
        },
    }
}

/// Derives the connector points of a gate placed at `position`.
///
/// A variable-arity gate of `arity` slots uses the first `arity` input
/// offsets of its footprint. Returns the input points in slot order and the
/// output point, if any.
pub fn connectors(
    kind: GateKind,
    position: Point,
    rotation: u16,
    arity: usize,
) -> Result<(Vec<Point>, Option<Point>), NetlistError> {
    let fp = footprint(kind);
    if !kind.accepts_arity(arity) || arity > fp.inputs.len() {
        return Err(NetlistError::InvalidArity { kind, slots: arity });
    }
    let turns = quarter_turns(rotation)?;
    let half = GRID_SIZE * fp.size / 2;
    let centre = position.offset(half, half);
    let place = |(dx, dy): (i32, i32)| rotate(position.offset(dx, dy), centre, turns);

    let inputs = fp.inputs[..arity].iter().copied().map(place).collect();
    let output = fp.output.map(place);
    Ok((inputs, output))
}

fn quarter_turns(rotation: u16) -> Result<u8, NetlistError> {
    match rotation {
        0 | 360 => Ok(0),
        90 => Ok(1),
        180 => Ok(2),
        270 => Ok(3),
        other => Err(NetlistError::Geometry { rotation: other }),
    }
}

/// Rotates `p` clockwise on screen (y grows downward) about `centre`.
fn rotate(p: Point, centre: Point, turns: u8) -> Point {
    let dx = p.x - centre.x;
    let dy = p.y - centre.y;
    let (rx, ry) = match turns {
        0 => (dx, dy),
        1 => (-dy, dx),
        2 => (-dx, -dy),
        _ => (dy, -dx),
    };
    Point::new(centre.x + rx, centre.y + ry)
}
