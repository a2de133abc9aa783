//! Movement domain: axis-separated AABB resolution against the tile grid.
//!
//! Each pass applies a signed displacement on one axis, then pushes the box
//! out of every overlapping solid cell along that axis. Callers run the
//! horizontal pass before the vertical one.

use std::ops::RangeInclusive;

use crate::core::overlaps;
use crate::level::{Solidity, TileGrid};
use crate::movement::{Body, Kinematics};

/// Upper bound on cells visited per axis in a single pass.
pub const MAX_SCAN_CELLS: i32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalContact {
    Free,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalContact {
    None,
    Ceiling,
    Landed,
}

/// Cell indices of `range`, nearest-first for the given direction, capped at
/// [`MAX_SCAN_CELLS`].
fn scan_order(range: RangeInclusive<i32>, descending: bool) -> impl Iterator<Item = i32> + Clone {
    let (lo, hi) = (*range.start(), *range.end());
    let count = (hi as i64 - lo as i64 + 1).clamp(0, MAX_SCAN_CELLS as i64) as i32;
    (0..count).map(move |i| if descending { hi - i } else { lo + i })
}

pub fn resolve_horizontal(
    grid: &TileGrid,
    solidity: Solidity,
    body: &mut Body,
    dx: f32,
) -> HorizontalContact {
    if dx == 0.0 || !dx.is_finite() {
        return HorizontalContact::Free;
    }
    body.position.x += dx;
    if body.is_degenerate() {
        return HorizontalContact::Free;
    }

    let moving_left = dx < 0.0;
    let (cols, rows) = grid.cell_span(body.rect());
    let mut contact = HorizontalContact::Free;

    for row in scan_order(rows, false) {
        for col in scan_order(cols.clone(), moving_left) {
            if !grid.is_solid(solidity, col, row) {
                continue;
            }
            let cell = grid.cell_rect(col, row);
            if !overlaps(body.rect(), cell) {
                continue;
            }
            body.position.x = if moving_left {
                cell.max.x
            } else {
                cell.min.x - body.size.x
            };
            contact = HorizontalContact::Blocked;
        }
    }

    contact
}

/// Vertical pass. Clears `on_ground` whenever the box actually moves, and
/// sets it again only on a landing.
pub fn resolve_vertical(
    grid: &TileGrid,
    solidity: Solidity,
    body: &mut Body,
    kinematics: &mut Kinematics,
    dy: f32,
) -> VerticalContact {
    if dy == 0.0 || !dy.is_finite() {
        return VerticalContact::None;
    }
    body.position.y += dy;
    kinematics.on_ground = false;
    if body.is_degenerate() {
        return VerticalContact::None;
    }

    let falling = dy < 0.0;
    let (cols, rows) = grid.cell_span(body.rect());

    for row in scan_order(rows, falling) {
        for col in scan_order(cols.clone(), false) {
            if !grid.is_solid(solidity, col, row) {
                continue;
            }
            let cell = grid.cell_rect(col, row);
            if !overlaps(body.rect(), cell) {
                continue;
            }
            kinematics.velocity_y = 0.0;
            if falling {
                body.position.y = cell.max.y;
                kinematics.on_ground = true;
                return VerticalContact::Landed;
            }
            body.position.y = cell.min.y - body.size.y;
            return VerticalContact::Ceiling;
        }
    }

    VerticalContact::None
}
