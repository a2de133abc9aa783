//! Core domain: rectangle helpers shared by collision and hit detection.

use bevy::prelude::*;

/// Strict AABB overlap. Touching edges do not count, and a zero-area
/// rectangle never overlaps anything.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.max.x > b.min.x && a.min.x < b.max.x && a.max.y > b.min.y && a.min.y < b.max.y
}
