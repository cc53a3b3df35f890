//! Canvas clicks
//!
//! A click is seen twice, the way a scene graph bubbles it: the shape under the
//! pointer (path-accurate, topmost on the display list) removes itself, and the
//! stage checks the live list's bounding boxes to decide whether to spawn.
//! The stage check sees the list as it was when the click arrived.

use glam::Vec2;

use super::shape::ShapeId;
use super::state::SimState;

/// Result of a canvas click
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Shape that was clicked directly and removed
    pub removed: Option<ShapeId>,
    /// Shape spawned because no bounding box was hit
    pub spawned: Option<ShapeId>,
}

/// Topmost live shape whose bounding box contains `point`
///
/// Walks the live list from the end, so the most recently spawned shape wins.
pub fn stage_hit(state: &SimState, point: Vec2) -> Option<ShapeId> {
    state
        .shapes
        .iter()
        .rev()
        .find(|s| s.bounds_contains(point))
        .map(|s| s.id)
}

/// Handle a click at canvas coordinates `point`
pub fn click(state: &mut SimState, point: Vec2) -> ClickOutcome {
    let boxed = stage_hit(state, point);

    let removed = match state.display.topmost_hit(point, &state.shapes) {
        Some(id) if state.remove(id) => Some(id),
        _ => None,
    };

    let spawned = match boxed {
        Some(_) => None,
        None => Some(state.spawn_at(point)),
    };

    ClickOutcome { removed, spawned }
}
