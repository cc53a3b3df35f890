//! Per-frame update
//!
//! Driven once per rendered frame. Integration is frame-count based: a shape
//! moves `gravity` pixels per frame regardless of elapsed time.

use super::shape::ShapeId;
use super::state::SimState;
use crate::config::FallPolicy;
use crate::consts::CANVAS_HEIGHT;

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Shapes taken off the display list this frame
    pub fallen: Vec<ShapeId>,
}

/// Advance every live shape by one frame
///
/// A shape whose y exceeds the canvas height leaves the display list; under
/// `FallPolicy::Prune` it also leaves the live list. The readout is not
/// refreshed here.
pub fn frame(state: &mut SimState) -> FrameReport {
    state.frame_ticks += 1;
    let gravity = state.gravity as f32;

    let mut report = FrameReport::default();
    for shape in state.shapes.iter_mut() {
        shape.pos.y += gravity;
        if shape.pos.y > CANVAS_HEIGHT && state.display.remove(shape.id) {
            report.fallen.push(shape.id);
        }
    }

    if state.fall_policy == FallPolicy::Prune && !report.fallen.is_empty() {
        state
            .shapes
            .retain(|s| !report.fallen.contains(&s.id));
    }

    if !report.fallen.is_empty() {
        log::debug!(
            "Frame {}: {} shape(s) fell off ({:?})",
            state.frame_ticks,
            report.fallen.len(),
            state.fall_policy
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn state(policy: FallPolicy) -> SimState {
        let config = SimConfig {
            fall_policy: policy,
            ..Default::default()
        };
        SimState::new(&config, 99, 0.0)
    }

    #[test]
    fn test_example_scenario() {
        let mut state = state(FallPolicy::Prune);
        assert_eq!(state.run_due_spawns(1000.0), 1);
        assert_eq!(state.readout().shape_count, 1);
        let id = state.shapes[0].id;
        assert_eq!(state.shapes[0].pos.y, -100.0);

        frame(&mut state);
        assert_eq!(state.shape(id).unwrap().pos.y, -95.0);

        for _ in 1..140 {
            let report = frame(&mut state);
            assert!(report.fallen.is_empty());
        }
        // y == 600 is still on the canvas
        assert_eq!(state.shape(id).unwrap().pos.y, 600.0);
        assert!(state.display.contains(id));

        let report = frame(&mut state);
        assert_eq!(report.fallen, vec![id]);
        assert!(!state.display.contains(id));
        assert!(state.shape(id).is_none());
    }

    #[test]
    fn test_fall_does_not_refresh_readout() {
        let mut state = state(FallPolicy::Prune);
        state.spawn_at(glam::Vec2::new(0.0, 598.0));
        assert_eq!(state.readout().shape_count, 1);
        frame(&mut state);
        assert!(state.shapes.is_empty());
        assert_eq!(state.readout().shape_count, 1);
        assert_eq!(state.stats().shape_count, 0);
    }

    #[test]
    fn test_legacy_policy_keeps_live_shape() {
        let mut state = state(FallPolicy::Legacy);
        let id = state.spawn_at(glam::Vec2::new(0.0, 598.0));
        let report = frame(&mut state);
        assert_eq!(report.fallen, vec![id]);
        assert!(!state.display.contains(id));
        assert!(state.shape(id).is_some());

        // Still falling, still counted, but never reported twice
        let report = frame(&mut state);
        assert!(report.fallen.is_empty());
        assert_eq!(state.shape(id).unwrap().pos.y, 608.0);
        assert_eq!(state.stats().shape_count, 1);
        assert_eq!(state.displayed().count(), 0);
    }

    #[test]
    fn test_gravity_applies_per_frame() {
        let mut state = state(FallPolicy::Prune);
        state.gravity = 12;
        let id = state.spawn_at(glam::Vec2::new(0.0, 0.0));
        for _ in 0..10 {
            frame(&mut state);
        }
        assert_eq!(state.shape(id).unwrap().pos.y, 120.0);
        assert_eq!(state.frame_ticks, 10);
    }
}
