//! Control panel: spawn rate and gravity buttons
//!
//! Both parameters have a floor of 1 and no ceiling. Requests below the floor
//! are silent no-ops.

use super::state::SimState;
use crate::consts::{MIN_GRAVITY, MIN_SPAWN_RATE};

/// The four buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    SpawnRateDown,
    SpawnRateUp,
    GravityDown,
    GravityUp,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::SpawnRateDown,
        Control::SpawnRateUp,
        Control::GravityDown,
        Control::GravityUp,
    ];

    /// DOM id of the button
    pub fn element_id(&self) -> &'static str {
        match self {
            Control::SpawnRateDown => "decreaseShapesPerSecond",
            Control::SpawnRateUp => "increaseShapesPerSecond",
            Control::GravityDown => "decreaseGravity",
            Control::GravityUp => "increaseGravity",
        }
    }
}

/// What a button press did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlOutcome {
    /// A parameter changed (and the readout was refreshed)
    pub changed: bool,
    /// The spawn task was replaced and the host timer must follow
    pub reschedule: bool,
}

/// Apply a button press at time `now_ms`
pub fn apply(state: &mut SimState, control: Control, now_ms: f64) -> ControlOutcome {
    let changed = match control {
        Control::SpawnRateDown if state.spawn_rate > MIN_SPAWN_RATE => {
            state.spawn_rate -= 1;
            true
        }
        Control::SpawnRateUp => {
            state.spawn_rate += 1;
            true
        }
        Control::GravityDown if state.gravity > MIN_GRAVITY => {
            state.gravity -= 1;
            true
        }
        Control::GravityUp => {
            state.gravity += 1;
            true
        }
        _ => false,
    };

    if !changed {
        return ControlOutcome::default();
    }

    let reschedule = matches!(control, Control::SpawnRateDown | Control::SpawnRateUp);
    if reschedule {
        state.schedule.reset(state.spawn_rate, now_ms);
    }
    state.refresh_readout();

    log::info!(
        "{:?}: spawn rate {}/s, gravity {} px/frame",
        control,
        state.spawn_rate,
        state.gravity
    );
    ControlOutcome {
        changed,
        reschedule,
    }
}
