//! Deterministic simulation module
//!
//! All toy logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Frame-count integration (no delta time)
//! - Time only enters as explicit `now_ms` arguments
//! - No rendering or platform dependencies

pub mod controls;
pub mod display;
pub mod input;
pub mod schedule;
pub mod shape;
pub mod state;
pub mod stats;
pub mod tick;

pub use controls::{Control, ControlOutcome, apply as apply_control};
pub use display::DisplayList;
pub use input::{ClickOutcome, click, stage_hit};
pub use schedule::SpawnSchedule;
pub use shape::{Rgb, Shape, ShapeId, ShapeKind, ShapePath};
pub use state::SimState;
pub use stats::Stats;
pub use tick::{FrameReport, frame};
