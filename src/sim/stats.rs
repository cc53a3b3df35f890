//! Stats readout
//!
//! Recomputed on demand only: after a spawn, a click removal or a control
//! change. Falling off the canvas does not refresh it.

use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// DOM element ids of the four readouts
pub mod element_ids {
    pub const SHAPE_COUNT: &str = "shapeCount";
    pub const SURFACE_AREA: &str = "surfaceArea";
    pub const SPAWN_RATE: &str = "shapesPerSecond";
    pub const GRAVITY: &str = "gravity";
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub shape_count: usize,
    pub surface_area: f64,
    pub spawn_rate: u32,
    pub gravity: u32,
}

impl Stats {
    pub fn compute(shapes: &[Shape], spawn_rate: u32, gravity: u32) -> Self {
        Self {
            shape_count: shapes.len(),
            // Float `sum()` of nothing is -0.0, which formats as "-0.00"
            surface_area: shapes.iter().fold(0.0, |acc, s| acc + s.surface_area()),
            spawn_rate,
            gravity,
        }
    }

    /// Area rounded to two decimals
    pub fn surface_area_text(&self) -> String {
        format!("{:.2}", self.surface_area)
    }

    /// (element id, text) pairs for the HUD
    pub fn fields(&self) -> [(&'static str, String); 4] {
        [
            (element_ids::SHAPE_COUNT, self.shape_count.to_string()),
            (element_ids::SURFACE_AREA, self.surface_area_text()),
            (element_ids::SPAWN_RATE, self.spawn_rate.to_string()),
            (element_ids::GRAVITY, self.gravity.to_string()),
        ]
    }
}
