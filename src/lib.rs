//! Shape Fall - clickable vector shapes raining down a canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, clicks, stats)
//! - `renderer`: WebGPU rendering of filled shape paths
//! - `config`: Startup configuration (defaults, JSON block, URL query)

pub mod config;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, FallPolicy, SimConfig};

use glam::Vec2;

/// Canvas and simulation constants
pub mod consts {
    /// Canvas dimensions (pixels, origin top-left, y down)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Timer-spawned shapes start this far above the canvas
    pub const SPAWN_Y: f32 = -100.0;
    /// Side of the local box every built-in path is laid out in
    pub const SHAPE_EXTENT: f32 = 100.0;

    /// Parameter defaults and floors
    pub const DEFAULT_SPAWN_RATE: u32 = 1;
    pub const DEFAULT_GRAVITY: u32 = 5;
    pub const MIN_SPAWN_RATE: u32 = 1;
    pub const MIN_GRAVITY: u32 = 1;

    /// Irregular polygon vertex count range (inclusive)
    pub const IRREGULAR_MIN_POINTS: usize = 3;
    pub const IRREGULAR_MAX_POINTS: usize = 8;

    /// Star geometry
    pub const STAR_POINTS: u32 = 5;
    pub const STAR_OUTER_RADIUS: f32 = 50.0;
    pub const STAR_INNER_RADIUS: f32 = 25.0;

    /// Triangle fan resolution for circles and ellipses
    pub const CURVE_SEGMENTS: u32 = 48;
}

/// Convert polar (r, theta) around `center` to cartesian (x, y)
#[inline]
pub fn polar_point(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Even-odd point-in-polygon test (polygon is implicitly closed)
pub fn polygon_contains(points: &[Vec2], p: Vec2) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_contains_square() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert!(polygon_contains(&square, Vec2::new(5.0, 5.0)));
        assert!(!polygon_contains(&square, Vec2::new(15.0, 5.0)));
        assert!(!polygon_contains(&square, Vec2::new(5.0, -1.0)));
    }

    #[test]
    fn test_polygon_contains_degenerate() {
        let line = [Vec2::ZERO, Vec2::new(10.0, 10.0)];
        assert!(!polygon_contains(&line, Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_polar_point() {
        let p = polar_point(Vec2::new(50.0, 50.0), 50.0, std::f32::consts::PI * 1.5);
        assert!((p.x - 50.0).abs() < 1e-4);
        assert!(p.y.abs() < 1e-4);
    }
}
