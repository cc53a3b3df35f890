//! Tessellation of shape paths into triangle lists
//!
//! Output positions are in canvas pixels; `RenderState` maps them to NDC.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::consts::CURVE_SEGMENTS;
use crate::sim::{Rgb, Shape, ShapePath, SimState};

/// sRGB channel (0-1) to linear, for sRGB render targets
#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Fill colour as the GPU expects it
pub fn fill_color(color: Rgb, linear: bool) -> [f32; 4] {
    let rgba = color.to_rgba();
    if linear {
        [
            srgb_to_linear(rgba[0]),
            srgb_to_linear(rgba[1]),
            srgb_to_linear(rgba[2]),
            rgba[3],
        ]
    } else {
        rgba
    }
}

/// Generate vertices for a filled ellipse (triangle fan from the centre)
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), color, segments)
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(origin: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (origin.x, origin.y);
    let (x1, y1) = (origin.x + size.x, origin.y + size.y);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a closed polygon (concave allowed) by ear clipping
pub fn polygon(points: &[Vec2], offset: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    // An explicit closing vertex is redundant for ear clipping
    let points = match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 && first == last => {
            &points[..points.len() - 1]
        }
        _ => points,
    };
    if points.len() < 3 {
        return Vec::new();
    }

    let flat: Vec<f32> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    let indices = match earcutr::earcut(&flat, &[], 2) {
        Ok(indices) => indices,
        Err(e) => {
            log::warn!("Polygon tessellation failed: {:?}", e);
            return Vec::new();
        }
    };

    indices
        .into_iter()
        .map(|i| {
            let p = points[i] + offset;
            Vertex::new(p.x, p.y, color)
        })
        .collect()
}

/// Vertices for one shape in canvas space
pub fn shape(shape: &Shape, linear: bool) -> Vec<Vertex> {
    let color = fill_color(shape.color, linear);
    match &shape.path {
        ShapePath::Polygon(points) => polygon(points, shape.pos, color),
        ShapePath::Rect { size } => rect(shape.pos, *size, color),
        ShapePath::Circle { center, radius } => {
            circle(shape.pos + *center, *radius, color, CURVE_SEGMENTS)
        }
        ShapePath::Ellipse { center, radii } => {
            ellipse(shape.pos + *center, *radii, color, CURVE_SEGMENTS)
        }
    }
}

/// Vertices for the whole display list, bottom to top
pub fn scene(state: &SimState, linear: bool) -> Vec<Vertex> {
    state
        .displayed()
        .flat_map(|s| shape(s, linear))
        .collect()
}
