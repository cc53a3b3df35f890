//! Shape kinds, colours and filled paths
//!
//! Every built-in path is laid out in a 100×100 local box with its origin at the
//! shape's position (top-left, y down).

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{polar_point, polygon_contains};

/// Shape identifier (monotonic, never reused)
pub type ShapeId = u32;

/// Shape variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Triangle,
    Square,
    Pentagon,
    Hexagon,
    Circle,
    Ellipse,
    Star,
    /// Random 3-8 vertex outline; never picked at random
    Irregular,
}

impl ShapeKind {
    /// Kinds the random spawner picks from
    pub const RANDOM_POOL: [ShapeKind; 7] = [
        ShapeKind::Triangle,
        ShapeKind::Square,
        ShapeKind::Pentagon,
        ShapeKind::Hexagon,
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Star,
    ];

    /// Uniform pick over the named kinds
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::RANDOM_POOL[rng.random_range(0..Self::RANDOM_POOL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Triangle => "triangle",
            ShapeKind::Square => "square",
            ShapeKind::Pentagon => "pentagon",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Star => "star",
            ShapeKind::Irregular => "irregular",
        }
    }
}

/// 24-bit fill colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x000000);
    pub const WHITE: Rgb = Rgb(0xFFFFFF);

    pub fn random(rng: &mut impl Rng) -> Self {
        Rgb(rng.random_range(0..=0xFF_FFFF))
    }

    #[inline]
    pub fn channels(&self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }

    /// Opaque colour with channels in 0-1 (sRGB encoded)
    pub fn to_rgba(&self) -> [f32; 4] {
        let (r, g, b) = self.channels();
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub fn to_hex(&self) -> String {
        format!("#{:06X}", self.0 & 0xFF_FFFF)
    }
}

/// A filled path in local coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapePath {
    /// Closed outline (last vertex joins the first)
    Polygon(Vec<Vec2>),
    Rect { size: Vec2 },
    Circle { center: Vec2, radius: f32 },
    Ellipse { center: Vec2, radii: Vec2 },
}

const TRIANGLE: [[f32; 2]; 3] = [[0.0, 0.0], [50.0, 100.0], [100.0, 0.0]];
const PENTAGON: [[f32; 2]; 5] = [
    [50.0, 0.0],
    [100.0, 50.0],
    [75.0, 100.0],
    [25.0, 100.0],
    [0.0, 50.0],
];
const HEXAGON: [[f32; 2]; 6] = [
    [50.0, 0.0],
    [100.0, 30.0],
    [75.0, 100.0],
    [25.0, 100.0],
    [0.0, 30.0],
    [50.0, 0.0],
];

fn polygon(points: &[[f32; 2]]) -> ShapePath {
    ShapePath::Polygon(points.iter().map(|&p| Vec2::from(p)).collect())
}

impl ShapePath {
    /// Build the path for a kind (only `Irregular` consumes randomness)
    pub fn build(kind: ShapeKind, rng: &mut impl Rng) -> Self {
        let half = SHAPE_EXTENT / 2.0;
        match kind {
            ShapeKind::Triangle => polygon(&TRIANGLE),
            ShapeKind::Square => ShapePath::Rect {
                size: Vec2::splat(SHAPE_EXTENT),
            },
            ShapeKind::Pentagon => polygon(&PENTAGON),
            ShapeKind::Hexagon => polygon(&HEXAGON),
            ShapeKind::Circle => ShapePath::Circle {
                center: Vec2::splat(half),
                radius: half,
            },
            ShapeKind::Ellipse => ShapePath::Ellipse {
                center: Vec2::splat(half),
                radii: Vec2::new(50.0, 30.0),
            },
            ShapeKind::Star => Self::star(
                Vec2::splat(half),
                STAR_POINTS,
                STAR_OUTER_RADIUS,
                STAR_INNER_RADIUS,
            ),
            ShapeKind::Irregular => Self::irregular(rng),
        }
    }

    /// Alternating outer/inner vertices, step π/points, starting at 3π/2
    pub fn star(center: Vec2, points: u32, outer: f32, inner: f32) -> Self {
        let rotation = PI / 2.0 * 3.0;
        let step = PI / points as f32;

        let mut outline = Vec::with_capacity(points as usize * 2 + 1);
        outline.push(Vec2::new(center.x, center.y - outer));
        for i in 0..points {
            let i = i as f32;
            outline.push(polar_point(center, outer, rotation + step * i));
            outline.push(polar_point(center, inner, rotation + step * (i + 0.5)));
        }
        ShapePath::Polygon(outline)
    }

    /// 3-8 random vertices in the local box
    pub fn irregular(rng: &mut impl Rng) -> Self {
        let count = rng.random_range(IRREGULAR_MIN_POINTS..=IRREGULAR_MAX_POINTS);
        let outline = (0..count)
            .map(|_| {
                Vec2::new(
                    rng.random::<f32>() * SHAPE_EXTENT,
                    rng.random::<f32>() * SHAPE_EXTENT,
                )
            })
            .collect();
        ShapePath::Polygon(outline)
    }

    /// Axis-aligned local bounds (min, max)
    pub fn local_bounds(&self) -> (Vec2, Vec2) {
        match self {
            ShapePath::Polygon(points) => {
                if points.is_empty() {
                    return (Vec2::ZERO, Vec2::ZERO);
                }
                points
                    .iter()
                    .fold((Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)), |(lo, hi), &p| {
                        (lo.min(p), hi.max(p))
                    })
            }
            ShapePath::Rect { size } => (Vec2::ZERO, *size),
            ShapePath::Circle { center, radius } => {
                (*center - Vec2::splat(*radius), *center + Vec2::splat(*radius))
            }
            ShapePath::Ellipse { center, radii } => (*center - *radii, *center + *radii),
        }
    }

    /// Width and height of the local bounds
    pub fn size(&self) -> Vec2 {
        let (lo, hi) = self.local_bounds();
        hi - lo
    }

    /// Path-accurate containment of a local-space point
    pub fn contains(&self, p: Vec2) -> bool {
        match self {
            ShapePath::Polygon(points) => polygon_contains(points, p),
            ShapePath::Rect { size } => {
                p.x >= 0.0 && p.y >= 0.0 && p.x <= size.x && p.y <= size.y
            }
            ShapePath::Circle { center, radius } => p.distance_squared(*center) <= radius * radius,
            ShapePath::Ellipse { center, radii } => {
                let d = (p - *center) / *radii;
                d.length_squared() <= 1.0
            }
        }
    }
}

/// A live shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub color: Rgb,
    /// Position of the local origin in canvas space
    pub pos: Vec2,
    pub path: ShapePath,
    /// Bounding width/height of the path
    pub size: Vec2,
}

impl Shape {
    pub fn new(id: ShapeId, kind: ShapeKind, color: Rgb, path: ShapePath, pos: Vec2) -> Self {
        let size = path.size();
        Self {
            id,
            kind,
            color,
            pos,
            path,
            size,
        }
    }

    /// Inclusive containment in the box (x, y, width, height) anchored at `pos`
    pub fn bounds_contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x <= self.pos.x + self.size.x
            && point.y >= self.pos.y
            && point.y <= self.pos.y + self.size.y
    }

    /// Path-accurate hit test of a canvas-space point
    pub fn hit(&self, point: Vec2) -> bool {
        self.path.contains(point - self.pos)
    }

    /// Surface area used by the stats readout
    ///
    /// Circles and ellipses use their analytic area from the bounds; every
    /// other kind counts its full bounding box.
    pub fn surface_area(&self) -> f64 {
        let (w, h) = (self.size.x as f64, self.size.y as f64);
        match self.kind {
            ShapeKind::Circle => std::f64::consts::PI * (w / 2.0).powi(2),
            ShapeKind::Ellipse => std::f64::consts::PI * w * h / 4.0,
            _ => w * h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    fn shape(kind: ShapeKind) -> Shape {
        let path = ShapePath::build(kind, &mut rng());
        Shape::new(1, kind, Rgb::WHITE, path, Vec2::ZERO)
    }

    #[test]
    fn test_random_kind_never_irregular() {
        let mut rng = rng();
        for _ in 0..500 {
            assert_ne!(ShapeKind::random(&mut rng), ShapeKind::Irregular);
        }
    }

    #[test]
    fn test_random_kind_covers_pool() {
        let mut rng = rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            seen.insert(ShapeKind::random(&mut rng));
        }
        assert_eq!(seen.len(), ShapeKind::RANDOM_POOL.len());
    }

    #[test]
    fn test_rgb_channels() {
        let c = Rgb(0x12AB34);
        assert_eq!(c.channels(), (0x12, 0xAB, 0x34));
        assert_eq!(c.to_hex(), "#12AB34");
        assert_eq!(Rgb::WHITE.to_rgba(), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_fixed_sizes() {
        assert_eq!(shape(ShapeKind::Triangle).size, Vec2::new(100.0, 100.0));
        assert_eq!(shape(ShapeKind::Square).size, Vec2::new(100.0, 100.0));
        assert_eq!(shape(ShapeKind::Pentagon).size, Vec2::new(100.0, 100.0));
        assert_eq!(shape(ShapeKind::Hexagon).size, Vec2::new(100.0, 100.0));
        assert_eq!(shape(ShapeKind::Circle).size, Vec2::new(100.0, 100.0));
        assert_eq!(shape(ShapeKind::Ellipse).size, Vec2::new(100.0, 60.0));
    }

    fn outline(kind: ShapeKind) -> Vec<Vec2> {
        match ShapePath::build(kind, &mut rng()) {
            ShapePath::Polygon(points) => points,
            other => panic!("{} should be a polygon, got {:?}", kind.as_str(), other),
        }
    }

    fn points(raw: &[[f32; 2]]) -> Vec<Vec2> {
        raw.iter().map(|&p| Vec2::from(p)).collect()
    }

    #[test]
    fn test_fixed_outlines() {
        assert_eq!(
            outline(ShapeKind::Triangle),
            points(&[[0.0, 0.0], [50.0, 100.0], [100.0, 0.0]])
        );
        assert_eq!(
            outline(ShapeKind::Pentagon),
            points(&[
                [50.0, 0.0],
                [100.0, 50.0],
                [75.0, 100.0],
                [25.0, 100.0],
                [0.0, 50.0],
            ])
        );
        // Closing vertex repeated
        assert_eq!(
            outline(ShapeKind::Hexagon),
            points(&[
                [50.0, 0.0],
                [100.0, 30.0],
                [75.0, 100.0],
                [25.0, 100.0],
                [0.0, 30.0],
                [50.0, 0.0],
            ])
        );
    }

    #[test]
    fn test_star_vertex_angles() {
        let center = Vec2::splat(50.0);
        let points = outline(ShapeKind::Star);
        assert_eq!(points.len(), 11);
        for i in 0..5 {
            let outer_angle = 1.5 * PI + i as f32 * PI / 5.0;
            let inner_angle = outer_angle + PI / 10.0;
            let outer = center + 50.0 * Vec2::new(outer_angle.cos(), outer_angle.sin());
            let inner = center + 25.0 * Vec2::new(inner_angle.cos(), inner_angle.sin());
            assert!((points[1 + 2 * i] - outer).length() < 1e-3, "outer vertex {}", i);
            assert!((points[2 + 2 * i] - inner).length() < 1e-3, "inner vertex {}", i);
        }
        // Last outer vertex at 3π/2 + 4π/5 (54° below the +x axis)
        let last = Vec2::new(50.0 + 50.0 * 0.587_785, 50.0 + 50.0 * 0.809_017);
        assert!((points[9] - last).length() < 1e-3);
    }

    #[test]
    fn test_star_outline() {
        let ShapePath::Polygon(points) = ShapePath::star(Vec2::splat(50.0), 5, 50.0, 25.0) else {
            panic!("star should be a polygon");
        };
        // Start point plus 5 outer and 5 inner vertices
        assert_eq!(points.len(), 11);
        assert_eq!(points[0], Vec2::new(50.0, 0.0));
        // First outer vertex sits straight above the centre
        assert!((points[1] - Vec2::new(50.0, 0.0)).length() < 1e-3);
        // Inner vertices are at radius 25
        for inner in points[2..].iter().step_by(2) {
            assert!((inner.distance(Vec2::splat(50.0)) - 25.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_irregular_vertex_count() {
        let mut rng = rng();
        for _ in 0..200 {
            let ShapePath::Polygon(points) = ShapePath::irregular(&mut rng) else {
                panic!("irregular should be a polygon");
            };
            assert!((3..=8).contains(&points.len()));
            assert!(points
                .iter()
                .all(|p| (0.0..=100.0).contains(&p.x) && (0.0..=100.0).contains(&p.y)));
        }
    }

    #[test]
    fn test_surface_area() {
        let circle = shape(ShapeKind::Circle);
        assert!((circle.surface_area() - 7853.981_633_974_483).abs() < 1e-6);
        assert_eq!(shape(ShapeKind::Square).surface_area(), 10_000.0);
        let ellipse = shape(ShapeKind::Ellipse);
        assert!((ellipse.surface_area() - std::f64::consts::PI * 100.0 * 60.0 / 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_contains_is_inclusive() {
        let mut square = shape(ShapeKind::Square);
        square.pos = Vec2::new(10.0, 20.0);
        assert!(square.bounds_contains(Vec2::new(10.0, 20.0)));
        assert!(square.bounds_contains(Vec2::new(110.0, 120.0)));
        assert!(!square.bounds_contains(Vec2::new(110.1, 50.0)));
        assert!(!square.bounds_contains(Vec2::new(9.9, 50.0)));
    }

    #[test]
    fn test_hit_is_path_accurate() {
        let mut triangle = shape(ShapeKind::Triangle);
        triangle.pos = Vec2::new(100.0, 100.0);
        // Inside the bounding box but outside the downward-pointing triangle
        assert!(triangle.bounds_contains(Vec2::new(105.0, 190.0)));
        assert!(!triangle.hit(Vec2::new(105.0, 190.0)));
        assert!(triangle.hit(Vec2::new(150.0, 120.0)));

        let mut circle = shape(ShapeKind::Circle);
        circle.pos = Vec2::new(0.0, 0.0);
        assert!(circle.bounds_contains(Vec2::new(2.0, 2.0)));
        assert!(!circle.hit(Vec2::new(2.0, 2.0)));
        assert!(circle.hit(Vec2::new(50.0, 50.0)));
    }

    #[test]
    fn test_ellipse_bounds_anchor_at_position() {
        // Ellipse spans local y 20..80 but its box is (x, y, 100, 60)
        let ellipse = shape(ShapeKind::Ellipse);
        assert!(ellipse.hit(Vec2::new(50.0, 75.0)));
        assert!(!ellipse.bounds_contains(Vec2::new(50.0, 75.0)));
    }
}
