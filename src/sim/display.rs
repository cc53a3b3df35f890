//! Display list: what the renderer draws and dispatches per-shape clicks to
//!
//! Holds shape ids only, bottom to top. The live list in `SimState` owns the
//! shapes themselves.

use std::collections::HashSet;

use glam::Vec2;

use super::shape::{Shape, ShapeId};

#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    ids: Vec<ShapeId>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add on top of everything already drawn
    pub fn add(&mut self, id: ShapeId) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    /// Returns false if the id was not on the list
    pub fn remove(&mut self, id: ShapeId) -> bool {
        match self.ids.iter().position(|&i| i == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in draw order (bottom first)
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = ShapeId> + '_ {
        self.ids.iter().copied()
    }

    /// Topmost displayed shape whose path contains `point`
    ///
    /// Shapes are hit-tested once each; only the hits are ranked by draw order.
    pub fn topmost_hit(&self, point: Vec2, shapes: &[Shape]) -> Option<ShapeId> {
        let hits: HashSet<ShapeId> = shapes
            .iter()
            .filter(|s| s.hit(point))
            .map(|s| s.id)
            .collect();
        if hits.is_empty() {
            return None;
        }
        self.iter().rev().find(|id| hits.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shape::{Rgb, ShapeKind, ShapePath};

    fn square(id: ShapeId, x: f32, y: f32) -> Shape {
        Shape::new(
            id,
            ShapeKind::Square,
            Rgb::WHITE,
            ShapePath::Rect {
                size: Vec2::splat(100.0),
            },
            Vec2::new(x, y),
        )
    }

    #[test]
    fn test_add_remove() {
        let mut list = DisplayList::new();
        list.add(1);
        list.add(2);
        list.add(2);
        assert_eq!(list.len(), 2);
        assert!(list.remove(1));
        assert!(!list.remove(1));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_topmost_hit_prefers_last_added() {
        let shapes = vec![square(1, 0.0, 0.0), square(2, 50.0, 50.0)];
        let mut list = DisplayList::new();
        list.add(1);
        list.add(2);
        assert_eq!(list.topmost_hit(Vec2::new(75.0, 75.0), &shapes), Some(2));
        assert_eq!(list.topmost_hit(Vec2::new(10.0, 10.0), &shapes), Some(1));
        assert_eq!(list.topmost_hit(Vec2::new(400.0, 400.0), &shapes), None);
    }

    #[test]
    fn test_topmost_hit_follows_draw_order_not_list_order() {
        // Live list order differs from draw order
        let shapes = vec![square(2, 0.0, 0.0), square(1, 0.0, 0.0), square(3, 0.0, 0.0)];
        let mut list = DisplayList::new();
        list.add(3);
        list.add(1);
        list.add(2);
        assert_eq!(list.topmost_hit(Vec2::new(10.0, 10.0), &shapes), Some(2));
        list.remove(2);
        assert_eq!(list.topmost_hit(Vec2::new(10.0, 10.0), &shapes), Some(1));
    }

    #[test]
    fn test_topmost_hit_skips_undisplayed() {
        let shapes = vec![square(1, 0.0, 0.0), square(2, 0.0, 0.0)];
        let mut list = DisplayList::new();
        list.add(1);
        assert_eq!(list.topmost_hit(Vec2::new(10.0, 10.0), &shapes), Some(1));
    }
}
