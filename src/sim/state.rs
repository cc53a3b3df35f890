//! Simulation state
//!
//! One struct owns the parameters, the live list, the display list and the
//! spawn schedule. Every handler (timer, frame, click, buttons) goes through it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::display::DisplayList;
use super::schedule::SpawnSchedule;
use super::shape::{Rgb, Shape, ShapeId, ShapeKind, ShapePath};
use super::stats::Stats;
use crate::config::{FallPolicy, SimConfig};
use crate::consts::*;

/// Complete simulation state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Shapes per second (>= 1)
    pub spawn_rate: u32,
    /// Pixels per frame (>= 1)
    pub gravity: u32,
    pub fall_policy: FallPolicy,
    /// Live list in spawn order (last is topmost)
    pub shapes: Vec<Shape>,
    /// Renderer's display list
    pub display: DisplayList,
    /// Logical spawn task
    pub schedule: SpawnSchedule,
    /// Frames advanced so far
    pub frame_ticks: u64,
    /// Last refreshed readout
    readout: Stats,
    next_id: ShapeId,
}

impl SimState {
    /// Create a fresh state; the spawn task starts counting at `now_ms`
    pub fn new(config: &SimConfig, seed: u64, now_ms: f64) -> Self {
        let spawn_rate = config.spawn_rate.max(MIN_SPAWN_RATE);
        let gravity = config.gravity.max(MIN_GRAVITY);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawn_rate,
            gravity,
            fall_policy: config.fall_policy,
            shapes: Vec::new(),
            display: DisplayList::new(),
            schedule: SpawnSchedule::new(spawn_rate, now_ms),
            frame_ticks: 0,
            readout: Stats::default(),
            next_id: 1,
        };
        state.refresh_readout();
        state
    }

    /// Allocate a new shape ID
    fn next_shape_id(&mut self) -> ShapeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Timer spawn: random kind and colour at random x, above the canvas
    pub fn spawn_random(&mut self) -> ShapeId {
        let kind = ShapeKind::random(&mut self.rng);
        self.spawn(kind, None)
    }

    /// Click spawn: random kind and colour exactly at `point`
    pub fn spawn_at(&mut self, point: Vec2) -> ShapeId {
        let kind = ShapeKind::random(&mut self.rng);
        self.spawn(kind, Some(point))
    }

    /// Spawn a specific kind (the only way to get `Irregular`)
    pub fn spawn_kind(&mut self, kind: ShapeKind, point: Option<Vec2>) -> ShapeId {
        self.spawn(kind, point)
    }

    fn spawn(&mut self, kind: ShapeKind, point: Option<Vec2>) -> ShapeId {
        let color = Rgb::random(&mut self.rng);
        let path = ShapePath::build(kind, &mut self.rng);
        let pos = match point {
            Some(p) => p,
            None => Vec2::new(self.rng.random::<f32>() * CANVAS_WIDTH, SPAWN_Y),
        };

        let id = self.next_shape_id();
        self.shapes.push(Shape::new(id, kind, color, path, pos));
        self.display.add(id);
        self.refresh_readout();

        log::debug!(
            "Spawned {} #{} at ({:.1}, {:.1}) color {}",
            kind.as_str(),
            id,
            pos.x,
            pos.y,
            color.to_hex()
        );
        id
    }

    /// Run every timer firing due by `now_ms`; returns how many spawned
    pub fn run_due_spawns(&mut self, now_ms: f64) -> u32 {
        let due = self.schedule.poll(now_ms);
        for _ in 0..due {
            self.spawn_random();
        }
        due
    }

    /// Remove a shape from the display list and the live list
    ///
    /// Returns false if the shape was not live.
    pub fn remove(&mut self, id: ShapeId) -> bool {
        self.display.remove(id);
        let removed = self.remove_live(id);
        self.refresh_readout();
        if removed {
            log::debug!("Removed shape #{}", id);
        }
        removed
    }

    /// Drop from the live list only (first matching index)
    pub(crate) fn remove_live(&mut self, id: ShapeId) -> bool {
        match self.shapes.iter().position(|s| s.id == id) {
            Some(index) => {
                self.shapes.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Live shapes that are still on the display list, in draw order
    pub fn displayed(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.display.iter().filter_map(|id| self.shape(id))
    }

    /// Fresh stats over the live list
    pub fn stats(&self) -> Stats {
        Stats::compute(&self.shapes, self.spawn_rate, self.gravity)
    }

    /// Stats as of the last refresh
    pub fn readout(&self) -> Stats {
        self.readout
    }

    pub fn refresh_readout(&mut self) {
        self.readout = self.stats();
    }
}
