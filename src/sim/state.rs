//! World state and core simulation types
//!
//! Everything a frame step reads or writes lives here. Rendering only ever
//! borrows it immutably.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{BodyId, GravitationalBody, spawn_body};
use crate::consts::*;
use crate::settings::GameSettings;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Frames are being stepped
    Playing,
    /// Run ended; further frame steps are no-ops
    GameOver,
}

/// Orbit bookkeeping, present only while the ship is orbiting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    pub body: BodyId,
    /// Angle of the ship around the body center (radians, unbounded)
    pub angle: f32,
    /// Instantaneous distance from the body center
    pub radius: f32,
}

/// Fixed-capacity history of recent ship positions (oldest first)
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<Vec2>,
}

impl Trail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Record a position, evicting the oldest beyond capacity
    pub fn push(&mut self, pos: Vec2) {
        if self.points.len() == TRAIL_LENGTH {
            self.points.pop_front();
        }
        self.points.push_back(pos);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// `Some` while orbiting, `None` in free flight
    pub orbit: Option<Orbit>,
    /// Gravity steering was applied this frame (cosmetic)
    pub influenced: bool,
    pub trail: Trail,
}

impl Ship {
    /// Ship at the start position heading straight up
    pub fn launch(speed: f32) -> Self {
        Self {
            pos: Vec2::new(START_X, START_Y),
            vel: Vec2::new(0.0, -speed),
            orbit: None,
            influenced: false,
            trail: Trail::new(),
        }
    }

    #[inline]
    pub fn is_orbiting(&self) -> bool {
        self.orbit.is_some()
    }

    /// Orbited body id, if any
    pub fn orbiting(&self) -> Option<BodyId> {
        self.orbit.map(|o| o.body)
    }

    /// Drop out of orbit, keeping the current tangential velocity (the sling)
    pub fn release(&mut self) -> Option<Orbit> {
        self.orbit.take()
    }
}

/// Complete session world
#[derive(Debug, Clone)]
pub struct World {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Sanitized settings snapshot for this session
    pub settings: GameSettings,
    pub phase: GamePhase,
    pub ship: Ship,
    /// Live bodies in spawn order
    pub bodies: Vec<GravitationalBody>,
    /// Top edge of the view in world units (smoothed)
    pub camera_y: f32,
    /// Lowest y (highest altitude) ever reached this session
    pub peak_y: f32,
    /// Frames stepped since reset (drives rotation animation)
    pub frame: u64,
    /// Score reported on the latest frame
    pub score: u32,
    rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Create a world and reset it for a fresh session
    pub fn new(settings: &GameSettings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let mut world = Self {
            seed,
            settings,
            phase: GamePhase::Playing,
            ship: Ship::launch(settings.initial_speed),
            bodies: Vec::new(),
            camera_y: START_Y - START_CAMERA_OFFSET,
            peak_y: START_Y,
            frame: 0,
            score: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        world.reset(&settings);
        world
    }

    /// Reinitialize ship, camera, watermark and the initial run of bodies.
    /// The RNG stream continues, so consecutive resets differ.
    pub fn reset(&mut self, settings: &GameSettings) {
        self.settings = settings.sanitized();
        self.phase = GamePhase::Playing;
        self.ship = Ship::launch(self.settings.initial_speed);
        self.camera_y = START_Y - START_CAMERA_OFFSET;
        self.peak_y = START_Y;
        self.frame = 0;
        self.score = 0;
        self.bodies.clear();
        for i in 0..INITIAL_BODY_COUNT {
            let y = START_Y - INITIAL_BODY_GAP - i as f32 * INITIAL_BODY_SPACING;
            self.spawn_at(y, false);
        }
        log::debug!(
            "World reset (seed {}): {} bodies, speed {}",
            self.seed,
            self.bodies.len(),
            self.settings.initial_speed
        );
    }

    /// Allocate a new body ID
    pub fn next_body_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Generate a body at `y` and append it to the live list
    pub fn spawn_at(&mut self, y: f32, is_initial: bool) -> BodyId {
        let id = self.next_body_id();
        let body = spawn_body(id, y, is_initial, &self.settings, &mut self.rng);
        self.bodies.push(body);
        id
    }

    /// Look up a live body
    pub fn body(&self, id: BodyId) -> Option<&GravitationalBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Remove a body from the live list (returns it if present)
    pub fn remove_body(&mut self, id: BodyId) -> Option<GravitationalBody> {
        let idx = self.bodies.iter().position(|b| b.id == id)?;
        Some(self.bodies.remove(idx))
    }

    /// y of the topmost body (the spawn frontier)
    pub fn frontier_y(&self) -> Option<f32> {
        self.bodies.iter().map(|b| b.pos.y).reduce(f32::min)
    }

    /// Distance climbed from the start, in km
    pub fn current_score(&self) -> u32 {
        ((self.peak_y - START_Y).abs() / UNITS_PER_KM).floor().max(0.0) as u32
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
