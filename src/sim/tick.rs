//! Frame step
//!
//! Core game loop that advances the world by exactly one display frame.

use super::input::InputIntent;
use super::orbit::{ShipStep, step_ship};
use super::state::{GamePhase, World};
use crate::consts::*;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Ship touched a body's solid radius
    Collision,
    /// Ship left the playfield sideways
    OutOfBounds,
    /// Ship dropped too far below its best altitude or the camera
    FellBehind,
}

/// Result of one frame step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Session continues
    Running {
        score: u32,
        step: ShipStep,
        /// The targeted body should be forgotten (Repulsor ejection)
        drop_target: bool,
    },
    /// Session ended on this frame
    GameOver { score: u32, cause: GameOverCause },
    /// World already ended; nothing was stepped
    Halted,
}

impl FrameOutcome {
    pub fn score(&self) -> Option<u32> {
        match *self {
            FrameOutcome::Running { score, .. } | FrameOutcome::GameOver { score, .. } => {
                Some(score)
            }
            FrameOutcome::Halted => None,
        }
    }
}

/// Advance the world by one frame
pub fn advance_frame(world: &mut World, intent: &InputIntent) -> FrameOutcome {
    if world.phase == GamePhase::GameOver {
        return FrameOutcome::Halted;
    }

    world.frame += 1;
    world.ship.influenced = false;

    // Watermark from the position the frame starts at
    world.peak_y = world.peak_y.min(world.ship.pos.y);

    for body in &mut world.bodies {
        body.animate();
    }

    let speed = world.settings.initial_speed;
    let step = step_ship(&mut world.ship, &world.bodies, intent, speed);

    let target_cam = world.ship.pos.y - CAMERA_LEAD;
    world.camera_y += (target_cam - world.camera_y) * CAMERA_SMOOTHING;

    let score = world.current_score();
    world.score = score;

    if let Some(cause) = terminal_condition(world) {
        world.phase = GamePhase::GameOver;
        log::info!(
            "Game over ({:?}) at frame {} with {} km",
            cause,
            world.frame,
            score
        );
        return FrameOutcome::GameOver { score, cause };
    }

    let frontier = world.frontier_y().unwrap_or(world.camera_y);
    if frontier > world.camera_y - SPAWN_LOOKAHEAD {
        let id = world.spawn_at(frontier - SPAWN_SPACING, false);
        log::debug!("Spawned {:?} at y={:.0}", id, frontier - SPAWN_SPACING);
    }

    if world.bodies.len() > MAX_BODIES {
        let cutoff = world.camera_y + CULL_DISTANCE;
        let before = world.bodies.len();
        world.bodies.retain(|b| b.pos.y < cutoff);
        log::debug!("Culled {} bodies below y={:.0}", before - world.bodies.len(), cutoff);
    }

    let pos = world.ship.pos;
    world.ship.trail.push(pos);

    FrameOutcome::Running {
        score,
        step,
        drop_target: step == ShipStep::Ejected,
    }
}

/// First terminal condition the ship currently meets, in priority order
pub fn terminal_condition(world: &World) -> Option<GameOverCause> {
    let ship = world.ship.pos;

    if world
        .bodies
        .iter()
        .any(|b| ship.distance(b.pos) < b.radius + COLLISION_MARGIN)
    {
        return Some(GameOverCause::Collision);
    }

    if ship.x < BOUNDS_MIN_X || ship.x > BOUNDS_MAX_X {
        return Some(GameOverCause::OutOfBounds);
    }

    // Both checks kept: either can dominate depending on camera lag
    if ship.y > world.peak_y + FALL_BEHIND_PEAK || ship.y > world.camera_y + FALL_BEHIND_CAMERA {
        return Some(GameOverCause::FellBehind);
    }

    None
}
