//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - One step per display frame, no wall-clock time
//! - Injectable, seedable RNG (the world owns a `Pcg32`)
//! - Stable iteration order (bodies in spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod input;
pub mod orbit;
pub mod state;
pub mod tick;

pub use body::{BodyId, BodyVariant, GravitationalBody, spawn_body};
pub use input::{InputIntent, Viewport, pick_target};
pub use orbit::{ShipStep, Steering, renormalize, steering, step_ship};
pub use state::{GamePhase, Orbit, Ship, Trail, World};
pub use tick::{FrameOutcome, GameOverCause, advance_frame, terminal_condition};
