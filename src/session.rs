//! Session host plumbing
//!
//! A [`Session`] owns the world, the player's input intent and a
//! subscription to a frame clock ([`TickSource`]). The clock is armed while a
//! run is playing and cancelled the moment it ends, so no stray step can run
//! against a finished session.

use crate::highscores::HighScores;
use crate::settings::GameSettings;
use crate::sim::{BodyId, FrameOutcome, InputIntent, Viewport, World, advance_frame, pick_target};

/// A source of display-frame ticks (e.g. `requestAnimationFrame`)
pub trait TickSource {
    /// Request exactly one future tick (no-op if one is already pending)
    fn schedule(&mut self);
    /// Drop any pending tick
    fn cancel(&mut self);
    fn is_scheduled(&self) -> bool;
}

/// Score/terminal notifications for the host UI
pub trait SessionEvents {
    /// Fired on every running frame
    fn on_score_update(&mut self, score: u32);
    /// Fired exactly once per session
    fn on_game_over(&mut self, final_score: u32);
}

/// Tick source driven by hand (tests, headless runs)
#[derive(Debug, Default)]
pub struct ManualTicks {
    pending: bool,
    /// Total ticks requested
    pub requests: u32,
    /// Total cancellations that dropped a pending tick
    pub cancels: u32,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver the pending tick, if any. Returns whether one was pending.
    pub fn fire(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }
}

impl TickSource for ManualTicks {
    fn schedule(&mut self) {
        if !self.pending {
            self.pending = true;
            self.requests += 1;
        }
    }

    fn cancel(&mut self) {
        if self.pending {
            self.pending = false;
            self.cancels += 1;
        }
    }

    fn is_scheduled(&self) -> bool {
        self.pending
    }
}

/// One player's sequence of runs
pub struct Session<T: TickSource> {
    ticks: T,
    world: Option<World>,
    intent: InputIntent,
    playing: bool,
    high_scores: HighScores,
}

impl<T: TickSource> Session<T> {
    pub fn new(ticks: T) -> Self {
        Self {
            ticks,
            world: None,
            intent: InputIntent::default(),
            playing: false,
            high_scores: HighScores::new(),
        }
    }

    /// Reset the world for a new run and subscribe to the frame clock
    pub fn start(&mut self, settings: &GameSettings, seed: u64) {
        self.world = Some(World::new(settings, seed));
        self.intent = InputIntent::default();
        self.playing = true;
        self.ticks.schedule();
        log::info!("Session started with seed: {}", seed);
    }

    /// Abandon the current run (leaving the play screen). No game-over fires.
    pub fn stop(&mut self) {
        self.ticks.cancel();
        if self.playing {
            log::info!("Session stopped");
        }
        self.playing = false;
        self.intent = InputIntent::default();
    }

    /// Pointer/touch went down at client coordinates
    pub fn hold_start(&mut self, client_x: f32, client_y: f32, viewport: &Viewport) -> Option<BodyId> {
        if !self.playing {
            return None;
        }
        let world = self.world.as_ref()?;
        let target = viewport
            .to_world(client_x, client_y, world.camera_y)
            .and_then(|p| pick_target(&world.bodies, p));
        self.intent.hold_start(target);
        if let Some(id) = target {
            log::debug!("Targeted {:?}", id);
        }
        target
    }

    /// Pointer/touch released: clears the intent and slings out of orbit.
    /// Returns whether an orbit was released.
    pub fn hold_end(&mut self) -> bool {
        self.intent.hold_end();
        let Some(orbit) = self.world.as_mut().and_then(|w| w.ship.release()) else {
            return false;
        };
        log::debug!("Released from {:?} at angle {:.2}", orbit.body, orbit.angle);
        true
    }

    /// Handle one tick from the frame clock
    pub fn on_tick<E: SessionEvents + ?Sized>(&mut self, events: &mut E) -> FrameOutcome {
        if !self.playing {
            return FrameOutcome::Halted;
        }
        let Some(world) = self.world.as_mut() else {
            return FrameOutcome::Halted;
        };

        let outcome = advance_frame(world, &self.intent);
        match outcome {
            FrameOutcome::Running {
                score, drop_target, ..
            } => {
                if drop_target {
                    self.intent.target = None;
                }
                events.on_score_update(score);
                self.ticks.schedule();
            }
            FrameOutcome::GameOver { score, .. } => {
                self.playing = false;
                self.ticks.cancel();
                self.intent = InputIntent::default();
                if let Some(rank) = self.high_scores.add_score(score, world.frame) {
                    log::info!("New #{} distance: {} km", rank, score);
                }
                events.on_game_over(score);
            }
            FrameOutcome::Halted => {
                self.playing = false;
                self.ticks.cancel();
            }
        }
        outcome
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current (or last) world, for rendering
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn intent(&self) -> &InputIntent {
        &self.intent
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut T {
        &mut self.ticks
    }
}
