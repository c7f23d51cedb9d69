//! Pointer/touch input mapping
//!
//! Input handlers only ever touch an [`InputIntent`]; the frame step reads it
//! as a value at the start of the next frame.

use glam::Vec2;

use super::body::{BodyId, GravitationalBody};
use crate::consts::{TARGET_BUFFER, WORLD_HEIGHT, WORLD_WIDTH};

/// Player intent sampled by the frame step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntent {
    /// Pointer/touch is held down
    pub hold_active: bool,
    /// Body the hold started on, if any
    pub target: Option<BodyId>,
}

impl InputIntent {
    pub fn holding(target: Option<BodyId>) -> Self {
        Self {
            hold_active: true,
            target,
        }
    }

    pub fn hold_start(&mut self, target: Option<BodyId>) {
        self.hold_active = true;
        self.target = target;
    }

    pub fn hold_end(&mut self) {
        self.hold_active = false;
        self.target = None;
    }

    /// Target that may bend the ship's path this frame
    pub fn steering_target(&self) -> Option<BodyId> {
        if self.hold_active { self.target } else { None }
    }
}

/// On-screen rectangle of the canvas element, in client (CSS) pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Uniform scale from logical units to client pixels (contain fit)
    pub fn scale(&self) -> f32 {
        (self.width / WORLD_WIDTH).min(self.height / WORLD_HEIGHT)
    }

    /// Client-pixel offset of the letterboxed logical area inside the element
    fn letterbox(&self) -> Vec2 {
        let s = self.scale();
        Vec2::new(
            (self.width - WORLD_WIDTH * s) / 2.0,
            (self.height - WORLD_HEIGHT * s) / 2.0,
        )
    }

    /// Map client coordinates to world coordinates.
    ///
    /// Returns `None` for a degenerate (zero-sized) viewport.
    pub fn to_world(&self, client_x: f32, client_y: f32, camera_y: f32) -> Option<Vec2> {
        let s = self.scale();
        if !(s > 0.0) {
            return None;
        }
        let local = Vec2::new(client_x - self.left, client_y - self.top) - self.letterbox();
        Some(Vec2::new(local.x / s, local.y / s + camera_y))
    }
}

/// Nearest body whose solid radius (plus a touch buffer) contains `point`
pub fn pick_target(bodies: &[GravitationalBody], point: Vec2) -> Option<BodyId> {
    bodies
        .iter()
        .map(|b| (b, b.pos.distance(point)))
        .filter(|(b, d)| *d < b.radius + TARGET_BUFFER)
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(b, _)| b.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameSettings;
    use crate::sim::body::BodyVariant;

    fn body(id: u32, x: f32, y: f32, radius: f32) -> GravitationalBody {
        GravitationalBody::new(
            BodyId(id),
            Vec2::new(x, y),
            radius,
            BodyVariant::Normal,
            1.0,
            &GameSettings::default(),
        )
    }

    #[test]
    fn test_exact_fit_mapping() {
        // Half-size canvas at (10, 20)
        let vp = Viewport::new(10.0, 20.0, 375.0, 667.0);
        let p = vp.to_world(10.0 + 187.5, 20.0 + 333.5, 100.0).unwrap();
        assert!((p.x - 375.0).abs() < 1e-3);
        assert!((p.y - (667.0 + 100.0)).abs() < 1e-3);
    }

    #[test]
    fn test_letterboxed_mapping() {
        // Element twice as wide as needed: content is centered horizontally
        let vp = Viewport::new(0.0, 0.0, 1500.0, 1334.0);
        assert_eq!(vp.scale(), 1.0);
        let p = vp.to_world(375.0, 0.0, 0.0).unwrap();
        assert!(p.x.abs() < 1e-3);
        let p = vp.to_world(750.0, 1334.0, -50.0).unwrap();
        assert!((p.x - 375.0).abs() < 1e-3);
        assert!((p.y - 1284.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_viewport() {
        let vp = Viewport::new(0.0, 0.0, 0.0, 100.0);
        assert!(vp.to_world(1.0, 1.0, 0.0).is_none());
    }

    #[test]
    fn test_pick_nearest_within_buffer() {
        let bodies = [body(1, 100.0, 100.0, 40.0), body(2, 160.0, 100.0, 40.0)];
        // Inside both hit circles, closer to body 2
        assert_eq!(pick_target(&bodies, Vec2::new(135.0, 100.0)), Some(BodyId(2)));
        // In the touch buffer of body 1 only
        assert_eq!(pick_target(&bodies, Vec2::new(100.0, 150.0)), Some(BodyId(1)));
        // Outside radius + buffer
        assert_eq!(pick_target(&bodies, Vec2::new(100.0, 156.0)), None);
        assert_eq!(pick_target(&[], Vec2::ZERO), None);
    }

    #[test]
    fn test_intent_lifecycle() {
        let mut intent = InputIntent::default();
        assert_eq!(intent.steering_target(), None);
        intent.hold_start(Some(BodyId(4)));
        assert_eq!(intent.steering_target(), Some(BodyId(4)));
        intent.hold_end();
        assert_eq!(intent, InputIntent::default());
    }
}
