//! Gravitational bodies and their procedural generator

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::consts::*;
use crate::settings::GameSettings;

/// Unique (per world) body identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Body variants, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyVariant {
    #[default]
    Normal,
    /// Cosmetic pulsing only
    Pulsar,
    /// Orbit decays toward the surface
    Singularity,
    /// Orbit grows until the ship is thrown out past the mid zone
    Repulsor,
    /// Drifts sideways on a sine wave
    Binary,
}

impl BodyVariant {
    /// Map a uniform [0,1) roll onto a variant
    pub fn from_roll(roll: f32) -> Self {
        if roll > 0.92 {
            BodyVariant::Singularity
        } else if roll > 0.84 {
            BodyVariant::Pulsar
        } else if roll > 0.76 {
            BodyVariant::Repulsor
        } else if roll > 0.68 {
            BodyVariant::Binary
        } else {
            BodyVariant::Normal
        }
    }
}

/// A gravitational body with three nested interaction zones
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GravitationalBody {
    pub id: BodyId,
    pub pos: Vec2,
    /// Solid (collision) radius
    pub radius: f32,
    /// Capture zone
    pub inner_radius: f32,
    /// Transition zone (Repulsor ejection threshold)
    pub mid_radius: f32,
    /// Influence zone
    pub gravity_radius: f32,
    pub variant: BodyVariant,
    /// +1.0 or -1.0
    pub spin: f32,
    /// Orbit angular speed (radians per frame); smaller bodies spin faster
    pub orbit_speed: f32,
    pub pulse_phase: f32,
    pub oscillation_phase: f32,
}

impl GravitationalBody {
    /// Build a body, deriving zones and orbit speed from `radius` and `settings`
    pub fn new(
        id: BodyId,
        pos: Vec2,
        radius: f32,
        variant: BodyVariant,
        spin: f32,
        settings: &GameSettings,
    ) -> Self {
        let size_factor = radius / REFERENCE_RADIUS;
        Self {
            id,
            pos,
            radius,
            inner_radius: radius + settings.tier1_range * size_factor,
            mid_radius: settings.gravity_range * settings.tier2_range * size_factor,
            gravity_radius: settings.gravity_range * settings.tier3_range * size_factor,
            variant,
            spin,
            orbit_speed: settings.orbit_rotation_speed * 1.5 / size_factor.sqrt(),
            pulse_phase: 0.0,
            oscillation_phase: 0.0,
        }
    }

    /// Size relative to the reference body (also the gravity mass factor)
    #[inline]
    pub fn size_factor(&self) -> f32 {
        self.radius / REFERENCE_RADIUS
    }

    /// Advance cosmetic pulse and Binary drift by one frame
    pub fn animate(&mut self) {
        self.pulse_phase += PULSE_RATE;
        if self.variant == BodyVariant::Binary {
            self.oscillation_phase += OSCILLATION_RATE;
            self.pos.x += self.oscillation_phase.sin() * BINARY_AMPLITUDE;
        }
    }

    /// Radius used for drawing the core (collision still uses `radius`)
    pub fn drawn_radius(&self) -> f32 {
        self.radius + self.pulse_phase.sin() * 2.0
    }

    /// True when `inner < mid < gravity`
    pub fn zones_ordered(&self) -> bool {
        self.inner_radius < self.mid_radius && self.mid_radius < self.gravity_radius
    }
}

/// Procedurally create a body at vertical position `y`.
///
/// `is_initial` yields a forgiving Normal body of fixed size; otherwise the
/// variant and size are rolled.
pub fn spawn_body<R: Rng + ?Sized>(
    id: BodyId,
    y: f32,
    is_initial: bool,
    settings: &GameSettings,
    rng: &mut R,
) -> GravitationalBody {
    let variant = if is_initial {
        BodyVariant::Normal
    } else {
        BodyVariant::from_roll(rng.random::<f32>())
    };
    let radius = if is_initial {
        INITIAL_BODY_RADIUS
    } else {
        rng.random_range(MIN_BODY_RADIUS..MAX_BODY_RADIUS)
    };
    let x = rng.random_range(SPAWN_MIN_X..SPAWN_MAX_X);
    let spin = if rng.random_bool(0.5) { 1.0 } else { -1.0 };

    let mut body = GravitationalBody::new(id, Vec2::new(x, y), radius, variant, spin, settings);
    body.pulse_phase = rng.random_range(0.0..TAU);
    body.oscillation_phase = rng.random_range(0.0..TAU);
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_reference_body_zones() {
        let body = GravitationalBody::new(
            BodyId(1),
            Vec2::ZERO,
            40.0,
            BodyVariant::Normal,
            1.0,
            &GameSettings::default(),
        );
        assert!((body.inner_radius - 75.0).abs() < 1e-4);
        assert!((body.mid_radius - 144.0).abs() < 1e-4);
        assert!((body.gravity_radius - 224.0).abs() < 1e-4);
        assert!((body.orbit_speed - 0.12).abs() < 1e-6);
        assert!(body.zones_ordered());
    }

    #[test]
    fn test_variant_thresholds() {
        assert_eq!(BodyVariant::from_roll(0.0), BodyVariant::Normal);
        assert_eq!(BodyVariant::from_roll(0.68), BodyVariant::Normal);
        assert_eq!(BodyVariant::from_roll(0.70), BodyVariant::Binary);
        assert_eq!(BodyVariant::from_roll(0.80), BodyVariant::Repulsor);
        assert_eq!(BodyVariant::from_roll(0.90), BodyVariant::Pulsar);
        assert_eq!(BodyVariant::from_roll(0.95), BodyVariant::Singularity);
    }

    #[test]
    fn test_initial_body_is_normal() {
        let mut rng = Pcg32::seed_from_u64(7);
        for i in 0..50 {
            let body = spawn_body(BodyId(i), -100.0, true, &GameSettings::default(), &mut rng);
            assert_eq!(body.variant, BodyVariant::Normal);
            assert_eq!(body.radius, INITIAL_BODY_RADIUS);
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        let settings = GameSettings::default();
        for i in 0..500 {
            let body = spawn_body(BodyId(i), 300.0, false, &settings, &mut rng);
            assert!(body.radius >= MIN_BODY_RADIUS && body.radius < MAX_BODY_RADIUS);
            assert!(body.pos.x >= SPAWN_MIN_X && body.pos.x < SPAWN_MAX_X);
            assert_eq!(body.pos.y, 300.0);
            assert!(body.spin == 1.0 || body.spin == -1.0);
            assert!(body.zones_ordered());
        }
    }

    #[test]
    fn test_same_seed_same_bodies() {
        let settings = GameSettings::default();
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        for i in 0..20 {
            let x = spawn_body(BodyId(i), 0.0, false, &settings, &mut a);
            let y = spawn_body(BodyId(i), 0.0, false, &settings, &mut b);
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.radius, y.radius);
            assert_eq!(x.variant, y.variant);
        }
    }

    #[test]
    fn test_binary_drifts_and_zones_hold() {
        let settings = GameSettings::default();
        let mut body = GravitationalBody::new(
            BodyId(1),
            Vec2::new(375.0, 0.0),
            50.0,
            BodyVariant::Binary,
            -1.0,
            &settings,
        );
        body.oscillation_phase = 1.0;
        let zones = (body.inner_radius, body.mid_radius, body.gravity_radius);
        let start_x = body.pos.x;
        body.animate();
        assert!((body.pos.x - (start_x + 1.02f32.sin() * 3.0)).abs() < 1e-4);
        assert_eq!(zones, (body.inner_radius, body.mid_radius, body.gravity_radius));

        let mut normal = GravitationalBody::new(
            BodyId(2),
            Vec2::new(375.0, 0.0),
            50.0,
            BodyVariant::Normal,
            1.0,
            &settings,
        );
        normal.animate();
        assert_eq!(normal.pos.x, 375.0);
        assert!((normal.pulse_phase - PULSE_RATE).abs() < 1e-6);
    }
}
