//! Gameplay settings supplied by the session host
//!
//! Applied only at session reset. Values outside their documented range are
//! clamped rather than rejected, and the capture/transition/influence zones
//! are kept strictly nested.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::consts::REFERENCE_RADIUS;
use crate::error::ConfigError;

pub const INITIAL_SPEED_RANGE: RangeInclusive<f32> = 3.0..=10.0;
pub const ORBIT_ROTATION_RANGE: RangeInclusive<f32> = 0.04..=0.15;
pub const GRAVITY_RANGE_RANGE: RangeInclusive<f32> = 120.0..=240.0;
pub const TIER1_RANGE: RangeInclusive<f32> = 15.0..=80.0;
pub const TIER2_RANGE: RangeInclusive<f32> = 0.5..=1.5;
pub const TIER3_RANGE: RangeInclusive<f32> = 1.0..=2.5;

/// Minimum gap (in reference-size units) between adjacent zone radii
const ZONE_GAP: f32 = 1.0;
/// Minimum multiplier gap between the mid and outer zones
const TIER_GAP: f32 = 0.1;

/// Per-session gameplay configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameSettings {
    /// Ship cruise speed (units per frame); speed never changes in flight
    pub initial_speed: f32,
    /// Base orbital angular speed (radians per frame) for a reference body
    pub orbit_rotation_speed: f32,
    /// Reference range the mid/outer zone multipliers scale
    pub gravity_range: f32,
    /// Capture zone: additive offset beyond the solid radius
    pub tier1_range: f32,
    /// Transition zone: multiplier of `gravity_range`
    pub tier2_range: f32,
    /// Influence zone: multiplier of `gravity_range`
    pub tier3_range: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            initial_speed: 5.5,
            orbit_rotation_speed: 0.08,
            gravity_range: 160.0,
            tier1_range: 35.0,
            tier2_range: 0.9,
            tier3_range: 1.4,
        }
    }
}

impl GameSettings {
    /// Decode a (possibly partial) settings document; missing keys default.
    /// The result is sanitized.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: Self = serde_json::from_str(json)?;
        raw.check_finite()?;
        Ok(raw.sanitized())
    }

    fn check_finite(&self) -> Result<(), ConfigError> {
        let fields = [
            ("initialSpeed", self.initial_speed),
            ("orbitRotationSpeed", self.orbit_rotation_speed),
            ("gravityRange", self.gravity_range),
            ("tier1Range", self.tier1_range),
            ("tier2Range", self.tier2_range),
            ("tier3Range", self.tier3_range),
        ];
        match fields.iter().find(|(_, v)| !v.is_finite()) {
            Some((field, _)) => Err(ConfigError::NonFinite { field: *field }),
            None => Ok(()),
        }
    }

    /// Clamp every field into its range and repair zone ordering so that
    /// `inner < mid < gravity` holds for any body size.
    ///
    /// Non-finite values fall back to the defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let clamp = |v: f32, range: RangeInclusive<f32>, fallback: f32| {
            if v.is_finite() {
                v.clamp(*range.start(), *range.end())
            } else {
                fallback
            }
        };

        let mut out = Self {
            initial_speed: clamp(self.initial_speed, INITIAL_SPEED_RANGE, defaults.initial_speed),
            orbit_rotation_speed: clamp(
                self.orbit_rotation_speed,
                ORBIT_ROTATION_RANGE,
                defaults.orbit_rotation_speed,
            ),
            gravity_range: clamp(self.gravity_range, GRAVITY_RANGE_RANGE, defaults.gravity_range),
            tier1_range: clamp(self.tier1_range, TIER1_RANGE, defaults.tier1_range),
            tier2_range: clamp(self.tier2_range, TIER2_RANGE, defaults.tier2_range),
            tier3_range: clamp(self.tier3_range, TIER3_RANGE, defaults.tier3_range),
        };

        // All zones scale with size_factor, so compare them at reference size:
        // inner = REF + tier1, mid = range * tier2, outer = range * tier3.
        let max_tier1 = out.gravity_range * out.tier2_range - REFERENCE_RADIUS - ZONE_GAP;
        if out.tier1_range > max_tier1 {
            out.tier1_range = max_tier1;
        }
        if out.tier3_range < out.tier2_range + TIER_GAP {
            out.tier3_range = out.tier2_range + TIER_GAP;
        }

        if out != *self {
            log::warn!("Settings adjusted: {:?} -> {:?}", self, out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_already_sane() {
        let s = GameSettings::default();
        assert_eq!(s.sanitized(), s);
    }

    #[test]
    fn test_clamps_out_of_range() {
        let s = GameSettings {
            initial_speed: 50.0,
            orbit_rotation_speed: -1.0,
            gravity_range: 160.0,
            tier1_range: 1.0,
            tier2_range: 0.9,
            tier3_range: 9.0,
        }
        .sanitized();
        assert_eq!(s.initial_speed, 10.0);
        assert_eq!(s.orbit_rotation_speed, 0.04);
        assert_eq!(s.tier1_range, 15.0);
        assert_eq!(s.tier3_range, 2.5);
    }

    #[test]
    fn test_repairs_zone_ordering() {
        // Capture 40+80 would swallow a 160*0.5 transition zone
        let s = GameSettings {
            tier1_range: 80.0,
            tier2_range: 0.5,
            tier3_range: 1.0,
            ..Default::default()
        }
        .sanitized();
        assert!(REFERENCE_RADIUS + s.tier1_range < s.gravity_range * s.tier2_range);
        assert!(s.tier2_range < s.tier3_range);

        let s = GameSettings {
            tier2_range: 1.5,
            tier3_range: 1.0,
            ..Default::default()
        }
        .sanitized();
        assert!((s.tier3_range - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_nan_falls_back_to_default() {
        let s = GameSettings {
            initial_speed: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(s.initial_speed, 5.5);
    }

    #[test]
    fn test_partial_json() {
        let s = GameSettings::from_json(r#"{"initialSpeed": 7.0, "tier1Range": 20}"#).unwrap();
        assert_eq!(s.initial_speed, 7.0);
        assert_eq!(s.tier1_range, 20.0);
        assert_eq!(s.gravity_range, 160.0);
        assert_eq!(s.tier3_range, 1.4);
    }

    #[test]
    fn test_bad_json() {
        let err = GameSettings::from_json(r#"{"initialSpeed": "fast"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid settings document"));
    }
}
