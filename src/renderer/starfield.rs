//! Parallax background stars

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::WORLD_WIDTH;

/// Number of stars in the field
pub const STAR_COUNT: usize = 200;
/// Vertical extent stars are scattered over
pub const STAR_FIELD_DEPTH: f32 = 3000.0;
/// Screen-space wrap period for scrolled stars
pub const STAR_WRAP: f32 = 1500.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub alpha: f32,
    /// Fraction of camera motion the star follows
    pub parallax: f32,
}

impl Star {
    /// On-screen position for the given camera
    pub fn screen_pos(&self, camera_y: f32) -> Vec2 {
        Vec2::new(self.x, (self.y - camera_y * self.parallax).rem_euclid(STAR_WRAP))
    }
}

/// Stars are generated once per host and never touched by the simulation
#[derive(Debug, Clone)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.random_range(0.0..WORLD_WIDTH),
                y: rng.random_range(0.0..STAR_FIELD_DEPTH),
                size: rng.random_range(0.5..2.0),
                alpha: rng.random_range(0.2..0.8),
                parallax: rng.random_range(0.1..0.5),
            })
            .collect();
        Self { stars }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_ranges() {
        let field = Starfield::new(9);
        assert_eq!(field.stars.len(), STAR_COUNT);
        for s in &field.stars {
            assert!((0.0..WORLD_WIDTH).contains(&s.x));
            assert!((0.5..2.0).contains(&s.size));
            assert!((0.2..0.8).contains(&s.alpha));
            assert!((0.1..0.5).contains(&s.parallax));
        }
    }

    #[test]
    fn test_scrolled_stars_wrap_into_screen() {
        let field = Starfield::new(9);
        for camera_y in [0.0, 200.0, -12_345.0, 98_765.0] {
            for s in &field.stars {
                let y = s.screen_pos(camera_y).y;
                assert!((0.0..=STAR_WRAP).contains(&y), "y = {y}");
            }
        }
    }

    #[test]
    fn test_parallax_is_slower_than_camera() {
        let star = Star {
            x: 10.0,
            y: 500.0,
            size: 1.0,
            alpha: 0.5,
            parallax: 0.25,
        };
        assert_eq!(star.screen_pos(0.0).y, 500.0);
        assert_eq!(star.screen_pos(-400.0).y, 600.0);
    }
}
