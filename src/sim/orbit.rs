//! Gravity steering and orbit state machine
//!
//! The ship is either in free flight (`orbit == None`) or orbiting a body.
//! Free flight is constant-speed straight-line motion, bent toward a body
//! only while the player holds on it. Inside the capture zone the ship locks
//! into orbit; releasing the hold slings it along the orbital tangent.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use super::body::{BodyVariant, GravitationalBody};
use super::input::InputIntent;
use super::state::{Orbit, Ship};
use crate::consts::*;
use crate::{cartesian_to_polar, polar_to_cartesian, unit_at};

/// What happened to the ship during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipStep {
    /// Straight-line flight, no steering
    Coasting,
    /// Free flight bent by the targeted body
    Steered,
    /// Entered orbit this frame
    Captured,
    /// Continued orbiting
    Orbiting,
    /// Hold ended while orbiting; ship launched along the tangent
    Slung,
    /// Repulsor pushed the ship past its mid zone
    Ejected,
    /// Orbited body no longer exists; ship dropped to free flight in place
    Lost,
}

/// Velocity change produced by gravity steering, before renormalization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub influence: f32,
    /// Pull toward the body center
    pub radial: Vec2,
    /// Nudge along the body's spin direction
    pub tangential: Vec2,
}

impl Steering {
    #[inline]
    pub fn delta(&self) -> Vec2 {
        self.radial + self.tangential
    }
}

/// Steering a body applies to a ship at `ship_pos`, or `None` outside its
/// influence zone.
///
/// Influence falls off as `(1 - d/gravity_radius)^1.5`, scaled by the body's
/// mass factor. A ship exactly at the center gets full influence with no
/// defined direction.
pub fn steering(body: &GravitationalBody, ship_pos: Vec2) -> Option<Steering> {
    let offset = body.pos - ship_pos;
    let d = offset.length();
    if d >= body.gravity_radius {
        return None;
    }

    let influence = (1.0 - d / body.gravity_radius).powf(INFLUENCE_EXPONENT) * body.size_factor();
    let Some(dir) = offset.try_normalize() else {
        return Some(Steering {
            influence,
            radial: Vec2::ZERO,
            tangential: Vec2::ZERO,
        });
    };

    let tangent_angle = offset.y.atan2(offset.x) + body.spin * FRAC_PI_2;
    Some(Steering {
        influence,
        radial: dir * (PULL_STRENGTH * influence),
        tangential: unit_at(tangent_angle) * (TANGENT_STRENGTH * influence),
    })
}

/// Rescale `vel` to `speed`; a zero vector is left as is
#[inline]
pub fn renormalize(vel: Vec2, speed: f32) -> Vec2 {
    vel.try_normalize().map_or(vel, |dir| dir * speed)
}

/// Advance the ship by one frame against the live body list
pub fn step_ship(
    ship: &mut Ship,
    bodies: &[GravitationalBody],
    intent: &InputIntent,
    speed: f32,
) -> ShipStep {
    let mut slung = false;

    if let Some(orbit) = ship.orbit {
        if intent.hold_active {
            let Some(body) = bodies.iter().find(|b| b.id == orbit.body) else {
                log::debug!("Orbited body {:?} vanished; dropping orbit", orbit.body);
                ship.orbit = None;
                return ShipStep::Lost;
            };
            return step_orbit(ship, orbit, body, speed);
        }
        ship.release();
        slung = true;
    }

    let steered = step_free(ship, bodies, intent, speed);
    match steered {
        ShipStep::Captured => ShipStep::Captured,
        _ if slung => ShipStep::Slung,
        other => other,
    }
}

fn step_orbit(ship: &mut Ship, mut orbit: Orbit, body: &GravitationalBody, speed: f32) -> ShipStep {
    orbit.angle += body.orbit_speed * body.spin;

    let mut ejected = false;
    match body.variant {
        BodyVariant::Singularity => {
            // Never pushes outward, even when captured below the floor
            let decayed = (orbit.radius - SINGULARITY_DECAY).max(body.radius + SINGULARITY_FLOOR_MARGIN);
            orbit.radius = orbit.radius.min(decayed);
        }
        BodyVariant::Repulsor => {
            orbit.radius += REPULSOR_GROWTH;
            ejected = orbit.radius > body.mid_radius;
        }
        _ => {}
    }

    ship.pos = body.pos + polar_to_cartesian(orbit.radius, orbit.angle);
    ship.vel = unit_at(orbit.angle + body.spin * FRAC_PI_2) * speed;

    if ejected {
        log::debug!("Repulsor {:?} ejected ship at r={:.1}", body.id, orbit.radius);
        ship.orbit = None;
        ShipStep::Ejected
    } else {
        ship.orbit = Some(orbit);
        ShipStep::Orbiting
    }
}

fn step_free(
    ship: &mut Ship,
    bodies: &[GravitationalBody],
    intent: &InputIntent,
    speed: f32,
) -> ShipStep {
    ship.pos += ship.vel;

    let Some(target) = intent.steering_target() else {
        return ShipStep::Coasting;
    };
    let Some(body) = bodies.iter().find(|b| b.id == target) else {
        return ShipStep::Coasting;
    };
    let Some(steer) = steering(body, ship.pos) else {
        return ShipStep::Coasting;
    };

    ship.influenced = true;
    ship.vel = renormalize(ship.vel + steer.delta(), speed);

    let (d, angle) = cartesian_to_polar(ship.pos - body.pos);
    if d < body.inner_radius {
        log::debug!("Captured by {:?} ({:?}) at r={:.1}", body.id, body.variant, d);
        ship.orbit = Some(Orbit {
            body: body.id,
            angle,
            radius: d,
        });
        return ShipStep::Captured;
    }
    ShipStep::Steered
}
