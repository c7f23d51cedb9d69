//! Scene construction
//!
//! Turns a read-only view of the world into a triangle list in logical
//! screen space (750x1334, y down, camera already subtracted). Nothing here
//! mutates simulation state.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_3, TAU};

use super::shapes;
use super::starfield::Starfield;
use super::vertex::{Vertex, colors};
use crate::sim::{BodyVariant, GravitationalBody, InputIntent, Ship, World};

/// Ship hull outline in local space, nose along +x
const HULL: [Vec2; 4] = [
    Vec2::new(28.0, 0.0),
    Vec2::new(-12.0, -14.0),
    Vec2::new(-6.0, 0.0),
    Vec2::new(-12.0, 14.0),
];
/// Engine flare center in local space
const FLARE_OFFSET: Vec2 = Vec2::new(-15.0, 0.0);
const COCKPIT_OFFSET: Vec2 = Vec2::new(4.0, 0.0);
const COCKPIT_RADII: Vec2 = Vec2::new(8.0, 4.0);

const SPOKE_COUNT: u32 = 6;
const SPOKE_GAP: f32 = 5.0;
const SPOKE_LENGTH: f32 = 15.0;
const SPOKE_HALF_WIDTH: f32 = 5.0;

const BODY_SEGMENTS: u32 = 48;

/// How the ship currently relates to one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    /// Ship is orbiting this body
    pub orbited: bool,
    /// Body is the player's current target
    pub targeted: bool,
    /// Targeted, not orbited, and the ship is inside the gravity zone
    pub influencing: bool,
    /// Ship distance from the body center
    pub distance: f32,
}

impl Interaction {
    pub fn of(body: &GravitationalBody, ship: &Ship, intent: &InputIntent) -> Self {
        let orbited = ship.orbiting() == Some(body.id);
        let targeted = intent.target == Some(body.id);
        let distance = ship.pos.distance(body.pos);
        Self {
            orbited,
            targeted,
            influencing: targeted && !orbited && distance < body.gravity_radius,
            distance,
        }
    }

    fn engaged(&self) -> bool {
        self.orbited || self.targeted || self.influencing
    }
}

/// Stroke for one zone ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingStyle {
    pub color: [f32; 4],
    pub width: f32,
    pub dash: Option<(f32, f32)>,
}

/// Ring stroke for a zone of `radius` drawn at `base_alpha` / `weight`
pub fn ring_style(
    interaction: &Interaction,
    radius: f32,
    base_alpha: f32,
    weight: f32,
    dash: Option<(f32, f32)>,
) -> RingStyle {
    let lit = interaction.influencing && interaction.distance < radius;
    let color = if interaction.orbited {
        colors::with_alpha(colors::ZONE_ORBITED, (base_alpha * 1.5).min(1.0))
    } else if lit {
        colors::with_alpha(colors::WHITE, (base_alpha * 2.5).min(1.0))
    } else {
        colors::with_alpha(colors::ZONE_IDLE, base_alpha)
    };
    RingStyle {
        color,
        width: if lit { weight * 2.5 } else { weight },
        dash,
    }
}

/// The three zone rings, outermost first
pub fn zone_rings(body: &GravitationalBody, interaction: &Interaction) -> [(f32, RingStyle); 3] {
    [
        (
            body.gravity_radius,
            ring_style(interaction, body.gravity_radius, 0.18, 1.2, Some((12.0, 12.0))),
        ),
        (
            body.mid_radius,
            ring_style(interaction, body.mid_radius, 0.28, 1.5, Some((6.0, 4.0))),
        ),
        (
            body.inner_radius,
            ring_style(interaction, body.inner_radius, 0.45, 2.0, None),
        ),
    ]
}

/// Core fill, glow color and glow spread for a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreStyle {
    pub core: [f32; 4],
    pub glow: [f32; 4],
    pub glow_size: f32,
}

pub fn core_style(body: &GravitationalBody, interaction: &Interaction) -> CoreStyle {
    let r = body.radius;
    if interaction.orbited {
        CoreStyle {
            core: colors::CORE_ORBITED,
            glow: colors::AMBER,
            glow_size: 50.0 + r / 1.2,
        }
    } else if interaction.influencing {
        CoreStyle {
            core: colors::CORE_INFLUENCING,
            glow: colors::WHITE,
            glow_size: 40.0 + r / 1.2,
        }
    } else if interaction.targeted {
        CoreStyle {
            core: colors::CORE_TARGETED,
            glow: colors::GLOW_TARGETED,
            glow_size: 35.0 + r,
        }
    } else {
        let (core, glow) = match body.variant {
            BodyVariant::Singularity => (colors::CORE_SINGULARITY, colors::GLOW_SINGULARITY),
            BodyVariant::Repulsor => (colors::CORE_REPULSOR, colors::GLOW_REPULSOR),
            _ => (colors::CORE_NORMAL, colors::GLOW_NORMAL),
        };
        CoreStyle {
            core,
            glow,
            glow_size: 25.0 + r / 1.5,
        }
    }
}

pub fn spoke_color(interaction: &Interaction) -> [f32; 4] {
    if interaction.orbited {
        colors::AMBER
    } else if interaction.influencing {
        colors::WHITE
    } else if interaction.targeted {
        colors::with_alpha(colors::WHITE, 0.6)
    } else {
        colors::with_alpha(colors::WHITE, 0.3)
    }
}

/// Rotation of the collector spokes at `frame`
pub fn spoke_rotation(body: &GravitationalBody, frame: u64) -> f32 {
    (frame as f32 * body.orbit_speed * 0.5 * body.spin).rem_euclid(TAU)
}

/// Trail stroke (color, width)
pub fn trail_style(ship: &Ship) -> ([f32; 4], f32) {
    let color = if ship.is_orbiting() {
        colors::TRAIL_ORBITING
    } else if ship.influenced {
        colors::TRAIL_INFLUENCED
    } else {
        colors::TRAIL_IDLE
    };
    (color, if ship.influenced { 14.0 } else { 10.0 })
}

/// Engine flare flicker in [0, 10), a pure function of the frame number
pub fn flicker(frame: u64) -> f32 {
    let h = frame.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 40;
    (h % 1000) as f32 / 100.0
}

pub fn flare_radius(ship: &Ship, frame: u64) -> f32 {
    let base = if ship.influenced { 30.0 } else { 18.0 };
    base + flicker(frame)
}

/// Ship heading in radians (nose direction)
pub fn heading(ship: &Ship) -> f32 {
    ship.vel.y.atan2(ship.vel.x)
}

/// Build every triangle for one frame
pub fn build_scene(world: &World, intent: &InputIntent, stars: &Starfield) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(16_384);
    let cam = Vec2::new(0.0, world.camera_y);

    for star in &stars.stars {
        shapes::circle(
            &mut out,
            star.screen_pos(world.camera_y),
            star.size,
            colors::with_alpha(colors::STAR, star.alpha),
            6,
        );
    }

    for body in &world.bodies {
        let interaction = Interaction::of(body, &world.ship, intent);
        push_body(&mut out, body, &interaction, body.pos - cam, world.frame);
    }

    push_trail(&mut out, &world.ship, cam);
    push_ship(&mut out, &world.ship, world.ship.pos - cam, world.frame);

    out
}

fn push_body(
    out: &mut Vec<Vertex>,
    body: &GravitationalBody,
    interaction: &Interaction,
    center: Vec2,
    frame: u64,
) {
    for (radius, style) in zone_rings(body, interaction) {
        shapes::ring(out, center, radius, style.width, style.dash, style.color);
    }

    // Collector spokes just outside the capture ring
    let rotation = spoke_rotation(body, frame);
    let base_r = body.inner_radius + SPOKE_GAP;
    let color = spoke_color(interaction);
    for i in 1..=SPOKE_COUNT {
        let angle = rotation + i as f32 * FRAC_PI_3;
        shapes::triangle(
            out,
            shapes::place(Vec2::new(base_r, -SPOKE_HALF_WIDTH), center, angle),
            shapes::place(Vec2::new(base_r + SPOKE_LENGTH, 0.0), center, angle),
            shapes::place(Vec2::new(base_r, SPOKE_HALF_WIDTH), center, angle),
            color,
        );
    }

    let style = core_style(body, interaction);
    let drawn = body.drawn_radius();
    shapes::radial_glow(
        out,
        center,
        drawn + style.glow_size * 0.6,
        colors::with_alpha(style.glow, 0.5),
        8,
    );
    shapes::circle(out, center, drawn, style.core, BODY_SEGMENTS);

    let (alpha, width) = if interaction.engaged() {
        (0.67, 4.0)
    } else {
        (0.4, 2.0)
    };
    shapes::arc_band(
        out,
        center,
        body.radius * 0.8,
        width,
        0.5,
        2.5,
        colors::with_alpha(colors::WHITE, alpha),
        12.0,
    );
}

fn push_trail(out: &mut Vec<Vertex>, ship: &Ship, cam: Vec2) {
    if ship.trail.len() <= 2 {
        return;
    }
    let points: Vec<Vec2> = ship.trail.iter().map(|p| *p - cam).collect();
    let (color, width) = trail_style(ship);
    shapes::polyline(out, &points, width, color);
}

fn push_ship(out: &mut Vec<Vertex>, ship: &Ship, origin: Vec2, frame: u64) {
    let angle = heading(ship);

    let flare_color = if ship.influenced {
        colors::WHITE
    } else {
        colors::FLARE
    };
    shapes::radial_glow(
        out,
        shapes::place(FLARE_OFFSET, origin, angle),
        flare_radius(ship, frame),
        flare_color,
        6,
    );

    let (halo_color, halo) = match (ship.is_orbiting(), ship.influenced) {
        (true, true) => (colors::AMBER, 35.0),
        (true, false) => (colors::AMBER, 20.0),
        (false, true) => (colors::WHITE, 35.0),
        (false, false) => (colors::WHITE, 20.0),
    };
    shapes::radial_glow(out, origin, halo, colors::with_alpha(halo_color, 0.35), 5);

    // Concave hull: fan from the notch at (-6, 0)
    let [nose, left, notch, right] = HULL.map(|p| shapes::place(p, origin, angle));
    shapes::triangle(out, notch, nose, left, colors::WHITE);
    shapes::triangle(out, notch, right, nose, colors::WHITE);

    let cockpit = if ship.is_orbiting() {
        colors::AMBER
    } else {
        colors::COCKPIT
    };
    shapes::ellipse(
        out,
        shapes::place(COCKPIT_OFFSET, origin, angle),
        COCKPIT_RADII,
        angle,
        cockpit,
        16,
    );
}
