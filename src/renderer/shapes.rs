//! Shape tessellation for 2D primitives
//!
//! Every function returns a triangle list in logical screen space.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::polar_to_cartesian;

/// Push one triangle
#[inline]
pub fn triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Push a quad as two triangles (corners in winding order)
#[inline]
fn quad(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    triangle(out, a, b, c, color);
    triangle(out, a, c, d, color);
}

/// Filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    let segments = segments.max(3);
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        triangle(
            out,
            center,
            center + polar_to_cartesian(radius, theta1),
            center + polar_to_cartesian(radius, theta2),
            color,
        );
    }
}

/// Filled ellipse rotated by `rotation`
pub fn ellipse(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radii: Vec2,
    rotation: f32,
    color: [f32; 4],
    segments: u32,
) {
    let rot = Vec2::from_angle(rotation);
    let point = |theta: f32| center + rot.rotate(Vec2::new(radii.x * theta.cos(), radii.y * theta.sin()));
    let segments = segments.max(3);
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        triangle(out, center, point(theta1), point(theta2), color);
    }
}

/// Thick arc band between `start` and `end` angles (radians, start < end)
pub fn arc_band(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    width: f32,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments_per_radian: f32,
) {
    let span = end - start;
    if span <= 0.0 {
        return;
    }
    let inner_r = (radius - width / 2.0).max(0.0);
    let outer_r = radius + width / 2.0;
    let num_segments = ((span * segments_per_radian) as u32).max(2);

    for i in 0..num_segments {
        let theta1 = start + span * i as f32 / num_segments as f32;
        let theta2 = start + span * (i + 1) as f32 / num_segments as f32;
        quad(
            out,
            center + polar_to_cartesian(inner_r, theta1),
            center + polar_to_cartesian(outer_r, theta1),
            center + polar_to_cartesian(outer_r, theta2),
            center + polar_to_cartesian(inner_r, theta2),
            color,
        );
    }
}

/// Ring stroke; `dash = Some((on, off))` in arc-length units gives a dashed ring
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    width: f32,
    dash: Option<(f32, f32)>,
    color: [f32; 4],
) {
    const SEGMENTS_PER_RADIAN: f32 = 12.0;
    if radius <= 0.0 {
        return;
    }
    let Some((on, off)) = dash.filter(|(on, off)| *on > 0.0 && *off >= 0.0) else {
        arc_band(out, center, radius, width, 0.0, TAU, color, SEGMENTS_PER_RADIAN);
        return;
    };

    let on_angle = on / radius;
    let period = (on + off) / radius;
    let mut start = 0.0;
    while start < TAU {
        let end = (start + on_angle).min(TAU);
        arc_band(out, center, radius, width, start, end, color, SEGMENTS_PER_RADIAN);
        start += period;
    }
}

/// Stroke through `points` with round joints and caps
pub fn polyline(out: &mut Vec<Vertex>, points: &[Vec2], width: f32, color: [f32; 4]) {
    if points.len() < 2 {
        return;
    }
    let half = width / 2.0;
    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        let dir = (p2 - p1).normalize_or_zero();
        let perp = dir.perp() * half;
        quad(out, p1 + perp, p2 + perp, p2 - perp, p1 - perp, color);
    }
    for p in points {
        circle(out, *p, half, color, 8);
    }
}

/// Soft radial falloff approximated by stacked translucent discs.
/// `inner` is the color at the center; alpha fades to zero at `radius`.
pub fn radial_glow(out: &mut Vec<Vertex>, center: Vec2, radius: f32, inner: [f32; 4], layers: u32) {
    let layers = layers.max(1);
    let step_alpha = inner[3] / layers as f32;
    for i in 0..layers {
        let r = radius * (1.0 - i as f32 / layers as f32);
        circle(out, center, r, [inner[0], inner[1], inner[2], step_alpha], 20);
    }
}

/// Place a local-space polygon point: rotate by `angle`, then translate
#[inline]
pub fn place(local: Vec2, origin: Vec2, angle: f32) -> Vec2 {
    origin + Vec2::from_angle(angle).rotate(local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let mut out = Vec::new();
        circle(&mut out, Vec2::ZERO, 10.0, [1.0; 4], 16);
        assert_eq!(out.len(), 16 * 3);
        for v in &out {
            let p = Vec2::from(v.position);
            assert!(p.length() <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_dashed_ring_has_gaps() {
        let mut solid = Vec::new();
        ring(&mut solid, Vec2::ZERO, 100.0, 2.0, None, [1.0; 4]);
        let mut dashed = Vec::new();
        ring(&mut dashed, Vec2::ZERO, 100.0, 2.0, Some((12.0, 12.0)), [1.0; 4]);
        assert!(!dashed.is_empty());
        assert!(dashed.len() != solid.len());
        // Ring geometry stays within the stroke
        for v in &dashed {
            let r = Vec2::from(v.position).length();
            assert!(r >= 99.0 - 1e-3 && r <= 101.0 + 1e-3);
        }
    }

    #[test]
    fn test_polyline_needs_two_points() {
        let mut out = Vec::new();
        polyline(&mut out, &[Vec2::ZERO], 10.0, [1.0; 4]);
        assert!(out.is_empty());
        polyline(&mut out, &[Vec2::ZERO, Vec2::new(10.0, 0.0)], 10.0, [1.0; 4]);
        assert_eq!(out.len(), 6 + 2 * 8 * 3);
    }

    #[test]
    fn test_place_rotates_then_translates() {
        let p = place(Vec2::new(28.0, 0.0), Vec2::new(100.0, 100.0), std::f32::consts::FRAC_PI_2);
        assert!((p - Vec2::new(100.0, 128.0)).length() < 1e-4);
    }
}
