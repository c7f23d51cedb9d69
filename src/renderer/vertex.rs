//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements (sRGB, converted to linear in the shader)
pub mod colors {
    /// Build a color from a 0xRRGGBB literal
    pub const fn hex(rgb: u32, alpha: f32) -> [f32; 4] {
        [
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            alpha,
        ]
    }

    /// Same color, different alpha
    pub const fn with_alpha(c: [f32; 4], alpha: f32) -> [f32; 4] {
        [c[0], c[1], c[2], alpha]
    }

    pub const STAR: [f32; 4] = hex(0xffffff, 1.0);
    pub const WHITE: [f32; 4] = hex(0xffffff, 1.0);

    /// Zone rings
    pub const ZONE_IDLE: [f32; 4] = hex(0x3b82f6, 1.0);
    pub const ZONE_ORBITED: [f32; 4] = hex(0xfbbf24, 1.0);

    /// Body cores and glows
    pub const AMBER: [f32; 4] = hex(0xfbbf24, 1.0);
    pub const CORE_NORMAL: [f32; 4] = hex(0x1e3a8a, 1.0);
    pub const GLOW_NORMAL: [f32; 4] = hex(0x3b82f6, 1.0);
    pub const CORE_ORBITED: [f32; 4] = hex(0xb45309, 1.0);
    pub const CORE_INFLUENCING: [f32; 4] = hex(0x2563eb, 1.0);
    pub const CORE_TARGETED: [f32; 4] = hex(0x1d4ed8, 1.0);
    pub const GLOW_TARGETED: [f32; 4] = hex(0x93c5fd, 1.0);
    pub const CORE_SINGULARITY: [f32; 4] = hex(0x2e1065, 1.0);
    pub const GLOW_SINGULARITY: [f32; 4] = hex(0xa855f7, 1.0);
    pub const CORE_REPULSOR: [f32; 4] = hex(0x451a03, 1.0);
    pub const GLOW_REPULSOR: [f32; 4] = hex(0xeab308, 1.0);

    /// Ship
    pub const TRAIL_IDLE: [f32; 4] = hex(0x60a5fa, 0.6);
    pub const TRAIL_ORBITING: [f32; 4] = hex(0xfbbf24, 0.7);
    pub const TRAIL_INFLUENCED: [f32; 4] = hex(0xffffff, 0.7);
    pub const FLARE: [f32; 4] = hex(0xf59e0b, 1.0);
    pub const COCKPIT: [f32; 4] = hex(0x3b82f6, 1.0);
}

#[cfg(test)]
mod tests {
    use super::colors::*;

    #[test]
    fn test_hex() {
        assert_eq!(hex(0xff0000, 0.5), [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(with_alpha(WHITE, 0.25), [1.0, 1.0, 1.0, 0.25]);
    }
}
