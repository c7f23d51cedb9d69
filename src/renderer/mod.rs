//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into flat-colored triangles in
//! logical screen space, then letterboxed onto the surface.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod starfield;
pub mod vertex;

pub use pipeline::{RenderState, logical_to_ndc};
pub use scene::build_scene;
pub use starfield::Starfield;
pub use vertex::Vertex;
