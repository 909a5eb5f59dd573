//! Rendering module
//!
//! Confetti is drawn as flat-colored convex polygons: the sim geometry is
//! batched into triangles on the CPU and handed to WebGPU once per frame.

pub mod batch;
pub mod confetti;
pub mod pipeline;
pub mod vertex;

pub use batch::{DrawSurface, VertexBatch};
pub use confetti::{draw_paper, draw_ribbon, draw_state};
pub use pipeline::ConfettiRenderer;
pub use vertex::Vertex;
