//! WebGPU rendering module
//!
//! Shapes are tessellated on the CPU every frame and drawn as one flat-coloured
//! triangle list on a black canvas.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, canvas_to_ndc};
pub use vertex::Vertex;
