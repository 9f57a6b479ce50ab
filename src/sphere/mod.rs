//! Sphere mesh with audio-reactive radial deformation.

mod deform;
mod mesh;

// Re-export public types
pub use deform::deform;
pub use mesh::{SphereMesh, Vertex};
