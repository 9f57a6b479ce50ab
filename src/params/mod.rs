//! Parameter definitions with units and documented semantics.
//!
//! All tuning constants are collected here with:
//! - Units (Hz, dB, world units, degrees)
//! - Documented ranges and meanings
//! - Validation where a bad value would break the pipeline

mod audio;
mod render;
mod sphere;

// Re-export all types
pub use audio::{audio_constants, AnalyserConfig};
pub use render::RenderConfig;
pub use sphere::{BandMapping, SphereParams};
