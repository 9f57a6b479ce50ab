//! Sphere geometry parameters and audio-reactive mapping.

use crate::bands::SplitConvention;
use crate::error::{PipelineError, Result};

/// Sphere mesh and deformation parameters
#[derive(Debug, Clone)]
pub struct SphereParams {
    /// Rest radius in world units (every vertex sits here at silence)
    pub radius: f32,

    /// Segments around the equator
    pub width_segments: usize,

    /// Segments from pole to pole
    pub height_segments: usize,

    /// Noise displacement scale (world units per unit noise per unit treble)
    pub amplitude: f32,

    /// Simplex noise seed
    pub noise_seed: u32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 10.0,
            width_segments: 30,
            height_segments: 10,
            amplitude: 1.8,
            noise_seed: 42,
        }
    }
}

impl SphereParams {
    /// Validate parameters (positive finite radius, finite amplitude)
    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(PipelineError::InvalidInput(format!(
                "Sphere radius must be positive, got {}",
                self.radius
            )));
        }
        if !self.amplitude.is_finite() {
            return Err(PipelineError::InvalidInput(format!(
                "Noise amplitude must be finite, got {}",
                self.amplitude
            )));
        }
        if self.width_segments < 3 || self.height_segments < 2 {
            return Err(PipelineError::InvalidInput(format!(
                "Sphere needs at least 3x2 segments, got {}x{}",
                self.width_segments, self.height_segments
            )));
        }
        Ok(())
    }
}

/// Mapping from band energies to deformation offsets
#[derive(Debug, Clone)]
pub struct BandMapping {
    /// Where the spectrum is cut into bass and treble
    pub split: SplitConvention,

    /// Nominal band energy range (energies above `.1` overshoot, unclamped)
    pub energy_range: (f64, f64),

    /// Exponent applied to bass energy before mapping
    /// 0.5 = square root, lifts quiet bass
    pub bass_exponent: f64,

    /// Bass offset range in world units
    /// Formula: radius_offset = modulate(bass^exponent, energy_range, this)
    pub bass_range: (f64, f64),

    /// Treble offset range (multiplies noise * amplitude)
    /// Formula: treble_offset = modulate(treble, energy_range, this)
    pub treble_range: (f64, f64),
}

impl Default for BandMapping {
    fn default() -> Self {
        Self {
            split: SplitConvention::Reference,
            energy_range: (0.0, 1.0),
            bass_exponent: 0.5,
            bass_range: (0.0, 8.0),
            treble_range: (0.0, 4.0),
        }
    }
}
