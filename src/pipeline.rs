//! Per-frame orchestration: spectrum → bands → offsets → deformation.

use tracing::trace;

use crate::bands::{band_energy, extract_bands};
use crate::error::Result;
use crate::mapping::modulate;
use crate::noise::NoiseField;
use crate::params::BandMapping;
use crate::sphere::{deform, SphereMesh};
use crate::spectrum::SpectrumSource;

/// Deformation offsets derived from one spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOffsets {
    /// Added to the base radius of every vertex
    pub bass: f64,
    /// Scales the noise displacement
    pub treble: f64,
}

/// What a frame did to the mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Mesh deformed with these offsets (normals now dirty)
    Deformed(FrameOffsets),
    /// Source idle; mesh left frozen at its last state
    Idle,
}

/// Stateless frame pipeline, built once and handed to the drive loop
#[derive(Debug, Clone)]
pub struct FramePipeline {
    mapping: BandMapping,
    amplitude: f32,
}

impl FramePipeline {
    /// Create a pipeline with the given band mapping and noise amplitude
    pub fn new(mapping: BandMapping, amplitude: f32) -> Self {
        Self { mapping, amplitude }
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Map one spectrum to bass and treble offsets.
    ///
    /// Bass energy is shaped by `bass_exponent` before mapping; treble is
    /// mapped linearly. Neither is clamped.
    pub fn compute_offsets(&self, spectrum: &[u8]) -> Result<FrameOffsets> {
        let m = &self.mapping;
        let bands = extract_bands(spectrum, m.split)?;

        let bass_energy = band_energy(bands.bass)?;
        let treble_energy = band_energy(bands.treble)?;

        let (lo, hi) = m.energy_range;
        let bass = modulate(
            bass_energy.powf(m.bass_exponent),
            lo,
            hi,
            m.bass_range.0,
            m.bass_range.1,
        )?;
        let treble = modulate(treble_energy, lo, hi, m.treble_range.0, m.treble_range.1)?;

        Ok(FrameOffsets { bass, treble })
    }

    /// Run one frame against `mesh`.
    ///
    /// An idle source leaves the mesh untouched. Errors abort the frame
    /// before any vertex is written.
    pub fn run_frame<S, N>(
        &self,
        source: &mut S,
        mesh: &mut SphereMesh,
        noise: &N,
    ) -> Result<FrameOutcome>
    where
        S: SpectrumSource + ?Sized,
        N: NoiseField + ?Sized,
    {
        let Some(spectrum) = source.read_spectrum() else {
            return Ok(FrameOutcome::Idle);
        };

        let offsets = self.compute_offsets(spectrum)?;
        deform(
            mesh,
            offsets.bass as f32,
            offsets.treble as f32,
            noise,
            self.amplitude,
        )?;

        trace!(bass = offsets.bass, treble = offsets.treble, "deformed");
        Ok(FrameOutcome::Deformed(offsets))
    }
}

impl Default for FramePipeline {
    fn default() -> Self {
        Self::new(BandMapping::default(), 1.8)
    }
}
