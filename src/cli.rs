//! Command-line argument parsing.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use sonosphere::bands::SplitConvention;
use sonosphere::params::{AnalyserConfig, BandMapping, SphereParams};

/// Spectrum split point between bass and treble
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitArg {
    /// Cut one bin early and drop the last bin (tuned default)
    Reference,
    /// Cut at the midpoint, every bin counted
    Even,
}

impl From<SplitArg> for SplitConvention {
    fn from(arg: SplitArg) -> Self {
        match arg {
            SplitArg::Reference => SplitConvention::Reference,
            SplitArg::Even => SplitConvention::Even,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Sonosphere")]
#[command(about = "Audio-reactive deforming sphere", long_about = None)]
pub struct Args {
    /// WAV file to play at startup (otherwise a procedural composition plays)
    #[arg(long, value_name = "FILE")]
    pub track: Option<PathBuf>,

    /// Noise displacement amplitude
    #[arg(long, value_name = "SCALE", default_value = "1.8")]
    pub amplitude: f32,

    /// Simplex noise seed
    #[arg(long, default_value = "42")]
    pub seed: u32,

    /// Bass/treble split convention
    #[arg(long, value_enum, default_value_t = SplitArg::Reference)]
    pub split: SplitArg,

    /// Analyser window size in samples (power of 2)
    #[arg(long, value_name = "SAMPLES", default_value = "512")]
    pub fft_size: usize,

    /// Analyser smoothing time constant (0..=1)
    #[arg(long, value_name = "TAU", default_value = "0.3")]
    pub smoothing: f32,

    /// Default log level (RUST_LOG overrides)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn sphere_params(&self) -> SphereParams {
        SphereParams {
            amplitude: self.amplitude,
            noise_seed: self.seed,
            ..Default::default()
        }
    }

    pub fn band_mapping(&self) -> BandMapping {
        BandMapping {
            split: self.split.into(),
            ..Default::default()
        }
    }

    pub fn analyser_config(&self) -> AnalyserConfig {
        AnalyserConfig {
            fft_size: self.fft_size,
            smoothing_time_constant: self.smoothing,
            ..Default::default()
        }
    }
}
