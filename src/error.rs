//! Error types for the audio-to-geometry pipeline and its collaborators.

use thiserror::Error;

/// Errors raised by the core pipeline (bands, mapping, deformation).
///
/// These are configuration or programmer errors. A frame that hits one is
/// dropped and the mesh keeps its previous state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Spectrum too short, empty band, or a non-finite scalar
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Range mapper called with equal (or non-finite) bounds
    #[error("Invalid range: [{lo}, {hi}]")]
    InvalidRange { lo: f64, hi: f64 },

    /// Vertex with zero length, so no direction can be derived
    #[error("Degenerate vertex at index {index}")]
    DegenerateVertex { index: usize },
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Audio playback and analysis errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No audio output device found")]
    NoOutputDevice,

    #[error("Failed to get audio config: {0}")]
    DeviceConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("Failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("Failed to decode track: {0}")]
    Track(#[from] hound::Error),

    #[error("Track contains no audio frames")]
    EmptyTrack,

    #[error("Glicol engine init failed: {0}")]
    Synth(String),

    #[error("Invalid analyser config: {0}")]
    InvalidConfig(String),
}

/// Rendering setup errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("Failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("Failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
