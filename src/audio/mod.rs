//! Audio playback and spectrum analysis.
//!
//! Plays a WAV track (or Glicol procedural music) through cpal and
//! analyses the most recent output window into a byte spectrum.

mod analyser;
mod synthesis;
mod system;
mod track;

pub use analyser::{blackman_window, SpectrumAnalyser};
pub use synthesis::{SynthPlayer, GLICOL_COMPOSITION};
pub use system::AudioSystem;
pub use track::{Track, TrackPlayer};
