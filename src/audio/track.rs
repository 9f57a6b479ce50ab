//! WAV track decoding and resampled playback.

use std::io::Read;
use std::path::Path;

use crate::error::AudioError;

/// Decoded audio track (stereo frames, -1.0..=1.0)
#[derive(Debug, Clone)]
pub struct Track {
    /// Display name (file name without extension)
    pub name: String,
    pub sample_rate: u32,
    frames: Vec<[f32; 2]>,
}

impl Track {
    /// Decode a WAV file from disk
    pub fn open(path: &Path) -> Result<Self, AudioError> {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());
        let reader = hound::WavReader::open(path)?;
        Self::decode(reader, name)
    }

    /// Decode a WAV stream (integer or float samples, any channel count)
    pub fn from_wav<R: Read>(reader: R, name: impl Into<String>) -> Result<Self, AudioError> {
        Self::decode(hound::WavReader::new(reader)?, name.into())
    }

    fn decode<R: Read>(
        mut reader: hound::WavReader<R>,
        name: String,
    ) -> Result<Self, AudioError> {
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
            hound::SampleFormat::Int => {
                let scale = 1.0 / (1u64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<Result<_, _>>()?
            }
        };

        // Mono duplicates into both sides; extra channels are ignored
        let frames: Vec<[f32; 2]> = samples
            .chunks_exact(channels)
            .map(|c| [c[0], c.get(1).copied().unwrap_or(c[0])])
            .collect();

        if frames.is_empty() {
            return Err(AudioError::EmptyTrack);
        }

        Ok(Self {
            name,
            sample_rate: spec.sample_rate,
            frames,
        })
    }

    pub fn frames(&self) -> &[[f32; 2]] {
        &self.frames
    }

    pub fn duration_secs(&self) -> f32 {
        self.frames.len() as f32 / self.sample_rate as f32
    }
}

/// Plays a track at a device sample rate with linear interpolation
#[derive(Debug)]
pub struct TrackPlayer {
    track: Track,
    /// Read position in track frames
    cursor: f64,
    /// Track frames advanced per output frame
    step: f64,
}

impl TrackPlayer {
    pub fn new(track: Track, device_rate: u32) -> Self {
        let step = track.sample_rate as f64 / device_rate.max(1) as f64;
        Self {
            track,
            cursor: 0.0,
            step,
        }
    }

    /// Next output frame, or `None` once the track has finished
    pub fn next_frame(&mut self) -> Option<[f32; 2]> {
        let frames = &self.track.frames;
        let index = self.cursor as usize;
        let current = *frames.get(index)?;
        let next = frames.get(index + 1).copied().unwrap_or(current);

        let t = (self.cursor - index as f64) as f32;
        self.cursor += self.step;

        Some([
            current[0] + (next[0] - current[0]) * t,
            current[1] + (next[1] - current[1]) * t,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    type Writer<'a> = hound::WavWriter<Cursor<&'a mut Vec<u8>>>;

    fn wav_bytes(spec: hound::WavSpec, write: impl FnOnce(&mut Writer<'_>)) -> Vec<u8> {
        let mut bytes = Vec::new();
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
        write(&mut writer);
        writer.finalize().unwrap();
        bytes
    }

    #[test]
    fn test_decodes_mono_int_track() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let bytes = wav_bytes(spec, |w| {
            for v in [0i16, 16384, -32768, 32767] {
                w.write_sample(v).unwrap();
            }
        });

        let track = Track::from_wav(Cursor::new(bytes), "beat").unwrap();
        assert_eq!(track.name, "beat");
        assert_eq!(track.sample_rate, 8000);
        assert_eq!(track.frames().len(), 4);
        assert_eq!(track.frames()[1], [0.5f32, 0.5]);
        assert_eq!(track.frames()[2], [-1.0f32, -1.0]);
        assert!((track.duration_secs() - 0.0005).abs() < 1e-9);
    }

    #[test]
    fn test_decodes_stereo_float_track() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let bytes = wav_bytes(spec, |w| {
            for v in [0.25f32, -0.25, 0.5, -0.5] {
                w.write_sample(v).unwrap();
            }
        });

        let track = Track::from_wav(Cursor::new(bytes), "pad").unwrap();
        let expected: [[f32; 2]; 2] = [[0.25, -0.25], [0.5, -0.5]];
        assert_eq!(track.frames(), &expected);
    }

    #[test]
    fn test_rejects_empty_track() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let bytes = wav_bytes(spec, |_| {});

        assert!(matches!(
            Track::from_wav(Cursor::new(bytes), "silence"),
            Err(AudioError::EmptyTrack)
        ));
    }

    #[test]
    fn test_player_interpolates_and_finishes() {
        let track = Track {
            name: "ramp".to_string(),
            sample_rate: 100,
            frames: vec![[0.0, 0.0], [1.0, -1.0]],
        };

        // Device runs twice as fast as the track: half-step interpolation
        let mut player = TrackPlayer::new(track, 200);
        assert_eq!(player.next_frame(), Some([0.0, 0.0]));
        assert_eq!(player.next_frame(), Some([0.5, -0.5]));
        assert_eq!(player.next_frame(), Some([1.0, -1.0]));
        assert_eq!(player.next_frame(), Some([1.0, -1.0]));
        assert_eq!(player.next_frame(), None);
    }
}
