//! Audio system: device playback plus on-demand spectrum analysis.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, info};

use super::analyser::SpectrumAnalyser;
use super::synthesis::SynthPlayer;
use super::track::{Track, TrackPlayer};
use crate::error::AudioError;
use crate::params::AnalyserConfig;
use crate::spectrum::SpectrumSource;

/// What the output stream is currently playing
enum Program {
    Track(TrackPlayer),
    Synth(Box<SynthPlayer>),
}

impl Program {
    fn next_frame(&mut self) -> Option<[f32; 2]> {
        match self {
            Program::Track(player) => player
                .next_frame()
                .map(|[l, r]| [l.clamp(-1.0, 1.0), r.clamp(-1.0, 1.0)]),
            Program::Synth(synth) => Some(synth.next_frame()),
        }
    }
}

/// Playback state shared between the audio callback and the frame thread
struct Playback {
    program: Option<Program>,
    paused: bool,
    /// Most recent mono samples, oldest first
    history: VecDeque<f32>,
    capacity: usize,
}

impl Playback {
    fn new(capacity: usize) -> Self {
        Self {
            program: None,
            paused: false,
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Audio flows only while a program is loaded and not paused
    fn is_active(&self) -> bool {
        self.program.is_some() && !self.paused
    }

    fn start(&mut self, program: Program) {
        self.program = Some(program);
        self.paused = false;
        self.history.clear();
    }

    /// Fill an interleaved output buffer with `channels` samples per frame
    fn fill(&mut self, data: &mut [f32], channels: usize) {
        for frame in data.chunks_mut(channels.max(1)) {
            let next = if self.paused {
                None
            } else {
                self.program.as_mut().and_then(Program::next_frame)
            };

            let Some([left, right]) = next else {
                frame.fill(0.0);
                if !self.paused {
                    // Track finished
                    self.program = None;
                }
                continue;
            };

            let mono = 0.5 * (left + right);
            for (channel, sample) in frame.iter_mut().enumerate() {
                *sample = match channel {
                    0 => left,
                    1 => right,
                    _ => mono,
                };
            }

            if self.history.len() == self.capacity {
                self.history.pop_front();
            }
            self.history.push_back(mono);
        }
    }
}

/// Audio output with a spectrum analyser reading what is being played
pub struct AudioSystem {
    playback: Arc<Mutex<Playback>>,
    analyser: SpectrumAnalyser,
    /// Copy of the latest window, analysed outside the lock
    window: Vec<f32>,
    device_rate: u32,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Open the default output device and start a silent stream
    pub fn new(config: AnalyserConfig) -> Result<Self, AudioError> {
        let analyser = SpectrumAnalyser::new(config)?;
        let window_size = analyser.fft_size();

        let playback = Arc::new(Mutex::new(Playback::new(window_size)));
        let playback_cb = Arc::clone(&playback);

        // Setup audio output device
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let supported = device.default_output_config()?;
        let channels = supported.channels() as usize;
        let device_rate = supported.sample_rate().0;

        info!(
            device = %device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate = device_rate,
            channels,
            "audio output"
        );

        let stream = device.build_output_stream(
            &supported.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                lock(&playback_cb).fill(data, channels);
            },
            |err| error!("Audio stream error: {}", err),
            None,
        )?;
        stream.play()?;

        Ok(Self {
            playback,
            analyser,
            window: Vec::with_capacity(window_size),
            device_rate,
            _stream: stream,
        })
    }

    /// Replace whatever is playing with `track`, starting from the top
    pub fn play_track(&mut self, track: Track) {
        info!(
            track = %track.name,
            duration_s = track.duration_secs(),
            sample_rate = track.sample_rate,
            "playing track"
        );
        let player = TrackPlayer::new(track, self.device_rate);
        lock(&self.playback).start(Program::Track(player));
        self.analyser.reset();
    }

    /// Replace whatever is playing with the procedural composition
    pub fn play_synth(&mut self) -> Result<(), AudioError> {
        let synth = SynthPlayer::new(self.device_rate as usize)?;
        info!("playing procedural composition");
        lock(&self.playback).start(Program::Synth(Box::new(synth)));
        self.analyser.reset();
        Ok(())
    }

    /// Toggle play/pause; returns true when now paused
    pub fn toggle_pause(&self) -> bool {
        let mut playback = lock(&self.playback);
        playback.paused = !playback.paused;
        playback.paused
    }
}

impl SpectrumSource for AudioSystem {
    fn bin_count(&self) -> usize {
        self.analyser.bin_count()
    }

    fn read_spectrum(&mut self) -> Option<&[u8]> {
        {
            let playback = lock(&self.playback);
            if !playback.is_active() {
                return None;
            }
            self.window.clear();
            self.window.extend(playback.history.iter().copied());
        }
        Some(self.analyser.analyse(&self.window))
    }
}

/// Lock playback state, recovering from a panicked holder
fn lock(playback: &Mutex<Playback>) -> MutexGuard<'_, Playback> {
    playback.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_track(len: usize) -> Track {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut bytes = Vec::new();
        let mut writer = hound::WavWriter::new(std::io::Cursor::new(&mut bytes), spec).unwrap();
        for i in 0..len {
            let v = i as f32 / len as f32;
            writer.write_sample(v).unwrap();
            writer.write_sample(-v).unwrap();
        }
        writer.finalize().unwrap();
        Track::from_wav(std::io::Cursor::new(bytes), "ramp").unwrap()
    }

    #[test]
    fn test_idle_until_program_starts() {
        let mut playback = Playback::new(512);
        assert!(!playback.is_active());

        let mut out = [1.0f32; 8];
        playback.fill(&mut out, 2);
        assert!(out.iter().all(|&s| s == 0.0));
        assert!(playback.history.is_empty());
    }

    #[test]
    fn test_fill_writes_channels_and_history() {
        let mut playback = Playback::new(512);
        playback.start(Program::Track(TrackPlayer::new(ramp_track(100), 48000)));

        let mut out = [0.0f32; 12];
        playback.fill(&mut out, 3);

        // Frame 1: left = 0.01, right = -0.01, extra channel gets the mono mix
        assert_eq!(out[3], 0.01);
        assert_eq!(out[4], -0.01);
        assert_eq!(out[5], 0.0);
        assert_eq!(playback.history.len(), 4);
    }

    #[test]
    fn test_history_keeps_latest_window() {
        let mut playback = Playback::new(16);
        playback.start(Program::Track(TrackPlayer::new(ramp_track(100), 48000)));

        let mut out = vec![0.0f32; 2 * 40];
        playback.fill(&mut out, 2);
        assert_eq!(playback.history.len(), 16);
    }

    #[test]
    fn test_pause_outputs_silence_and_idles() {
        let mut playback = Playback::new(512);
        playback.start(Program::Track(TrackPlayer::new(ramp_track(100), 48000)));
        playback.paused = true;
        assert!(!playback.is_active());

        let mut out = [1.0f32; 8];
        playback.fill(&mut out, 2);
        assert!(out.iter().all(|&s| s == 0.0));

        // Paused program is kept for resume
        assert!(playback.program.is_some());
    }

    #[test]
    fn test_track_end_idles_source() {
        let mut playback = Playback::new(512);
        playback.start(Program::Track(TrackPlayer::new(ramp_track(4), 48000)));

        let mut out = [0.0f32; 16];
        playback.fill(&mut out, 2);

        assert!(out[8..].iter().all(|&s| s == 0.0));
        assert!(!playback.is_active());
        assert_eq!(playback.history.len(), 4);
    }
}
