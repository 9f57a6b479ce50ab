//! Procedural music played when no track is loaded.

use glicol::Engine;

use crate::error::AudioError;
use crate::params::audio_constants::BLOCK_SIZE;

/// Glicol composition (procedural music code)
pub const GLICOL_COMPOSITION: &str = r#"
~gate: speed 2.0 >> seq 60 _60 _~a 48
~a: choose 48 48 48 72 0 0 0
~amp: ~gate >> envperc 0.001 0.1
~pit: ~gate >> mul 261.63
~lead: saw ~pit >> mul ~amp >> lpf ~mod 5.0 >> mul 0.1
~mod: sin 0.2 >> mul 1300 >> add 1500
o: ~lead >> plate 0.1
"#;

/// Block-based synth adapted to frame-by-frame pulls
pub struct SynthPlayer {
    engine: Engine<BLOCK_SIZE>,
    block: Vec<[f32; 2]>,
    position: usize,
}

impl SynthPlayer {
    /// Create engine at the output device rate
    pub fn new(sample_rate_hz: usize) -> Result<Self, AudioError> {
        let mut engine = Engine::<BLOCK_SIZE>::new();
        engine.set_sr(sample_rate_hz);
        engine.update_with_code(GLICOL_COMPOSITION);
        engine
            .update()
            .map_err(|e| AudioError::Synth(format!("{:?}", e)))?;

        Ok(Self {
            engine,
            block: Vec::with_capacity(BLOCK_SIZE),
            position: 0,
        })
    }

    /// Next output frame (the synth never finishes)
    pub fn next_frame(&mut self) -> [f32; 2] {
        if self.position >= self.block.len() {
            let (buffers, _) = self.engine.next_block(vec![]);
            self.block.clear();
            for i in 0..BLOCK_SIZE {
                // Safety limiter: hard clip to ±0.5 to prevent ear damage
                let left = buffers[0][i].clamp(-0.5, 0.5);
                let right = buffers[1][i].clamp(-0.5, 0.5);
                self.block.push([left, right]);
            }
            self.position = 0;
        }

        let frame = self.block[self.position];
        self.position += 1;
        frame
    }
}
