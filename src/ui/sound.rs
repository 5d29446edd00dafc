/// Sound engine: procedural 8-bit style sound effects via rodio.
///
/// All sounds are generated as in-memory WAV buffers at init time.
/// Playback is fire-and-forget (non-blocking) via rodio's Sink.
///
/// Compile without the "sound" feature to disable audio entirely
/// (the stub SoundEngine does nothing).

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    const SAMPLE_RATE: u32 = 22050;
    const TAU: f32 = std::f32::consts::PI * 2.0;

    /// Pre-generated WAV buffers for each sound effect.
    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_mine: Arc<Vec<u8>>,
        sfx_pickup: Arc<Vec<u8>>,
        sfx_bump: Arc<Vec<u8>>,
        sfx_lava: Arc<Vec<u8>>,
        sfx_phase: Arc<Vec<u8>>,
        sfx_win: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    log::warn!("audio output unavailable: {e}");
                    return None;
                }
            };

            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_mine: Arc::new(make_wav(&gen_mine())),
                sfx_pickup: Arc::new(make_wav(&gen_pickup())),
                sfx_bump: Arc::new(make_wav(&gen_bump())),
                sfx_lava: Arc::new(make_wav(&gen_lava())),
                sfx_phase: Arc::new(make_wav(&gen_phase())),
                sfx_win: Arc::new(make_wav(&gen_win())),
            })
        }

        fn play(&self, buf: &Arc<Vec<u8>>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach(); // fire-and-forget
                }
            }
        }

        pub fn play_mine(&self) { self.play(&self.sfx_mine); }
        pub fn play_pickup(&self) { self.play(&self.sfx_pickup); }
        pub fn play_bump(&self) { self.play(&self.sfx_bump); }
        pub fn play_lava(&self) { self.play(&self.sfx_lava); }
        pub fn play_phase(&self) { self.play(&self.sfx_phase); }
        pub fn play_win(&self) { self.play(&self.sfx_win); }
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators : all produce Vec<f32> mono samples
    // ════════════════════════════════════════════════════════════

    /// Append one note with a simple harmonic mix.
    fn push_note(samples: &mut Vec<f32>, freq: f32, dur: f32, harmonics: &[(f32, f32)], volume: f32) {
        let n = (SAMPLE_RATE as f32 * dur) as usize;
        for i in 0..n {
            let t = i as f32 / SAMPLE_RATE as f32;
            let env = 1.0 - (i as f32 / n as f32).powf(0.5);
            let wave: f32 = harmonics.iter()
                .map(|&(mult, amp)| (t * freq * mult * TAU).sin() * amp)
                .sum();
            samples.push(wave * env * volume);
        }
    }

    /// Mine: short crunchy noise burst with descending pitch
    fn gen_mine() -> Vec<f32> {
        let duration = 0.10;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        let mut rng: u32 = 12345;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 180.0 + (1.0 - t) * 250.0;
                let ti = i as f32 / SAMPLE_RATE as f32;
                let tone = (ti * freq * TAU).sin();
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                let env = (1.0 - t).powf(0.8);
                (tone * 0.3 + noise * 0.7) * env * 0.3
            })
            .collect()
    }

    /// Resource pickup: quick ascending arpeggio C6→E6→G6
    fn gen_pickup() -> Vec<f32> {
        let mut samples = Vec::new();
        for freq in [1047.0_f32, 1319.0, 1568.0] {
            push_note(&mut samples, freq, 0.04, &[(1.0, 0.7), (3.0, 0.3)], 0.25);
        }
        samples
    }

    /// Blocked move: dull low thud
    fn gen_bump() -> Vec<f32> {
        let mut samples = Vec::new();
        push_note(&mut samples, 110.0, 0.05, &[(1.0, 1.0)], 0.2);
        samples
    }

    /// Lava: sad descending tone A4→F#4→Eb4→C4 with a final fade
    fn gen_lava() -> Vec<f32> {
        let mut samples = Vec::new();
        for freq in [440.0_f32, 370.0, 311.0, 261.0] {
            push_note(&mut samples, freq, 0.12, &[(1.0, 1.0)], 0.3);
        }
        let fade_len = samples.len() / 4;
        let total = samples.len();
        for (i, s) in samples.iter_mut().enumerate().skip(total - fade_len) {
            *s *= (total - i) as f32 / fade_len as f32;
        }
        samples
    }

    /// Phase complete: two-note chime G5, C6
    fn gen_phase() -> Vec<f32> {
        let mut samples = Vec::new();
        push_note(&mut samples, 784.0, 0.08, &[(1.0, 0.7), (2.0, 0.3)], 0.3);
        push_note(&mut samples, 1047.0, 0.15, &[(1.0, 0.7), (2.0, 0.3)], 0.3);
        samples
    }

    /// Win: ascending fanfare C5→E5→G5→C6 with sustained last note
    fn gen_win() -> Vec<f32> {
        let mut samples = Vec::new();
        for freq in [523.0_f32, 659.0, 784.0, 1047.0] {
            push_note(&mut samples, freq, 0.1, &[(1.0, 0.6), (2.0, 0.3), (3.0, 0.1)], 0.3);
        }
        push_note(&mut samples, 1047.0, 0.25, &[(1.0, 1.0)], 0.3);
        samples
    }

    // ════════════════════════════════════════════════════════════
    //  WAV encoder : wraps f32 samples into a valid WAV buffer
    // ════════════════════════════════════════════════════════════

    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let num_channels: u16 = 1;
        let bits_per_sample: u16 = 16;
        let byte_rate = SAMPLE_RATE * (num_channels as u32) * (bits_per_sample as u32) / 8;
        let block_align = num_channels * bits_per_sample / 8;
        let data_size = samples.len() as u32 * 2;
        let file_size = 36 + data_size;

        let mut buf = Vec::with_capacity(44 + data_size as usize);

        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&file_size.to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&num_channels.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&bits_per_sample.to_le_bytes());

        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());

        for &s in samples {
            let val = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }

        buf
    }

}

// ════════════════════════════════════════════════════════════
//  Public API : compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_mine(&self) {}
    pub fn play_pickup(&self) {}
    pub fn play_bump(&self) {}
    pub fn play_lava(&self) {}
    pub fn play_phase(&self) {}
    pub fn play_win(&self) {}
}
