/// Sound engine: the single food-consumed tone, synthesized via rodio.
///
/// The tone is generated once at init as an in-memory WAV buffer and
/// played fire-and-forget through a detached Sink. Sound is a best-effort
/// enhancement: if no audio device exists, `new()` returns None and the
/// game runs silently; playback errors are discarded.
///
/// Build without the "sound" feature to compile the no-op stub instead.

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    const SAMPLE_RATE: u32 = 22050;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_eat: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;
            let sfx_eat = Arc::new(make_wav(&gen_eat_tone()));
            Some(SoundEngine { _stream: stream, handle, sfx_eat })
        }

        /// Play the food-consumed tone. Failures are silently dropped.
        pub fn play_eat(&self) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(self.sfx_eat.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach();
                }
            }
        }
    }

    /// A short bright blip: 880 Hz sine with a touch of second harmonic
    /// and a linear fade-out.
    fn gen_eat_tone() -> Vec<f32> {
        let freq = 880.0_f32;
        let duration = 0.07_f32;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - i as f32 / n as f32;
                let wave = (t * freq * 2.0 * std::f32::consts::PI).sin() * 0.8
                    + (t * freq * 2.0 * 2.0 * std::f32::consts::PI).sin() * 0.2;
                wave * env * 0.3
            })
            .collect()
    }

    /// Wrap mono f32 samples into a 16-bit PCM WAV buffer rodio can decode.
    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let channels: u16 = 1;
        let bits: u16 = 16;
        let byte_rate = SAMPLE_RATE * channels as u32 * bits as u32 / 8;
        let block_align = channels * bits / 8;
        let data_size = samples.len() as u32 * 2;

        let mut buf = Vec::with_capacity(44 + data_size as usize);
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_size).to_le_bytes());
        buf.extend_from_slice(b"WAVE");
        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&channels.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&bits.to_le_bytes());
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());
        for &s in samples {
            let val = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }
        buf
    }
}

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_eat(&self) {}
}
