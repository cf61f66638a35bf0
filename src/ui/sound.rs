/// Sound cues: short procedural chiptune effects played through rodio.
///
/// Each cue is synthesized once at startup into an in-memory WAV buffer.
/// Playback is fire-and-forget on a detached sink, so the game loop never
/// waits on audio.
///
/// Without the "sound" feature the engine is a stub whose methods do
/// nothing.

use crate::sim::event::GameEvent;

/// Everything the game can make a noise about.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cue {
    Dot,
    Power,
    Capture,
    Die,
    Win,
    GameOver,
}

impl Cue {
    pub const ALL: [Cue; 6] = [Cue::Dot, Cue::Power, Cue::Capture, Cue::Die, Cue::Win, Cue::GameOver];

    #[cfg_attr(not(feature = "sound"), allow(dead_code))]
    fn index(self) -> usize {
        self as usize
    }
}

/// Which cue, if any, accompanies an event.
pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::DotEaten { .. } => Some(Cue::Dot),
        GameEvent::PowerPicked { .. } => Some(Cue::Power),
        GameEvent::HostileCaught { .. } => Some(Cue::Capture),
        GameEvent::PlayerCaught { .. } | GameEvent::PlayerKilled { .. } => Some(Cue::Die),
        GameEvent::AllDotsEaten => Some(Cue::Win),
        GameEvent::GameOver => Some(Cue::GameOver),
        GameEvent::QuitRequested => None,
    }
}

#[cfg(feature = "sound")]
mod inner {
    use std::f32::consts::TAU;
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::Cue;

    pub(super) const SAMPLE_RATE: u32 = 22050;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        buffers: Vec<Arc<Vec<u8>>>,
    }

    impl SoundEngine {
        /// `None` when no output device is available.
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;
            let buffers = Cue::ALL
                .iter()
                .map(|cue| Arc::new(encode_wav(&synth(cue_notes(*cue)))))
                .collect();
            Some(SoundEngine { _stream: stream, handle, buffers })
        }

        pub fn play(&self, cue: Cue) {
            let Some(buf) = self.buffers.get(cue.index()) else { return };
            let Ok(sink) = Sink::try_new(&self.handle) else { return };
            if let Ok(src) = rodio::Decoder::new(Cursor::new(buf.as_ref().clone())) {
                sink.append(src);
                sink.detach();
            }
        }
    }

    /// One tone of a cue: frequency (Hz), length (s), loudness.
    #[derive(Clone, Copy)]
    pub(super) struct Note(pub f32, pub f32, pub f32);

    pub(super) fn cue_notes(cue: Cue) -> &'static [Note] {
        match cue {
            Cue::Dot => &[Note(880.0, 0.03, 0.15)],
            // Rising C major arpeggio
            Cue::Power => &[
                Note(523.0, 0.05, 0.25),
                Note(659.0, 0.05, 0.25),
                Note(784.0, 0.05, 0.25),
                Note(1047.0, 0.10, 0.25),
            ],
            Cue::Capture => &[Note(1319.0, 0.04, 0.3), Note(1568.0, 0.08, 0.3)],
            Cue::Die => &[
                Note(440.0, 0.12, 0.3),
                Note(370.0, 0.12, 0.3),
                Note(311.0, 0.12, 0.3),
                Note(261.0, 0.20, 0.3),
            ],
            Cue::Win => &[
                Note(523.0, 0.10, 0.3),
                Note(659.0, 0.10, 0.3),
                Note(784.0, 0.10, 0.3),
                Note(1047.0, 0.35, 0.3),
            ],
            Cue::GameOver => &[Note(196.0, 0.25, 0.3), Note(147.0, 0.45, 0.3)],
        }
    }

    /// Render notes back to back. Each note is a sine with a touch of the
    /// third harmonic and a linear decay.
    pub(super) fn synth(notes: &[Note]) -> Vec<f32> {
        let mut out = Vec::new();
        for &Note(freq, secs, volume) in notes {
            let n = (SAMPLE_RATE as f32 * secs) as usize;
            out.extend((0..n).map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - i as f32 / n as f32;
                let wave = (t * freq * TAU).sin() * 0.8 + (t * freq * 3.0 * TAU).sin() * 0.2;
                wave * env * volume
            }));
        }
        out
    }

    /// 16-bit mono PCM WAV.
    pub(super) fn encode_wav(samples: &[f32]) -> Vec<u8> {
        const HEADER_LEN: usize = 44;
        let data_len = (samples.len() * 2) as u32;

        let mut buf = Vec::with_capacity(HEADER_LEN + data_len as usize);
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_len).to_le_bytes());
        buf.extend_from_slice(b"WAVEfmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&1u16.to_le_bytes()); // mono
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
        buf.extend_from_slice(&2u16.to_le_bytes()); // block align
        buf.extend_from_slice(&16u16.to_le_bytes());
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_len.to_le_bytes());
        for s in samples {
            buf.extend_from_slice(&((s.clamp(-1.0, 1.0) * 32767.0) as i16).to_le_bytes());
        }
        buf
    }
}

// ════════════════════════════════════════════════════════════
//  Public API: no-ops when the sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> {
        Some(SoundEngine)
    }
    pub fn play(&self, _cue: Cue) {}
}
