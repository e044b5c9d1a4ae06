//! Procedural sound effects and background music.
//!
//! Everything is generated once at startup as 16-bit mono PCM, so no asset
//! files ship with the game.

use std::f32::consts::TAU;

use rand::Rng;

use super::Cue;

pub const SAMPLE_RATE: u32 = 44_100;

/// A ready-to-play buffer with its mixing volume.
#[derive(Clone, Debug)]
pub struct Clip {
    pub samples: Vec<i16>,
    pub volume: f32,
}

/// Every sound the game uses, synthesised up front.
#[derive(Clone, Debug)]
pub struct SoundBank {
    effects: Vec<(Cue, Clip)>,
    pub music: Clip,
}

impl SoundBank {
    pub fn generate(rng: &mut impl Rng) -> Self {
        let effects = vec![
            (Cue::Jetpack, Clip { samples: jetpack(rng), volume: 0.4 }),
            (Cue::Explosion, Clip { samples: explosion(rng), volume: 0.7 }),
            (Cue::Coin, Clip { samples: coin(), volume: 0.5 }),
            (Cue::Laser, Clip { samples: laser(), volume: 0.5 }),
            (Cue::Menu, Clip { samples: menu(), volume: 0.6 }),
            (Cue::GameOver, Clip { samples: game_over(), volume: 0.7 }),
        ];
        log::debug!("synthesised {} sound effects", effects.len());
        SoundBank { effects, music: Clip { samples: music(), volume: 0.5 } }
    }

    pub fn get(&self, cue: Cue) -> Option<&Clip> {
        self.effects.iter().find(|(c, _)| *c == cue).map(|(_, clip)| clip)
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn tone(freq: f32, amplitude: f32, t: f32) -> i16 {
    (i16::MAX as f32 * amplitude * (TAU * freq * t).sin()) as i16
}

fn seconds(i: usize) -> f32 {
    i as f32 / SAMPLE_RATE as f32
}

/// Consecutive equal-length sine notes.
fn notes(freqs: &[f32], note_len: usize, amplitude: f32) -> Vec<i16> {
    let mut samples = vec![0; freqs.len() * note_len];
    for (n, freq) in freqs.iter().enumerate() {
        for j in 0..note_len {
            samples[n * note_len + j] = tone(*freq, amplitude, seconds(j));
        }
    }
    samples
}

// ── Effects ──────────────────────────────────────────────────────────────────

/// One second of white noise, looped while thrusting.
pub fn jetpack(rng: &mut impl Rng) -> Vec<i16> {
    (0..SAMPLE_RATE).map(|_| rng.gen::<i16>()).collect()
}

/// Half a second of noise fading linearly to silence.
pub fn explosion(rng: &mut impl Rng) -> Vec<i16> {
    let len = SAMPLE_RATE as usize / 2;
    (0..len)
        .map(|i| (rng.gen::<i16>() as f32 * (1.0 - i as f32 / len as f32)) as i16)
        .collect()
}

/// Five rising beeps, 800 Hz to 1600 Hz.
pub fn coin() -> Vec<i16> {
    let freqs: Vec<f32> = (0..5).map(|i| 800.0 + i as f32 * 200.0).collect();
    notes(&freqs, 2205, 0.6)
}

/// A quarter-second zap sweeping down from 2 kHz.
pub fn laser() -> Vec<i16> {
    let len = SAMPLE_RATE as usize / 4;
    (0..len)
        .map(|i| {
            let freq = 2000.0 - 1500.0 * (i as f32 / len as f32);
            tone(freq, 0.6, seconds(i))
        })
        .collect()
}

/// Short 1.2 kHz beep.
pub fn menu() -> Vec<i16> {
    let len = SAMPLE_RATE as usize / 8;
    (0..len).map(|i| tone(1200.0, 0.5, seconds(i))).collect()
}

/// Four falling notes, 800 Hz down to 200 Hz.
pub fn game_over() -> Vec<i16> {
    let freqs: Vec<f32> = (0..4).map(|i| 800.0 - i as f32 * 200.0).collect();
    notes(&freqs, 5512, 0.7)
}

// ── Music ────────────────────────────────────────────────────────────────────

pub const MUSIC_SECONDS: usize = 10;
const MELODY: [f32; 8] = [262.0, 294.0, 330.0, 349.0, 392.0, 440.0, 494.0, 523.0];
const BASSLINE: [f32; 4] = [65.0, 73.0, 82.0, 98.0];

/// Ten seconds of chiptune: a C-major scale over a four-note bass line,
/// repeated every two seconds.
pub fn music() -> Vec<i16> {
    let rate = SAMPLE_RATE as usize;
    let total = MUSIC_SECONDS * rate;
    let note_len = rate / 4;
    let bass_len = rate / 2;
    let mut mix = vec![0.0f32; total];

    for block in (0..total).step_by(note_len * MELODY.len()) {
        for (j, freq) in MELODY.iter().enumerate() {
            let start = block + j * note_len;
            for k in 0..note_len.min(total.saturating_sub(start)) {
                mix[start + k] += 8000.0 * envelope(k, note_len) * (TAU * freq * seconds(k)).sin();
            }
        }
        for (j, freq) in BASSLINE.iter().enumerate() {
            let start = block + j * bass_len;
            for k in 0..bass_len.min(total.saturating_sub(start)) {
                mix[start + k] += 4800.0 * (TAU * freq * seconds(k)).sin();
            }
        }
    }

    mix.into_iter().map(|s| s.clamp(i16::MIN as f32, i16::MAX as f32) as i16).collect()
}

/// Attack over the first 10% of a note, release over the last 30%.
fn envelope(k: usize, len: usize) -> f32 {
    let pos = k as f32 / len as f32;
    if pos < 0.1 {
        pos / 0.1
    } else if pos > 0.7 {
        (1.0 - pos) / 0.3
    } else {
        1.0
    }
}
