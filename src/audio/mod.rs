//! Audio collaborator: named cues, the `AudioSink` seam, and the mapping from
//! game events to sounds.
//!
//! Audio is strictly best-effort. A sink that cannot play something simply
//! stays quiet; nothing here reports an error back to the game loop.

pub mod synth;

#[cfg(feature = "sound")]
mod device;

#[cfg(feature = "sound")]
pub use device::DeviceAudio;

use crate::entities::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Looped engine noise while thrusting
    Jetpack,
    /// Player hit an obstacle
    Explosion,
    /// Coin picked up
    Coin,
    /// Obstacle entered the screen
    Laser,
    /// Run started from the menu or game-over screen
    Menu,
    /// Run ended
    GameOver,
}

pub trait AudioSink {
    /// Fire-and-forget one-shot effect. Ignored while effects are off.
    fn play(&mut self, cue: Cue);
    /// Start or stop the looping jetpack sound.
    fn set_thrust(&mut self, on: bool);
    /// The player's music switch: pauses or resumes and remembers the choice.
    fn toggle_music(&mut self);
    /// Pause music without touching the player's switch.
    fn pause_music(&mut self);
    /// Resume music unless the player has switched it off.
    fn resume_music(&mut self);
    fn toggle_sfx(&mut self);
    fn music_playing(&self) -> bool;
    fn sfx_enabled(&self) -> bool;
}

/// React to the events of one update.
pub fn respond(sink: &mut dyn AudioSink, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::GameStarted => {
                sink.play(Cue::Menu);
                sink.resume_music();
            }
            GameEvent::ObstacleSpawned(_) => sink.play(Cue::Laser),
            GameEvent::CoinCollected => sink.play(Cue::Coin),
            GameEvent::PlayerKilled => sink.play(Cue::Explosion),
            GameEvent::GameOver { .. } => {
                sink.set_thrust(false);
                sink.play(Cue::GameOver);
                sink.pause_music();
            }
        }
    }
}

// ── Silent sink ──────────────────────────────────────────────────────────────

/// No output device: keeps the switches so the HUD stays truthful.
#[derive(Debug, Clone)]
pub struct SilentAudio {
    music_on: bool,
    music_paused: bool,
    sfx_on: bool,
}

impl SilentAudio {
    pub fn new(music_on: bool, sfx_on: bool) -> Self {
        SilentAudio { music_on, music_paused: false, sfx_on }
    }
}

impl Default for SilentAudio {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: Cue) {}

    fn set_thrust(&mut self, _on: bool) {}

    fn toggle_music(&mut self) {
        if self.music_playing() {
            self.music_on = false;
        } else {
            self.music_on = true;
            self.music_paused = false;
        }
    }

    fn pause_music(&mut self) {
        self.music_paused = true;
    }

    fn resume_music(&mut self) {
        self.music_paused = false;
    }

    fn toggle_sfx(&mut self) {
        self.sfx_on = !self.sfx_on;
    }

    fn music_playing(&self) -> bool {
        self.music_on && !self.music_paused
    }

    fn sfx_enabled(&self) -> bool {
        self.sfx_on
    }
}
