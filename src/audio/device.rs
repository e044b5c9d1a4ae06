//! Output through the default sound device via rodio.

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use super::synth::{Clip, SoundBank, SAMPLE_RATE};
use super::{AudioSink, Cue};

pub struct DeviceAudio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bank: SoundBank,
    music: Option<Sink>,
    thrust: Option<Sink>,
    music_on: bool,
    sfx_on: bool,
}

fn source(clip: &Clip) -> SamplesBuffer<i16> {
    SamplesBuffer::new(1, SAMPLE_RATE, clip.samples.clone())
}

impl DeviceAudio {
    /// Open the default output device and start the music loop.
    pub fn open(bank: SoundBank, music_on: bool, sfx_on: bool) -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        let music = Sink::try_new(&handle).ok().map(|sink| {
            sink.set_volume(bank.music.volume);
            sink.append(source(&bank.music).repeat_infinite());
            if !music_on {
                sink.pause();
            }
            sink
        });
        if music.is_none() {
            log::warn!("no sink available for background music");
        }
        Ok(DeviceAudio {
            _stream: stream,
            handle,
            bank,
            music,
            thrust: None,
            music_on,
            sfx_on,
        })
    }

    fn sink_for(&self, cue: Cue) -> Option<(Sink, SamplesBuffer<i16>)> {
        let clip = self.bank.get(cue)?;
        let sink = Sink::try_new(&self.handle).ok()?;
        sink.set_volume(clip.volume);
        Some((sink, source(clip)))
    }
}

impl AudioSink for DeviceAudio {
    fn play(&mut self, cue: Cue) {
        if !self.sfx_on {
            return;
        }
        if let Some((sink, clip)) = self.sink_for(cue) {
            sink.append(clip);
            sink.detach();
        }
    }

    fn set_thrust(&mut self, on: bool) {
        if on && self.sfx_on {
            if self.thrust.as_ref().map_or(true, Sink::empty) {
                self.thrust = self.sink_for(Cue::Jetpack).map(|(sink, clip)| {
                    sink.append(clip.repeat_infinite());
                    sink
                });
            }
        } else if let Some(sink) = self.thrust.take() {
            sink.stop();
        }
    }

    fn toggle_music(&mut self) {
        if self.music_playing() {
            self.music_on = false;
            self.pause_music();
        } else {
            self.music_on = true;
            self.resume_music();
        }
    }

    fn pause_music(&mut self) {
        if let Some(sink) = &self.music {
            sink.pause();
        }
    }

    fn resume_music(&mut self) {
        if let (true, Some(sink)) = (self.music_on, &self.music) {
            sink.play();
        }
    }

    fn toggle_sfx(&mut self) {
        self.sfx_on = !self.sfx_on;
        if !self.sfx_on {
            self.set_thrust(false);
        }
    }

    fn music_playing(&self) -> bool {
        self.music.as_ref().is_some_and(|sink| !sink.is_paused())
    }

    fn sfx_enabled(&self) -> bool {
        self.sfx_on
    }
}
