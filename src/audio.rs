//! Audio cue selection and mixing
//!
//! The simulation reports what happened as [`GameEvent`]s; the
//! [`AudioManager`] turns those into sound effects at the right volume and
//! hands them to an [`AudioSink`], which does the actual playback.

use crate::consts::BOUNCE_VARIANTS;
use crate::settings::Settings;
use crate::sim::{GameEvent, VictoryTheme};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball bounce; lower variants are harder impacts
    Bounce(u8),
    /// Point scored
    Score,
    /// Powerup picked up
    PowerupEnable,
    /// Powerup ran out
    PowerupDisable,
    /// Match won (music)
    Victory(VictoryTheme),
}

impl SoundEffect {
    /// Asset path, without extension
    pub fn asset_path(&self) -> String {
        match self {
            SoundEffect::Bounce(n) => format!("assets/sounds/impactSoft_heavy_00{n}"),
            SoundEffect::Score => "assets/sounds/confirmation_001".to_string(),
            SoundEffect::PowerupEnable => "assets/sounds/confirmation_002".to_string(),
            SoundEffect::PowerupDisable => "assets/sounds/minimize_006".to_string(),
            SoundEffect::Victory(theme) => format!("assets/music/{}", theme.name()),
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, SoundEffect::Victory(_))
    }

    /// Volume of the cue itself, before any mixing
    fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Score => 0.4,
            SoundEffect::Victory(_) => 0.3,
            _ => 1.0,
        }
    }
}

/// Bounce variant for an impact: faster impacts pick lower (harder) variants
pub fn bounce_variant(speed: f32, limit: f32) -> u8 {
    let n = i32::from(BOUNCE_VARIANTS);
    if limit.is_nan() || limit <= 0.0 {
        return 0;
    }
    let index = n - (speed * n as f32 / limit).floor() as i32 - 1;
    index.clamp(0, n - 1) as u8
}

/// Map a simulation event to the cue it should play, if any
pub fn cue_for(event: &GameEvent) -> Option<SoundEffect> {
    match *event {
        GameEvent::Bounce { speed, limit } => {
            Some(SoundEffect::Bounce(bounce_variant(speed, limit)))
        }
        GameEvent::PointScored { .. } => Some(SoundEffect::Score),
        GameEvent::PowerupEnabled { .. } => Some(SoundEffect::PowerupEnable),
        GameEvent::PowerupDisabled { .. } => Some(SoundEffect::PowerupDisable),
        GameEvent::Victory { theme, .. } => Some(SoundEffect::Victory(theme)),
        GameEvent::PowerupSpawned { .. } | GameEvent::MusicStopped => None,
    }
}

/// Something that can actually play sounds
pub trait AudioSink {
    /// Play `effect` at `volume` (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// Stop any music that is playing
    fn stop_music(&mut self);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("play {} at {:.2}", effect.asset_path(), volume);
    }

    fn stop_music(&mut self) {
        log::debug!("stop music");
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Manager with the volumes from `settings`
    pub fn with_settings(sink: S, settings: &Settings) -> Self {
        let mut manager = Self::new(sink);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_music_volume(settings.music_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if effect.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        effect.base_volume() * self.master_volume * channel
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play whatever a batch of events calls for
    pub fn handle(&mut self, events: &[GameEvent]) {
        for event in events {
            if matches!(event, GameEvent::MusicStopped) {
                self.sink.stop_music();
            } else if let Some(effect) = cue_for(event) {
                self.play(effect);
            }
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
