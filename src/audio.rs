//! Fire-and-forget sound cue sink
//!
//! The simulation never calls this directly; the driver drains the tick's
//! events and forwards the matching cues. A missing playback backend
//! silently downgrades every cue to a no-op, never touching game state.

use crate::sim::GameEvent;

/// Sound cue kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Player or enemy fired
    Shoot,
    /// Something blew up
    Explosion,
    /// Power-up collected
    PowerUp,
    /// Level banner / boss arrival
    LevelUp,
    /// Run ended
    GameOver,
}

/// Map a simulation event to the cue it should play, if any.
pub fn cue_for_event(event: &GameEvent) -> Option<SoundCue> {
    match event {
        GameEvent::PlayerShot | GameEvent::EnemyShot => Some(SoundCue::Shoot),
        GameEvent::AlienKilled
        | GameEvent::BossHit
        | GameEvent::BossDefeated
        | GameEvent::PlayerHit
        | GameEvent::LifeLost => Some(SoundCue::Explosion),
        GameEvent::PowerUpCollected(_) => Some(SoundCue::PowerUp),
        GameEvent::LevelUp { .. } | GameEvent::BossSpawned { .. } => Some(SoundCue::LevelUp),
        GameEvent::GameOver => Some(SoundCue::GameOver),
        GameEvent::ShieldBlocked => None,
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend_available: bool,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // No terminal audio backend is wired up; cues are traced and dropped
        log::debug!("no audio backend available - cues will be traced only");
        Self {
            backend_available: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound cue. Missing backends and playback failures are
    /// swallowed here; they never propagate to the caller.
    pub fn play(&self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 || !self.backend_available {
            log::trace!("audio cue {cue:?} dropped (volume {vol:.2})");
        }
    }
}
