//! Alien Siege - a wave-based alien defense shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, progression)
//! - `ui`: Terminal rendering of simulation snapshots
//! - `audio`: Fire-and-forget sound cue sink
//! - `assets`: Sprite glyph supply with placeholder fallback
//! - `settings`: Player preferences
//! - `highscores`: Session leaderboard for the play-again loop

pub mod assets;
pub mod audio;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::HighScores;
pub use settings::Settings;

/// Convert a wall-clock duration in milliseconds to simulation ticks.
///
/// The core never reads a clock; every timed rule is expressed in ticks.
#[inline]
pub const fn ticks_from_ms(ms: u64) -> u64 {
    ms * consts::TICK_HZ / 1000
}

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    use crate::ticks_from_ms;

    /// Fixed simulation tick rate
    pub const TICK_HZ: u64 = 60;

    /// Playfield dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_SIZE: Vec2 = Vec2::new(50.0, 60.0);
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Gap kept between the player and the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_START_LIVES: u32 = 3;

    /// Projectiles
    pub const BULLET_SIZE: Vec2 = Vec2::new(10.0, 20.0);
    pub const BULLET_SPEED: f32 = 7.0;
    pub const ENEMY_BULLET_SPEED: f32 = 5.0;
    /// Muzzle x-offsets for the rapid-fire triple shot
    pub const RAPID_FIRE_OFFSETS: [f32; 3] = [-10.0, 0.0, 10.0];
    /// Muzzle x-offsets for the boss volley
    pub const BOSS_VOLLEY_OFFSETS: [f32; 3] = [-20.0, 0.0, 20.0];

    /// Fire cadence and timed effects, in ticks
    pub const SHOOT_COOLDOWN: u64 = ticks_from_ms(500);
    pub const RAPID_FIRE_COOLDOWN: u64 = ticks_from_ms(100);
    pub const RAPID_FIRE_DURATION: u64 = ticks_from_ms(5000);
    pub const SHIELD_DURATION: u64 = ticks_from_ms(7000);

    /// Aliens
    pub const ALIEN_SIZE: Vec2 = Vec2::new(50.0, 50.0);
    pub const ALIEN_BASE_SPEED_MIN: f32 = 2.0;
    pub const ALIEN_BASE_SPEED_MAX: f32 = 4.0;
    /// Per-level speed ramp added on top of the randomized base
    pub const ALIEN_SPEED_PER_LEVEL: f32 = 0.5;
    /// Vertical spawn band above the visible playfield
    pub const ALIEN_SPAWN_Y_MIN: f32 = -100.0;
    pub const ALIEN_SPAWN_Y_MAX: f32 = -40.0;
    /// Chance that an alien can fire back (levels above 2 only)
    pub const ALIEN_SHOOT_CHANCE: f64 = 0.3;
    pub const ALIEN_SHOOT_COOLDOWN_MIN: u64 = ticks_from_ms(1000);
    pub const ALIEN_SHOOT_COOLDOWN_MAX: u64 = ticks_from_ms(3000);
    /// Wave size for a fresh level-1 session
    pub const STARTING_WAVE_SIZE: usize = 6;

    /// Boss
    pub const BOSS_SIZE: Vec2 = Vec2::new(120.0, 80.0);
    pub const BOSS_TOP_Y: f32 = 50.0;
    pub const BOSS_SPEED: f32 = 3.0;
    pub const BOSS_HEALTH_PER_TIER: i32 = 50;
    /// Damage dealt to the boss by one player bullet
    pub const BOSS_HIT_DAMAGE: i32 = 10;
    pub const BOSS_VOLLEY_BASE_MS: u64 = 1000;
    /// Volley cooldown shrinks by this much per tier above 1
    pub const BOSS_VOLLEY_STEP_MS: u64 = 50;

    /// Damage taken by the player
    pub const ENEMY_BULLET_DAMAGE: i32 = 25;
    pub const ALIEN_CRASH_DAMAGE: i32 = 50;

    /// Power-ups
    pub const POWERUP_SIZE: Vec2 = Vec2::new(30.0, 30.0);
    pub const POWERUP_FALL_SPEED: f32 = 3.0;
    /// Independent drop chance per bullet kill
    pub const POWERUP_DROP_CHANCE: f64 = 0.1;
    pub const HEALTH_PICKUP_AMOUNT: i32 = 30;

    /// Scoring
    pub const KILL_SCORE_PER_LEVEL: u64 = 10;
    pub const BOSS_BONUS_PER_LEVEL: u64 = 100;

    /// Explosions (visual only)
    pub const EXPLOSION_FRAMES: u8 = 6;
    pub const EXPLOSION_FRAME_TICKS: u64 = 4;
    pub const EXPLOSION_SMALL: f32 = 40.0;
    pub const EXPLOSION_LARGE: f32 = 120.0;

    /// Level banner pause between waves (2 seconds)
    pub const LEVEL_TRANSITION_TICKS: u32 = (2 * TICK_HZ) as u32;
}
