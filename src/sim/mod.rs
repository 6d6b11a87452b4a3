//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No wall-clock reads, no rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::resolve;
pub use state::{
    Alien, Body, Boss, Bullet, EffectTimer, EnemyBullet, EntityKind, EntityView, Explosion,
    GameEvent, GamePhase, Player, PowerUp, PowerUpKind, Snapshot, World,
};
pub use tick::{TickInput, tick};
