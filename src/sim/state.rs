//! Game state and core simulation types
//!
//! All state that must be persisted for determinism lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ambient alien wave is live
    InWave,
    /// Wave cleared on a boss level; the boss owns the playfield
    BossFight,
    /// Between-level banner pause
    LevelTransition,
    /// Run ended; the world is frozen
    GameOver,
}

/// Things that happened during a tick, drained by the driver for
/// audio cues and HUD flashes. Never read back by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerShot,
    EnemyShot,
    AlienKilled,
    BossHit,
    BossSpawned { tier: u32 },
    BossDefeated,
    PlayerHit,
    ShieldBlocked,
    LifeLost,
    PowerUpCollected(PowerUpKind),
    LevelUp { level: u32 },
    GameOver,
}

/// Positional state shared by every movable object: a top-left anchored
/// bounding box, a per-tick velocity, and a liveness flag.
///
/// Entities killed mid-pass stay in their collection with `alive == false`
/// until the end-of-tick cull, so later passes in the same tick can skip them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub alive: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            alive: true,
        }
    }

    /// Apply one tick of velocity.
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Axis-aligned overlap test, inclusive of touching edges.
    pub fn intersects(&self, other: &Body) -> bool {
        self.pos.x <= other.pos.x + other.size.x
            && other.pos.x <= self.pos.x + self.size.x
            && self.pos.y <= other.pos.y + other.size.y
            && other.pos.y <= self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Bounding box fully above the playfield top edge.
    pub fn above_field(&self) -> bool {
        self.pos.y + self.size.y < 0.0
    }

    /// Bounding box fully below the playfield bottom edge.
    pub fn below_field(&self) -> bool {
        self.pos.y > FIELD_HEIGHT
    }
}

/// A timed effect with a fixed duration: active from `activate(now)` until
/// `duration` ticks later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTimer {
    activated_at: Option<u64>,
    duration: u64,
}

impl EffectTimer {
    pub fn new(duration: u64) -> Self {
        Self {
            activated_at: None,
            duration,
        }
    }

    pub fn activate(&mut self, now: u64) {
        self.activated_at = Some(now);
    }

    pub fn is_active(&self, now: u64) -> bool {
        match self.activated_at {
            Some(at) => now.saturating_sub(at) < self.duration,
            None => false,
        }
    }

    /// Ticks left before expiry (0 when inactive), for the HUD.
    pub fn remaining(&self, now: u64) -> u64 {
        match self.activated_at {
            Some(at) => (at + self.duration).saturating_sub(now),
            None => 0,
        }
    }
}

/// The player ship. One per session; health refills on life loss,
/// timed buffs are flags with expiry rather than owned objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub health: i32,
    pub lives: u32,
    pub rapid_fire: EffectTimer,
    pub shield: EffectTimer,
    pub last_shot_tick: Option<u64>,
}

impl Player {
    pub fn new() -> Self {
        let pos = Vec2::new(
            (FIELD_WIDTH - PLAYER_SIZE.x) / 2.0,
            FIELD_HEIGHT - PLAYER_BOTTOM_MARGIN - PLAYER_SIZE.y,
        );
        Self {
            body: Body::new(pos, PLAYER_SIZE),
            health: PLAYER_MAX_HEALTH,
            lives: PLAYER_START_LIVES,
            rapid_fire: EffectTimer::new(RAPID_FIRE_DURATION),
            shield: EffectTimer::new(SHIELD_DURATION),
            last_shot_tick: None,
        }
    }

    /// Effective fire cooldown: rapid fire trades the base cadence for a
    /// much faster one while its timer runs.
    pub fn shoot_cooldown(&self, now: u64) -> u64 {
        if self.rapid_fire.is_active(now) {
            RAPID_FIRE_COOLDOWN
        } else {
            SHOOT_COOLDOWN
        }
    }

    pub fn shoot_ready(&self, now: u64) -> bool {
        match self.last_shot_tick {
            Some(last) => now.saturating_sub(last) >= self.shoot_cooldown(now),
            None => true,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A wave alien. Difficulty fields are fixed at spawn time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alien {
    pub id: u32,
    pub body: Body,
    /// Level the alien was spawned at; never changes afterwards
    pub level: u32,
    pub can_shoot_back: bool,
    pub shoot_cooldown: u64,
    pub last_shot_tick: u64,
}

/// The boss of a boss level. At most one exists, only during `BossFight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub body: Body,
    pub tier: u32,
    pub health: i32,
    pub max_health: i32,
    /// Horizontal oscillation direction: +1 right, -1 left
    pub dir: f32,
    pub volley_cooldown: u64,
    pub last_volley_tick: u64,
}

/// A player bullet, travelling straight up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub body: Body,
}

/// An alien or boss bullet, travelling straight down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub id: u32,
    pub body: Body,
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Health,
    RapidFire,
    Bomb,
}

/// A falling collectible dropped by a slain alien.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub body: Body,
}

/// Purely visual blast marker. Collision logic never consults these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub size: f32,
    age: u64,
}

impl Explosion {
    pub fn new(center: Vec2, size: f32) -> Self {
        Self {
            pos: center,
            size,
            age: 0,
        }
    }

    pub fn advance(&mut self) {
        self.age += 1;
    }

    /// Animation frame index for rendering.
    pub fn frame(&self) -> u8 {
        (self.age / EXPLOSION_FRAME_TICKS).min(EXPLOSION_FRAMES as u64) as u8
    }

    /// Self-destructs once the frame sequence completes.
    pub fn expired(&self) -> bool {
        self.frame() >= EXPLOSION_FRAMES
    }
}

/// Entity kind tag for render snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Alien,
    Boss,
    Bullet,
    EnemyBullet,
    PowerUp(PowerUpKind),
    Explosion,
}

/// One renderable entity in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Animation frame; only explosions use it
    pub frame: u8,
}

/// Read-only view of the world handed to the render collaborator once per
/// tick. The renderer feeds nothing back into the core.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub health: i32,
    pub max_health: i32,
    pub phase: GamePhase,
    pub kills_this_level: u32,
    pub level_kill_quota: u32,
    pub shield_ticks: u64,
    pub rapid_fire_ticks: u64,
    /// Boss health in [0, 1] while a boss is alive
    pub boss_health_ratio: Option<f32>,
    pub entities: Vec<EntityView>,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete session state. The world exclusively owns every entity
/// collection; entities never point back at it, and only the tick driver
/// and the resolution pass mutate cross-entity state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Session seed for reproducibility
    pub seed: u64,
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    /// Monotonic tick counter; the only clock the simulation knows
    pub tick: u64,
    pub score: u64,
    pub level: u32,
    pub phase: GamePhase,
    /// Banner countdown while `phase == LevelTransition`
    pub transition_ticks: u32,
    /// Kills scored against the current level's quota
    pub kills_this_level: u32,
    pub player: Player,
    pub aliens: Vec<Alien>,
    pub boss: Option<Boss>,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub powerups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    /// Create a fresh session: level 1, zero score, a starting wave of
    /// aliens, and an RNG derived only from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut world = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tick: 0,
            score: 0,
            level: 1,
            phase: GamePhase::InWave,
            transition_ticks: 0,
            kills_this_level: 0,
            player: Player::new(),
            aliens: Vec::new(),
            boss: None,
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            powerups: Vec::new(),
            explosions: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };
        world.spawn_wave(world.wave_size());
        world
    }

    /// Allocate a new entity ID.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whether a boss encounter owns the playfield. No ambient wave exists
    /// while this holds, so kills are never replaced.
    pub fn boss_level_active(&self) -> bool {
        matches!(self.phase, GamePhase::BossFight)
    }

    /// Standard wave size for the current level. A fresh session opens with
    /// a smaller wave; every later level grows with its number.
    pub fn wave_size(&self) -> usize {
        if self.level == 1 {
            STARTING_WAVE_SIZE
        } else {
            STARTING_WAVE_SIZE + self.level as usize
        }
    }

    /// Kills needed before replacements stop and the wave is allowed to
    /// drain toward empty.
    pub fn level_kill_quota(&self) -> u32 {
        (self.wave_size() * 2) as u32
    }

    /// Whether a kill right now gets a replacement alien.
    pub fn replacements_active(&self) -> bool {
        !self.boss_level_active() && self.kills_this_level < self.level_kill_quota()
    }

    /// Spawn one alien above the visible playfield at the current level's
    /// difficulty.
    pub fn spawn_alien(&mut self) {
        let x = self.rng.random_range(0.0..=(FIELD_WIDTH - ALIEN_SIZE.x));
        let y = self.rng.random_range(ALIEN_SPAWN_Y_MIN..=ALIEN_SPAWN_Y_MAX);
        let base = self
            .rng
            .random_range(ALIEN_BASE_SPEED_MIN..=ALIEN_BASE_SPEED_MAX);
        let speed = base + ALIEN_SPEED_PER_LEVEL * (self.level - 1) as f32;
        let can_shoot_back = self.level > 2 && self.rng.random_bool(ALIEN_SHOOT_CHANCE);
        let shoot_cooldown = self
            .rng
            .random_range(ALIEN_SHOOT_COOLDOWN_MIN..=ALIEN_SHOOT_COOLDOWN_MAX);

        let mut body = Body::new(Vec2::new(x, y), ALIEN_SIZE);
        body.vel = Vec2::new(0.0, speed);
        let id = self.next_entity_id();
        self.aliens.push(Alien {
            id,
            body,
            level: self.level,
            can_shoot_back,
            shoot_cooldown,
            last_shot_tick: self.tick,
        });
    }

    pub fn spawn_wave(&mut self, count: usize) {
        for _ in 0..count {
            self.spawn_alien();
        }
        log::debug!("wave of {count} aliens spawned at level {}", self.level);
    }

    /// Move a wrapped alien back to a fresh random top position.
    pub fn respawn_alien_position(&mut self) -> Vec2 {
        let x = self.rng.random_range(0.0..=(FIELD_WIDTH - ALIEN_SIZE.x));
        let y = self.rng.random_range(ALIEN_SPAWN_Y_MIN..=ALIEN_SPAWN_Y_MAX);
        Vec2::new(x, y)
    }

    /// Spawn the boss for the current level. Tier and durability scale with
    /// the level; the volley cooldown shortens per tier.
    pub fn spawn_boss(&mut self) {
        let tier = self.level / 3;
        let health = BOSS_HEALTH_PER_TIER * tier as i32;
        let volley_ms = BOSS_VOLLEY_BASE_MS - BOSS_VOLLEY_STEP_MS * (tier as u64 - 1);
        let mut body = Body::new(
            Vec2::new((FIELD_WIDTH - BOSS_SIZE.x) / 2.0, BOSS_TOP_Y),
            BOSS_SIZE,
        );
        body.vel = Vec2::new(BOSS_SPEED, 0.0);
        self.boss = Some(Boss {
            body,
            tier,
            health,
            max_health: health,
            dir: 1.0,
            volley_cooldown: crate::ticks_from_ms(volley_ms),
            last_volley_tick: self.tick,
        });
        self.push_event(GameEvent::BossSpawned { tier });
        log::info!("boss tier {tier} spawned with {health} health");
    }

    /// Drop a power-up of uniformly random kind at a kill location.
    pub fn spawn_powerup(&mut self, center: Vec2) {
        let kind = match self.rng.random_range(0..4u8) {
            0 => PowerUpKind::Shield,
            1 => PowerUpKind::Health,
            2 => PowerUpKind::RapidFire,
            _ => PowerUpKind::Bomb,
        };
        let mut body = Body::new(center - POWERUP_SIZE * 0.5, POWERUP_SIZE);
        body.vel = Vec2::new(0.0, POWERUP_FALL_SPEED);
        let id = self.next_entity_id();
        self.powerups.push(PowerUp { id, kind, body });
    }

    pub fn spawn_explosion(&mut self, center: Vec2, size: f32) {
        self.explosions.push(Explosion::new(center, size));
    }

    /// Spawn one player bullet (or three under rapid fire) if the cooldown
    /// allows; firing while on cooldown is a no-op, not an error.
    pub fn player_shoot(&mut self) {
        let now = self.tick;
        if self.phase == GamePhase::GameOver || !self.player.shoot_ready(now) {
            return;
        }
        let offsets: &[f32] = if self.player.rapid_fire.is_active(now) {
            &RAPID_FIRE_OFFSETS
        } else {
            &RAPID_FIRE_OFFSETS[1..2]
        };
        let muzzle = Vec2::new(
            self.player.body.center().x,
            self.player.body.pos.y - BULLET_SIZE.y,
        );
        for &off in offsets {
            let mut body = Body::new(
                Vec2::new(muzzle.x + off - BULLET_SIZE.x / 2.0, muzzle.y),
                BULLET_SIZE,
            );
            body.vel = Vec2::new(0.0, -BULLET_SPEED);
            let id = self.next_entity_id();
            self.bullets.push(Bullet { id, body });
        }
        self.player.last_shot_tick = Some(now);
        self.push_event(GameEvent::PlayerShot);
    }

    /// Spawn one downward bullet from an enemy muzzle position.
    pub fn spawn_enemy_bullet(&mut self, muzzle_center_x: f32, muzzle_top_y: f32) {
        let mut body = Body::new(
            Vec2::new(muzzle_center_x - BULLET_SIZE.x / 2.0, muzzle_top_y),
            BULLET_SIZE,
        );
        body.vel = Vec2::new(0.0, ENEMY_BULLET_SPEED);
        let id = self.next_entity_id();
        self.enemy_bullets.push(EnemyBullet { id, body });
    }

    /// The damage-absorption rule: an active shield negates the hit
    /// entirely; otherwise health drops, and crossing zero costs a life.
    /// Losing the last life ends the session.
    pub fn apply_player_damage(&mut self, amount: i32) {
        if self.player.shield.is_active(self.tick) {
            self.push_event(GameEvent::ShieldBlocked);
            return;
        }
        self.player.health -= amount;
        self.push_event(GameEvent::PlayerHit);
        if self.player.health <= 0 {
            self.player.lives = self.player.lives.saturating_sub(1);
            if self.player.lives > 0 {
                self.player.health = PLAYER_MAX_HEALTH;
                self.push_event(GameEvent::LifeLost);
            } else {
                self.player.health = 0;
                self.phase = GamePhase::GameOver;
                self.push_event(GameEvent::GameOver);
                log::info!("game over at level {} with score {}", self.level, self.score);
            }
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain the events recorded since the last drain.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop every entity marked dead during this tick, and every explosion
    /// whose animation has finished.
    pub fn cull(&mut self) {
        self.aliens.retain(|a| a.body.alive);
        self.bullets.retain(|b| b.body.alive);
        self.enemy_bullets.retain(|b| b.body.alive);
        self.powerups.retain(|p| p.body.alive);
        self.explosions.retain(|e| !e.expired());
    }

    /// Build the read-only render view for this tick.
    pub fn snapshot(&self) -> Snapshot {
        let mut entities = Vec::with_capacity(
            1 + self.aliens.len()
                + self.bullets.len()
                + self.enemy_bullets.len()
                + self.powerups.len()
                + self.explosions.len()
                + usize::from(self.boss.is_some()),
        );
        for a in &self.aliens {
            entities.push(EntityView {
                kind: EntityKind::Alien,
                pos: a.body.pos,
                size: a.body.size,
                frame: 0,
            });
        }
        if let Some(boss) = &self.boss {
            entities.push(EntityView {
                kind: EntityKind::Boss,
                pos: boss.body.pos,
                size: boss.body.size,
                frame: 0,
            });
        }
        for b in &self.bullets {
            entities.push(EntityView {
                kind: EntityKind::Bullet,
                pos: b.body.pos,
                size: b.body.size,
                frame: 0,
            });
        }
        for b in &self.enemy_bullets {
            entities.push(EntityView {
                kind: EntityKind::EnemyBullet,
                pos: b.body.pos,
                size: b.body.size,
                frame: 0,
            });
        }
        for p in &self.powerups {
            entities.push(EntityView {
                kind: EntityKind::PowerUp(p.kind),
                pos: p.body.pos,
                size: p.body.size,
                frame: 0,
            });
        }
        for e in &self.explosions {
            let size = Vec2::splat(e.size);
            entities.push(EntityView {
                kind: EntityKind::Explosion,
                pos: e.pos - size * 0.5,
                size,
                frame: e.frame(),
            });
        }
        if self.phase != GamePhase::GameOver {
            entities.push(EntityView {
                kind: EntityKind::Player,
                pos: self.player.body.pos,
                size: self.player.body.size,
                frame: 0,
            });
        }

        Snapshot {
            score: self.score,
            level: self.level,
            lives: self.player.lives,
            health: self.player.health,
            max_health: PLAYER_MAX_HEALTH,
            phase: self.phase,
            kills_this_level: self.kills_this_level,
            level_kill_quota: self.level_kill_quota(),
            shield_ticks: self.player.shield.remaining(self.tick),
            rapid_fire_ticks: self.player.rapid_fire.remaining(self.tick),
            boss_health_ratio: self
                .boss
                .as_ref()
                .map(|b| b.health.max(0) as f32 / b.max_health as f32),
            entities,
        }
    }
}
