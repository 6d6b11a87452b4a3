//! Fixed timestep simulation tick
//!
//! Core frame loop that advances the simulation deterministically:
//! apply input, advance every entity, run the resolution pass, then run
//! the progression checks. One call per 60 Hz tick.

use glam::Vec2;

use super::collision;
use super::state::{GameEvent, GamePhase, World};
use crate::consts::*;

/// Input sampled once per tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub shoot: bool,
}

/// Advance the world by one fixed timestep.
pub fn tick(world: &mut World, input: &TickInput) {
    // Terminal state: nothing moves, only the end screen is shown
    if world.phase == GamePhase::GameOver {
        return;
    }

    world.tick += 1;

    move_player(world, input);
    if input.shoot {
        world.player_shoot();
    }

    advance_projectiles(world);
    advance_powerups(world);
    for explosion in &mut world.explosions {
        explosion.advance();
    }

    match world.phase {
        GamePhase::InWave => advance_aliens(world),
        GamePhase::BossFight => advance_boss(world),
        GamePhase::LevelTransition => {
            world.transition_ticks = world.transition_ticks.saturating_sub(1);
            if world.transition_ticks == 0 {
                let size = world.wave_size();
                world.spawn_wave(size);
                world.phase = GamePhase::InWave;
            }
        }
        GamePhase::GameOver => {}
    }

    collision::resolve(world);
    check_wave_cleared(world);
    world.cull();
}

fn move_player(world: &mut World, input: &TickInput) {
    let mut delta = Vec2::ZERO;
    if input.left {
        delta.x -= PLAYER_SPEED;
    }
    if input.right {
        delta.x += PLAYER_SPEED;
    }
    if input.up {
        delta.y -= PLAYER_SPEED;
    }
    if input.down {
        delta.y += PLAYER_SPEED;
    }
    let body = &mut world.player.body;
    body.pos += delta;
    body.pos.x = body.pos.x.clamp(0.0, FIELD_WIDTH - body.size.x);
    // the ship defends the bottom lane; it never climbs past mid-field
    body.pos.y = body.pos.y.clamp(
        FIELD_HEIGHT / 2.0,
        FIELD_HEIGHT - PLAYER_BOTTOM_MARGIN - body.size.y,
    );
}

/// Advance all projectiles and cull the ones that fully left the
/// playfield vertically.
fn advance_projectiles(world: &mut World) {
    for bullet in &mut world.bullets {
        bullet.body.advance();
        if bullet.body.above_field() {
            bullet.body.alive = false;
        }
    }
    for bullet in &mut world.enemy_bullets {
        bullet.body.advance();
        if bullet.body.below_field() {
            bullet.body.alive = false;
        }
    }
}

fn advance_powerups(world: &mut World) {
    for powerup in &mut world.powerups {
        powerup.body.advance();
        if powerup.body.below_field() {
            powerup.body.alive = false;
        }
    }
}

/// Wave motion and fire-back. An alien that sinks past the bottom edge
/// wraps to a fresh random position above the field instead of despawning.
fn advance_aliens(world: &mut World) {
    let now = world.tick;
    let mut wraps: Vec<usize> = Vec::new();
    let mut shots: Vec<(f32, f32)> = Vec::new();

    for (i, alien) in world.aliens.iter_mut().enumerate() {
        if !alien.body.alive {
            continue;
        }
        alien.body.advance();
        if alien.body.below_field() {
            wraps.push(i);
            continue;
        }
        let visible = alien.body.pos.y > 0.0;
        if alien.can_shoot_back
            && visible
            && now.saturating_sub(alien.last_shot_tick) >= alien.shoot_cooldown
        {
            alien.last_shot_tick = now;
            let muzzle = alien.body.center();
            shots.push((muzzle.x, alien.body.pos.y + alien.body.size.y));
        }
    }

    for i in wraps {
        let pos = world.respawn_alien_position();
        world.aliens[i].body.pos = pos;
    }
    for (x, y) in shots {
        world.spawn_enemy_bullet(x, y);
        world.push_event(GameEvent::EnemyShot);
    }
}

/// Boss oscillation and volley fire.
fn advance_boss(world: &mut World) {
    let now = world.tick;
    let Some(boss) = world.boss.as_mut() else {
        return;
    };

    boss.body.pos.x += boss.dir * BOSS_SPEED;
    if boss.body.pos.x <= 0.0 {
        boss.body.pos.x = 0.0;
        boss.dir = 1.0;
    } else if boss.body.pos.x + boss.body.size.x >= FIELD_WIDTH {
        boss.body.pos.x = FIELD_WIDTH - boss.body.size.x;
        boss.dir = -1.0;
    }

    if now.saturating_sub(boss.last_volley_tick) >= boss.volley_cooldown {
        boss.last_volley_tick = now;
        let muzzle_x = boss.body.center().x;
        let muzzle_y = boss.body.pos.y + boss.body.size.y;
        for &off in &BOSS_VOLLEY_OFFSETS {
            world.spawn_enemy_bullet(muzzle_x + off, muzzle_y);
        }
        world.push_event(GameEvent::EnemyShot);
    }
}

/// Progression: an emptied wave either summons the boss (every third
/// level) or starts the banner pause into the next level.
fn check_wave_cleared(world: &mut World) {
    if world.phase != GamePhase::InWave {
        return;
    }
    if world.aliens.iter().any(|a| a.body.alive) {
        return;
    }
    if world.level % 3 == 0 {
        world.phase = GamePhase::BossFight;
        world.spawn_boss();
    } else {
        world.level += 1;
        world.kills_this_level = 0;
        world.phase = GamePhase::LevelTransition;
        world.transition_ticks = LEVEL_TRANSITION_TICKS;
        world.push_event(GameEvent::LevelUp { level: world.level });
    }
}
