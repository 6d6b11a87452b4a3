//! End-to-end simulation scenarios driven through full ticks.

use glam::Vec2;

use alien_siege::consts::*;
use alien_siege::sim::{
    Body, Bullet, EnemyBullet, GamePhase, PowerUp, PowerUpKind, TickInput, World, tick,
};

fn quiet() -> TickInput {
    TickInput::default()
}

fn shooting() -> TickInput {
    TickInput {
        shoot: true,
        ..Default::default()
    }
}

fn push_bullet(world: &mut World, pos: Vec2) {
    let id = world.next_entity_id();
    let mut body = Body::new(pos, BULLET_SIZE);
    body.vel = Vec2::new(0.0, -BULLET_SPEED);
    world.bullets.push(Bullet { id, body });
}

fn push_enemy_bullet(world: &mut World, pos: Vec2) {
    let id = world.next_entity_id();
    let mut body = Body::new(pos, BULLET_SIZE);
    body.vel = Vec2::new(0.0, ENEMY_BULLET_SPEED);
    world.enemy_bullets.push(EnemyBullet { id, body });
}

fn push_powerup(world: &mut World, kind: PowerUpKind, pos: Vec2) {
    let id = world.next_entity_id();
    world.powerups.push(PowerUp {
        id,
        kind,
        body: Body::new(pos, POWERUP_SIZE),
    });
}

fn live_aliens(world: &World) -> usize {
    world.aliens.iter().filter(|a| a.body.alive).count()
}

// ── kills and scoring ─────────────────────────────────────────────────────────

#[test]
fn level_one_kill_scores_ten_and_is_replaced() {
    let mut w = World::new(42);
    let target = w.aliens[0].body.center();
    push_bullet(&mut w, target);

    tick(&mut w, &quiet());

    assert_eq!(w.score, 10);
    assert_eq!(live_aliens(&w), w.wave_size());
    assert!(w.bullets.is_empty());
    assert!(!w.explosions.is_empty());
}

#[test]
fn kill_score_scales_with_level() {
    let mut w = World::new(42);
    w.level = 5;
    w.aliens.clear();
    w.spawn_wave(4);
    let target = w.aliens[0].body.center();
    push_bullet(&mut w, target);

    tick(&mut w, &quiet());

    assert_eq!(w.score, 50);
}

// ── damage absorption ─────────────────────────────────────────────────────────

#[test]
fn enemy_bullet_hit_costs_twenty_five_health() {
    let mut w = World::new(7);
    let pos = w.player.body.pos;
    push_enemy_bullet(&mut w, pos);

    tick(&mut w, &quiet());

    assert_eq!(w.player.health, PLAYER_MAX_HEALTH - ENEMY_BULLET_DAMAGE);
    assert_eq!(w.player.lives, PLAYER_START_LIVES);
    assert!(w.enemy_bullets.is_empty());
}

#[test]
fn lethal_bullet_consumes_a_life_and_refills_health() {
    let mut w = World::new(7);
    w.player.health = 20;
    let pos = w.player.body.pos;
    push_enemy_bullet(&mut w, pos);

    tick(&mut w, &quiet());

    assert_eq!(w.player.lives, PLAYER_START_LIVES - 1);
    assert_eq!(w.player.health, PLAYER_MAX_HEALTH);
    assert_ne!(w.phase, GamePhase::GameOver);
}

#[test]
fn active_shield_negates_every_hit() {
    let mut w = World::new(7);
    w.player.shield.activate(w.tick);
    let pos = w.player.body.pos;
    push_enemy_bullet(&mut w, pos);

    tick(&mut w, &quiet());

    assert_eq!(w.player.health, PLAYER_MAX_HEALTH);
    assert_eq!(w.player.lives, PLAYER_START_LIVES);
}

#[test]
fn game_over_freezes_the_simulation() {
    let mut w = World::new(7);
    w.player.lives = 1;
    w.player.health = 10;
    let pos = w.player.body.pos;
    push_enemy_bullet(&mut w, pos);

    tick(&mut w, &quiet());
    assert_eq!(w.phase, GamePhase::GameOver);
    assert_eq!(w.player.lives, 0);

    let frozen_tick = w.tick;
    let frozen_aliens = w.aliens.clone();
    for _ in 0..10 {
        tick(&mut w, &shooting());
    }
    assert_eq!(w.tick, frozen_tick);
    assert_eq!(w.aliens, frozen_aliens);
    assert!(w.bullets.is_empty());
}

// ── power-ups ─────────────────────────────────────────────────────────────────

#[test]
fn bomb_with_four_aliens_scores_and_repopulates() {
    let mut w = World::new(11);
    w.aliens.clear();
    w.spawn_wave(4);
    let pos = w.player.body.pos;
    push_powerup(&mut w, PowerUpKind::Bomb, pos);

    tick(&mut w, &quiet());

    assert_eq!(w.score, 4 * KILL_SCORE_PER_LEVEL * w.level as u64);
    assert_eq!(w.explosions.len(), 4);
    assert_eq!(live_aliens(&w), w.wave_size());
}

#[test]
fn rapid_fire_pickup_switches_to_triple_shots() {
    let mut w = World::new(11);
    w.aliens.clear();
    let pos = w.player.body.pos;
    push_powerup(&mut w, PowerUpKind::RapidFire, pos);
    tick(&mut w, &quiet());

    // pickup collected; the next shot is a spread of three
    tick(&mut w, &shooting());
    assert_eq!(w.bullets.len(), 3);
    let xs: Vec<f32> = w.bullets.iter().map(|b| b.body.pos.x).collect();
    assert!((xs[2] - xs[0] - 20.0).abs() < 1e-3);
}

#[test]
fn rapid_fire_cadence_is_one_hundred_ms() {
    let mut w = World::new(11);
    w.aliens.clear();
    w.player.rapid_fire.activate(w.tick);

    // hold fire for 13 ticks: shots land on ticks 1, 7 and 13
    for _ in 0..13 {
        tick(&mut w, &shooting());
    }
    assert_eq!(w.bullets.len(), 9);
}

#[test]
fn base_cadence_is_five_hundred_ms() {
    let mut w = World::new(11);
    w.aliens.clear();

    for _ in 0..SHOOT_COOLDOWN {
        tick(&mut w, &shooting());
    }
    assert_eq!(w.bullets.len(), 1);
    tick(&mut w, &shooting());
    assert_eq!(w.bullets.len(), 2);
}

#[test]
fn powerups_fall_and_cull_off_screen() {
    let mut w = World::new(11);
    push_powerup(&mut w, PowerUpKind::Health, Vec2::new(100.0, FIELD_HEIGHT + 1.0));

    tick(&mut w, &quiet());
    assert!(w.powerups.is_empty());
}

// ── boss levels ───────────────────────────────────────────────────────────────

#[test]
fn boss_level_runs_the_full_sequence() {
    let mut w = World::new(3);
    w.level = 3;
    w.aliens.clear();

    // cleared wave on a boss level summons the boss
    tick(&mut w, &quiet());
    assert_eq!(w.phase, GamePhase::BossFight);
    let boss = w.boss.as_ref().expect("boss spawned");
    assert_eq!(boss.health, 50);
    assert_eq!(boss.tier, 1);

    // five hits at ten damage each bring it down
    for _ in 0..5 {
        let pos = w.boss.as_ref().unwrap().body.pos;
        push_bullet(&mut w, pos);
        tick(&mut w, &quiet());
    }

    assert!(w.boss.is_none());
    assert_eq!(w.level, 4);
    assert_eq!(w.score, 300);
    assert_eq!(w.phase, GamePhase::LevelTransition);
    assert!(w.bullets.is_empty());
    assert!(w.enemy_bullets.is_empty());

    // the banner runs out, then the next wave arrives at the new size
    for _ in 0..LEVEL_TRANSITION_TICKS {
        tick(&mut w, &quiet());
    }
    assert_eq!(w.phase, GamePhase::InWave);
    assert_eq!(w.aliens.len(), 10);
}

#[test]
fn no_replacements_spawn_during_a_boss_fight() {
    let mut w = World::new(3);
    w.level = 3;
    w.aliens.clear();
    tick(&mut w, &quiet());
    assert_eq!(w.phase, GamePhase::BossFight);

    // a stray alien killed mid-fight is not replaced
    w.spawn_alien();
    let target = w.aliens[0].body.center();
    push_bullet(&mut w, target);
    tick(&mut w, &quiet());

    assert_eq!(live_aliens(&w), 0);
}

// ── level progression ─────────────────────────────────────────────────────────

#[test]
fn drained_wave_advances_to_the_next_level() {
    let mut w = World::new(9);
    w.aliens.clear();

    tick(&mut w, &quiet());
    assert_eq!(w.phase, GamePhase::LevelTransition);
    assert_eq!(w.level, 2);

    for _ in 0..LEVEL_TRANSITION_TICKS {
        tick(&mut w, &quiet());
    }
    assert_eq!(w.phase, GamePhase::InWave);
    assert_eq!(w.aliens.len(), 8);
    // the new wave carries the new level's difficulty
    assert!(w.aliens.iter().all(|a| a.level == 2));
}

#[test]
fn replacements_stop_once_the_kill_quota_is_met() {
    let mut w = World::new(9);
    let quota = w.level_kill_quota();

    for _ in 0..quota {
        let target = w
            .aliens
            .iter()
            .find(|a| a.body.alive)
            .expect("a live alien remains")
            .body
            .center();
        push_bullet(&mut w, target);
        tick(&mut w, &quiet());
    }
    assert_eq!(w.kills_this_level, quota);

    // quota met: the next kill drains the wave instead of being replaced
    let before = live_aliens(&w);
    let target = w.aliens[0].body.center();
    push_bullet(&mut w, target);
    tick(&mut w, &quiet());
    assert_eq!(live_aliens(&w), before - 1);
}
