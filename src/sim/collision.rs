//! The per-tick collision and resolution pass.
//!
//! Runs once per tick after every entity has advanced, in a fixed sub-pass
//! order: player bullets vs aliens, player bullets vs the boss, enemy
//! bullets vs the player, alien bodies vs the player, power-ups vs the
//! player. The order matters: a bomb or a boss kill in an early sub-pass
//! can invalidate entities a later sub-pass would otherwise consume, so
//! every sub-pass skips entities already marked dead. Replacement spawns
//! are appended to the collections and never re-read within the same pass.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GamePhase, PowerUpKind, World};
use crate::consts::*;

/// Resolve all entity interactions for this tick.
pub fn resolve(world: &mut World) {
    bullets_vs_aliens(world);
    bullets_vs_boss(world);
    enemy_bullets_vs_player(world);
    if world.phase == GamePhase::GameOver {
        return;
    }
    aliens_vs_player(world);
    if world.phase == GamePhase::GameOver {
        return;
    }
    powerups_vs_player(world);
}

/// Score a kill made by a player bullet: points, a blast, a possible
/// power-up drop, and (while the wave is being held at size) a replacement.
fn score_bullet_kill(world: &mut World, at: Vec2) {
    world.score += KILL_SCORE_PER_LEVEL * world.level as u64;
    world.kills_this_level += 1;
    world.push_event(GameEvent::AlienKilled);
    world.spawn_explosion(at, EXPLOSION_SMALL);
    if world.rng.random_bool(POWERUP_DROP_CHANCE) {
        world.spawn_powerup(at);
    }
    if world.replacements_active() {
        world.spawn_alien();
    }
}

fn bullets_vs_aliens(world: &mut World) {
    let mut kills: Vec<Vec2> = Vec::new();
    for bi in 0..world.bullets.len() {
        if !world.bullets[bi].body.alive {
            continue;
        }
        for ai in 0..world.aliens.len() {
            if !world.aliens[ai].body.alive {
                continue;
            }
            if world.bullets[bi].body.intersects(&world.aliens[ai].body) {
                world.bullets[bi].body.alive = false;
                world.aliens[ai].body.alive = false;
                kills.push(world.aliens[ai].body.center());
                break; // bullet consumed
            }
        }
    }
    for at in kills {
        score_bullet_kill(world, at);
    }
}

fn bullets_vs_boss(world: &mut World) {
    let Some(boss) = world.boss.as_mut() else {
        return;
    };

    let mut hits: Vec<Vec2> = Vec::new();
    for bullet in world.bullets.iter_mut().filter(|b| b.body.alive) {
        if bullet.body.intersects(&boss.body) {
            bullet.body.alive = false;
            boss.health -= BOSS_HIT_DAMAGE;
            hits.push(bullet.body.center());
        }
    }
    let defeated = boss.health <= 0;
    let boss_center = boss.body.center();

    for at in hits {
        world.push_event(GameEvent::BossHit);
        world.spawn_explosion(at, EXPLOSION_SMALL);
    }

    if defeated {
        world.boss = None;
        world.spawn_explosion(boss_center, EXPLOSION_LARGE);
        world.score += BOSS_BONUS_PER_LEVEL * world.level as u64;
        world.bullets.clear();
        world.enemy_bullets.clear();
        world.level += 1;
        world.kills_this_level = 0;
        world.phase = GamePhase::LevelTransition;
        world.transition_ticks = LEVEL_TRANSITION_TICKS;
        world.push_event(GameEvent::BossDefeated);
        world.push_event(GameEvent::LevelUp { level: world.level });
    }
}

fn enemy_bullets_vs_player(world: &mut World) {
    let mut hits = 0u32;
    for bullet in world.enemy_bullets.iter_mut().filter(|b| b.body.alive) {
        if bullet.body.intersects(&world.player.body) {
            bullet.body.alive = false;
            hits += 1;
        }
    }
    for _ in 0..hits {
        let at = world.player.body.center();
        world.spawn_explosion(at, EXPLOSION_SMALL);
        world.apply_player_damage(ENEMY_BULLET_DAMAGE);
        if world.phase == GamePhase::GameOver {
            break;
        }
    }
}

fn aliens_vs_player(world: &mut World) {
    let mut crashes: Vec<Vec2> = Vec::new();
    for alien in world.aliens.iter_mut().filter(|a| a.body.alive) {
        if alien.body.intersects(&world.player.body) {
            alien.body.alive = false;
            crashes.push(alien.body.center());
        }
    }
    for at in crashes {
        world.spawn_explosion(at, EXPLOSION_SMALL);
        world.apply_player_damage(ALIEN_CRASH_DAMAGE);
        if !world.boss_level_active() {
            world.spawn_alien();
        }
        if world.phase == GamePhase::GameOver {
            break;
        }
    }
}

fn powerups_vs_player(world: &mut World) {
    let mut collected: Vec<PowerUpKind> = Vec::new();
    for powerup in world.powerups.iter_mut().filter(|p| p.body.alive) {
        if powerup.body.intersects(&world.player.body) {
            powerup.body.alive = false;
            collected.push(powerup.kind);
        }
    }
    for kind in collected {
        world.push_event(GameEvent::PowerUpCollected(kind));
        apply_powerup(world, kind);
    }
}

fn apply_powerup(world: &mut World, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Shield => world.player.shield.activate(world.tick),
        PowerUpKind::RapidFire => world.player.rapid_fire.activate(world.tick),
        PowerUpKind::Health => {
            world.player.health = (world.player.health + HEALTH_PICKUP_AMOUNT).min(PLAYER_MAX_HEALTH);
        }
        PowerUpKind::Bomb => detonate_bomb(world),
    }
}

/// Wipe every live alien. Each kill scores like a bullet kill; the wave is
/// then rebuilt at its standard size unless a boss owns the playfield.
fn detonate_bomb(world: &mut World) {
    let mut blasts: Vec<Vec2> = Vec::new();
    for alien in world.aliens.iter_mut().filter(|a| a.body.alive) {
        alien.body.alive = false;
        blasts.push(alien.body.center());
    }
    for at in blasts {
        world.score += KILL_SCORE_PER_LEVEL * world.level as u64;
        world.kills_this_level += 1;
        world.push_event(GameEvent::AlienKilled);
        world.spawn_explosion(at, EXPLOSION_SMALL);
    }
    if !world.boss_level_active() {
        let size = world.wave_size();
        world.spawn_wave(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Body, Bullet, EnemyBullet, PowerUp};

    fn world() -> World {
        World::new(12345)
    }

    fn bullet_at(world: &mut World, pos: Vec2) -> Bullet {
        let id = world.next_entity_id();
        Bullet {
            id,
            body: Body::new(pos, BULLET_SIZE),
        }
    }

    fn enemy_bullet_at(world: &mut World, pos: Vec2) -> EnemyBullet {
        let id = world.next_entity_id();
        EnemyBullet {
            id,
            body: Body::new(pos, BULLET_SIZE),
        }
    }

    #[test]
    fn bullet_kill_scores_and_replaces() {
        let mut w = world();
        let target = w.aliens[0].body.pos;
        let bullet = bullet_at(&mut w, target);
        w.bullets.push(bullet);

        resolve(&mut w);

        assert_eq!(w.score, KILL_SCORE_PER_LEVEL);
        assert!(!w.aliens[0].body.alive);
        assert!(w.bullets.iter().all(|b| !b.body.alive));
        // one replacement keeps the live wave at its configured size
        let live = w.aliens.iter().filter(|a| a.body.alive).count();
        assert_eq!(live, w.wave_size());
        assert_eq!(w.explosions.len(), 1);
    }

    #[test]
    fn dead_entities_are_skipped_within_the_pass() {
        let mut w = world();
        w.aliens.clear();
        w.spawn_alien();
        let target = w.aliens[0].body.pos;
        // two bullets on the same alien: only one kill resolves
        let b1 = bullet_at(&mut w, target);
        let b2 = bullet_at(&mut w, target);
        w.bullets.push(b1);
        w.bullets.push(b2);

        resolve(&mut w);

        assert_eq!(w.score, KILL_SCORE_PER_LEVEL);
        // second bullet found no live target and stays in flight
        assert_eq!(w.bullets.iter().filter(|b| b.body.alive).count(), 1);
    }

    #[test]
    fn boss_defeat_clears_bullets_before_they_reach_the_player() {
        let mut w = world();
        w.level = 3;
        w.aliens.clear();
        w.phase = GamePhase::BossFight;
        w.spawn_boss();
        w.take_events();
        w.boss.as_mut().unwrap().health = BOSS_HIT_DAMAGE;

        let boss_pos = w.boss.as_ref().unwrap().body.pos;
        let bullet = bullet_at(&mut w, boss_pos);
        w.bullets.push(bullet);
        // an enemy bullet already overlapping the player would hit in
        // sub-pass three, but the boss kill in sub-pass two clears it
        let player_pos = w.player.body.pos;
        let eb = enemy_bullet_at(&mut w, player_pos);
        w.enemy_bullets.push(eb);

        resolve(&mut w);

        assert!(w.boss.is_none());
        assert_eq!(w.phase, GamePhase::LevelTransition);
        assert_eq!(w.level, 4);
        assert!(w.bullets.is_empty());
        assert!(w.enemy_bullets.is_empty());
        assert_eq!(w.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(w.score, BOSS_BONUS_PER_LEVEL * 3);
    }

    #[test]
    fn boss_takes_fixed_damage_per_bullet() {
        let mut w = world();
        w.level = 3;
        w.aliens.clear();
        w.phase = GamePhase::BossFight;
        w.spawn_boss();
        let start = w.boss.as_ref().unwrap().health;

        let boss_pos = w.boss.as_ref().unwrap().body.pos;
        let bullet = bullet_at(&mut w, boss_pos);
        w.bullets.push(bullet);
        resolve(&mut w);

        assert_eq!(w.boss.as_ref().unwrap().health, start - BOSS_HIT_DAMAGE);
    }

    #[test]
    fn alien_crash_damages_player_and_awards_nothing() {
        let mut w = world();
        w.aliens[0].body.pos = w.player.body.pos;

        resolve(&mut w);

        assert_eq!(w.score, 0);
        assert_eq!(w.player.health, PLAYER_MAX_HEALTH - ALIEN_CRASH_DAMAGE);
        assert!(!w.aliens[0].body.alive);
        let live = w.aliens.iter().filter(|a| a.body.alive).count();
        assert_eq!(live, w.wave_size());
    }

    #[test]
    fn health_pickup_caps_at_max() {
        let mut w = world();
        w.player.health = 90;
        let id = w.next_entity_id();
        w.powerups.push(PowerUp {
            id,
            kind: PowerUpKind::Health,
            body: Body::new(w.player.body.pos, POWERUP_SIZE),
        });

        resolve(&mut w);

        assert_eq!(w.player.health, PLAYER_MAX_HEALTH);
        assert!(w.powerups.iter().all(|p| !p.body.alive));
    }

    #[test]
    fn bomb_wipes_wave_and_rebuilds_it() {
        let mut w = world();
        w.aliens.clear();
        for _ in 0..4 {
            w.spawn_alien();
        }
        let id = w.next_entity_id();
        w.powerups.push(PowerUp {
            id,
            kind: PowerUpKind::Bomb,
            body: Body::new(w.player.body.pos, POWERUP_SIZE),
        });

        resolve(&mut w);

        assert_eq!(w.score, 4 * KILL_SCORE_PER_LEVEL);
        assert_eq!(w.explosions.len(), 4);
        let live = w.aliens.iter().filter(|a| a.body.alive).count();
        assert_eq!(live, w.wave_size());
    }
}
