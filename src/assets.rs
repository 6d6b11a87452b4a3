//! Sprite glyph supply for the terminal renderer
//!
//! Visuals only: every bounding box the simulation uses comes from
//! `consts`, so a missing or malformed art file changes how entities look,
//! never how they behave. A built-in placeholder set covers every entity
//! kind; an optional JSON file can override individual sprites.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::sim::{EntityKind, PowerUpKind};

/// Multi-row glyph art for one entity kind.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub rows: Vec<String>,
}

impl Sprite {
    fn new(rows: &[&str]) -> Self {
        Self {
            rows: rows.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Stable lookup key for an entity kind, also used in the art file.
pub fn sprite_key(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Player => "player",
        EntityKind::Alien => "alien",
        EntityKind::Boss => "boss",
        EntityKind::Bullet => "bullet",
        EntityKind::EnemyBullet => "enemy_bullet",
        EntityKind::PowerUp(PowerUpKind::Shield) => "powerup_shield",
        EntityKind::PowerUp(PowerUpKind::Health) => "powerup_health",
        EntityKind::PowerUp(PowerUpKind::RapidFire) => "powerup_rapid",
        EntityKind::PowerUp(PowerUpKind::Bomb) => "powerup_bomb",
        EntityKind::Explosion => "explosion",
    }
}

/// All sprites the renderer needs, keyed by entity kind.
#[derive(Debug, Clone)]
pub struct SpriteSet {
    sprites: HashMap<&'static str, Sprite>,
}

impl SpriteSet {
    /// Procedurally generated placeholder art. Always complete.
    pub fn placeholder() -> Self {
        let mut sprites = HashMap::new();
        sprites.insert("player", Sprite::new(&[" ^ ", "/#\\"]));
        sprites.insert("alien", Sprite::new(&["(@)"]));
        sprites.insert("boss", Sprite::new(&["<=[###]=>", " \\#####/ "]));
        sprites.insert("bullet", Sprite::new(&["|"]));
        sprites.insert("enemy_bullet", Sprite::new(&["!"]));
        sprites.insert("powerup_shield", Sprite::new(&["[S]"]));
        sprites.insert("powerup_health", Sprite::new(&["[+]"]));
        sprites.insert("powerup_rapid", Sprite::new(&["[R]"]));
        sprites.insert("powerup_bomb", Sprite::new(&["[B]"]));
        sprites.insert("explosion", Sprite::new(&["***"]));
        Self { sprites }
    }

    /// Load sprite overrides from a JSON art file, falling back to the
    /// placeholders when the file is absent or unreadable.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let mut set = Self::placeholder();
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                log::info!("no sprite file at {}: {err}; using placeholders", path.display());
                return set;
            }
        };
        let overrides: HashMap<String, Vec<String>> = match serde_json::from_str(&text) {
            Ok(map) => map,
            Err(err) => {
                log::warn!(
                    "sprite file {} is not valid JSON: {err}; using placeholders",
                    path.display()
                );
                return set;
            }
        };
        for (key, rows) in overrides {
            if rows.is_empty() {
                log::warn!("sprite {key:?} has no rows; keeping placeholder");
                continue;
            }
            match set.sprites.keys().copied().find(|&k| k == key) {
                Some(known) => {
                    set.sprites.insert(known, Sprite { rows });
                }
                None => log::warn!("sprite file names unknown entity {key:?}; ignored"),
            }
        }
        set
    }

    pub fn sprite(&self, kind: EntityKind) -> &Sprite {
        &self.sprites[sprite_key(kind)]
    }
}

impl Default for SpriteSet {
    fn default() -> Self {
        Self::placeholder()
    }
}
