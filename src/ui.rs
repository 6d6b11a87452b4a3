//! Terminal rendering of simulation snapshots
//!
//! Pure presentation: consumes the read-only snapshot the world produces
//! each tick and feeds nothing back into the simulation.

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph};

use crate::assets::SpriteSet;
use crate::consts::*;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{EntityKind, EntityView, GamePhase, PowerUpKind, Snapshot};

/// Explosion glyph ramp, indexed by animation frame.
const EXPLOSION_RAMP: [char; 6] = ['.', 'o', 'O', '*', '#', '+'];

pub fn draw(
    frame: &mut Frame,
    snapshot: &Snapshot,
    sprites: &SpriteSet,
    settings: &Settings,
    scores: &HighScores,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Green))
        .title(" Alien Siege ")
        .title_style(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD));
    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let boss_row = u16::from(snapshot.boss_health_ratio.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(boss_row),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(status_line(snapshot, settings)), chunks[0]);

    if let Some(ratio) = snapshot.boss_health_ratio {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
            .ratio(f64::from(ratio.clamp(0.0, 1.0)))
            .label(format!("BOSS {:.0}%", ratio * 100.0));
        frame.render_widget(gauge, chunks[1]);
    }

    render_field(frame, chunks[2], snapshot, sprites, settings);
    frame.render_widget(Paragraph::new(help_line(snapshot)), chunks[3]);

    match snapshot.phase {
        GamePhase::LevelTransition => {
            banner(
                frame,
                chunks[2],
                format!(" LEVEL {} ", snapshot.level),
                Color::Yellow,
            );
        }
        GamePhase::GameOver => {
            game_over_panel(frame, chunks[2], snapshot, scores);
        }
        _ => {}
    }
}

fn status_line(snapshot: &Snapshot, settings: &Settings) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!(" Score: {} ", snapshot.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled(
            format!("Level: {} ", snapshot.level),
            Style::default().fg(Color::Green),
        ),
        sep(),
        Span::styled(
            format!("Lives: {} ", "\u{2665} ".repeat(snapshot.lives as usize)),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled(
            format!("HP: {:3}/{} ", snapshot.health, snapshot.max_health),
            Style::default().fg(health_color(snapshot)),
        ),
    ];
    if settings.show_wave_progress && snapshot.phase == GamePhase::InWave {
        spans.push(sep());
        spans.push(Span::styled(
            format!(
                "Wave: {}/{} ",
                snapshot.kills_this_level.min(snapshot.level_kill_quota),
                snapshot.level_kill_quota
            ),
            Style::default().fg(Color::Cyan),
        ));
    }
    if settings.show_effect_timers {
        if snapshot.shield_ticks > 0 {
            spans.push(sep());
            spans.push(Span::styled(
                format!("Shield {}s ", snapshot.shield_ticks.div_ceil(TICK_HZ)),
                Style::default().fg(Color::LightBlue),
            ));
        }
        if snapshot.rapid_fire_ticks > 0 {
            spans.push(sep());
            spans.push(Span::styled(
                format!("Rapid {}s ", snapshot.rapid_fire_ticks.div_ceil(TICK_HZ)),
                Style::default().fg(Color::LightMagenta),
            ));
        }
    }
    Line::from(spans)
}

fn sep() -> Span<'static> {
    Span::styled("| ", Style::default().fg(Color::DarkGray))
}

fn health_color(snapshot: &Snapshot) -> Color {
    if snapshot.health > 60 {
        Color::Green
    } else if snapshot.health > 25 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn help_line(snapshot: &Snapshot) -> Line<'static> {
    if snapshot.phase == GamePhase::GameOver {
        Line::from(Span::styled(
            " Enter Play again | q Quit",
            Style::default().fg(Color::Gray),
        ))
    } else {
        Line::from(Span::styled(
            " \u{2190}\u{2192}\u{2191}\u{2193} Move | Space Shoot | q Quit",
            Style::default().fg(Color::DarkGray),
        ))
    }
}

/// Paint every entity's sprite into a character grid scaled from playfield
/// pixels to terminal cells.
fn render_field(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    sprites: &SpriteSet,
    settings: &Settings,
) {
    let (w, h) = (area.width as usize, area.height as usize);
    if w == 0 || h == 0 {
        return;
    }
    let sx = w as f32 / FIELD_WIDTH;
    let sy = h as f32 / FIELD_HEIGHT;

    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default()); w]; h];

    for entity in &snapshot.entities {
        paint_entity(&mut grid, entity, sprites, settings, sx, sy);
    }

    let lines: Vec<Line<'static>> = grid
        .into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn paint_entity(
    grid: &mut [Vec<(char, Style)>],
    entity: &EntityView,
    sprites: &SpriteSet,
    settings: &Settings,
    sx: f32,
    sy: f32,
) {
    let style = Style::default().fg(entity_color(entity.kind));
    let cx = (entity.pos.x * sx) as i32;
    let cy = (entity.pos.y * sy) as i32;

    if entity.kind == EntityKind::Explosion {
        let ch = if settings.reduced_motion {
            '*'
        } else {
            EXPLOSION_RAMP[(entity.frame as usize).min(EXPLOSION_RAMP.len() - 1)]
        };
        set_cell(grid, cx, cy, ch, style.add_modifier(Modifier::BOLD));
        return;
    }

    let sprite = sprites.sprite(entity.kind);
    for (dy, row) in sprite.rows.iter().enumerate() {
        for (dx, ch) in row.chars().enumerate() {
            if ch != ' ' {
                set_cell(grid, cx + dx as i32, cy + dy as i32, ch, style);
            }
        }
    }
}

fn set_cell(grid: &mut [Vec<(char, Style)>], x: i32, y: i32, ch: char, style: Style) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if y < grid.len() && x < grid[y].len() {
        grid[y][x] = (ch, style);
    }
}

fn entity_color(kind: EntityKind) -> Color {
    match kind {
        EntityKind::Player => Color::LightGreen,
        EntityKind::Alien => Color::LightRed,
        EntityKind::Boss => Color::Magenta,
        EntityKind::Bullet => Color::White,
        EntityKind::EnemyBullet => Color::Red,
        EntityKind::PowerUp(PowerUpKind::Shield) => Color::LightBlue,
        EntityKind::PowerUp(PowerUpKind::Health) => Color::Green,
        EntityKind::PowerUp(PowerUpKind::RapidFire) => Color::LightMagenta,
        EntityKind::PowerUp(PowerUpKind::Bomb) => Color::Yellow,
        EntityKind::Explosion => Color::Yellow,
    }
}

/// Centered one-line banner over the playfield.
fn banner(frame: &mut Frame, area: Rect, text: String, color: Color) {
    let width = (text.len() as u16 + 2).min(area.width);
    let rect = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + area.height / 2,
        width,
        height: 1,
    };
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .centered(),
        rect,
    );
}

/// End screen: final score plus the session leaderboard.
fn game_over_panel(frame: &mut Frame, area: Rect, snapshot: &Snapshot, scores: &HighScores) {
    let mut lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(Span::styled(
            format!("Final score: {}  (level {})", snapshot.score, snapshot.level),
            Style::default().fg(Color::Yellow),
        ))
        .centered(),
        Line::default(),
    ];
    if !scores.is_empty() {
        lines.push(
            Line::from(Span::styled(
                "Best runs this session",
                Style::default().fg(Color::Cyan),
            ))
            .centered(),
        );
        for (i, entry) in scores.entries.iter().take(5).enumerate() {
            lines.push(
                Line::from(Span::styled(
                    format!("{}. {:>6}  level {}", i + 1, entry.score, entry.level),
                    Style::default().fg(Color::Gray),
                ))
                .centered(),
            );
        }
    }

    let height = (lines.len() as u16).min(area.height);
    let rect = Rect {
        x: area.x,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width: area.width,
        height,
    };
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines), rect);
}
