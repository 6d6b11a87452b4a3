//! Alien Siege entry point
//!
//! Owns everything the simulation must not know about: terminal setup,
//! the fixed-tick event loop, input sampling, audio cue dispatch, and the
//! play-again menu loop. The sim core sees only `TickInput` and produces
//! only snapshots and events.

use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use alien_siege::HighScores;
use alien_siege::assets::SpriteSet;
use alien_siege::audio::{AudioManager, cue_for_event};
use alien_siege::consts::TICK_HZ;
use alien_siege::settings::Settings;
use alien_siege::sim::{GameEvent, GamePhase, TickInput, World, tick};
use alien_siege::ui;

const SETTINGS_PATH: &str = "alien-siege-settings.json";
const SPRITES_PATH: &str = "assets/sprites.json";
const LOG_PATH: &str = "alien-siege.log";

enum Event {
    Key(KeyEvent),
    Tick,
}

/// Multiplexes key events and a fixed-rate tick heartbeat onto one channel
/// so the main loop stays single-threaded over the world.
struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) {
                    if let Ok(event::Event::Key(key)) = event::read() {
                        if key.kind == KeyEventKind::Press && tx.send(Event::Key(key)).is_err() {
                            return;
                        }
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    last_tick = Instant::now();
                    if tx.send(Event::Tick).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx }
    }

    fn next(&self) -> io::Result<Event> {
        self.rx.recv().map_err(io::Error::other)
    }
}

/// Keys pressed since the last tick, consumed when the tick fires.
/// Terminal key auto-repeat stands in for true hold detection.
#[derive(Default)]
struct HeldKeys {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    shoot: bool,
}

impl HeldKeys {
    fn press(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('a') => self.left = true,
            KeyCode::Right | KeyCode::Char('d') => self.right = true,
            KeyCode::Up | KeyCode::Char('w') => self.up = true,
            KeyCode::Down | KeyCode::Char('s') => self.down = true,
            KeyCode::Char(' ') => self.shoot = true,
            _ => {}
        }
    }

    fn take(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            shoot: self.shoot,
        };
        *self = Self::default();
        input
    }
}

/// Pipe logs to a file when logging is requested, keeping the terminal
/// free for the game itself.
fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    match std::fs::File::create(LOG_PATH) {
        Ok(file) => {
            env_logger::Builder::from_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(_) => env_logger::init(),
    }
}

/// Session seed: `--seed N` for reproducible runs, wall clock otherwise.
/// The simulation itself never reads a clock.
fn session_seed() -> u64 {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--seed" {
            if let Some(value) = args.next() {
                match value.parse() {
                    Ok(seed) => return seed,
                    Err(_) => log::warn!("ignoring unparsable --seed value {value:?}"),
                }
            }
        }
    }
    entropy_seed()
}

fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

fn main() -> io::Result<()> {
    init_logging();

    let settings = Settings::load(SETTINGS_PATH);
    let sprites = SpriteSet::load(SPRITES_PATH);
    let mut audio = AudioManager::new();
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_muted(settings.muted);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &settings, &sprites, &audio);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
    sprites: &SpriteSet,
    audio: &AudioManager,
) -> io::Result<()> {
    let events = EventHandler::new(Duration::from_millis(1000 / TICK_HZ));
    let mut scores = HighScores::new();
    let mut held = HeldKeys::default();
    let mut world = World::new(session_seed());
    log::info!("session started with seed {}", world.seed);

    loop {
        terminal.draw(|frame| ui::draw(frame, &world.snapshot(), sprites, settings, &scores))?;

        match events.next()? {
            Event::Tick => {
                let input = held.take();
                tick(&mut world, &input);
                for game_event in world.take_events() {
                    if game_event == GameEvent::GameOver {
                        scores.add_score(world.score, world.level);
                    }
                    if let Some(cue) = cue_for_event(&game_event) {
                        audio.play(cue);
                    }
                }
            }
            Event::Key(key) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Enter | KeyCode::Char('r') if world.phase == GamePhase::GameOver => {
                    // fresh world, fresh seed: a new session from level 1
                    world = World::new(entropy_seed());
                    log::info!("new session with seed {}", world.seed);
                }
                code => held.press(code),
            },
        }
    }

    Ok(())
}
