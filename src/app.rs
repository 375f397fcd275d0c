//! Application shell: the menu, the two game sessions and event routing.

use crate::audio::TerminalBell;
use crate::config::ArcadeConfig;
use crate::core::canvas::{CanvasSize, FLAPPY_ASPECT, SNAKE_ASPECT};
use crate::core::lifecycle::{LifecycleError, Phase};
use crate::core::session::GameSession;
use crate::core::Game;
use crate::flappy::types::FlappyGame;
use crate::input::{map_key, map_mouse, Command, GameKind, SwipeTracker};
use crate::scores::{HighScore, JsonFileStore, MemoryStore, ScoreStore};
use crate::snake::types::SnakeGame;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing(GameKind),
}

#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    pub menu_index: usize,
    pub snake: GameSession<SnakeGame>,
    pub flappy: GameSession<FlappyGame>,
    swipe: SwipeTracker,
    pub should_quit: bool,
}

fn score_store() -> Box<dyn ScoreStore> {
    match JsonFileStore::open_default() {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "high scores will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

impl App {
    /// Build both sessions from the config, with scores in `~/.arcade/`.
    pub fn from_config(config: &ArcadeConfig) -> Self {
        let mut rng = StdRng::from_entropy();
        let snake = SnakeGame::new(
            config.snake.clone(),
            CanvasSize::fit(config.container_width, SNAKE_ASPECT),
            &mut rng,
        );
        let flappy = FlappyGame::new(
            config.flappy.clone(),
            CanvasSize::fit(config.container_width, FLAPPY_ASPECT),
            &mut rng,
        );
        // The bell is always installed; the sound toggle decides whether it rings.
        let snake = GameSession::new(snake, HighScore::load(score_store(), SnakeGame::SCORE_KEY))
            .with_audio(Box::new(TerminalBell), config.sound_enabled);
        let flappy =
            GameSession::new(flappy, HighScore::load(score_store(), FlappyGame::SCORE_KEY))
                .with_audio(Box::new(TerminalBell), config.sound_enabled);
        Self::new(snake, flappy)
    }

    pub fn new(snake: GameSession<SnakeGame>, flappy: GameSession<FlappyGame>) -> Self {
        Self {
            screen: Screen::Menu,
            menu_index: 0,
            snake,
            flappy,
            swipe: SwipeTracker::new(),
            should_quit: false,
        }
    }

    /// Open a game screen directly.
    pub fn open(&mut self, kind: GameKind) {
        self.screen = Screen::Playing(kind);
        self.menu_index = GameKind::ALL.iter().position(|&k| k == kind).unwrap_or(0);
    }

    pub fn phase(&self, kind: GameKind) -> Phase {
        match kind {
            GameKind::Snake => self.snake.phase(),
            GameKind::Flappy => self.flappy.phase(),
        }
    }

    /// Route one terminal event. Returns true when the screen needs a redraw.
    pub fn handle_event(&mut self, event: Event, now_ms: f64) -> bool {
        match (self.screen, event) {
            (_, Event::Resize(_, _)) => true,
            (Screen::Menu, Event::Key(key)) => self.handle_menu_key(key),
            (Screen::Playing(kind), Event::Key(key)) => {
                match map_key(kind, self.phase(kind), key) {
                    Some(command) => {
                        self.apply(kind, command, now_ms);
                        true
                    }
                    None => false,
                }
            }
            (Screen::Playing(kind), Event::Mouse(mouse)) => {
                match map_mouse(kind, mouse, &mut self.swipe) {
                    Some(command) => {
                        self.apply(kind, command, now_ms);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        let count = GameKind::ALL.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_index = (self.menu_index + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu_index = (self.menu_index + 1) % count;
            }
            KeyCode::Char('1') => self.open(GameKind::Snake),
            KeyCode::Char('2') => self.open(GameKind::Flappy),
            KeyCode::Enter => self.open(GameKind::ALL[self.menu_index % count]),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => return false,
        }
        true
    }

    /// Apply a command to one game's session.
    pub fn apply(&mut self, kind: GameKind, command: Command, now_ms: f64) {
        let result = match kind {
            GameKind::Snake => apply_to(&mut self.snake, command, now_ms),
            GameKind::Flappy => apply_to(&mut self.flappy, command, now_ms),
        };
        if let Err(e) = result {
            debug!(game = kind.name(), ?command, error = %e, "command ignored");
        }
        match command {
            Command::Back => self.screen = Screen::Menu,
            Command::Quit => self.should_quit = true,
            _ => {}
        }
    }

    /// Drive the frame scheduler of the visible game. Returns true when
    /// something changed on screen.
    pub fn on_frame(&mut self, now_ms: f64) -> bool {
        match self.screen {
            Screen::Menu => false,
            Screen::Playing(GameKind::Snake) => self.snake.poll_frame(now_ms).needs_render(),
            Screen::Playing(GameKind::Flappy) => self.flappy.poll_frame(now_ms).needs_render(),
        }
    }
}

fn apply_to<G: Game>(
    session: &mut GameSession<G>,
    command: Command,
    now_ms: f64,
) -> Result<(), LifecycleError> {
    match command {
        Command::Start => session.start(now_ms)?,
        Command::TogglePause => {
            session.toggle_pause(now_ms)?;
        }
        Command::Reset => session.reset(),
        Command::Steer(direction) => {
            session.steer(direction);
        }
        Command::Jump => {
            session.jump();
        }
        Command::ToggleSound => {
            session.toggle_sound();
        }
        // Leaving the screen pauses a live run so it does not play unseen.
        Command::Back if session.phase() == Phase::Running => {
            session.toggle_pause(now_ms)?;
        }
        Command::Back | Command::Quit => {}
    }
    Ok(())
}
