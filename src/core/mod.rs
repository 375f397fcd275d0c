//! Shared engine: lifecycle, frame scheduling, tick gating, particles and
//! the session that ties them to a game.

pub mod canvas;
pub mod driver;
pub mod lifecycle;
pub mod particles;
pub mod scheduler;
pub mod session;

use crate::snake::types::Direction;
use driver::TickPolicy;
use rand::Rng;

/// Something that happened during an update step or an input action.
/// Sessions turn these into sounds and log lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Jump,
    FoodEaten { points: u32 },
    PipePassed { score: u32 },
    LevelUp { level: u32 },
    SpeedUp { speed: f64 },
    Collision,
    /// The snake covers every cell; the run ends without a crash.
    BoardFilled,
}

/// Result of one update step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
    /// The run ended this step (collision, boundary failure or a full board).
    pub ended: bool,
}

impl TickReport {
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Record a collision and mark the run over.
    pub fn end(&mut self) {
        self.events.push(GameEvent::Collision);
        self.ended = true;
    }

    /// Mark the run over with a closing event other than a collision.
    pub fn finish(&mut self, event: GameEvent) {
        self.events.push(event);
        self.ended = true;
    }
}

/// A game the session can drive: entity state plus a pure update step.
pub trait Game {
    /// Key the high score is stored under.
    const SCORE_KEY: &'static str;
    const TITLE: &'static str;

    /// Reset entity and particle state for a new run.
    fn restart<R: Rng>(&mut self, rng: &mut R);

    /// How the frame driver gates this game's update step.
    fn tick_policy(&self) -> TickPolicy;

    /// Advance one step. `dt_ms` is the time since the previous step.
    fn update<R: Rng>(&mut self, dt_ms: f64, rng: &mut R) -> TickReport;

    fn score(&self) -> u32;

    /// Buffer a direction change. Returns whether it was accepted.
    fn steer(&mut self, _direction: Direction) -> bool {
        false
    }

    fn jump<R: Rng>(&mut self, _rng: &mut R) -> Vec<GameEvent> {
        Vec::new()
    }
}
