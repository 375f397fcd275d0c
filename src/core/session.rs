//! Game session: one game's state plus everything that drives it.
//!
//! The session owns the entity state, the lifecycle, the frame scheduler,
//! the RNG, the high score and the audio sink. The host calls
//! [`GameSession::poll_frame`] once per display frame and renders from
//! shared borrows only.

use super::driver::{FrameClock, FrameOutcome};
use super::lifecycle::{ControlState, Lifecycle, LifecycleError, Phase};
use super::scheduler::{FrameSlot, Scheduler};
use super::{Game, GameEvent};
use crate::audio::{AudioSink, Silent, Sound};
use crate::scores::HighScore;
use crate::snake::types::Direction;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// How the last run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u32,
    pub new_best: bool,
}

#[derive(Debug)]
pub struct GameSession<G: Game, S: Scheduler = FrameSlot> {
    game: G,
    lifecycle: Lifecycle,
    scheduler: S,
    clock: FrameClock,
    high_score: HighScore,
    audio: Box<dyn AudioSink>,
    sound_enabled: bool,
    last_run: Option<RunSummary>,
    rng: StdRng,
}

impl<G: Game> GameSession<G> {
    pub fn new(game: G, high_score: HighScore) -> Self {
        Self::with_scheduler(game, high_score, FrameSlot::new())
    }
}

impl<G: Game, S: Scheduler> GameSession<G, S> {
    pub fn with_scheduler(game: G, high_score: HighScore, scheduler: S) -> Self {
        Self {
            game,
            lifecycle: Lifecycle::new(),
            scheduler,
            clock: FrameClock::new(),
            high_score,
            audio: Box::new(Silent),
            sound_enabled: false,
            last_run: None,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioSink>, enabled: bool) -> Self {
        self.audio = audio;
        self.sound_enabled = enabled;
        self
    }

    /// Fix the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Direct state access for scripted scenarios.
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }

    pub fn controls(&self) -> ControlState {
        ControlState::for_phase(self.phase())
    }

    /// Begin a new run from Idle or GameOver.
    pub fn start(&mut self, now_ms: f64) -> Result<(), LifecycleError> {
        self.lifecycle.start()?;
        self.game.restart(&mut self.rng);
        self.last_run = None;
        self.clock.restart(now_ms);
        self.scheduler.schedule_next();
        info!(game = G::TITLE, "run started");
        Ok(())
    }

    /// Pause or resume. Pausing drops the pending frame; resuming restarts
    /// the clock so the paused time is not fed to the update step.
    pub fn toggle_pause(&mut self, now_ms: f64) -> Result<Phase, LifecycleError> {
        let phase = self.lifecycle.toggle_pause()?;
        match phase {
            Phase::Paused => {
                self.scheduler.cancel();
            }
            _ => {
                self.clock.restart(now_ms);
                self.scheduler.schedule_next();
            }
        }
        info!(game = G::TITLE, %phase, "pause toggled");
        Ok(phase)
    }

    /// Back to Idle from anywhere, with fresh state and nothing scheduled.
    pub fn reset(&mut self) {
        self.scheduler.cancel();
        self.lifecycle.reset();
        self.game.restart(&mut self.rng);
        self.last_run = None;
        info!(game = G::TITLE, "reset");
    }

    /// Steering only counts while running.
    pub fn steer(&mut self, direction: Direction) -> bool {
        self.lifecycle.is_running() && self.game.steer(direction)
    }

    pub fn jump(&mut self) -> bool {
        if !self.lifecycle.is_running() {
            return false;
        }
        let events = self.game.jump(&mut self.rng);
        self.play_events(&events);
        !events.is_empty()
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        debug!(game = G::TITLE, enabled = self.sound_enabled, "sound toggled");
        self.sound_enabled
    }

    /// Host entry point: run the frame if one is scheduled.
    pub fn poll_frame(&mut self, now_ms: f64) -> FrameOutcome {
        match self.scheduler.fire() {
            Some(_) => self.run_frame(now_ms),
            None => FrameOutcome::Halted,
        }
    }

    /// One display frame: gate, update, and reschedule unless the run ended.
    pub fn run_frame(&mut self, now_ms: f64) -> FrameOutcome {
        if !self.lifecycle.is_running() {
            return FrameOutcome::Halted;
        }

        let Some(dt_ms) = self.clock.gate(now_ms, self.game.tick_policy()) else {
            self.scheduler.schedule_next();
            return FrameOutcome::Skipped;
        };

        let report = self.game.update(dt_ms, &mut self.rng);
        self.play_events(&report.events);

        if report.ended {
            self.end_run();
            return FrameOutcome::Finished;
        }

        self.scheduler.schedule_next();
        FrameOutcome::Advanced
    }

    fn end_run(&mut self) {
        if let Err(e) = self.lifecycle.finish() {
            debug!(error = %e, "finish rejected");
        }
        self.scheduler.cancel();
        let score = self.game.score();
        let new_best = self.high_score.submit(score);
        self.last_run = Some(RunSummary { score, new_best });
        info!(game = G::TITLE, score, new_best, "game over");
    }

    fn play_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::LevelUp { level } => info!(game = G::TITLE, level, "level up"),
                GameEvent::SpeedUp { speed } => debug!(game = G::TITLE, speed, "speed up"),
                GameEvent::BoardFilled => info!(game = G::TITLE, "board filled"),
                _ => {}
            }
            if !self.sound_enabled {
                continue;
            }
            if let Some(sound) = Sound::for_event(event) {
                self.audio.play(sound);
            }
        }
    }
}
