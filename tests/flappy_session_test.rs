//! Integration test: Flappy driven through its session
//!
//! Flappy advances on every display frame, so these tests feed frame
//! timestamps directly and check physics, scoring and the end of a run.

use arcade::audio::{AudioSink, Sound};
use arcade::core::canvas::CanvasSize;
use arcade::core::driver::FrameOutcome;
use arcade::core::lifecycle::Phase;
use arcade::core::scheduler::Scheduler;
use arcade::core::session::{GameSession, RunSummary};
use arcade::core::Game;
use arcade::flappy::types::{FlappyConfig, FlappyGame, Pipe};
use arcade::scores::{HighScore, MemoryStore};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::rc::Rc;

const FRAME_MS: f64 = 16.0;

/// Sink that remembers what it was asked to play.
#[derive(Debug, Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Sound>>>);

impl AudioSink for Recorder {
    fn play(&mut self, sound: Sound) {
        self.0.borrow_mut().push(sound);
    }
}

/// 400×600 playfield: ground line at y = 480, bird starting at (80, 300).
fn session(seed: u64) -> GameSession<FlappyGame> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let game = FlappyGame::new(FlappyConfig::default(), CanvasSize::new(400.0, 600.0), &mut rng);
    GameSession::new(
        game,
        HighScore::load(Box::new(MemoryStore::new()), FlappyGame::SCORE_KEY),
    )
    .with_seed(seed)
}

/// Run frames until the run ends. Returns the number of frames it took.
fn fall_to_ground(session: &mut GameSession<FlappyGame>, mut now: f64) -> usize {
    for frame in 1..=200 {
        now += FRAME_MS;
        if session.poll_frame(now) == FrameOutcome::Finished {
            return frame;
        }
    }
    panic!("bird never reached the ground");
}

#[test]
fn test_ceiling_scenario_keeps_running() {
    let mut session = session(1);
    session.start(0.0).unwrap();
    let game = session.game_mut();
    game.bird.y = 0.0;
    game.bird.velocity = -8.0;

    assert_eq!(session.poll_frame(FRAME_MS), FrameOutcome::Advanced);
    assert_eq!(session.game().bird.y, 0.0);
    assert_eq!(session.game().bird.velocity, 0.0);
    assert_eq!(session.phase(), Phase::Running);
}

#[test]
fn test_velocity_gains_gravity_each_frame() {
    let mut session = session(2);
    session.start(0.0).unwrap();
    let gravity = session.game().config.gravity;
    let mut now = 0.0;
    for _ in 0..5 {
        let v = session.game().bird.velocity;
        let y = session.game().bird.y;
        now += FRAME_MS;
        session.poll_frame(now);
        assert_eq!(session.game().bird.velocity, v + gravity);
        assert_eq!(session.game().bird.y, y + v + gravity);
    }
}

#[test]
fn test_jump_sets_jump_force_only_while_running() {
    let mut session = session(3);
    assert!(!session.jump());
    assert_eq!(session.game().bird.velocity, 0.0);

    session.start(0.0).unwrap();
    session.poll_frame(FRAME_MS);
    assert!(session.jump());
    assert_eq!(session.game().bird.velocity, session.game().config.jump_force);

    session.toggle_pause(40.0).unwrap();
    session.game_mut().bird.velocity = 3.0;
    assert!(!session.jump());
    assert_eq!(session.game().bird.velocity, 3.0);
}

#[test]
fn test_falling_run_ends_on_ground() {
    let mut session = session(4);
    session.start(0.0).unwrap();
    let frames = fall_to_ground(&mut session, 0.0);

    // y after n frames is 300 + 0.25 n (n + 1); the bottom edge passes
    // 480 at n = 25.
    assert_eq!(frames, 25);
    assert_eq!(session.phase(), Phase::GameOver);
    assert!(!session.scheduler().is_pending());
    assert_eq!(
        session.last_run(),
        Some(RunSummary {
            score: 0,
            new_best: false
        })
    );
    assert_eq!(session.game().bird.y, 460.0);
}

#[test]
fn test_passing_pipe_scores_and_records_best() {
    let mut session = session(5);
    session.start(0.0).unwrap();
    // A pipe just ahead whose gap holds the bird, about to be passed.
    let bird_x = session.game().bird.x;
    session.game_mut().pipes.push(Pipe {
        x: bird_x - 79.0,
        width: 80.0,
        top_height: 100.0,
        bottom_y: 460.0,
        bottom_height: 20.0,
        passed: false,
        highlight_frames: 0,
    });

    assert_eq!(session.poll_frame(FRAME_MS), FrameOutcome::Advanced);
    let game = session.game();
    assert_eq!(game.score, 1);
    assert!(game.pipes[0].passed);
    assert!(game.pipes[0].is_highlighted());
    assert!(game.particles.iter().any(|p| p.text.as_deref() == Some("+1")));

    fall_to_ground(&mut session, FRAME_MS);
    assert_eq!(session.high_score(), 1);
    assert!(session.last_run().is_some_and(|run| run.new_best));
}

#[test]
fn test_sounds_play_only_when_enabled() {
    let recorder = Recorder::default();
    let played = Rc::clone(&recorder.0);
    let mut session = session(6).with_audio(Box::new(recorder), false);

    session.start(0.0).unwrap();
    session.jump();
    assert!(played.borrow().is_empty());

    assert!(session.toggle_sound());
    session.jump();
    assert_eq!(*played.borrow(), vec![Sound::Jump]);

    fall_to_ground(&mut session, 0.0);
    assert_eq!(played.borrow().last(), Some(&Sound::Collision));
}
