//! Integration test: Snake driven through its session
//!
//! Runs the snake the way the terminal loop does: one `poll_frame` per
//! display frame, with the throttled driver deciding when a step happens.

use arcade::core::canvas::CanvasSize;
use arcade::core::driver::FrameOutcome;
use arcade::core::lifecycle::Phase;
use arcade::core::scheduler::Scheduler;
use arcade::core::session::GameSession;
use arcade::core::Game;
use arcade::scores::{HighScore, MemoryStore};
use arcade::snake::types::{Direction, Position, SnakeConfig, SnakeGame};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// 20×20 board (400 px canvas, 20 px cells).
fn session(seed: u64) -> GameSession<SnakeGame> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let game = SnakeGame::new(SnakeConfig::default(), CanvasSize::new(400.0, 400.0), &mut rng);
    GameSession::new(
        game,
        HighScore::load(Box::new(MemoryStore::new()), SnakeGame::SCORE_KEY),
    )
    .with_seed(seed)
}

/// Put food right in front of the head and advance one step.
fn feed(session: &mut GameSession<SnakeGame>, now_ms: f64) -> FrameOutcome {
    let game = session.game_mut();
    game.food = game.head().step(game.next_direction);
    session.poll_frame(now_ms)
}

#[test]
fn test_twenty_by_twenty_eat_scenario() {
    let mut session = session(1);
    session.start(0.0).unwrap();
    assert_eq!(session.game().grid_size, 20);
    assert_eq!(
        session.game().body.iter().copied().collect::<Vec<_>>(),
        vec![Position::new(10, 10), Position::new(9, 10), Position::new(8, 10)]
    );
    session.game_mut().food = Position::new(11, 10);

    // 100 ms is inside the 150 ms interval: skipped, state untouched.
    let before = session.game().clone();
    assert_eq!(session.poll_frame(100.0), FrameOutcome::Skipped);
    assert_eq!(session.game(), &before);

    assert_eq!(session.poll_frame(151.0), FrameOutcome::Advanced);
    let game = session.game();
    assert_eq!(game.head(), Position::new(11, 10));
    assert_eq!(game.body.len(), 4);
    assert_eq!(game.score, 10 * game.level);
    assert!(!game.body.contains(&game.food));
}

#[test]
fn test_length_and_score_invariants_until_wall() {
    let mut session = session(7);
    session.start(0.0).unwrap();

    let mut now = 0.0;
    let mut outcome = FrameOutcome::Skipped;
    for _ in 0..100 {
        let len = session.game().body.len();
        let score = session.game().score;
        now += 151.0;
        outcome = session.poll_frame(now);
        if outcome == FrameOutcome::Finished {
            break;
        }
        assert_eq!(outcome, FrameOutcome::Advanced);

        let game = session.game();
        assert!(game.score >= score);
        if game.score > score {
            assert_eq!(game.body.len(), len + 1);
        } else {
            assert_eq!(game.body.len(), len);
        }
        assert!(!game.body.contains(&game.food));
    }

    // Heading right from the centre, the wall is ten steps away.
    assert_eq!(outcome, FrameOutcome::Finished);
    assert_eq!(session.phase(), Phase::GameOver);
    assert!(!session.scheduler().is_pending());
    assert_eq!(session.poll_frame(now + 500.0), FrameOutcome::Halted);
}

#[test]
fn test_reversal_requests_are_ignored() {
    let mut session = session(3);
    session.start(0.0).unwrap();
    assert!(!session.steer(Direction::Left));
    assert!(session.steer(Direction::Up));
    // Judged against the current heading, so Down is still allowed.
    assert!(session.steer(Direction::Down));

    session.poll_frame(151.0);
    assert_eq!(session.game().direction, Direction::Down);
    assert_eq!(session.game().head(), Position::new(10, 11));
}

#[test]
fn test_score_resets_on_start_and_reset() {
    let mut session = session(5);
    session.start(0.0).unwrap();
    feed(&mut session, 151.0);
    assert_eq!(session.game().score, 10);

    session.reset();
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.game().score, 0);
    assert_eq!(session.game().body.len(), 3);

    session.start(1000.0).unwrap();
    feed(&mut session, 1151.0);
    session.toggle_pause(1200.0).unwrap();
    session.toggle_pause(5000.0).unwrap();
    assert_eq!(session.game().score, 10);
    // The pause is not counted as elapsed time.
    assert_eq!(session.poll_frame(5100.0), FrameOutcome::Skipped);
}

#[test]
fn test_level_up_shortens_interval() {
    let mut session = session(9);
    session.start(0.0).unwrap();
    // Ten cells of room above the centre row.
    session.steer(Direction::Up);
    let mut now = 0.0;
    for _ in 0..9 {
        now += 151.0;
        feed(&mut session, now);
    }
    assert_eq!(session.game().level, 1);
    assert_eq!(session.game().score, 90);

    now += 151.0;
    feed(&mut session, now);
    let game = session.game();
    assert_eq!(game.score, 100);
    assert_eq!(game.level, 2);
    assert_eq!(game.interval_ms, 145.0);
}
