//! Game logic for Flappy: physics, pipe spawning, collisions and scoring.

use super::types::*;
use crate::core::driver::TickPolicy;
use crate::core::{Game, GameEvent, TickReport};
use rand::Rng;

/// Jump: velocity is set to the jump force whatever it was before.
pub fn jump<R: Rng>(game: &mut FlappyGame, rng: &mut R) -> GameEvent {
    game.bird.velocity = game.config.jump_force;
    game.particles.emit(
        game.bird.x + BIRD_SIZE / 2.0,
        game.bird.y + BIRD_SIZE,
        &JUMP_PUFF,
        rng,
    );
    GameEvent::Jump
}

/// True when the bird's hitbox overlaps `pipe` outside its gap. Edges that
/// only touch do not collide.
pub fn pipe_collides(bird: &Bird, pipe: &Pipe) -> bool {
    let overlaps_x = bird.x + BIRD_SIZE > pipe.x && bird.x < pipe.x + pipe.width;
    let outside_gap = bird.y < pipe.top_height || bird.y + BIRD_SIZE > pipe.bottom_y;
    overlaps_x && outside_gap
}

/// Process one frame with `dt_ms` elapsed.
pub fn process_tick<R: Rng>(game: &mut FlappyGame, dt_ms: f64, rng: &mut R) -> TickReport {
    let mut report = TickReport::default();
    game.tick_count += 1;

    advance_decoration(game);

    // Explicit Euler, one step per frame.
    game.bird.velocity += game.config.gravity;
    game.bird.y += game.bird.velocity;
    game.bird.rotation = (game.bird.velocity * 0.05).clamp(-1.0, 1.0);

    let ground_y = game.ground_y();
    if game.bird.y + BIRD_SIZE > ground_y {
        game.bird.y = ground_y - BIRD_SIZE;
        crash(game, &mut report, rng);
        return report;
    }

    if game.bird.y < 0.0 {
        game.bird.y = 0.0;
        game.bird.velocity = 0.0;
    }

    game.pipe_timer_ms += dt_ms;
    if game.pipe_timer_ms > game.config.pipe_period_ms {
        game.spawn_pipe(rng);
        game.pipe_timer_ms = 0.0;
    }

    scroll_pipes(game);

    if game.pipes.iter().any(|pipe| pipe_collides(&game.bird, pipe)) {
        crash(game, &mut report, rng);
        return report;
    }

    check_score(game, &mut report);
    update_speed(game, &mut report);

    game.particles.age();
    report
}

fn advance_decoration(game: &mut FlappyGame) {
    let width = game.canvas.width.max(1.0);
    game.background_offset = (game.background_offset + game.config.background_speed) % width;
    game.ground_offset = (game.ground_offset + game.speed * 0.5) % width;
    for star in &mut game.stars {
        star.phase += star.blink_speed;
        star.brightness = 0.3 + star.phase.sin() * 0.35;
    }
}

fn scroll_pipes(game: &mut FlappyGame) {
    for pipe in &mut game.pipes {
        pipe.x -= game.speed;
        pipe.highlight_frames = pipe.highlight_frames.saturating_sub(1);
    }
    game.pipes.retain(|p| p.x + p.width >= 0.0);
}

fn check_score(game: &mut FlappyGame, report: &mut TickReport) {
    let popup_y = game.canvas.height * 0.5;
    for pipe in &mut game.pipes {
        if !pipe.passed && game.bird.x > pipe.x + pipe.width {
            pipe.passed = true;
            pipe.highlight_frames = PIPE_HIGHLIGHT_FRAMES;
            game.score += 1;
            let x = pipe.x + pipe.width;
            game.particles.popup(x, popup_y, "+1", (2.0, -3.0));
            report.push(GameEvent::PipePassed { score: game.score });
        }
    }
}

/// Recompute speed once the score crosses into a new multiple of five.
fn update_speed(game: &mut FlappyGame, report: &mut TickReport) {
    if game.score / 5 > game.speed_checkpoint / 5 {
        game.speed = game.config.speed_for(game.score);
        game.speed_checkpoint = game.score;
        report.push(GameEvent::SpeedUp { speed: game.speed });
    }
}

fn crash<R: Rng>(game: &mut FlappyGame, report: &mut TickReport, rng: &mut R) {
    let half = BIRD_SIZE / 2.0;
    let (x, y) = (game.bird.x + half, game.bird.y + half);
    game.particles.emit(x, y, &COLLISION_BURST, rng);
    report.end();
}

impl Game for FlappyGame {
    const SCORE_KEY: &'static str = "flappyHighScore";
    const TITLE: &'static str = "FLAPPY";

    fn restart<R: Rng>(&mut self, rng: &mut R) {
        FlappyGame::restart(self, rng);
    }

    fn tick_policy(&self) -> TickPolicy {
        TickPolicy::Continuous
    }

    fn update<R: Rng>(&mut self, dt_ms: f64, rng: &mut R) -> TickReport {
        process_tick(self, dt_ms, rng)
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn jump<R: Rng>(&mut self, rng: &mut R) -> Vec<GameEvent> {
        vec![jump(self, rng)]
    }
}
