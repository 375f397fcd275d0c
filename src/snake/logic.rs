//! Snake game logic: direction buffering, the movement step, scoring and
//! the particle effects that go with them.

use super::types::*;
use crate::core::driver::TickPolicy;
use crate::core::{Game, GameEvent, TickReport};
use rand::Rng;

/// Buffer a direction for the next step. A request to reverse onto the
/// current heading is ignored.
pub fn request_direction(game: &mut SnakeGame, direction: Direction) -> bool {
    if direction == game.direction.opposite() {
        return false;
    }
    game.next_direction = direction;
    true
}

/// Single movement step.
pub fn step_snake<R: Rng>(game: &mut SnakeGame, rng: &mut R) -> TickReport {
    let mut report = TickReport::default();
    game.tick_count += 1;

    game.direction = game.next_direction;
    let new_head = game.head().step(game.direction);

    // Tail included: the tail has not moved yet when the head arrives.
    if !game.in_bounds(new_head) || game.body.contains(&new_head) {
        emit_death(game, rng);
        report.end();
        return report;
    }

    game.body.push_front(new_head);

    if new_head == game.food {
        eat_food(game, new_head, &mut report, rng);
    } else {
        game.body.pop_back();
    }

    game.particles.age();
    report
}

fn eat_food<R: Rng>(game: &mut SnakeGame, at: Position, report: &mut TickReport, rng: &mut R) {
    let points = game.config.points_per_food * game.level;
    game.score += points;
    report.push(GameEvent::FoodEaten { points });

    let new_level = game.config.level_for(game.score);
    if new_level > game.level {
        game.level = new_level;
        game.interval_ms = game.config.interval_for(new_level);
        let (cx, cy) = game.canvas.center();
        game.particles.emit(cx, cy, &LEVEL_UP_BURST, rng);
        report.push(GameEvent::LevelUp { level: new_level });
    }

    let (px, py) = game.cell_center(at);
    game.particles.popup(px, py, format!("+{points}"), (0.0, -3.0));

    // No free cell left: the run is complete.
    let Some(food) = spawn_food(game, rng) else {
        report.finish(GameEvent::BoardFilled);
        return;
    };
    game.food = food;
    let (fx, fy) = game.cell_center(food);
    game.particles.emit(fx, fy, &FOOD_SPARKLE, rng);
}

fn emit_death<R: Rng>(game: &mut SnakeGame, rng: &mut R) {
    let segments: Vec<(f64, f64)> = game.body.iter().map(|&p| game.cell_center(p)).collect();
    for (x, y) in segments {
        game.particles.emit(x, y, &SEGMENT_DEBRIS, rng);
    }
    let (hx, hy) = game.cell_center(game.head());
    game.particles.emit(hx, hy, &HEAD_EXPLOSION, rng);
}

impl Game for SnakeGame {
    const SCORE_KEY: &'static str = "snakeHighScore";
    const TITLE: &'static str = "SNAKE";

    fn restart<R: Rng>(&mut self, rng: &mut R) {
        SnakeGame::restart(self, rng);
    }

    fn tick_policy(&self) -> TickPolicy {
        TickPolicy::Throttled {
            interval_ms: self.interval_ms,
        }
    }

    fn update<R: Rng>(&mut self, _dt_ms: f64, rng: &mut R) -> TickReport {
        step_snake(self, rng)
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn steer(&mut self, direction: Direction) -> bool {
        request_direction(self, direction)
    }
}
