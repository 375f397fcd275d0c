//! Snake game data structures.
//!
//! The player steers a snake around a square grid eating food. Each food is
//! worth `10 × level`; every 100 points is a new level and a faster tick.

use crate::core::canvas::CanvasSize;
use crate::core::particles::{Burst, ParticleField, Palette, Rgb, Spread};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Tunable Snake constants, loaded from the `snake` section of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Logical pixels per grid cell.
    pub cell_px: f64,
    /// Tick interval at level 1 (ms).
    pub initial_interval_ms: f64,
    /// Interval reduction per level (ms).
    pub interval_step_ms: f64,
    /// Fastest allowed interval (ms).
    pub min_interval_ms: f64,
    pub points_per_food: u32,
    /// Points needed per level.
    pub level_span: u32,
    pub show_grid: bool,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            cell_px: 20.0,
            initial_interval_ms: 150.0,
            interval_step_ms: 5.0,
            min_interval_ms: 50.0,
            points_per_food: 10,
            level_span: 100,
            show_grid: true,
        }
    }
}

impl SnakeConfig {
    /// Level reached at `score`. Always at least 1.
    pub fn level_for(&self, score: u32) -> u32 {
        score / self.level_span.max(1) + 1
    }

    /// Tick interval for `level`, floored at `min_interval_ms`.
    pub fn interval_for(&self, level: u32) -> f64 {
        let reduced =
            self.initial_interval_ms - level.saturating_sub(1) as f64 * self.interval_step_ms;
        reduced.max(self.min_interval_ms)
    }
}

/// Cardinal direction for snake movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the (dx, dy) delta for this direction.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// A cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

pub const FOOD_COLOR: Rgb = Rgb(1, 255, 195);

/// Sparkle emitted where new food appears.
pub const FOOD_SPARKLE: Burst = Burst {
    count: 8,
    spread: Spread::Even,
    speed: (2.0, 3.0),
    size: (2.0, 3.0),
    life: (30.0, 20.0),
    max_life: 50.0,
    palette: Palette::Cycle(&[FOOD_COLOR]),
};

/// Gold/orange ring at the board centre on level-up.
pub const LEVEL_UP_BURST: Burst = Burst {
    count: 30,
    spread: Spread::Even,
    speed: (1.0, 3.0),
    size: (3.0, 4.0),
    life: (50.0, 30.0),
    max_life: 80.0,
    palette: Palette::Cycle(&[Rgb::GOLD, Rgb::ORANGE]),
};

/// Fragments shed by every body segment on death.
pub const SEGMENT_DEBRIS: Burst = Burst {
    count: 3,
    spread: Spread::Random,
    speed: (1.0, 3.0),
    size: (2.0, 4.0),
    life: (30.0, 40.0),
    max_life: 70.0,
    palette: Palette::Hues { from: 0.0, to: 60.0 },
};

/// Explosion at the head on death.
pub const HEAD_EXPLOSION: Burst = Burst {
    count: 50,
    spread: Spread::Random,
    speed: (2.0, 5.0),
    size: (3.0, 5.0),
    life: (40.0, 50.0),
    max_life: 90.0,
    palette: Palette::Hues { from: 0.0, to: 60.0 },
};

/// Main game state.
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeGame {
    pub config: SnakeConfig,
    pub canvas: CanvasSize,
    /// Cells per side; the board is square.
    pub grid_size: i16,

    /// Snake body segments. Head is at the front (index 0).
    pub body: VecDeque<Position>,
    /// Direction applied on the last tick.
    pub direction: Direction,
    /// Buffered input, applied at the start of the next tick.
    pub next_direction: Direction,

    pub food: Position,

    pub score: u32,
    pub level: u32,
    /// Current tick interval (ms).
    pub interval_ms: f64,

    pub particles: ParticleField,
    /// Movement steps taken this run.
    pub tick_count: u64,
}

impl SnakeGame {
    pub fn new<R: Rng>(mut config: SnakeConfig, canvas: CanvasSize, rng: &mut R) -> Self {
        // Grid, hit tests and drawing all read this one value.
        config.cell_px = config.cell_px.max(1.0);
        let grid_size = ((canvas.width / config.cell_px).floor() as i16).max(4);
        let interval_ms = config.initial_interval_ms;
        let mut game = Self {
            config,
            canvas,
            grid_size,
            body: VecDeque::new(),
            direction: Direction::Right,
            next_direction: Direction::Right,
            food: Position::new(0, 0),
            score: 0,
            level: 1,
            interval_ms,
            particles: ParticleField::new(),
            tick_count: 0,
        };
        game.restart(rng);
        game
    }

    /// Put the board back to its starting layout: three segments in the
    /// centre heading right, score 0, level 1, no particles.
    pub fn restart<R: Rng>(&mut self, rng: &mut R) {
        let center = self.grid_size / 2;
        self.body = VecDeque::from(vec![
            Position::new(center, center),
            Position::new(center - 1, center),
            Position::new(center - 2, center),
        ]);
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.score = 0;
        self.level = 1;
        self.interval_ms = self.config.initial_interval_ms;
        self.particles.clear();
        self.tick_count = 0;
        if let Some(food) = spawn_food(self, rng) {
            self.food = food;
        }
        let (fx, fy) = self.cell_center(self.food);
        self.particles.emit(fx, fy, &FOOD_SPARKLE, rng);
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        (0..self.grid_size).contains(&pos.x) && (0..self.grid_size).contains(&pos.y)
    }

    /// Centre of a cell in canvas pixels.
    pub fn cell_center(&self, pos: Position) -> (f64, f64) {
        (
            (pos.x as f64 + 0.5) * self.config.cell_px,
            (pos.y as f64 + 0.5) * self.config.cell_px,
        )
    }
}

/// Find a random empty cell for food (not occupied by the snake).
/// Returns `None` once the body covers the whole board.
pub fn spawn_food<R: Rng>(game: &SnakeGame, rng: &mut R) -> Option<Position> {
    let cells = usize::try_from(game.grid_size).unwrap_or(0).pow(2);
    if game.body.len() >= cells {
        return None;
    }
    loop {
        let pos = Position::new(
            rng.gen_range(0..game.grid_size),
            rng.gen_range(0..game.grid_size),
        );
        if !game.body.contains(&pos) {
            return Some(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn board(width: f64) -> SnakeGame {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        SnakeGame::new(
            SnakeConfig::default(),
            CanvasSize::new(width, width),
            &mut rng,
        )
    }

    #[test]
    fn test_new_game_defaults() {
        let game = board(600.0);
        assert_eq!(game.grid_size, 30);
        assert_eq!(game.score, 0);
        assert_eq!(game.level, 1);
        assert_eq!(game.interval_ms, 150.0);
        assert_eq!(game.body.len(), 3);
        assert_eq!(game.direction, Direction::Right);
        assert_eq!(game.next_direction, Direction::Right);
    }

    #[test]
    fn test_snake_initial_position() {
        let game = board(400.0);
        assert_eq!(game.grid_size, 20);
        assert_eq!(
            game.body,
            VecDeque::from(vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ])
        );
    }

    #[test]
    fn test_food_not_on_snake() {
        let game = board(400.0);
        assert!(!game.body.contains(&game.food));
        assert!(game.in_bounds(game.food));
    }

    #[test]
    fn test_restart_emits_food_sparkle() {
        let game = board(400.0);
        assert_eq!(game.particles.len(), FOOD_SPARKLE.count);
    }

    #[test]
    fn test_spawn_food_avoids_snake() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let game = board(200.0);
        for _ in 0..200 {
            let food = spawn_food(&game, &mut rng).unwrap();
            assert!(!game.body.contains(&food));
            assert!(game.in_bounds(food));
        }
    }

    #[test]
    fn test_spawn_food_on_full_board() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut game = board(80.0);
        assert_eq!(game.grid_size, 4);
        game.body = (0..4)
            .flat_map(|y| (0..4).map(move |x| Position::new(x, y)))
            .collect();
        assert_eq!(spawn_food(&game, &mut rng), None);

        game.body.pop_back();
        assert_eq!(spawn_food(&game, &mut rng), Some(Position::new(3, 3)));
    }

    #[test]
    fn test_cell_size_clamped_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let config = SnakeConfig {
            cell_px: 0.25,
            ..Default::default()
        };
        let game = SnakeGame::new(config, CanvasSize::new(40.0, 40.0), &mut rng);
        assert_eq!(game.config.cell_px, 1.0);
        assert_eq!(game.grid_size, 40);
        // The last cell ends exactly at the canvas edge.
        assert_eq!(game.cell_center(Position::new(39, 39)), (39.5, 39.5));
    }

    #[test]
    fn test_level_and_interval_curve() {
        let config = SnakeConfig::default();
        assert_eq!(config.level_for(0), 1);
        assert_eq!(config.level_for(99), 1);
        assert_eq!(config.level_for(100), 2);
        assert_eq!(config.interval_for(1), 150.0);
        assert_eq!(config.interval_for(3), 140.0);
        // 150 - 40 * 5 would be -50; the floor holds.
        assert_eq!(config.interval_for(41), 50.0);
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_cell_center() {
        let game = board(400.0);
        assert_eq!(game.cell_center(Position::new(0, 0)), (10.0, 10.0));
        assert_eq!(game.cell_center(Position::new(11, 10)), (230.0, 210.0));
    }
}
