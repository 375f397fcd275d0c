//! Flappy game data structures.
//!
//! The bird falls under gravity and jumps on input. Pipes scroll in from the
//! right; each one passed scores a point, and every fifth point raises the
//! scroll speed.

use crate::core::canvas::CanvasSize;
use crate::core::particles::{Burst, Palette, ParticleField, Rgb, Spread};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Side of the bird's square hitbox in canvas pixels.
pub const BIRD_SIZE: f64 = 20.0;

/// Fraction of the canvas height taken by the ground strip.
pub const GROUND_RATIO: f64 = 0.2;

/// Frames a freshly passed pipe stays highlighted.
pub const PIPE_HIGHLIGHT_FRAMES: u32 = 10;

/// Tunable Flappy constants, loaded from the `flappy` section of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlappyConfig {
    /// Velocity added per frame (px/frame).
    pub gravity: f64,
    /// Velocity set by a jump (negative is up).
    pub jump_force: f64,
    /// Vertical opening between top and bottom pipe.
    pub pipe_gap: f64,
    pub pipe_width: f64,
    /// Shortest top pipe.
    pub pipe_min_top: f64,
    /// Time between pipe spawns (ms).
    pub pipe_period_ms: f64,
    pub initial_speed: f64,
    /// Speed gained per point.
    pub speed_increase: f64,
    pub max_speed: f64,
    /// Cloud scroll per frame.
    pub background_speed: f64,
    pub star_count: usize,
}

impl Default for FlappyConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_force: -8.0,
            pipe_gap: 150.0,
            pipe_width: 80.0,
            pipe_min_top: 50.0,
            pipe_period_ms: 1500.0,
            initial_speed: 5.0,
            speed_increase: 0.1,
            max_speed: 8.0,
            background_speed: 1.0,
            star_count: 50,
        }
    }
}

impl FlappyConfig {
    /// Scroll speed at `score`, capped at `max_speed`.
    pub fn speed_for(&self, score: u32) -> f64 {
        (self.initial_speed + score as f64 * self.speed_increase).min(self.max_speed)
    }
}

/// The player. `(x, y)` is the top-left corner of the hitbox.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    /// Vertical velocity in px/frame, positive is down.
    pub velocity: f64,
    /// Tilt in `[-1, 1]` derived from velocity.
    pub rotation: f64,
}

/// A top and bottom pipe pair with a gap between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub x: f64,
    pub width: f64,
    /// Bottom edge of the top pipe.
    pub top_height: f64,
    /// Top edge of the bottom pipe.
    pub bottom_y: f64,
    pub bottom_height: f64,
    /// Already scored.
    pub passed: bool,
    /// Frames of highlight left after scoring.
    pub highlight_frames: u32,
}

impl Pipe {
    pub fn is_highlighted(&self) -> bool {
        self.highlight_frames > 0
    }
}

/// Twinkling background star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub brightness: f64,
    pub blink_speed: f64,
    pub phase: f64,
}

/// Main game state.
#[derive(Debug, Clone, PartialEq)]
pub struct FlappyGame {
    pub config: FlappyConfig,
    pub canvas: CanvasSize,

    pub bird: Bird,
    pub pipes: Vec<Pipe>,

    pub score: u32,
    /// Current scroll speed (px/frame).
    pub speed: f64,
    /// Score at the last speed recompute.
    pub speed_checkpoint: u32,
    /// Time since the last pipe spawn (ms).
    pub pipe_timer_ms: f64,

    pub particles: ParticleField,

    // Decoration, advanced in the update step only.
    pub background_offset: f64,
    pub ground_offset: f64,
    pub stars: Vec<Star>,

    pub tick_count: u64,
}

pub const BIRD_COLOR: Rgb = Rgb(255, 42, 109);

/// Puff under the bird on every jump, thrown into the upper half-plane.
pub const JUMP_PUFF: Burst = Burst {
    count: 5,
    spread: Spread::Arc { start: PI, sweep: PI },
    speed: (2.0, 3.0),
    size: (2.0, 3.0),
    life: (20.0, 10.0),
    max_life: 30.0,
    palette: Palette::Cycle(&[BIRD_COLOR]),
};

/// Red/orange explosion on collision.
pub const COLLISION_BURST: Burst = Burst {
    count: 20,
    spread: Spread::Random,
    speed: (3.0, 5.0),
    size: (3.0, 5.0),
    life: (40.0, 30.0),
    max_life: 70.0,
    palette: Palette::Hues { from: 0.0, to: 60.0 },
};

impl FlappyGame {
    pub fn new<R: Rng>(config: FlappyConfig, canvas: CanvasSize, rng: &mut R) -> Self {
        let speed = config.initial_speed;
        let mut game = Self {
            config,
            canvas,
            bird: Bird {
                x: 0.0,
                y: 0.0,
                velocity: 0.0,
                rotation: 0.0,
            },
            pipes: Vec::new(),
            score: 0,
            speed,
            speed_checkpoint: 0,
            pipe_timer_ms: 0.0,
            particles: ParticleField::new(),
            background_offset: 0.0,
            ground_offset: 0.0,
            stars: Vec::new(),
            tick_count: 0,
        };
        game.restart(rng);
        game
    }

    /// Fresh run: bird at 20% across and half way down, no pipes, base
    /// speed, new star field.
    pub fn restart<R: Rng>(&mut self, rng: &mut R) {
        self.bird = Bird {
            x: self.canvas.width * 0.2,
            y: self.canvas.height * 0.5,
            velocity: 0.0,
            rotation: 0.0,
        };
        self.pipes.clear();
        self.score = 0;
        self.speed = self.config.initial_speed;
        self.speed_checkpoint = 0;
        self.pipe_timer_ms = 0.0;
        self.particles.clear();
        self.background_offset = 0.0;
        self.ground_offset = 0.0;
        self.stars = spawn_stars(self.config.star_count, self.canvas, rng);
        self.tick_count = 0;
    }

    pub fn ground_height(&self) -> f64 {
        self.canvas.height * GROUND_RATIO
    }

    /// Y of the ground line.
    pub fn ground_y(&self) -> f64 {
        self.canvas.height - self.ground_height()
    }

    /// Tallest top pipe allowed.
    pub fn pipe_max_top(&self) -> f64 {
        self.canvas.height * 0.5
    }

    /// Spawn a pipe at the right edge with a random gap position.
    pub fn spawn_pipe<R: Rng>(&mut self, rng: &mut R) {
        let min_top = self.config.pipe_min_top;
        let max_top = self.pipe_max_top().max(min_top);
        let top_height = min_top + rng.gen::<f64>() * (max_top - min_top);
        let bottom_y = top_height + self.config.pipe_gap;
        self.pipes.push(Pipe {
            x: self.canvas.width,
            width: self.config.pipe_width,
            top_height,
            bottom_y,
            bottom_height: (self.ground_y() - bottom_y).max(0.0),
            passed: false,
            highlight_frames: 0,
        });
    }
}

/// Scatter stars over the upper 70% of the sky.
pub fn spawn_stars<R: Rng>(count: usize, canvas: CanvasSize, rng: &mut R) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            x: rng.gen::<f64>() * canvas.width,
            y: rng.gen::<f64>() * canvas.height * 0.7,
            radius: rng.gen::<f64>() * 2.0,
            brightness: 0.3 + rng.gen::<f64>() * 0.7,
            blink_speed: 0.01 + rng.gen::<f64>() * 0.05,
            phase: rng.gen::<f64>() * TAU,
        })
        .collect()
}
