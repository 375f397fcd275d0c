//! Short-lived visual particles shared by both games.
//!
//! Particles live in logical canvas pixels. Games emit them on scoring,
//! jumping and collisions; the update step ages them; the renderer fades
//! them by `life / max_life`.

use rand::Rng;
use std::f64::consts::TAU;

/// 8-bit RGB colour, independent of any drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const GOLD: Rgb = Rgb(255, 215, 0);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);

    /// Convert hue (degrees), saturation and lightness (0..=1) to RGB.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u8 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Linear blend from `self` (t = 0) to `other` (t = 1).
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// A single particle: a coloured dot, or a text popup when `text` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    /// Velocity multiplier applied every tick.
    pub decay: f64,
    pub life: f64,
    pub max_life: f64,
    pub color: Rgb,
    pub text: Option<String>,
}

impl Particle {
    /// Fade factor in `[0, 1]`.
    pub fn alpha(&self) -> f64 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Velocity damping used by every emitter.
pub const DEFAULT_DECAY: f64 = 0.95;

/// How emitted particles are aimed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spread {
    /// Evenly spaced around the full circle.
    Even,
    /// Uniformly random angle.
    Random,
    /// Random angle inside `[start, start + sweep)` radians.
    Arc { start: f64, sweep: f64 },
}

/// Colour selection for a burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Palette {
    /// Cycle through the listed colours by particle index.
    Cycle(&'static [Rgb]),
    /// Random fully saturated hue between the two bounds (degrees).
    Hues { from: f64, to: f64 },
}

/// Parameters of a particle burst. Ranges are `(base, extra)`: each value
/// is `base + random * extra`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub count: usize,
    pub spread: Spread,
    pub speed: (f64, f64),
    pub size: (f64, f64),
    pub life: (f64, f64),
    pub max_life: f64,
    pub palette: Palette,
}

/// Owned list of live particles for one game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Spawn a burst of dots centred on `(x, y)`.
    pub fn emit<R: Rng>(&mut self, x: f64, y: f64, burst: &Burst, rng: &mut R) {
        self.particles.reserve(burst.count);
        for i in 0..burst.count {
            let angle = match burst.spread {
                Spread::Even => i as f64 / burst.count as f64 * TAU,
                Spread::Random => rng.gen::<f64>() * TAU,
                Spread::Arc { start, sweep } => start + rng.gen::<f64>() * sweep,
            };
            let speed = burst.speed.0 + rng.gen::<f64>() * burst.speed.1;
            let color = match burst.palette {
                Palette::Cycle(colors) if !colors.is_empty() => colors[i % colors.len()],
                Palette::Cycle(_) => Rgb::GOLD,
                Palette::Hues { from, to } => {
                    Rgb::from_hsl(from + rng.gen::<f64>() * (to - from), 1.0, 0.5)
                }
            };
            self.particles.push(Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                size: burst.size.0 + rng.gen::<f64>() * burst.size.1,
                decay: DEFAULT_DECAY,
                life: burst.life.0 + rng.gen::<f64>() * burst.life.1,
                max_life: burst.max_life,
                color,
                text: None,
            });
        }
    }

    /// Spawn a floating text popup such as "+10".
    pub fn popup(&mut self, x: f64, y: f64, text: impl Into<String>, velocity: (f64, f64)) {
        self.particles.push(Particle {
            x,
            y,
            vx: velocity.0,
            vy: velocity.1,
            size: 16.0,
            decay: DEFAULT_DECAY,
            life: 40.0,
            max_life: 40.0,
            color: Rgb::GOLD,
            text: Some(text.into()),
        });
    }

    /// Advance every particle one tick and drop the expired ones.
    pub fn age(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.vx *= p.decay;
            p.vy *= p.decay;
            p.life -= 1.0;
        }
        self.particles.retain(Particle::is_alive);
    }
}
