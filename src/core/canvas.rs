//! Logical canvas geometry.
//!
//! Games simulate in logical pixels on a canvas sized from a host
//! container, the way a page sizes a drawing surface from its parent
//! element. The terminal front end scales this space onto cells.

/// Space kept between the canvas and its container.
pub const CANVAS_MARGIN: u32 = 20;
/// Widest canvas either game uses.
pub const CANVAS_MAX_WIDTH: u32 = 600;
/// Narrowest canvas accepted, so the Snake board keeps at least 10 cells.
pub const CANVAS_MIN_WIDTH: u32 = 200;

/// Height-to-width ratio of the Snake board.
pub const SNAKE_ASPECT: f64 = 1.0;
/// Height-to-width ratio of the Flappy playfield.
pub const FLAPPY_ASPECT: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Fit a canvas into a container: `min(container - margin, cap)` wide
    /// and `aspect` times as tall.
    pub fn fit(container_width: u32, aspect: f64) -> Self {
        let width = container_width
            .saturating_sub(CANVAS_MARGIN)
            .clamp(CANVAS_MIN_WIDTH, CANVAS_MAX_WIDTH) as f64;
        Self {
            width,
            height: width * aspect,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}
