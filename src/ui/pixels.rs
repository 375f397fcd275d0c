//! Half-block pixel buffer.
//!
//! A game's logical canvas is scaled onto a grid of terminal pixels. Two
//! vertical pixels share one cell through `▀` (fg = top pixel, bg = bottom
//! pixel), so one column by half a row is roughly square.

use crate::core::canvas::CanvasSize;
use crate::core::particles::Rgb;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const HALF_TOP: char = '\u{2580}'; // ▀

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PixelCanvas {
    width: usize,
    height: usize,
    /// Terminal pixels per logical pixel.
    scale: f64,
    pixels: Vec<Rgb>,
}

impl PixelCanvas {
    /// Largest scale at which `canvas` fits into `cols` x `rows` cells.
    pub fn scale_for(canvas: CanvasSize, cols: u16, rows: u16) -> f64 {
        if canvas.width <= 0.0 || canvas.height <= 0.0 {
            return 0.0;
        }
        (f64::from(cols) / canvas.width).min(f64::from(rows) * 2.0 / canvas.height)
    }

    pub fn new(canvas: CanvasSize, cols: u16, rows: u16, background: Rgb) -> Self {
        let scale = Self::scale_for(canvas, cols, rows);
        let width = ((canvas.width * scale).floor() as usize).min(usize::from(cols));
        let height = ((canvas.height * scale).floor() as usize).min(usize::from(rows) * 2);
        Self {
            width,
            height,
            scale,
            pixels: vec![background; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Terminal rows the buffer occupies.
    pub fn rows(&self) -> usize {
        self.height.div_ceil(2)
    }

    pub fn get(&self, px: usize, py: usize) -> Option<Rgb> {
        (px < self.width && py < self.height).then(|| self.pixels[py * self.width + px])
    }

    pub fn set(&mut self, px: usize, py: usize, color: Rgb) {
        if px < self.width && py < self.height {
            self.pixels[py * self.width + px] = color;
        }
    }

    /// Mix `color` over the pixel already there.
    pub fn blend(&mut self, px: usize, py: usize, color: Rgb, alpha: f64) {
        if let Some(under) = self.get(px, py) {
            self.set(px, py, under.lerp(color, alpha));
        }
    }

    /// Pixel range covered by the logical interval `[start, start + len)`.
    /// Anything visible covers at least one pixel.
    fn pixel_span(&self, start: f64, len: f64, limit: usize) -> Option<(usize, usize)> {
        let (from, to) = (start * self.scale, (start + len) * self.scale);
        if to <= 0.0 || from >= limit as f64 {
            return None;
        }
        let a = from.floor().max(0.0);
        let mut b = to.ceil().min(limit as f64);
        if b <= a && len > 0.0 {
            b = (a + 1.0).min(limit as f64);
        }
        (a < b).then_some((a as usize, b as usize))
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        self.blend_rect(x, y, w, h, color, 1.0);
    }

    pub fn blend_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb, alpha: f64) {
        let (Some((x0, x1)), Some((y0, y1))) = (
            self.pixel_span(x, w, self.width),
            self.pixel_span(y, h, self.height),
        ) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color, alpha);
            }
        }
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb) {
        self.blend_circle(cx, cy, radius, color, 1.0);
    }

    /// Covers the pixels whose centres lie inside the circle, or the single
    /// pixel under the centre when the circle is smaller than a pixel.
    pub fn blend_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb, alpha: f64) {
        if self.scale <= 0.0 {
            return;
        }
        let r = radius * self.scale;
        let (pcx, pcy) = (cx * self.scale, cy * self.scale);
        if r < 0.5 {
            if pcx >= 0.0 && pcy >= 0.0 {
                self.blend(pcx as usize, pcy as usize, color, alpha);
            }
            return;
        }
        let x0 = (pcx - r).floor().max(0.0) as usize;
        let y0 = (pcy - r).floor().max(0.0) as usize;
        let x1 = ((pcx + r).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((pcy + r).ceil().max(0.0) as usize).min(self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f64 + 0.5 - pcx;
                let dy = py as f64 + 0.5 - pcy;
                if dx * dx + dy * dy <= r * r {
                    self.blend(px, py, color, alpha);
                }
            }
        }
    }

    /// Pixel under a logical point.
    pub fn pixel_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let (px, py) = (x * self.scale, y * self.scale);
        if px < 0.0 || py < 0.0 {
            return None;
        }
        let (px, py) = (px as usize, py as usize);
        (px < self.width && py < self.height).then_some((px, py))
    }

    /// Where the buffer sits when centred in `area`.
    pub fn placement(&self, area: Rect) -> Rect {
        let w = (self.width as u16).min(area.width);
        let h = (self.rows() as u16).min(area.height);
        Rect::new(
            area.x + (area.width - w) / 2,
            area.y + (area.height - h) / 2,
            w,
            h,
        )
    }

    /// Terminal cell under a logical point, given the buffer's placement.
    pub fn cell_at(&self, placed: Rect, x: f64, y: f64) -> Option<(u16, u16)> {
        let (px, py) = self.pixel_at(x, y)?;
        let col = placed.x + px as u16;
        let row = placed.y + (py / 2) as u16;
        (col < placed.right() && row < placed.bottom()).then_some((col, row))
    }

    /// One line per terminal row, consecutive cells with the same colours
    /// batched into one span.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(self.rows());
        for row in 0..self.rows() {
            let top_y = row * 2;
            let bottom_y = top_y + 1;
            let mut spans: Vec<Span> = Vec::new();
            let mut current: Option<(Rgb, Rgb)> = None;
            let mut text = String::new();

            for px in 0..self.width {
                let top = self.pixels[top_y * self.width + px];
                // An odd last row shows the top pixel over itself.
                let bottom = self.get(px, bottom_y).unwrap_or(top);
                if current != Some((top, bottom)) {
                    if let Some((fg, bg)) = current {
                        spans.push(Span::styled(
                            std::mem::take(&mut text),
                            Style::default().fg(color(fg)).bg(color(bg)),
                        ));
                    }
                    current = Some((top, bottom));
                }
                text.push(HALF_TOP);
            }
            if let Some((fg, bg)) = current {
                spans.push(Span::styled(
                    text,
                    Style::default().fg(color(fg)).bg(color(bg)),
                ));
            }
            lines.push(Line::from(spans));
        }
        lines
    }

    /// Draw centred in `area` and return where it landed.
    pub fn render(&self, frame: &mut Frame, area: Rect) -> Rect {
        let placed = self.placement(area);
        frame.render_widget(Paragraph::new(self.to_lines()), placed);
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb = Rgb(0, 0, 0);
    const WHITE: Rgb = Rgb(255, 255, 255);

    #[test]
    fn test_scale_is_limited_by_tighter_axis() {
        let canvas = CanvasSize::new(400.0, 600.0);
        // 80 cols / 400 = 0.2; 2 * 30 rows / 600 = 0.1
        assert_eq!(PixelCanvas::scale_for(canvas, 80, 30), 0.1);
        let pixels = PixelCanvas::new(canvas, 80, 30, BLACK);
        assert_eq!(pixels.width(), 40);
        assert_eq!(pixels.height(), 60);
        assert_eq!(pixels.rows(), 30);
    }

    #[test]
    fn test_fill_rect_scales() {
        let mut pixels = PixelCanvas::new(CanvasSize::new(100.0, 100.0), 10, 5, BLACK);
        assert_eq!(pixels.scale(), 0.1);
        pixels.fill_rect(20.0, 30.0, 20.0, 10.0, WHITE);
        assert_eq!(pixels.get(2, 3), Some(WHITE));
        assert_eq!(pixels.get(3, 3), Some(WHITE));
        assert_eq!(pixels.get(4, 3), Some(BLACK));
        assert_eq!(pixels.get(2, 4), Some(BLACK));
    }

    #[test]
    fn test_tiny_shapes_still_show() {
        let mut pixels = PixelCanvas::new(CanvasSize::new(100.0, 100.0), 10, 5, BLACK);
        pixels.fill_circle(55.0, 55.0, 1.0, WHITE);
        assert_eq!(pixels.get(5, 5), Some(WHITE));
        pixels.fill_rect(0.0, 0.0, 1.0, 1.0, WHITE);
        assert_eq!(pixels.get(0, 0), Some(WHITE));
    }

    #[test]
    fn test_offscreen_drawing_is_clipped() {
        let mut pixels = PixelCanvas::new(CanvasSize::new(100.0, 100.0), 10, 5, BLACK);
        let before = pixels.clone();
        pixels.fill_rect(-50.0, 0.0, 20.0, 100.0, WHITE);
        pixels.fill_circle(500.0, 50.0, 10.0, WHITE);
        assert_eq!(pixels, before);
        assert_eq!(pixels.pixel_at(-1.0, 5.0), None);
    }

    #[test]
    fn test_blend_mixes_toward_color() {
        let mut pixels = PixelCanvas::new(CanvasSize::new(10.0, 10.0), 10, 5, BLACK);
        pixels.blend(0, 0, Rgb(200, 100, 0), 0.5);
        assert_eq!(pixels.get(0, 0), Some(Rgb(100, 50, 0)));
    }

    #[test]
    fn test_lines_batch_equal_cells() {
        let mut pixels = PixelCanvas::new(CanvasSize::new(4.0, 4.0), 4, 2, BLACK);
        pixels.set(3, 0, WHITE);
        let lines = pixels.to_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[0].content, "▀▀▀");
        assert_eq!(lines[1].spans.len(), 1);
    }

    #[test]
    fn test_cell_at_maps_two_pixels_per_row() {
        let pixels = PixelCanvas::new(CanvasSize::new(10.0, 10.0), 10, 5, BLACK);
        let placed = pixels.placement(Rect::new(0, 0, 20, 5));
        assert_eq!(placed, Rect::new(5, 0, 10, 5));
        assert_eq!(pixels.cell_at(placed, 3.0, 7.0), Some((8, 3)));
    }
}
