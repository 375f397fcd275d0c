//! Flappy screen.
//!
//! Painted back to front: sky gradient, stars, clouds, pipes, ground, bird,
//! particles. Cloud and ground stripe positions come from the game's
//! scroll offsets so the background moves without any render state.

use super::game_common::{
    control_lines, create_game_layout, paint_particles, phase_status, render_info_panel_frame,
    render_phase_overlay, render_popups, render_status_bar, session_lines, stat_line,
};
use super::pixels::PixelCanvas;
use crate::core::lifecycle::Phase;
use crate::core::particles::Rgb;
use crate::core::session::GameSession;
use crate::core::Game;
use crate::flappy::types::{FlappyGame, Pipe, BIRD_COLOR, BIRD_SIZE};
use ratatui::{layout::Rect, style::Color, text::Line, widgets::Paragraph, Frame};

const ACCENT: Color = Color::Rgb(255, 42, 109);

const SKY_TOP: Rgb = Rgb(11, 61, 145);
const SKY_BOTTOM: Rgb = Rgb(26, 95, 180);
const WHITE: Rgb = Rgb(255, 255, 255);
const PIPE_COLOR: Rgb = Rgb(5, 217, 232);
const PIPE_CAP: Rgb = Rgb(121, 241, 252);
const PIPE_LIT: Rgb = Rgb(1, 255, 195);
const PIPE_LIT_CAP: Rgb = Rgb(112, 255, 203);
const GROUND_TOP: Rgb = Rgb(255, 209, 102);
const GROUND_BOTTOM: Rgb = Rgb(255, 159, 28);
const BEAK_COLOR: Rgb = Rgb(255, 209, 102);

const CLOUD_ALPHA: f64 = 0.15;
const STRIPE_ALPHA: f64 = 0.25;
const STRIPE_SPACING: f64 = 50.0;
const CAP_HEIGHT: f64 = 20.0;

pub fn render(frame: &mut Frame, area: Rect, session: &GameSession<FlappyGame>) {
    let layout = create_game_layout(frame, area, FlappyGame::TITLE, ACCENT);
    let game = session.game();

    let pixels = paint_scene(game, layout.content.width, layout.content.height);
    let placed = pixels.render(frame, layout.content);
    render_popups(frame, &pixels, placed, &game.particles);

    render_status_bar_content(frame, layout.status_bar, session.phase());
    render_info_panel(frame, layout.info_panel, session);
    render_phase_overlay(
        frame,
        layout.content,
        session,
        ACCENT,
        "Space, Up or click to flap",
    );
}

/// Paint the playfield into a buffer fitted to `cols` x `rows` cells.
pub fn paint_scene(game: &FlappyGame, cols: u16, rows: u16) -> PixelCanvas {
    let mut pixels = PixelCanvas::new(game.canvas, cols, rows, SKY_TOP);
    paint_sky(&mut pixels);

    for star in &game.stars {
        pixels.blend_circle(star.x, star.y, star.radius, WHITE, star.brightness);
    }
    paint_clouds(&mut pixels, game);

    for pipe in &game.pipes {
        paint_pipe(&mut pixels, pipe);
    }
    paint_ground(&mut pixels, game);
    paint_bird(&mut pixels, game);

    paint_particles(&mut pixels, &game.particles);
    pixels
}

/// Vertical gradient over the top 80%, flat below.
fn paint_sky(pixels: &mut PixelCanvas) {
    let span = (pixels.height() as f64 * 0.8).max(1.0);
    for py in 0..pixels.height() {
        let sky = SKY_TOP.lerp(SKY_BOTTOM, py as f64 / span);
        for px in 0..pixels.width() {
            pixels.set(px, py, sky);
        }
    }
}

/// Three clouds, drawn twice one canvas width apart so the scroll wraps.
fn paint_clouds(pixels: &mut PixelCanvas, game: &FlappyGame) {
    let (w, h) = (game.canvas.width, game.canvas.height);
    let clouds = [(0.0, 0.2, 60.0), (0.3, 0.35, 80.0), (0.7, 0.25, 50.0)];
    for origin in [w - game.background_offset, -game.background_offset] {
        for (dx, fy, size) in clouds {
            paint_cloud(pixels, origin + w * dx, h * fy, size);
        }
    }
}

fn paint_cloud(pixels: &mut PixelCanvas, x: f64, y: f64, size: f64) {
    let puffs = [
        (0.0, 0.0, 0.4),
        (0.3, -0.2, 0.3),
        (0.6, -0.1, 0.35),
        (0.8, 0.0, 0.4),
        (0.5, 0.2, 0.3),
        (0.2, 0.2, 0.3),
    ];
    for (dx, dy, r) in puffs {
        pixels.blend_circle(x + size * dx, y + size * dy, size * r, WHITE, CLOUD_ALPHA);
    }
}

fn paint_pipe(pixels: &mut PixelCanvas, pipe: &Pipe) {
    let (body, cap) = if pipe.is_highlighted() {
        (PIPE_LIT, PIPE_LIT_CAP)
    } else {
        (PIPE_COLOR, PIPE_CAP)
    };
    pixels.fill_rect(pipe.x, 0.0, pipe.width, pipe.top_height, body);
    pixels.fill_rect(
        pipe.x - 5.0,
        pipe.top_height - CAP_HEIGHT,
        pipe.width + 10.0,
        CAP_HEIGHT,
        cap,
    );
    pixels.fill_rect(pipe.x, pipe.bottom_y, pipe.width, pipe.bottom_height, body);
    pixels.fill_rect(pipe.x - 5.0, pipe.bottom_y, pipe.width + 10.0, CAP_HEIGHT, cap);
}

fn paint_ground(pixels: &mut PixelCanvas, game: &FlappyGame) {
    let scale = pixels.scale();
    if scale <= 0.0 {
        return;
    }
    let top = game.ground_y();
    let height = game.ground_height();
    let first = (top * scale).floor().max(0.0) as usize;
    let rows = pixels.height().saturating_sub(first).max(1);
    for py in first..pixels.height() {
        let shade = GROUND_TOP.lerp(GROUND_BOTTOM, (py - first) as f64 / rows as f64);
        for px in 0..pixels.width() {
            pixels.set(px, py, shade);
        }
    }

    let stripes = (game.canvas.width / STRIPE_SPACING) as usize + 2;
    for i in 0..stripes {
        pixels.blend_rect(
            i as f64 * STRIPE_SPACING - game.ground_offset,
            top + 10.0,
            5.0,
            height - 20.0,
            WHITE,
            STRIPE_ALPHA,
        );
    }
}

/// Body over the bird's collision box, an eye, and a beak that follows
/// the tilt.
fn paint_bird(pixels: &mut PixelCanvas, game: &FlappyGame) {
    let bird = &game.bird;
    let half = BIRD_SIZE / 2.0;
    let (cx, cy) = (bird.x + half, bird.y + half);
    pixels.fill_circle(cx, cy, half, BIRD_COLOR);
    pixels.fill_circle(cx + half * 0.4, cy - half * 0.3, half * 0.3, WHITE);
    let (sin, cos) = bird.rotation.sin_cos();
    pixels.fill_circle(cx + cos * half, cy + sin * half, half * 0.35, BEAK_COLOR);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, phase: Phase) {
    let (text, status_color) = phase_status(phase);
    let controls: &[(&str, &str)] = match phase {
        Phase::Running => &[("[Space]", "Flap"), ("[P]", "Pause")],
        Phase::Paused => &[("[Space]", "Resume"), ("[R]", "Reset")],
        Phase::Idle | Phase::GameOver => &[("[Enter]", "Start"), ("[Esc]", "Menu")],
    };
    render_status_bar(frame, area, text, status_color, controls);
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &GameSession<FlappyGame>) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }
    let game = session.game();

    let mut lines = session_lines(session);
    lines.push(Line::from(""));
    lines.push(stat_line("Speed", format!("{:.1}", game.speed), Color::Cyan));
    lines.push(stat_line("Pipes", game.pipes.len().to_string(), Color::White));
    lines.push(Line::from(""));
    lines.extend(control_lines(session.controls()));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::canvas::CanvasSize;
    use crate::flappy::types::FlappyConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// 400x600 canvas on 40x30 cells: one pixel per 10 logical px.
    fn scene() -> FlappyGame {
        let config = FlappyConfig {
            star_count: 0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(2);
        FlappyGame::new(config, CanvasSize::new(400.0, 600.0), &mut rng)
    }

    fn pipe(x: f64, highlight_frames: u32) -> Pipe {
        Pipe {
            x,
            width: 80.0,
            top_height: 200.0,
            bottom_y: 350.0,
            bottom_height: 130.0,
            passed: false,
            highlight_frames,
        }
    }

    #[test]
    fn test_bird_is_painted_over_sky() {
        let game = scene();
        let pixels = paint_scene(&game, 40, 30);
        // Bird box is (80..100, 300..320), centre pixel (9, 31).
        assert_eq!(pixels.get(9, 31), Some(BIRD_COLOR));
        assert_ne!(pixels.get(30, 5), Some(BIRD_COLOR));
    }

    #[test]
    fn test_ground_fills_bottom_fifth() {
        let game = scene();
        let pixels = paint_scene(&game, 40, 30);
        assert_eq!(pixels.height(), 60);
        // Ground starts at y = 480, pixel row 48.
        assert_eq!(pixels.get(1, 48).map(|c| c.0), Some(255));
        assert_ne!(pixels.get(1, 47).map(|c| c.0), Some(255));
    }

    #[test]
    fn test_highlighted_pipe_changes_colour() {
        let mut game = scene();
        game.pipes = vec![pipe(200.0, 0), pipe(300.0, 5)];
        let pixels = paint_scene(&game, 40, 30);
        assert_eq!(pixels.get(24, 5), Some(PIPE_COLOR));
        assert_eq!(pixels.get(34, 5), Some(PIPE_LIT));
        // Gap between the caps shows sky.
        assert_ne!(pixels.get(24, 27), Some(PIPE_COLOR));
    }

    #[test]
    fn test_stripes_follow_ground_offset() {
        let mut game = scene();
        let still = paint_scene(&game, 40, 30);
        game.ground_offset = 25.0;
        let moved = paint_scene(&game, 40, 30);
        assert_ne!(still, moved);
    }
}
