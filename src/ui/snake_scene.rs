//! Snake screen.
//!
//! The board is painted into a [`PixelCanvas`] in logical pixels: a
//! checkerboard grid when enabled, then food, the snake from tail to head,
//! and finally particles. Popups and overlays are terminal text on top.

use super::game_common::{
    control_lines, create_game_layout, paint_particles, phase_status, render_info_panel_frame,
    render_phase_overlay, render_popups, render_status_bar, session_lines, stat_line,
};
use super::pixels::{color, PixelCanvas};
use crate::core::lifecycle::Phase;
use crate::core::particles::Rgb;
use crate::core::session::GameSession;
use crate::core::Game;
use crate::snake::types::{SnakeGame, FOOD_COLOR};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const ACCENT: Color = Color::Rgb(0, 245, 255);

const BOARD_DARK: Rgb = Rgb(0, 18, 25);
const BOARD_LIGHT: Rgb = Rgb(6, 30, 40);
const HEAD_COLOR: Rgb = Rgb(255, 42, 109);
const BODY_BRIGHT: Rgb = Rgb(5, 217, 232);
const BODY_DIM: Rgb = Rgb(2, 90, 100);

/// Colour of the body segment at `index` (0 is the head).
pub fn segment_color(index: usize, len: usize) -> Rgb {
    if index == 0 {
        return HEAD_COLOR;
    }
    let t = index as f64 / (len - 1).max(1) as f64;
    BODY_BRIGHT.lerp(BODY_DIM, t)
}

pub fn render(frame: &mut Frame, area: Rect, session: &GameSession<SnakeGame>) {
    let layout = create_game_layout(frame, area, SnakeGame::TITLE, ACCENT);
    let game = session.game();

    let pixels = paint_board(game, layout.content.width, layout.content.height);
    let placed = pixels.render(frame, layout.content);
    render_popups(frame, &pixels, placed, &game.particles);

    render_status_bar_content(frame, layout.status_bar, session.phase());
    render_info_panel(frame, layout.info_panel, session);
    render_phase_overlay(
        frame,
        layout.content,
        session,
        ACCENT,
        "Arrows or WASD to steer",
    );
}

/// Paint the board into a buffer fitted to `cols` x `rows` cells.
pub fn paint_board(game: &SnakeGame, cols: u16, rows: u16) -> PixelCanvas {
    let mut pixels = PixelCanvas::new(game.canvas, cols, rows, BOARD_DARK);
    let cell = game.config.cell_px;

    if game.config.show_grid {
        for gy in 0..game.grid_size {
            for gx in 0..game.grid_size {
                if (gx + gy) % 2 == 1 {
                    pixels.fill_rect(
                        f64::from(gx) * cell,
                        f64::from(gy) * cell,
                        cell,
                        cell,
                        BOARD_LIGHT,
                    );
                }
            }
        }
    }

    let (fx, fy) = game.cell_center(game.food);
    pixels.fill_circle(fx, fy, cell * 0.4, FOOD_COLOR);

    let len = game.body.len();
    for (i, seg) in game.body.iter().enumerate().rev() {
        pixels.fill_rect(
            f64::from(seg.x) * cell,
            f64::from(seg.y) * cell,
            cell,
            cell,
            segment_color(i, len),
        );
    }

    paint_particles(&mut pixels, &game.particles);
    pixels
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, phase: Phase) {
    let (text, status_color) = phase_status(phase);
    let controls: &[(&str, &str)] = match phase {
        Phase::Running => &[("[Arrows]", "Move"), ("[Space]", "Pause")],
        Phase::Paused => &[("[Space]", "Resume"), ("[R]", "Reset")],
        Phase::Idle | Phase::GameOver => &[("[Enter]", "Start"), ("[Esc]", "Menu")],
    };
    render_status_bar(frame, area, text, status_color, controls);
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &GameSession<SnakeGame>) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }
    let game = session.game();

    let mut lines = session_lines(session);
    lines.push(Line::from(""));
    lines.push(stat_line("Level", game.level.to_string(), Color::Cyan));
    lines.push(stat_line(
        "Interval",
        format!("{:.0}ms", game.interval_ms),
        Color::White,
    ));
    lines.push(stat_line("Length", game.body.len().to_string(), Color::White));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" \u{2588} ", Style::default().fg(color(HEAD_COLOR))),
        Span::styled("Head", Style::default().fg(Color::DarkGray)),
        Span::styled(" \u{2588} ", Style::default().fg(color(FOOD_COLOR))),
        Span::styled("Food", Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::from(""));
    lines.extend(control_lines(session.controls()));

    frame.render_widget(Paragraph::new(lines), inner);
}
