//! Shared UI components for both game screens.

use super::pixels::{color, PixelCanvas};
use crate::core::lifecycle::{ControlState, Phase};
use crate::core::particles::ParticleField;
use crate::core::session::GameSession;
use crate::core::Game;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the info panel on the right of a game screen.
pub const INFO_PANEL_WIDTH: u16 = 24;

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Playfield - top left, inside outer border
    pub content: Rect,
    /// Status bar area (2 lines) - bottom left, inside outer border
    pub status_bar: Rect,
    /// Info panel area - right side, with its own border
    pub info_panel: Rect,
}

/// Create a game layout with outer border.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │                                 │             │
/// │   [playfield]                   │  [info]     │
/// │                                 │             │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(INFO_PANEL_WIDTH)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Render a status bar (2 lines: status message + controls).
///
/// `controls` is a slice of (key, action) pairs, e.g. `[("[Enter]", "Start")]`.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Style::default()));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Status message for a phase.
pub fn phase_status(phase: Phase) -> (&'static str, Color) {
    match phase {
        Phase::Idle => ("Ready", Color::Yellow),
        Phase::Running => ("Playing", Color::Green),
        Phase::Paused => ("Paused", Color::Cyan),
        Phase::GameOver => ("Game over", Color::Red),
    }
}

/// Render an info panel frame with " Info " title and DarkGray border.
///
/// Returns the inner Rect for content rendering.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// `Label: value` line for the info panel.
pub fn stat_line(label: &str, value: String, value_color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(value_color)),
    ])
}

/// Score, best and sound lines every game shows at the top of its panel.
pub fn session_lines<G: Game>(session: &GameSession<G>) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                session.game().score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        stat_line("Best", session.high_score().to_string(), Color::Yellow),
        stat_line(
            "Sound",
            if session.sound_enabled() { "on" } else { "off" }.to_string(),
            Color::White,
        ),
    ]
}

/// Start and pause buttons, dimmed when the phase does not allow them.
pub fn control_lines(controls: ControlState) -> Vec<Line<'static>> {
    let button = |key: &str, label: &str, enabled: bool| {
        let (key_color, label_color) = if enabled {
            (Color::White, Color::Gray)
        } else {
            (Color::DarkGray, Color::DarkGray)
        };
        Line::from(vec![
            Span::styled(format!("{key:<8}"), Style::default().fg(key_color)),
            Span::styled(label.to_string(), Style::default().fg(label_color)),
        ])
    };
    vec![
        Line::from(Span::styled(
            "Controls:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        button("[Enter]", "Start", controls.start_enabled),
        button("[P]", controls.pause_label, controls.pause_enabled),
        button("[R]", "Reset", true),
        button("[M]", "Sound", true),
        button("[Esc]", "Menu", true),
    ]
}

/// Paint dot particles, each colour faded into what is under it by alpha.
pub fn paint_particles(pixels: &mut PixelCanvas, particles: &ParticleField) {
    for p in particles.iter().filter(|p| p.text.is_none()) {
        pixels.blend_circle(p.x, p.y, p.size / 2.0, p.color, p.alpha());
    }
}

/// Draw text popups as terminal text over an already placed canvas.
pub fn render_popups(
    frame: &mut Frame,
    pixels: &PixelCanvas,
    placed: Rect,
    particles: &ParticleField,
) {
    for p in particles.iter() {
        let Some(text) = p.text.as_deref() else {
            continue;
        };
        let Some((col, row)) = pixels.cell_at(placed, p.x, p.y) else {
            continue;
        };
        let under = pixels
            .pixel_at(p.x, p.y)
            .and_then(|(px, py)| pixels.get(px, py))
            .unwrap_or(p.color);
        let len = text.chars().count() as u16;
        let col = col.saturating_sub(len / 2).max(placed.x);
        let width = len.min(placed.right().saturating_sub(col));
        if width == 0 {
            continue;
        }
        let style = Style::default()
            .fg(color(under.lerp(p.color, p.alpha())))
            .bg(color(under))
            .add_modifier(Modifier::BOLD);
        frame.render_widget(
            Paragraph::new(Span::styled(text.to_string(), style)),
            Rect::new(col, row, width, 1),
        );
    }
}

/// Centred message box drawn over the playfield, which stays visible
/// around it.
pub fn render_message_box(frame: &mut Frame, area: Rect, border: Color, lines: Vec<Line>) {
    let width = (lines.iter().map(Line::width).max().unwrap_or(0) as u16 + 6).min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    if width < 3 || height < 3 {
        return;
    }
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Idle, paused and game over overlays. Nothing is drawn while running.
pub fn render_phase_overlay<G: Game>(
    frame: &mut Frame,
    area: Rect,
    session: &GameSession<G>,
    accent: Color,
    hint: &str,
) {
    let dim = Style::default().fg(Color::Gray);
    let title = |text: &str, c: Color| {
        Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(c).add_modifier(Modifier::BOLD),
        ))
    };
    let lines = match session.phase() {
        Phase::Running => return,
        Phase::Idle => vec![
            title(G::TITLE, accent),
            Line::from(""),
            Line::from(Span::styled("Press Enter to start", dim)),
            Line::from(Span::styled(hint.to_string(), dim)),
        ],
        Phase::Paused => vec![
            title("PAUSED", Color::Magenta),
            Line::from(""),
            Line::from(Span::styled("Press P to resume", dim)),
        ],
        Phase::GameOver => {
            let run = session.last_run();
            let score = run.map_or(session.game().score(), |r| r.score);
            let mut lines = vec![
                title("GAME OVER", Color::Magenta),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Final score: {score}"),
                    Style::default().fg(Color::Cyan),
                )),
            ];
            if run.is_some_and(|r| r.new_best) {
                lines.push(title("New best!", Color::Yellow));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Press Enter to play again", dim)));
            lines
        }
    };
    render_message_box(frame, area, accent, lines);
}

/// Shown instead of a screen that does not fit.
pub fn render_too_small(frame: &mut Frame, area: Rect, min_width: u16, min_height: u16) {
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(Span::styled(
            "Terminal too small",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{}x{} (need {}x{})",
            area.width, area.height, min_width, min_height
        )),
    ];
    let y = area.y + area.height.saturating_sub(2) / 2;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, 2.min(area.height)),
    );
}
