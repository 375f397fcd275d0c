//! Game selection menu.

use crate::app::App;
use crate::core::lifecycle::Phase;
use crate::input::GameKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

fn description(kind: GameKind) -> &'static str {
    match kind {
        GameKind::Snake => "Eat, grow, level up. Do not bite yourself.",
        GameKind::Flappy => "Flap through the gaps. The pipes speed up.",
    }
}

pub fn render_menu(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Arcade ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let heading = Paragraph::new(Line::from(Span::styled(
        "Pick a game",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(heading, chunks[0]);

    let items: Vec<ListItem> = GameKind::ALL
        .iter()
        .enumerate()
        .map(|(i, &kind)| {
            let selected = i == app.menu_index;
            let prefix = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let (best, phase) = match kind {
                GameKind::Snake => (app.snake.high_score(), app.snake.phase()),
                GameKind::Flappy => (app.flappy.high_score(), app.flappy.phase()),
            };
            let mut title = vec![
                Span::styled(format!("{prefix}{}. {}", i + 1, kind.name()), style),
                Span::styled(
                    format!("  best {best}"),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if phase == Phase::Paused {
                title.push(Span::styled("  (paused)", Style::default().fg(Color::Cyan)));
            }
            ListItem::new(vec![
                Line::from(title),
                Line::from(Span::styled(
                    format!("     {}", description(kind)),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(""),
            ])
        })
        .collect();
    frame.render_widget(List::new(items), chunks[1]);

    let help = Paragraph::new("[↑/↓] Navigate  [Enter] Play  [q] Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}
