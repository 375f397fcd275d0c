pub mod flappy_scene;
pub mod game_common;
pub mod menu_scene;
pub mod pixels;
pub mod snake_scene;

use crate::app::{App, Screen};
use crate::input::GameKind;
use game_common::{render_too_small, INFO_PANEL_WIDTH};
use ratatui::Frame;

/// Smallest terminal the game screens lay out in.
pub const MIN_COLS: u16 = INFO_PANEL_WIDTH + 24;
pub const MIN_ROWS: u16 = 12;

/// Main UI drawing function. Reads the app through a shared borrow only.
pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.size();
    if size.width < MIN_COLS || size.height < MIN_ROWS {
        render_too_small(frame, size, MIN_COLS, MIN_ROWS);
        return;
    }

    match app.screen {
        Screen::Menu => menu_scene::render_menu(frame, size, app),
        Screen::Playing(GameKind::Snake) => snake_scene::render(frame, size, &app.snake),
        Screen::Playing(GameKind::Flappy) => flappy_scene::render(frame, size, &app.flappy),
    }
}
