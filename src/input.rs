//! Input translation.
//!
//! Raw crossterm key and mouse events become [`Command`]s. Mapping is pure
//! so it can be tested without a terminal; the app applies the commands.

use crate::core::lifecycle::Phase;
use crate::snake::types::Direction;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Which game a screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Snake,
    Flappy,
}

impl GameKind {
    pub const ALL: [GameKind; 2] = [GameKind::Snake, GameKind::Flappy];

    pub fn name(self) -> &'static str {
        match self {
            GameKind::Snake => "Snake",
            GameKind::Flappy => "Flappy",
        }
    }
}

/// Everything a player can ask a game screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    TogglePause,
    Reset,
    Steer(Direction),
    Jump,
    ToggleSound,
    /// Leave the game screen for the menu.
    Back,
    Quit,
}

/// Map a key press on a game screen.
pub fn map_key(kind: GameKind, phase: Phase, key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Enter => Some(Command::Start),
        KeyCode::Esc => Some(Command::Back),
        KeyCode::Char(' ') => Some(match kind {
            GameKind::Snake => Command::TogglePause,
            // Space is the jump button, except that it also resumes.
            GameKind::Flappy if phase == Phase::Paused => Command::TogglePause,
            GameKind::Flappy => Command::Jump,
        }),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Some(Command::Quit),
            'r' => Some(Command::Reset),
            'm' => Some(Command::ToggleSound),
            'p' => Some(Command::TogglePause),
            'w' | 'a' | 's' | 'd' => steer_key(kind, c.to_ascii_lowercase()),
            _ => None,
        },
        KeyCode::Up if kind == GameKind::Flappy => Some(Command::Jump),
        KeyCode::Up => Some(Command::Steer(Direction::Up)),
        KeyCode::Down if kind == GameKind::Snake => Some(Command::Steer(Direction::Down)),
        KeyCode::Left if kind == GameKind::Snake => Some(Command::Steer(Direction::Left)),
        KeyCode::Right if kind == GameKind::Snake => Some(Command::Steer(Direction::Right)),
        _ => None,
    }
}

fn steer_key(kind: GameKind, c: char) -> Option<Command> {
    if kind != GameKind::Snake {
        return None;
    }
    let direction = match c {
        'w' => Direction::Up,
        'a' => Direction::Left,
        's' => Direction::Down,
        'd' => Direction::Right,
        _ => return None,
    };
    Some(Command::Steer(direction))
}

/// Direction of a swipe from its total movement. The larger axis wins,
/// ties go vertical, and no movement is no swipe.
pub fn swipe_direction(dx: f64, dy: f64) -> Option<Direction> {
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        Some(if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

/// Turns a left-button press and release into a swipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwipeTracker {
    origin: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, column: u16, row: u16) {
        self.origin = Some((column, row));
    }

    /// Finish the gesture. Rows count double since a cell is about twice
    /// as tall as it is wide.
    pub fn release(&mut self, column: u16, row: u16) -> Option<Direction> {
        let (c0, r0) = self.origin.take()?;
        let dx = f64::from(column) - f64::from(c0);
        let dy = (f64::from(row) - f64::from(r0)) * 2.0;
        swipe_direction(dx, dy)
    }
}

/// Map a mouse event on a game screen: a click is a tap (Flappy jump), a
/// drag is a swipe (Snake steer).
pub fn map_mouse(kind: GameKind, mouse: MouseEvent, swipe: &mut SwipeTracker) -> Option<Command> {
    match (kind, mouse.kind) {
        (GameKind::Flappy, MouseEventKind::Down(MouseButton::Left)) => Some(Command::Jump),
        (GameKind::Snake, MouseEventKind::Down(MouseButton::Left)) => {
            swipe.press(mouse.column, mouse.row);
            None
        }
        (GameKind::Snake, MouseEventKind::Up(MouseButton::Left)) => swipe
            .release(mouse.column, mouse.row)
            .map(Command::Steer),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_common_keys() {
        for kind in GameKind::ALL {
            assert_eq!(map_key(kind, Phase::Idle, key(KeyCode::Enter)), Some(Command::Start));
            assert_eq!(map_key(kind, Phase::Idle, key(KeyCode::Char('r'))), Some(Command::Reset));
            assert_eq!(
                map_key(kind, Phase::Idle, key(KeyCode::Char('M'))),
                Some(Command::ToggleSound)
            );
            assert_eq!(map_key(kind, Phase::Idle, key(KeyCode::Esc)), Some(Command::Back));
            assert_eq!(map_key(kind, Phase::Idle, key(KeyCode::Char('q'))), Some(Command::Quit));
        }
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(GameKind::Snake, Phase::Running, ctrl_c), Some(Command::Quit));
    }

    #[test]
    fn test_snake_space_pauses_and_arrows_steer() {
        let running = Phase::Running;
        assert_eq!(
            map_key(GameKind::Snake, running, key(KeyCode::Char(' '))),
            Some(Command::TogglePause)
        );
        assert_eq!(
            map_key(GameKind::Snake, running, key(KeyCode::Left)),
            Some(Command::Steer(Direction::Left))
        );
        assert_eq!(
            map_key(GameKind::Snake, running, key(KeyCode::Char('s'))),
            Some(Command::Steer(Direction::Down))
        );
    }

    #[test]
    fn test_flappy_space_jumps_or_resumes() {
        assert_eq!(
            map_key(GameKind::Flappy, Phase::Running, key(KeyCode::Char(' '))),
            Some(Command::Jump)
        );
        assert_eq!(
            map_key(GameKind::Flappy, Phase::Paused, key(KeyCode::Char(' '))),
            Some(Command::TogglePause)
        );
        assert_eq!(
            map_key(GameKind::Flappy, Phase::Running, key(KeyCode::Up)),
            Some(Command::Jump)
        );
        assert_eq!(map_key(GameKind::Flappy, Phase::Running, key(KeyCode::Char('a'))), None);
    }

    #[test]
    fn test_swipe_direction() {
        assert_eq!(swipe_direction(10.0, 2.0), Some(Direction::Right));
        assert_eq!(swipe_direction(-10.0, 2.0), Some(Direction::Left));
        assert_eq!(swipe_direction(1.0, -4.0), Some(Direction::Up));
        assert_eq!(swipe_direction(3.0, 3.0), Some(Direction::Down));
        assert_eq!(swipe_direction(0.0, 0.0), None);
    }

    #[test]
    fn test_swipe_tracker_scales_rows() {
        let mut swipe = SwipeTracker::new();
        swipe.press(10, 10);
        // 3 columns right vs 2 rows down: rows count double, so down wins.
        assert_eq!(swipe.release(13, 12), Some(Direction::Down));
        // Release without a press is ignored.
        assert_eq!(swipe.release(20, 10), None);
    }

    #[test]
    fn test_map_mouse() {
        let mut swipe = SwipeTracker::new();
        let down = MouseEventKind::Down(MouseButton::Left);
        let up = MouseEventKind::Up(MouseButton::Left);
        assert_eq!(map_mouse(GameKind::Flappy, mouse(down, 5, 5), &mut swipe), Some(Command::Jump));
        assert_eq!(map_mouse(GameKind::Snake, mouse(down, 5, 5), &mut swipe), None);
        assert_eq!(
            map_mouse(GameKind::Snake, mouse(up, 1, 5), &mut swipe),
            Some(Command::Steer(Direction::Left))
        );
        // A click without movement does not steer.
        map_mouse(GameKind::Snake, mouse(down, 5, 5), &mut swipe);
        assert_eq!(map_mouse(GameKind::Snake, mouse(up, 5, 5), &mut swipe), None);
    }
}
