//! Arcade - Snake and Flappy in the terminal.
//!
//! Both games run on one small engine: a frame scheduler and driver, an
//! explicit lifecycle, particles and persisted high scores. The UI renders
//! sessions through shared borrows and is exposed for render tests.

pub mod app;
pub mod audio;
pub mod build_info;
pub mod config;
pub mod core;
pub mod error;
pub mod flappy;
pub mod input;
pub mod scores;
pub mod snake;
pub mod ui;
pub mod utils;
