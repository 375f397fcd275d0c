//! Flappy: gravity, pipes and scroll speed.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
