//! Snake: grid movement, food and levels.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
