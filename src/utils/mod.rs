//! Utility modules: JSON persistence helpers and log setup.

pub mod logging;
pub mod persistence;
