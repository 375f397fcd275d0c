//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One line for `--version`.
pub fn version_line() -> String {
    format!("arcade {} ({} {})", VERSION, BUILD_DATE, BUILD_COMMIT)
}
