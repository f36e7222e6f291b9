// m3uc library - public API

// Re-export error types
pub mod error;
pub use error::{M3ucError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;

// Initialize logging (warn by default, RUST_LOG overrides)
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}
