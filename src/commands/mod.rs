// Command handlers module
pub mod check;
pub mod completions;
pub mod config;
pub mod convert;
pub mod version;

// Re-exports for cleaner imports
pub use check::execute as check;
pub use convert::execute as convert;
pub use version::execute as version;
