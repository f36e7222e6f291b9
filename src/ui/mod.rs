// UI and formatting module

pub mod formatters;
pub mod progress;
pub mod report;

// Re-export commonly used items for cleaner imports
pub use formatters::{fit_width, format_duration, format_percent};
pub use progress::{format_event, print_event, render_events};
pub use report::{print_section, print_summary, render_report_text};
