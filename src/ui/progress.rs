// Live progress rendering for running checks

use colored::Colorize;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::core::outcome::{Classification, ProgressEvent};
use crate::ui::formatters::fit_width;

const NAME_WIDTH: usize = 40;

/// One progress line, without colors
///
/// ```text
/// ✓ [3/120] Channel One                              | Line   12 | OK (200)
/// ```
pub fn format_event(event: &ProgressEvent) -> String {
    let (icon, status) = match event.classification {
        Classification::Working => {
            let status = match (event.http_status, event.detail.is_empty()) {
                (Some(code), _) => format!("OK ({})", code),
                (None, false) => format!("OK ({})", event.detail),
                (None, true) => "OK".to_string(),
            };
            ("✓", status)
        }
        Classification::Failed => ("✗", format!("FAILED: {}", event.detail)),
        Classification::Invalid => ("⚠", format!("INVALID: {}", event.detail)),
    };

    format!(
        "{} [{}/{}] {} | Line {:4} | {}",
        icon,
        event.completed,
        event.total,
        fit_width(&event.display_name, NAME_WIDTH),
        event.line_number,
        status
    )
}

pub fn print_event(event: &ProgressEvent) {
    let line = format_event(event);
    let line = match event.classification {
        Classification::Working => line.green(),
        Classification::Failed => line.red(),
        Classification::Invalid => line.yellow(),
    };
    println!("{}", line);
}

/// Drain progress events until the dispatcher drops its sender
///
/// Returns the number of events seen; prints them unless `quiet`.
pub async fn render_events(mut events: UnboundedReceiver<ProgressEvent>, quiet: bool) -> usize {
    let mut seen = 0;
    while let Some(event) = events.recv().await {
        seen += 1;
        if !quiet {
            print_event(&event);
        }
    }
    seen
}
