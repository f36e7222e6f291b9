use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format an elapsed time as `850ms` or `2.4s`
pub fn format_duration(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.1}s", elapsed.as_secs_f64())
    }
}

/// Format a one-decimal percentage
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Fit `text` into exactly `width` terminal columns
///
/// Longer text is cut on a character boundary and ends with `…`; shorter text
/// is padded with spaces. Wide (CJK, emoji) characters count as two columns.
pub fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        let pad = width - text.width();
        return format!("{}{}", text, " ".repeat(pad));
    }

    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += cw;
    }
    out.push('…');
    used += 1;

    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
