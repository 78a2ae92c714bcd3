//! Small UI helpers: readout formatting, mini bars and the shared chart axes.

use chrono::{DateTime, Local};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Axis,
};

use crate::axis::{x_bounds, x_labels, PERCENT_BOUNDS};
use crate::history::Window;
use crate::types::Timestamped;
use crate::ui::theme::{AXIS, MUTED};

/// Whole percent, rounded half away from zero: `42.7` -> `43%`.
pub fn fmt_percent(v: f64) -> String {
    format!("{:.0}%", v.round())
}

/// Throughput in MiB/s with two decimals, ties away from zero: `0.125` -> `0.13 M/s`.
pub fn fmt_rate(v: f64) -> String {
    format!("{:.2} M/s", (v * 100.0).round() / 100.0)
}

pub fn fmt_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = secs % 86_400 / 3600;
    let minutes = secs % 3600 / 60;
    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Horizontal bar for a 0..100 value, `width` cells wide.
pub fn mini_bar(pct: f64, width: usize) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let mut s = "█".repeat(filled.min(width));
    s.push_str(&"░".repeat(width - filled.min(width)));
    s
}

pub fn label(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(MUTED))
}

pub fn value(text: String, color: Color) -> Span<'static> {
    Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

pub fn dot(color: Color) -> Span<'static> {
    Span::styled("● ", Style::default().fg(color))
}

/// X axis indexed by sample with relative-time labels.
pub fn time_axis<T: Timestamped + Clone>(
    window: &Window<T>,
    now: DateTime<Local>,
    width: u16,
) -> Axis<'static> {
    let labels: Vec<Span<'static>> = x_labels(window, now, width)
        .into_iter()
        .map(Span::raw)
        .collect();
    Axis::default()
        .style(Style::default().fg(AXIS))
        .bounds(x_bounds(window.len()))
        .labels(labels)
}

/// Fixed 0..100 y axis for the percentage charts.
pub fn percent_axis() -> Axis<'static> {
    Axis::default()
        .style(Style::default().fg(AXIS))
        .bounds(PERCENT_BOUNDS)
        .labels(vec![Span::raw("0%"), Span::raw("50%"), Span::raw("100%")])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_whole_number() {
        assert_eq!(fmt_percent(42.7), "43%");
        assert_eq!(fmt_percent(55.0), "55%");
        assert_eq!(fmt_percent(0.5), "1%");
        assert_eq!(fmt_percent(99.4), "99%");
    }

    #[test]
    fn rate_has_two_decimals() {
        assert_eq!(fmt_rate(1.234), "1.23 M/s");
        assert_eq!(fmt_rate(0.0), "0.00 M/s");
        assert_eq!(fmt_rate(12.0), "12.00 M/s");
    }

    #[test]
    fn rate_ties_round_up_like_percent() {
        // 131072 B/s is exactly 0.125 MiB/s
        assert_eq!(fmt_rate(131_072.0 / (1024.0 * 1024.0)), "0.13 M/s");
        assert_eq!(fmt_rate(0.375), "0.38 M/s");
    }

    #[test]
    fn uptime_is_compact() {
        assert_eq!(fmt_uptime(59), "0m");
        assert_eq!(fmt_uptime(3 * 3600 + 120), "3h 2m");
        assert_eq!(fmt_uptime(2 * 86_400 + 5 * 3600), "2d 5h");
    }

    #[test]
    fn mini_bar_scales_and_clamps() {
        assert_eq!(mini_bar(50.0, 4), "██░░");
        assert_eq!(mini_bar(0.0, 3), "░░░");
        assert_eq!(mini_bar(250.0, 3), "███");
    }
}
