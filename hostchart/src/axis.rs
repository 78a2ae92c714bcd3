//! Axis helpers: the dynamic throughput bound, relative-time tick labels and
//! point series for the chart widgets.

use chrono::{DateTime, Local};

use crate::history::Window;
use crate::types::{NetSample, Timestamped};

/// Fixed y domain of the percentage charts.
pub const PERCENT_BOUNDS: [f64; 2] = [0.0, 100.0];

/// Columns reserved per x tick label; fewer labels are drawn on narrow charts.
pub const MIN_TICK_GAP: u16 = 12;

/// Upper y bound for the network chart: the largest download rate in the
/// window rounded up, never below 1.
pub fn upload_download_bound(window: &Window<NetSample>) -> f64 {
    let max = window
        .iter()
        .map(|s| s.download_mbs)
        .fold(f64::NEG_INFINITY, f64::max)
        .ceil();
    if max.is_finite() && max >= 1.0 {
        max
    } else {
        1.0
    }
}

/// Coarsest non-zero unit of `now - ts`: `42s`, `3m`, `5h`, `2d`.
pub fn format_relative_time(now: DateTime<Local>, ts: DateTime<Local>) -> String {
    let secs = (now - ts).num_seconds().max(0);
    let hours = secs / 3600;
    let minutes = secs % 3600 / 60;
    if hours > 24 {
        format!("{}d", hours / 24)
    } else if hours > 0 {
        format!("{hours}h")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{}s", secs % 60)
    }
}

/// Window indices that get an x label. First and last are always included;
/// the rest are spread evenly, limited by `width / MIN_TICK_GAP`.
pub fn tick_indices(len: usize, width: u16) -> Vec<usize> {
    match len {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let fit = (width / MIN_TICK_GAP).max(2) as usize;
            let count = fit.min(len);
            (0..count).map(|i| i * (len - 1) / (count - 1)).collect()
        }
    }
}

pub fn x_labels<T: Timestamped + Clone>(
    window: &Window<T>,
    now: DateTime<Local>,
    width: u16,
) -> Vec<String> {
    tick_indices(window.len(), width)
        .into_iter()
        .filter_map(|i| window.get(i))
        .map(|s| format_relative_time(now, s.timestamp()))
        .collect()
}

/// X bounds for a window plotted by sample index.
pub fn x_bounds(len: usize) -> [f64; 2] {
    [0.0, len.saturating_sub(1).max(1) as f64]
}

/// One point per sample, joined by straight segments.
pub fn linear_points(values: impl IntoIterator<Item = f64>) -> Vec<(f64, f64)> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, y)| (i as f64, y))
        .collect()
}

/// Step series: each value holds until halfway to the next sample, then jumps.
pub fn step_points(values: impl IntoIterator<Item = f64>) -> Vec<(f64, f64)> {
    let mut pts = Vec::new();
    let mut prev: Option<f64> = None;
    for (i, y) in values.into_iter().enumerate() {
        let x = i as f64;
        if let Some(p) = prev {
            pts.push((x - 0.5, p));
            pts.push((x - 0.5, y));
        }
        pts.push((x, y));
        prev = Some(y);
    }
    pts
}

/// Dense samples of the same step curve, two per terminal column, for drawing
/// the filled area under it as vertical bars.
pub fn step_fill_points(values: &[f64], width: u16) -> Vec<(f64, f64)> {
    match values {
        [] => Vec::new(),
        [only] => vec![(0.0, *only)],
        _ => {
            let last = (values.len() - 1) as f64;
            let columns = (usize::from(width) * 2).max(1);
            (0..=columns)
                .map(|k| {
                    let x = last * k as f64 / columns as f64;
                    // steps switch halfway between samples
                    let idx = ((x + 0.5).floor() as usize).min(values.len() - 1);
                    (x, values[idx])
                })
                .collect()
        }
    }
}
