//! Top header with host name, uptime and poll interval.

use std::time::Duration;

use crate::types::HostDetail;
use crate::ui::util::fmt_uptime;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

pub fn header_title(target: &str, detail: Option<&HostDetail>, interval: Duration) -> String {
    let every = format!("every {:.1}s", interval.as_secs_f64());
    match detail {
        Some(d) => format!(
            "hostchart | host: {} (#{}) | up {} | {every}  (press 'q' to quit)",
            d.name,
            d.server_id,
            fmt_uptime(d.uptime_secs)
        ),
        None => format!("hostchart | {target} | {every}  (press 'q' to quit)"),
    }
}

pub fn draw_header(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    target: &str,
    detail: Option<&HostDetail>,
    interval: Duration,
) {
    let title = header_title(target, detail, interval);
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
