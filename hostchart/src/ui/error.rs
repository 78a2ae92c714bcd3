//! Fetch error notice shown in place of the charts.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Paragraph, Wrap},
};

use crate::error::FetchFailure;
use crate::ui::theme::ERROR_TEXT;

pub const FETCH_ERROR_HINT: &str = "failed to fetch host status; retrying on the next poll";

pub fn draw_fetch_error(f: &mut ratatui::Frame<'_>, area: Rect, err: &FetchFailure) {
    if area.height == 0 {
        return;
    }
    let lines = vec![Line::from(err.message.clone()), Line::from(FETCH_ERROR_HINT)];
    // vertically center the two lines
    let top = area.height.saturating_sub(2) / 2;
    let body = Rect {
        y: area.y + top,
        height: area.height - top,
        ..area
    };
    let p = Paragraph::new(lines)
        .style(Style::default().fg(ERROR_TEXT))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(p, body);
}
