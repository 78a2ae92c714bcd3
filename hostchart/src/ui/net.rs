//! Network panel: upload/download readouts over two line series whose y axis
//! follows the largest download rate in the window.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::axis::linear_points;
use crate::panels::NetPanel;
use crate::types::HostStatus;
use crate::ui::theme::{AXIS, SERIES_PRIMARY, SERIES_SECONDARY};
use crate::ui::util::{dot, fmt_rate, label, time_axis, value};

pub fn draw_net_chart(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    panel: &NetPanel,
    status: &HostStatus,
    now: DateTime<Local>,
) {
    let block = Block::default().borders(Borders::ALL).title("Network");
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 || inner.width < 8 {
        return;
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let readout = Line::from(vec![
        label("Upload "),
        dot(SERIES_PRIMARY),
        value(fmt_rate(status.up), SERIES_PRIMARY),
        label("   Download "),
        dot(SERIES_SECONDARY),
        value(fmt_rate(status.down), SERIES_SECONDARY),
    ]);
    f.render_widget(Paragraph::new(readout), rows[0]);

    let window = panel.window();
    let up = linear_points(window.iter().map(|s| s.upload_mbs));
    let down = linear_points(window.iter().map(|s| s.download_mbs));
    let bound = panel.y_bound();
    let datasets = vec![
        Dataset::default()
            .name("Upload")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(SERIES_PRIMARY))
            .data(&up),
        Dataset::default()
            .name("Download")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(SERIES_SECONDARY))
            .data(&down),
    ];
    let y_axis = Axis::default()
        .style(Style::default().fg(AXIS))
        .bounds([0.0, bound])
        .labels(vec![Span::raw("0M/s"), Span::raw(format!("{bound:.0}M/s"))]);
    let chart = Chart::new(datasets)
        .x_axis(time_axis(window, now, rows[1].width))
        .y_axis(y_axis)
        .legend_position(None);
    f.render_widget(chart, rows[1]);
}
