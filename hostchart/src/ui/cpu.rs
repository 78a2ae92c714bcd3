//! CPU panel: current usage readout over a filled step chart of the window.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::Line,
    widgets::{Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::axis::{step_fill_points, step_points};
use crate::panels::CpuPanel;
use crate::types::HostStatus;
use crate::ui::theme::{SERIES_PRIMARY, SERIES_PRIMARY_FILL};
use crate::ui::util::{dot, fmt_percent, label, mini_bar, percent_axis, time_axis, value};

pub fn draw_cpu_chart(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    panel: &CpuPanel,
    status: &HostStatus,
    now: DateTime<Local>,
) {
    let block = Block::default().borders(Borders::ALL).title("CPU");
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
        dot(SERIES_PRIMARY),
        label(&mini_bar(status.cpu, 6)),
        label(" "),
        value(fmt_percent(status.cpu), SERIES_PRIMARY),
    ]);
    f.render_widget(Paragraph::new(readout).right_aligned(), rows[0]);

    let values: Vec<f64> = panel.window().iter().map(|s| s.cpu_percent).collect();
    let fill = step_fill_points(&values, rows[1].width);
    let points = step_points(values.iter().copied());
    let datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(SERIES_PRIMARY_FILL))
            .data(&fill),
        Dataset::default()
            .name("CPU")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(SERIES_PRIMARY))
            .data(&points),
    ];
    let chart = Chart::new(datasets)
        .x_axis(time_axis(panel.window(), now, rows[1].width))
        .y_axis(percent_axis())
        .legend_position(None);
    f.render_widget(chart, rows[1]);
}
