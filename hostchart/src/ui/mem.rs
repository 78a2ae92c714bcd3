//! Memory + swap panel: two readouts, two overlapping filled step series.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::Line,
    widgets::{Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::axis::{step_fill_points, step_points};
use crate::panels::MemPanel;
use crate::types::HostStatus;
use crate::ui::theme::{
    SERIES_PRIMARY, SERIES_PRIMARY_FILL, SERIES_SECONDARY, SERIES_SECONDARY_FILL,
};
use crate::ui::util::{dot, fmt_percent, label, percent_axis, time_axis, value};

pub fn draw_mem_chart(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    panel: &MemPanel,
    status: &HostStatus,
    now: DateTime<Local>,
) {
    let block = Block::default().borders(Borders::ALL).title("Memory");
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
        label("Mem "),
        dot(SERIES_PRIMARY),
        value(fmt_percent(status.mem), SERIES_PRIMARY),
        label("   Swap "),
        dot(SERIES_SECONDARY),
        value(fmt_percent(status.swap), SERIES_SECONDARY),
    ]);
    f.render_widget(Paragraph::new(readout), rows[0]);

    let window = panel.window();
    let mem_values: Vec<f64> = window.iter().map(|s| s.mem_percent).collect();
    let swap_values: Vec<f64> = window.iter().map(|s| s.swap_percent).collect();
    let mem_fill = step_fill_points(&mem_values, rows[1].width);
    let swap_fill = step_fill_points(&swap_values, rows[1].width);
    let mem = step_points(mem_values.iter().copied());
    let swap = step_points(swap_values.iter().copied());
    // fills under the lines; swap before memory so memory draws on top
    let datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(SERIES_PRIMARY_FILL))
            .data(&mem_fill),
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(SERIES_SECONDARY_FILL))
            .data(&swap_fill),
        Dataset::default()
            .name("Swap")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(SERIES_SECONDARY))
            .data(&swap),
        Dataset::default()
            .name("Mem")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(SERIES_PRIMARY))
            .data(&mem),
    ];
    let chart = Chart::new(datasets)
        .x_axis(time_axis(window, now, rows[1].width))
        .y_axis(percent_axis())
        .legend_position(None);
    f.render_widget(chart, rows[1]);
}
