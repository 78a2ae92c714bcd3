//! UI module root: panel layout and the chart area dispatch.

pub mod cpu;
pub mod error;
pub mod header;
pub mod mem;
pub mod net;
pub mod theme;
pub mod util;

use chrono::{DateTime, Local};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::panels::{Dashboard, View};

/// Three panels side by side on wide terminals, 2 + 1 on medium, stacked on narrow.
/// Order: CPU, Memory, Network.
pub fn panel_areas(area: Rect) -> [Rect; 3] {
    if area.width >= 150 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);
        [cols[0], cols[1], cols[2]]
    } else if area.width >= 100 {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        [top[0], top[1], rows[1]]
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);
        [rows[0], rows[1], rows[2]]
    }
}

/// Charts, the error notice, or nothing at all before the first poll lands.
pub fn draw_charts(f: &mut ratatui::Frame<'_>, area: Rect, dash: &Dashboard, now: DateTime<Local>) {
    match dash.view() {
        View::Empty => {}
        View::Error(e) => error::draw_fetch_error(f, area, e),
        View::Charts { status, .. } => {
            let [cpu_area, mem_area, net_area] = panel_areas(area);
            cpu::draw_cpu_chart(f, cpu_area, &dash.cpu, &status, now);
            mem::draw_mem_chart(f, mem_area, &dash.mem, &status, now);
            net::draw_net_chart(f, net_area, &dash.net, &status, now);
        }
    }
}
