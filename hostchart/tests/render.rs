//! Rendering checks against ratatui's TestBackend.

use std::time::Duration;

use chrono::Local;
use hostchart::error::FetchFailure;
use hostchart::panels::Dashboard;
use hostchart::poller::Poll;
use hostchart::types::HostDetail;
use hostchart::ui::{draw_charts, error::FETCH_ERROR_HINT, header::header_title};
use ratatui::{backend::TestBackend, Terminal};

const MIB: f64 = 1024.0 * 1024.0;

fn detail(cpu: f64, mem: u64, swap: u64, up_mbs: f64, down_mbs: f64) -> HostDetail {
    HostDetail {
        server_id: 2,
        name: "edge-2".into(),
        cpu,
        mem_used: mem,
        mem_total: 100,
        swap_used: swap,
        swap_total: 100,
        net_in_speed: (down_mbs * MIB).round() as u64,
        net_out_speed: (up_mbs * MIB).round() as u64,
        uptime_secs: 3600,
    }
}

fn ok(seq: u64, d: HostDetail) -> Poll {
    Poll {
        seq,
        at: Local::now(),
        result: Ok(d),
    }
}

fn failed(seq: u64, msg: &str) -> Poll {
    Poll {
        seq,
        at: Local::now(),
        result: Err(FetchFailure::new(msg)),
    }
}

fn render(dash: &Dashboard, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
    terminal
        .draw(|f| draw_charts(f, f.area(), dash, Local::now()))
        .expect("draw");
    let buf = terminal.backend().buffer();
    buf.content
        .chunks(buf.area.width as usize)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn nothing_is_drawn_before_the_first_poll() {
    let dash = Dashboard::new();
    let screen = render(&dash, 120, 30);
    assert!(screen.chars().all(|c| c == ' ' || c == '\n'), "{screen}");
}

#[test]
fn readouts_show_rounded_percent_and_two_decimal_rates() {
    let mut dash = Dashboard::new();
    dash.apply(&ok(1, detail(42.7, 55, 10, 1.234, 0.0)));
    let screen = render(&dash, 180, 30);
    for needle in ["CPU", "Memory", "Network", "43%", "55%", "10%", "1.23 M/s", "0.00 M/s"] {
        assert!(screen.contains(needle), "missing {needle:?}\n{screen}");
    }
}

#[test]
fn network_axis_follows_peak_download() {
    let mut dash = Dashboard::new();
    dash.apply(&ok(1, detail(1.0, 1, 0, 0.1, 0.3)));
    dash.apply(&ok(2, detail(1.0, 1, 0, 0.1, 7.2)));
    assert_eq!(dash.net.y_bound(), 8.0);
    let screen = render(&dash, 180, 30);
    assert!(screen.contains("8M/s"), "{screen}");
}

#[test]
fn error_replaces_charts_and_success_brings_them_back_with_history() {
    let mut dash = Dashboard::new();
    dash.apply(&ok(1, detail(20.0, 30, 0, 0.0, 0.0)));
    dash.apply(&ok(2, detail(25.0, 30, 0, 0.0, 0.0)));
    dash.apply(&failed(3, "connection refused"));

    let screen = render(&dash, 120, 30);
    assert!(screen.contains("connection refused"), "{screen}");
    assert!(screen.contains(FETCH_ERROR_HINT), "{screen}");
    for gone in ["CPU", "Memory", "Network", "%"] {
        assert!(!screen.contains(gone), "{gone:?} still drawn\n{screen}");
    }

    dash.apply(&ok(4, detail(30.0, 30, 0, 0.0, 0.0)));
    let screen = render(&dash, 120, 30);
    assert!(!screen.contains("connection refused"));
    assert!(screen.contains("30%"), "{screen}");
    assert_eq!(dash.cpu.window().len(), 3);
}

fn braille_rows(screen: &str, cols: std::ops::Range<usize>) -> usize {
    screen
        .lines()
        .filter(|line| {
            line.chars()
                .skip(cols.start)
                .take(cols.len())
                .any(|c| ('\u{2801}'..='\u{28FF}').contains(&c))
        })
        .count()
}

#[test]
fn cpu_and_memory_charts_fill_the_area_under_the_curve() {
    let mut dash = Dashboard::new();
    for seq in 1..=4 {
        dash.apply(&ok(seq, detail(90.0, 90, 0, 0.0, 0.0)));
    }
    let screen = render(&dash, 180, 30);
    // a bare line at a constant 90% would touch a single row
    let cpu_rows = braille_rows(&screen, 0..60);
    let mem_rows = braille_rows(&screen, 60..120);
    assert!(cpu_rows >= 10, "cpu rows = {cpu_rows}\n{screen}");
    assert!(mem_rows >= 10, "mem rows = {mem_rows}\n{screen}");
}

#[test]
fn narrow_terminals_still_draw_every_panel() {
    let mut dash = Dashboard::new();
    dash.apply(&ok(1, detail(5.0, 5, 5, 0.0, 0.0)));
    let screen = render(&dash, 70, 36);
    for needle in ["CPU", "Memory", "Network"] {
        assert!(screen.contains(needle), "missing {needle:?}\n{screen}");
    }
}

#[test]
fn header_describes_target_until_data_arrives() {
    let waiting = header_title("ws://10.0.0.5:3000/ws", None, Duration::from_millis(5000));
    assert!(waiting.contains("ws://10.0.0.5:3000/ws"));
    assert!(waiting.contains("every 5.0s"));

    let d = detail(1.0, 1, 1, 0.0, 0.0);
    let live = header_title("ws://10.0.0.5:3000/ws", Some(&d), Duration::from_millis(2500));
    assert!(live.contains("edge-2 (#2)"));
    assert!(live.contains("up 1h 0m"));
    assert!(live.contains("every 2.5s"));
}
