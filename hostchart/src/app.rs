//! App state and main loop: input handling, folding poll results into the panels, and drawing.

use std::{io, time::Duration};

use chrono::Local;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::panels::Dashboard;
use crate::poller::{spawn_poller, PollReceiver, SampleSource};
use crate::ui::{draw_charts, header::draw_header};

// Redraw often enough that relative-time labels stay current
const TICK: Duration = Duration::from_millis(250);

/// Raw mode + alternate screen for as long as it lives. Restores the terminal
/// on drop, including when `App::run` is cancelled mid-loop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // from here on a failure still drops the guard and leaves raw mode
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}

pub struct App {
    target: String,
    interval: Duration,
    dashboard: Dashboard,
    should_quit: bool,
}

impl App {
    pub fn new(target: impl Into<String>, interval: Duration) -> Self {
        Self {
            target: target.into(),
            interval,
            dashboard: Dashboard::new(),
            should_quit: false,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub async fn run<S: SampleSource>(&mut self, source: S, server_id: u64) -> anyhow::Result<()> {
        info!(target = %self.target, server_id, interval_ms = self.interval.as_millis() as u64, "starting");
        // Dropped on return, which stops polling
        let (_poller, mut updates) = spawn_poller(source, server_id, self.interval);

        let _terminal_guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;

        self.event_loop(&mut terminal, &mut updates).await
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        updates: &mut PollReceiver,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    if k.kind != KeyEventKind::Press {
                        continue;
                    }
                    let ctrl_c = k.code == KeyCode::Char('c')
                        && k.modifiers.contains(KeyModifiers::CONTROL);
                    if ctrl_c
                        || matches!(
                            k.code,
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
                        )
                    {
                        self.should_quit = true;
                    }
                }
            }
            if self.should_quit {
                break;
            }

            // Fold every poll that arrived since the last pass
            self.pump(updates);

            terminal.draw(|f| self.draw(f))?;

            // Wake early when a poll lands so short intervals redraw promptly
            tokio::select! {
                _ = sleep(TICK) => {}
                recv = updates.recv() => match recv {
                    Ok(poll) => {
                        self.dashboard.apply(&poll);
                    }
                    Err(RecvError::Lagged(n)) => warn!(skipped = n, "ui fell behind the poller"),
                    // poller is gone; keep showing the last state
                    Err(RecvError::Closed) => sleep(TICK).await,
                },
            }
        }
        Ok(())
    }

    /// Applies every queued poll in order. Returns true when something changed.
    pub fn pump(&mut self, updates: &mut PollReceiver) -> bool {
        let mut changed = false;
        loop {
            match updates.try_recv() {
                Ok(poll) => changed |= self.dashboard.apply(&poll),
                Err(TryRecvError::Lagged(n)) => warn!(skipped = n, "ui fell behind the poller"),
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        changed
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(f.area());

        draw_header(
            f,
            rows[0],
            &self.target,
            self.dashboard.latest(),
            self.interval,
        );
        draw_charts(f, rows[1], &self.dashboard, Local::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::terminal::is_raw_mode_enabled;

    #[test]
    fn dropping_the_terminal_guard_leaves_raw_mode_off() {
        drop(TerminalGuard);
        assert!(!is_raw_mode_enabled().unwrap_or(false));
    }
}
