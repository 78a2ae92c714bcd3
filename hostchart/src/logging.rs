//! File logging. The TUI owns the terminal, so tracing output goes to
//! `hostchart.log` in the config dir, and only when `RUST_LOG` is set.

use std::{fs, sync::Mutex};

use tracing_subscriber::EnvFilter;

use crate::profiles::config_dir;

pub const LOG_FILE: &str = "hostchart.log";

pub fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let dir = config_dir();
    let path = dir.join(LOG_FILE);
    let file = fs::create_dir_all(&dir).and_then(|_| {
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    });
    match file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                )
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        Err(e) => eprintln!("hostchart: cannot open {}: {e}", path.display()),
    }
}
