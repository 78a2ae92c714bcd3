//! hostchart_agent: samples this host and serves its status over a WebSocket.

mod metrics;
mod sampler;
mod state;
mod types;
mod ws;

use std::net::SocketAddr;

use axum::{routing::get, Router};
use sysinfo::System;
use tokio::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::sampler::spawn_sampler;
use crate::state::AppState;
use crate::ws::ws_handler;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SERVER_ID: u64 = 1;
const DEFAULT_SAMPLE_MS: u64 = 1000;
const SAMPLE_ENV: &str = "HOSTCHART_AGENT_SAMPLE_MS";

#[derive(Debug, PartialEq)]
struct AgentArgs {
    port: u16,
    server_id: u64,
    sample_ms: u64,
}

fn usage(prog: &str) -> String {
    format!("Usage: {prog} [--port PORT|-p PORT] [--server-id ID|-s ID] [--sample-ms MS]")
}

fn parse_value<T: std::str::FromStr>(flag: &str, raw: Option<&str>) -> Result<T, String> {
    let raw = raw.ok_or_else(|| format!("{flag} needs a value"))?;
    raw.trim()
        .parse::<T>()
        .map_err(|_| format!("invalid value {raw:?} for {flag}"))
}

fn positive_ms(flag: &str, raw: Option<&str>) -> Result<u64, String> {
    match parse_value::<u64>(flag, raw)? {
        0 => Err(format!("{flag} must be positive")),
        v => Ok(v),
    }
}

/// `env_sample_ms` is only consulted when `--sample-ms` is absent; an invalid env value is ignored.
fn parse_args<I: IntoIterator<Item = String>>(
    args: I,
    env_sample_ms: Option<&str>,
) -> Result<AgentArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "hostchart_agent".into());
    let mut port = DEFAULT_PORT;
    let mut server_id = DEFAULT_SERVER_ID;
    let mut sample_ms = None;

    while let Some(arg) = it.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = || inline.clone().or_else(|| it.next());
        match flag.as_str() {
            "-h" | "--help" => return Err(usage(&prog)),
            "--port" | "-p" => port = parse_value(&flag, value().as_deref())?,
            "--server-id" | "-s" => server_id = parse_value(&flag, value().as_deref())?,
            "--sample-ms" => sample_ms = Some(positive_ms(&flag, value().as_deref())?),
            _ => return Err(format!("Unexpected argument {arg:?}. {}", usage(&prog))),
        }
    }

    let sample_ms = sample_ms
        .or_else(|| env_sample_ms.and_then(|v| v.trim().parse::<u64>().ok().filter(|&v| v > 0)))
        .unwrap_or(DEFAULT_SAMPLE_MS);
    Ok(AgentArgs {
        port,
        server_id,
        sample_ms,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let env_sample = std::env::var(SAMPLE_ENV).ok();
    let args = match parse_args(std::env::args(), env_sample.as_deref()) {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };

    let hostname = System::host_name().unwrap_or_else(|| "unknown".into());
    let state = AppState::new(args.server_id, hostname);

    // Keep the cache warm so replies never wait on sysinfo
    let _sampler = spawn_sampler(state.clone(), Duration::from_millis(args.sample_ms));

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        server_id = args.server_id,
        sample_ms = args.sample_ms,
        "hostchart_agent listening on ws://{}/ws",
        listener.local_addr()?
    );
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("hostchart_agent")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults() {
        assert_eq!(
            parse_args(args(&[]), None),
            Ok(AgentArgs {
                port: DEFAULT_PORT,
                server_id: DEFAULT_SERVER_ID,
                sample_ms: DEFAULT_SAMPLE_MS,
            })
        );
    }

    #[test]
    fn port_short_long_and_assign() {
        assert_eq!(parse_args(args(&["-p", "9001"]), None).unwrap().port, 9001);
        assert_eq!(parse_args(args(&["--port", "9002"]), None).unwrap().port, 9002);
        assert_eq!(parse_args(args(&["--port=9003"]), None).unwrap().port, 9003);
        assert!(parse_args(args(&["--port", "notanumber"]), None).is_err());
        assert!(parse_args(args(&["-p"]), None).is_err());
    }

    #[test]
    fn server_id_and_sample_period() {
        let a = parse_args(args(&["-s", "12", "--sample-ms", "250"]), None).unwrap();
        assert_eq!((a.server_id, a.sample_ms), (12, 250));
        assert!(parse_args(args(&["--sample-ms", "0"]), None).is_err());
    }

    #[test]
    fn sample_period_env_is_a_fallback() {
        assert_eq!(parse_args(args(&[]), Some("500")).unwrap().sample_ms, 500);
        assert_eq!(parse_args(args(&["--sample-ms=200"]), Some("500")).unwrap().sample_ms, 200);
        assert_eq!(parse_args(args(&[]), Some("0")).unwrap().sample_ms, DEFAULT_SAMPLE_MS);
        assert_eq!(parse_args(args(&[]), Some("x")).unwrap().sample_ms, DEFAULT_SAMPLE_MS);
    }

    #[test]
    fn help_and_unknown_flags() {
        assert!(parse_args(args(&["--help"]), None).unwrap_err().starts_with("Usage:"));
        assert!(parse_args(args(&["--enableSSL"]), None).is_err());
    }
}
