//! Poll interval resolution and target URL checks.

use std::time::Duration;

use tracing::warn;

pub const DEFAULT_INTERVAL_MS: u64 = 5000;
pub const INTERVAL_ENV: &str = "HOSTCHART_FETCH_INTERVAL";
pub const DEFAULT_SERVER_ID: u64 = 1;

/// A positive whole number of milliseconds, or nothing.
pub fn parse_interval_ms(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|&ms| ms > 0)
}

/// First valid of: CLI flag, `HOSTCHART_FETCH_INTERVAL`, profile value. Falls
/// back to 5s.
pub fn resolve_interval(cli: Option<&str>, env: Option<&str>, profile: Option<u64>) -> Duration {
    let sources = [("--interval", cli), (INTERVAL_ENV, env)];
    for (name, raw) in sources {
        let Some(raw) = raw else { continue };
        match parse_interval_ms(raw) {
            Some(ms) => return Duration::from_millis(ms),
            None => warn!("ignoring invalid {name} value {raw:?}"),
        }
    }
    let ms = profile
        .filter(|&ms| ms > 0)
        .unwrap_or(DEFAULT_INTERVAL_MS);
    Duration::from_millis(ms)
}

pub fn interval_from_env() -> Option<String> {
    std::env::var(INTERVAL_ENV).ok()
}

/// Accepts only ws:// and wss:// URLs with a host.
pub fn validate_url(raw: &str) -> Result<url::Url, String> {
    let u = url::Url::parse(raw.trim()).map_err(|e| format!("invalid URL {raw:?}: {e}"))?;
    match u.scheme() {
        "ws" | "wss" if u.host().is_some() => Ok(u),
        "ws" | "wss" => Err(format!("URL {raw:?} has no host")),
        other => Err(format!(
            "unsupported scheme {other:?} in {raw:?} (expected ws:// or wss://)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_defaults_when_absent_or_invalid() {
        assert_eq!(resolve_interval(None, None, None), Duration::from_millis(5000));
        assert_eq!(resolve_interval(Some("abc"), None, None), Duration::from_millis(5000));
        assert_eq!(resolve_interval(Some("0"), None, None), Duration::from_millis(5000));
        assert_eq!(resolve_interval(Some("-5"), None, None), Duration::from_millis(5000));
        assert_eq!(resolve_interval(None, None, Some(0)), Duration::from_millis(5000));
    }

    #[test]
    fn interval_prefers_cli_then_env_then_profile() {
        assert_eq!(
            resolve_interval(Some("1500"), Some("2000"), Some(3000)),
            Duration::from_millis(1500)
        );
        assert_eq!(
            resolve_interval(None, Some(" 2000 "), Some(3000)),
            Duration::from_millis(2000)
        );
        assert_eq!(
            resolve_interval(Some("bogus"), None, Some(3000)),
            Duration::from_millis(3000)
        );
    }

    #[test]
    fn only_websocket_urls_pass() {
        assert!(validate_url("ws://127.0.0.1:3000/ws").is_ok());
        assert!(validate_url("wss://agent.example/ws").is_ok());
        assert!(validate_url("http://agent.example/ws").is_err());
        assert!(validate_url("agent:3000").is_err());
        assert!(validate_url("not a url").is_err());
    }
}
