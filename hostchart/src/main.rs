//! Entry point for the hostchart TUI. Parses args, resolves the target and runs the App.

use std::env;
use std::io::{self, Write};
use std::process::{Child, Command, Stdio};
use std::time::Duration;

use anyhow::bail;
use hostchart::app::App;
use hostchart::cli::parse_args;
use hostchart::config::{
    interval_from_env, parse_interval_ms, resolve_interval, validate_url, DEFAULT_SERVER_ID,
};
use hostchart::logging::init_logging;
use hostchart::profiles::{
    load_profiles, save_profiles, ProfileEntry, ProfileRequest, ResolveProfile,
};
use hostchart::ws::WsSource;
use tracing::{info, warn};

const DEMO_PORT: u16 = 3231;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };
    init_logging();
    let env_interval = interval_from_env();

    // Demo mode short-circuit (ignore other args)
    if parsed.demo || matches!(parsed.profile.as_deref(), Some("demo")) {
        let interval = resolve_interval(parsed.interval.as_deref(), env_interval.as_deref(), None);
        return run_demo_mode(interval).await;
    }

    let profiles_file = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        url: parsed.url.clone(),
        server_id: parsed.server_id,
        interval_ms: parsed.interval.as_deref().and_then(parse_interval_ms),
    };
    let resolved = req.resolve(&profiles_file);

    // Determine final connection parameters (and maybe mutated profiles to persist)
    let mut profiles_mut = profiles_file.clone();
    let entry: ProfileEntry = match resolved {
        ResolveProfile::Direct(entry) => {
            if let Some(name) = parsed.profile.as_ref() {
                let overwrite = match profiles_mut.profiles.get(name) {
                    // New profile: auto-save immediately
                    None => true,
                    Some(existing) if *existing == entry => false,
                    Some(_) => {
                        parsed.save
                            || prompt_yes_no(&format!("Overwrite existing profile '{name}'? [y/N]: "))
                    }
                };
                if overwrite {
                    profiles_mut.profiles.insert(name.clone(), entry.clone());
                    persist(&profiles_mut);
                }
            }
            entry
        }
        ResolveProfile::Loaded(entry) => entry,
        ResolveProfile::PromptSelect(mut names) => {
            // Always offer demo
            if !names.iter().any(|n| n == "demo") {
                names.push("demo".into());
            }
            eprintln!("Select profile:");
            for (i, n) in names.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, n);
            }
            let line = prompt_string("Enter number (or blank to abort): ")?;
            let Some(name) = line
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|idx| idx.checked_sub(1))
                .and_then(|idx| names.get(idx))
            else {
                return Ok(());
            };
            if name == "demo" {
                let interval =
                    resolve_interval(parsed.interval.as_deref(), env_interval.as_deref(), None);
                return run_demo_mode(interval).await;
            }
            match profiles_mut.profiles.get(name) {
                Some(entry) => entry.clone(),
                None => return Ok(()),
            }
        }
        ResolveProfile::PromptCreate(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let url = prompt_string("Enter URL (ws://HOST:PORT/ws or wss://...): ")?;
            if url.trim().is_empty() {
                return Ok(());
            }
            let id = prompt_string(&format!("Enter server id (blank for {DEFAULT_SERVER_ID}): "))?;
            let server_id = match id.trim() {
                "" => DEFAULT_SERVER_ID,
                raw => match raw.parse() {
                    Ok(v) => v,
                    Err(_) => bail!("invalid server id {raw:?}"),
                },
            };
            let entry = ProfileEntry {
                url: url.trim().to_string(),
                server_id: parsed.server_id.unwrap_or(server_id),
                interval_ms: parsed.interval.as_deref().and_then(parse_interval_ms),
            };
            profiles_mut.profiles.insert(name.clone(), entry.clone());
            persist(&profiles_mut);
            entry
        }
        ResolveProfile::None => {
            eprintln!("No URL provided and no profiles to select.");
            return Ok(());
        }
    };

    if let Err(msg) = validate_url(&entry.url) {
        bail!(msg);
    }
    let interval = resolve_interval(
        parsed.interval.as_deref(),
        env_interval.as_deref(),
        entry.interval_ms,
    );

    if parsed.dry_run {
        println!(
            "target: {} server: {} interval: {}ms",
            entry.url,
            entry.server_id,
            interval.as_millis()
        );
        return Ok(());
    }

    let mut app = App::new(entry.url.clone(), interval);
    app.run(WsSource::new(entry.url), entry.server_id).await
}

fn persist(profiles: &hostchart::profiles::ProfilesFile) {
    if let Err(e) = save_profiles(profiles) {
        warn!("could not save profiles: {e}");
        eprintln!("warning: could not save profiles: {e}");
    }
}

fn prompt_yes_no(prompt: &str) -> bool {
    match prompt_string(prompt) {
        Ok(line) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

// --- Demo Mode ---

async fn run_demo_mode(interval: Duration) -> anyhow::Result<()> {
    let url = format!("ws://127.0.0.1:{DEMO_PORT}/ws");
    let agent = spawn_demo_agent(DEMO_PORT, DEFAULT_SERVER_ID)?;
    // Give the agent a brief moment to start
    tokio::time::sleep(Duration::from_millis(300)).await;
    info!(%url, "demo agent started");

    let mut app = App::new(url.clone(), interval);
    let res = tokio::select! {
        res = app.run(WsSource::new(url), DEFAULT_SERVER_ID) => res,
        _ = tokio::signal::ctrl_c() => Ok(()),
    };
    drop(agent);
    res
}

/// Kills the demo agent when dropped.
struct DemoGuard(Child);

impl Drop for DemoGuard {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

fn spawn_demo_agent(port: u16, server_id: u64) -> anyhow::Result<DemoGuard> {
    let child = Command::new(find_agent_executable())
        .arg("--port")
        .arg(port.to_string())
        .arg("--server-id")
        .arg(server_id.to_string())
        .env("RUST_LOG", "warn")
        // keep the agent off the terminal the TUI is drawing on
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(DemoGuard(child))
}

fn find_agent_executable() -> std::path::PathBuf {
    #[cfg(windows)]
    let name = "hostchart_agent.exe";
    #[cfg(not(windows))]
    let name = "hostchart_agent";
    if let Some(dir) = env::current_exe().ok().and_then(|exe| exe.parent().map(|p| p.to_path_buf())) {
        let candidate = dir.join(name);
        if candidate.exists() {
            return candidate;
        }
    }
    // Fallback to relying on PATH
    std::path::PathBuf::from(name)
}
