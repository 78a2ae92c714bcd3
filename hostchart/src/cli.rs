//! Command-line parsing for the hostchart client.

#[derive(Debug, Default, PartialEq)]
pub struct ParsedArgs {
    pub url: Option<String>,
    pub profile: Option<String>,
    pub server_id: Option<u64>,
    /// Raw value; validated later together with the env var and profile.
    pub interval: Option<String>,
    pub save: bool,
    pub demo: bool,
    pub dry_run: bool,
}

pub fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--server-id ID|-s ID] [--interval MS|-i MS] [--profile NAME|-P NAME] [--save] [--demo] [--dry-run] [ws://HOST:PORT/ws]"
    )
}

fn parse_server_id(raw: &str) -> Result<u64, String> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| format!("invalid server id {raw:?}: expected a non-negative integer"))
}

/// `Err` carries the text to print: usage for `--help`, a message otherwise.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "hostchart".into());
    let mut out = ParsedArgs::default();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(usage(&prog)),
            "--server-id" | "-s" => {
                let v = it.next().ok_or_else(|| format!("{arg} needs a value"))?;
                out.server_id = Some(parse_server_id(&v)?);
            }
            "--interval" | "-i" => {
                out.interval = it.next();
            }
            "--profile" | "-P" => {
                out.profile = it.next();
            }
            "--save" => out.save = true,
            "--demo" => out.demo = true,
            "--dry-run" => out.dry_run = true,
            _ if arg.starts_with("--server-id=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    out.server_id = Some(parse_server_id(v)?);
                }
            }
            _ if arg.starts_with("--interval=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        out.interval = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--profile=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        out.profile = Some(v.to_string());
                    }
                }
            }
            _ => {
                if out.url.is_none() {
                    out.url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. {}", usage(&prog)));
                }
            }
        }
    }
    Ok(out)
}
