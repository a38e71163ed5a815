// # seedsyncd - seedsync one-shot updater
//
// This binary is a THIN integration layer: it resolves configuration,
// initializes logging, wires the engine to its HTTP and file-store
// collaborators, and runs exactly one update pass. All decision logic
// lives in seedsync-core; periodic execution belongs to an external
// scheduler (cron, systemd timer) invoking this binary repeatedly.
//
// ## Configuration
//
// Every option resolves flag > environment variable > built-in default:
//
// - `--seed` / `SEEDSYNC_SEED`: bootstrap seed for the very first run
// - `--data-dir` / `SEEDSYNC_DATA_DIR`: where session and markers persist
//   (default: `~/.seedsync`)
// - `--force`: bypass the one-hour wait between updates
// - `--ip-url` / `SEEDSYNC_IP_URL`: plain-text public-IP endpoint
// - `--seedbox-url` / `SEEDSYNC_SEEDBOX_URL`: dynamic-seedbox endpoint
// - `--log-level` / `SEEDSYNC_LOG_LEVEL`: error, warn, info, debug, trace
//
// ## Example
//
// ```bash
// seedsyncd --seed "$SEED" --data-dir /var/lib/seedsync
// ```

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, warn, Level};
use tracing_subscriber::FmtSubscriber;

use seedsync_core::{EngineConfig, Error, FileSessionStore, RunOutcome, UpdateEngine};
use seedsync_http::{DynamicSeedboxClient, HttpIpSource};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean completion (including benign skips)
/// - 1: Configuration error
/// - 2: Runtime error
#[derive(Debug, Clone, Copy)]
enum SeedsyncExitCode {
    Clean = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<SeedsyncExitCode> for ExitCode {
    fn from(code: SeedsyncExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "seedsyncd",
    about = "Keeps a remote seedbox account's registered IP in sync with this machine's public IP"
)]
struct Cli {
    /// Bootstrap seed identifier used for the initial request only
    #[arg(long, env = "SEEDSYNC_SEED")]
    seed: Option<String>,

    /// Directory where the session and marker files are persisted
    #[arg(long, env = "SEEDSYNC_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Bypass the minimum wait between updates
    #[arg(long)]
    force: bool,

    /// Endpoint returning the caller's public IP as plain text
    #[arg(long, env = "SEEDSYNC_IP_URL", default_value = "https://api.ipify.org")]
    ip_url: String,

    /// Dynamic seedbox update endpoint
    #[arg(
        long,
        env = "SEEDSYNC_SEEDBOX_URL",
        default_value = "https://t.myanonamouse.net/json/dynamicSeedbox.php"
    )]
    seedbox_url: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "SEEDSYNC_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn parse_level(input: &str) -> Level {
    match input.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf, Error> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".seedsync"))
        .ok_or_else(|| Error::config("no data directory given and no home directory found"))
}

async fn run(cli: Cli) -> Result<RunOutcome, Error> {
    let data_dir = resolve_data_dir(cli.data_dir)?;
    debug!(dir = %data_dir.display(), "using data directory");

    let store = FileSessionStore::open(&data_dir).await?;
    let ip_source = HttpIpSource::new(cli.ip_url)?;
    let client = DynamicSeedboxClient::new(cli.seedbox_url)?;

    let engine = UpdateEngine::new(
        Box::new(store),
        Box::new(ip_source),
        Box::new(client),
        EngineConfig::new(cli.seed, cli.force),
    );

    engine.run().await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&cli.log_level))
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to initialize logging: {}", e);
        return SeedsyncExitCode::RuntimeError.into();
    }

    // The run is single-pass; a signal aborts the in-flight HTTP call and
    // leaves persisted state untouched for the next invocation.
    let result = tokio::select! {
        result = run(cli) => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("shutdown signal received, aborting run");
            return SeedsyncExitCode::Clean.into();
        }
    };

    match result {
        Ok(outcome) => {
            debug!(event = outcome.event(), "run completed");
            SeedsyncExitCode::Clean.into()
        }
        Err(e) => {
            error!(event = format!("error:{}", e.kind()), error = %e, "run failed");
            match e {
                Error::Config(_) => SeedsyncExitCode::ConfigError.into(),
                _ => SeedsyncExitCode::RuntimeError.into(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing_defaults_to_info() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("WARN"), Level::WARN);
        assert_eq!(parse_level("bogus"), Level::INFO);
    }

    #[test]
    fn explicit_data_dir_wins() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/seedsync"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/seedsync"));
    }

    #[test]
    fn cli_defaults_match_the_public_endpoints() {
        let cli = Cli::parse_from(["seedsyncd"]);
        assert_eq!(cli.ip_url, "https://api.ipify.org");
        assert_eq!(
            cli.seedbox_url,
            "https://t.myanonamouse.net/json/dynamicSeedbox.php"
        );
        assert!(!cli.force);
    }
}
