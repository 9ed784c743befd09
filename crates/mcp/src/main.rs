#![forbid(unsafe_code)]

mod config;
mod entry;
mod handlers;
mod server;
mod support;

pub(crate) use support::*;

use clap::Parser;
use ln_storage::FamilyStore;
pub(crate) use ln_storage::StoreError;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, fmt};

const MCP_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "lineage-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lineage tool server: genealogy trees over JSON-RPC on stdio.
#[derive(Debug, Parser)]
#[command(name = "ln_mcp", version, about)]
struct Cli {
    /// Directory holding the local storage database.
    #[arg(long, env = "LINEAGE_STORAGE_DIR", default_value = "./.lineage")]
    storage_dir: PathBuf,

    /// Optional YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `ln_storage=debug`.
    #[arg(long, env = "LINEAGE_LOG", default_value = "warn")]
    log_level: String,
}

pub(crate) fn build_fingerprint() -> String {
    match option_env!("LN_GIT_SHA") {
        Some(sha) => format!("{SERVER_VERSION}+{sha}"),
        None => SERVER_VERSION.to_string(),
    }
}

pub(crate) struct McpServer {
    initialized: bool,
    store: FamilyStore,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn write_last_crash(storage_dir: &std::path::Path, kind: &str, detail: &str) {
    // Best effort; stdout belongs to the protocol.
    let _ = std::fs::create_dir_all(storage_dir);
    let path = storage_dir.join("ln_mcp_last_crash.txt");

    let mut out = String::new();
    let _ = writeln!(out, "ts={}", ln_core::dates::to_rfc3339(ln_core::dates::now_utc()));
    let _ = writeln!(out, "pid={}", std::process::id());
    let _ = writeln!(out, "kind={kind}");
    let _ = writeln!(out, "build={}", build_fingerprint());
    let _ = writeln!(out, "detail={detail}");
    let _ = std::fs::write(path, out);
}

fn install_crash_reporter(storage_dir: PathBuf) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let detail = info.to_string();
        tracing::error!(%detail, "server panicked");
        write_last_crash(&storage_dir, "panic", &detail);
        default_hook(info);
    }));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = match &cli.config {
        Some(path) => config::FileConfig::load(path)?,
        None => config::FileConfig::default(),
    };
    install_crash_reporter(cli.storage_dir.clone());

    let store = FamilyStore::open(&cli.storage_dir, config.storage)?;
    tracing::info!(storage_dir = %cli.storage_dir.display(), "lineage server starting");

    let mut server = McpServer::new(store);
    let result = entry::run_stdio(&mut server);
    if let Err(err) = &result {
        write_last_crash(&cli.storage_dir, "error", &format!("{err:?}"));
    }
    result
}
