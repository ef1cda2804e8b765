//! Diagnostics on stderr via `tracing-subscriber`.
//!
//! The library crates only emit events; the binary installs the one
//! subscriber. Events from other crates (minijinja, walkdir) stay silent
//! unless `RUST_LOG` asks for them.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Targets that receive the `-v`/`-q` level.
const HEXAGO_TARGETS: [&str; 3] = ["hexago", "hexago_core", "hexago_adapters"];

/// Install the global subscriber. Call once, after argument parsing.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::try_new(directives(args.log_level()))?,
    };

    let stderr_layer = fmt::layer()
        .without_time()
        .with_target(false)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

fn directives(level: LevelFilter) -> String {
    HEXAGO_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
