use anyhow::{Context, Result};
use clang_shim::{cli::Cli, config::ShimConfig, process};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Environment variable enabling diagnostic logging (an EnvFilter directive)
const LOG_ENV: &str = "CLANG_SHIM_LOG";

/// Initialize tracing subscriber for debug output
///
/// Nothing is installed unless `CLANG_SHIM_LOG` is set, so by default the
/// only output is the compiler's own.
fn init_tracing() {
    if let Ok(directive) = std::env::var(LOG_ENV) {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(directive))
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing();

    let config = ShimConfig::from_env().context("Failed to load clang-shim config")?;
    let command = args.into_request().resolve(&config);
    let code = process::run(&command)?;

    std::process::exit(code);
}
