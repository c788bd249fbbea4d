use anyhow::Context;
use clap::Parser;
use colored::*;
use encsweep::cli::Cli;
use encsweep::commands;
use encsweep::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if cli.debug {
        eprintln!("{} {:?}", "DEBUG:".yellow(), cli);
    }

    if cli.init_config {
        let path = Config::init().context("failed to write default configuration")?;
        eprintln!("{} Wrote {}", "[OK]".green().bold(), path.display());
        return Ok(());
    }

    let config = Config::load().context("failed to load configuration")?;

    commands::execute_sweep(&cli, &config)
        .await
        .with_context(|| format!("sweep failed for {}", cli.spec.display()))?;

    Ok(())
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "encsweep=debug" } else { "encsweep=warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
