use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cohort::app::App;
use cohort::cli::Cli;
use cohort::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config_dir.clone())?;
    config.apply_overrides(cli.api_url.as_deref());

    match cli.command {
        Some(command) => {
            init_stderr_logging(cli.debug);
            command.execute(&config, cli.config_dir).await
        }
        None => {
            init_file_logging(cli.config_dir.clone(), cli.debug)?;
            let mut app = App::new(config)?;
            app.run().await
        }
    }
}

fn filter(debug: bool) -> EnvFilter {
    let default = if debug { "cohort=debug" } else { "cohort=info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn init_stderr_logging(debug: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(std::io::stderr)
        .init();
}

/// While the TUI owns the terminal, logs go to a file in the config
/// directory so stdout stays clean.
fn init_file_logging(config_dir: Option<PathBuf>, debug: bool) -> Result<()> {
    let dir = Config::config_dir(config_dir)?;
    let file = std::fs::File::create(dir.join("cohort.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(file)
        .with_ansi(false)
        .init();

    Ok(())
}
