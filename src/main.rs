use anyhow::{Context, Result};
use std::path::PathBuf;
use tickets::{config::GlobalConfig, logging, tui};

const USAGE: &str = "\
Usage: tickets [--config <path>] [--init-config]

Options:
  -c, --config <path>  Read configuration from <path> instead of ~/.config/tickets/config.toml
      --init-config    Write the effective configuration to the config path and exit
  -h, --help           Print this help
";

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let mut args = std::env::args().skip(1);
    let mut config_path: Option<PathBuf> = None;
    let mut init_config = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                let path = args.next().context("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            }
            "--init-config" => init_config = true,
            "-h" | "--help" => {
                print!("{}", USAGE);
                return Ok(());
            }
            other => anyhow::bail!("Unknown argument '{}'\n\n{}", other, USAGE),
        }
    }

    let config = match &config_path {
        Some(path) => GlobalConfig::load_from(path)?,
        None => GlobalConfig::load()?,
    };

    if init_config {
        let target = match config_path {
            Some(path) => path,
            None => GlobalConfig::config_path()?,
        };
        config.save_to(&target)?;
        println!("Wrote config to {}", target.display());
        return Ok(());
    }

    // Logging is best effort: the board still runs without a log file
    let _log_guard = match GlobalConfig::data_dir().and_then(|dir| logging::init(&config.logging, &dir)) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: logging disabled: {:#}", err);
            None
        }
    };
    tracing::debug!(?config_path, submit_key = config.submit_key.label(), "loaded config");

    // Initialize and run the app
    let mut app = tui::App::new(config)?;
    app.run().await?;

    Ok(())
}
