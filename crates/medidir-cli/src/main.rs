use clap::Parser;
use env_logger::Env;
use medidir_core::storage::config::Config;
use std::path::PathBuf;

mod cli;

use cli::dispatcher::{Dispatcher, Session};
use cli::main_types::Cli;

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load Config
    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    if let Some(config_dir) = &cli.config_dir {
        log::debug!("Using config directory: {}", config_dir);
    }

    let dispatcher = Dispatcher::new(Session {
        config,
        config_path,
        api_url: cli.api_url,
        profile: cli.profile,
        no_keyring: cli.no_keyring,
    });

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("{} Error: {}", e.severity().emoji(), e.display_friendly());
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("💡 {}", hint);
        }
        std::process::exit(1);
    }

    Ok(())
}
