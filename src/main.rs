//! Sneaker Accounting main entry point

use anyhow::Context;
use clap::Parser;
use sneakerweb_api::start_server;
use sneakerweb_config::{Config, ConfigError, ConfigErrorSeverity, LoggingConfig};
use sneakerweb_core::{source_for, Session};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "sneakerweb")]
#[command(author = "Sneakerweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web interface for recording sneaker resale transactions", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration file and exit
    #[arg(long)]
    print_default_config: bool,
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Log a configuration problem with its code, field and suggestions
fn log_config_error(e: &ConfigError) {
    match e.severity() {
        ConfigErrorSeverity::Warning => log::warn!("{}\nUsing default configuration", e.to_details()),
        ConfigErrorSeverity::Error => log::error!("{}", e.to_details()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = match Config::load_or_default(args.config.clone()) {
        Ok((config, problem)) => {
            init_logging(&config.logging.level);
            match problem {
                Some(e) => log_config_error(&e),
                None => log::info!("Config loaded from {}", args.config.display()),
            }
            config
        }
        Err(e) => {
            init_logging(&LoggingConfig::default().level);
            log_config_error(&e);
            return Err(e).with_context(|| format!("Failed to load configuration from {}", args.config.display()));
        }
    };

    let rt = Runtime::new()?;
    rt.block_on(async {
        let source = source_for(&config.data);
        let mut session = Session::new(config.display.clone());
        session
            .load(source.as_ref())
            .await
            .with_context(|| format!("Failed to load transactions from {} source", source.name()))?;

        start_server(config, Arc::new(RwLock::new(session))).await
    })
}
