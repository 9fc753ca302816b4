//! RAX File Manager - Entry Point
//!
//! An interactive, menu-driven file manager confined to a configured work root.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use tokio::io::BufReader;

use rax_file_manager::config::AppConfig;
use rax_file_manager::manager::FileManager;
use rax_file_manager::shell::run_shell;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(version, about = "Interactive file manager confined to a work directory")]
struct Args {
    /// Configuration file, relative to the startup directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory used to locate the configuration and resolve a relative work_dir
    #[arg(long, env = "RAX_FM_START_DIR")]
    start_dir: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let args = Args::parse();

    let start_dir = match args.start_dir {
        Some(dir) => dir,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                error!("Cannot determine the invocation directory: {}", e);
                std::process::exit(1);
            }
        },
    };

    let config = match AppConfig::load(&start_dir, args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {}", start_dir.display(), e);
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let mut manager = match FileManager::from_config(&config) {
        Ok(manager) => manager,
        Err(e) => {
            error!("Cannot open work root {}: {}", config.work_dir.display(), e);
            eprintln!("Cannot open work root {}: {}", config.work_dir.display(), e);
            std::process::exit(1);
        }
    };

    info!("Launching file manager in {}", manager.work_root().display());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    if let Err(e) = run_shell(&mut manager, stdin, &mut stdout, config.max_input_length).await {
        error!("Console I/O failed: {}", e);
        std::process::exit(1);
    }
}
