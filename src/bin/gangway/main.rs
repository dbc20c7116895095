//! Gangway CLI - a drop-in driver wrapper over the in-process shim.

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands};

use gangway::{DriverConfig, LinkerFlavor};

fn main() {
    match run() {
        Ok(status) => std::process::exit(status),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("gangway=debug")
    } else {
        EnvFilter::new("gangway=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let mut config = DriverConfig::new();
    if let Some(driver) = cli.driver {
        config = config.driver_path(driver);
    }

    // The caller passes flags and inputs only; the shim supplies argv[0].
    match cli.command {
        Commands::Cc(fwd) => {
            let mut argv = vec!["clang".to_string()];
            argv.extend(fwd.args);
            Ok(config.compile(argv)?)
        }
        Commands::Link(link) => {
            let linker: LinkerFlavor = link.linker.parse().map_err(|e: String| anyhow!(e))?;
            let mut argv = vec!["clang".to_string()];
            argv.extend(link.args);
            Ok(config.linker(linker).link(argv)?)
        }
    }
}
