//! CLI argument definitions for the `gangway` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gangway", version, about = "In-process clang driver shim")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Driver binary to use instead of discovery
    #[arg(long, global = true, env = "GANGWAY_CLANG")]
    pub driver: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forward a compile-style argument vector to the driver
    Cc(ForwardArgs),
    /// Forward a link-style argument vector, selecting a default linker
    Link(LinkArgs),
}

#[derive(Args)]
pub struct ForwardArgs {
    /// Arguments handed to the driver verbatim
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct LinkArgs {
    /// Linker to request: lld, bfd, gold or mold
    #[arg(long, default_value = "lld")]
    pub linker: String,

    /// Arguments handed to the driver after normalization
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
