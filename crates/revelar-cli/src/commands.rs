//! CLI command definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Revelador: CLI for Revelar - static site serving for effect development
#[derive(Parser, Debug)]
#[command(name = "revelador")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve a static site directory
    Serve(ServeArgs),
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Directory to serve (default: current directory)
    #[arg(short = 'd', long = "dir", default_value = ".")]
    pub directory: PathBuf,

    /// HTTP port to listen on
    #[arg(short, long, default_value = "3000", env = "REVELAR_PORT")]
    pub port: u16,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::parse_from(["revelador", "serve"]);
        let Commands::Serve(args) = cli.command;
        assert_eq!(args.port, 3000);
        assert_eq!(args.directory, PathBuf::from("."));
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::parse_from(["revelador", "serve", "--dir", "site", "-p", "8000"]);
        let Commands::Serve(args) = cli.command;
        assert_eq!(args.port, 8000);
        assert_eq!(args.directory, PathBuf::from("site"));
    }
}
