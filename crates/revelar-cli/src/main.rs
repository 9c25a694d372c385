//! Revelador: serve a static site for effect development
//!
//! ## Usage
//!
//! ```bash
//! revelador serve                  # Serve the current directory on :3000
//! revelador serve --dir site -p 8000
//! ```

use clap::Parser;
use revelar_cli::{Cli, CliError, CliResult, Commands, ServeArgs, ServeConfig, StaticServer};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match cli.command {
        Commands::Serve(args) => run_serve(&args),
    }
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_serve(args: &ServeArgs) -> CliResult<()> {
    if !args.directory.is_dir() {
        return Err(CliError::config(format!(
            "not a directory: {}",
            args.directory.display()
        )));
    }

    let config = ServeConfig::builder()
        .root(&args.directory)
        .port(args.port)
        .build();
    let server = StaticServer::new(config);
    println!("Server running at {}", server.url());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server(format!("failed to create runtime: {e}")))?;
    rt.block_on(server.run())
}
