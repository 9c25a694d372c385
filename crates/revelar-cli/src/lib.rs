//! Revelar CLI: static site serving for effect development
//!
//! ## Usage
//!
//! ```bash
//! revelador serve                  # Serve the current directory on :3000
//! revelador serve --dir site -p 8000
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod commands;
pub mod error;
pub mod server;

pub use commands::{Cli, Commands, ServeArgs};
pub use error::{CliError, CliResult};
pub use server::{content_type_for, ServeConfig, ServeConfigBuilder, StaticServer};
