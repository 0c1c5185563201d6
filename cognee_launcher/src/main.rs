//! # Cognee MCP Launcher Binary
//!
//! Reads `TRANSPORT_MODE`, `COGNEE_HOST`, `COGNEE_PORT`, `COGNEE_PATH` and
//! `COGNEE_LLM_PROVIDER`, then starts the Cognee MCP server.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: http on 0.0.0.0:8000/mcp
//! COGNEE_LLM_PROVIDER=openai cognee_launcher
//!
//! # Custom interpreter / command from a launcher file, verbose logging
//! COGNEE_LLM_PROVIDER=openai cognee_launcher --config launcher.toml -v
//! ```
//!
//! Exits 0 when the server exits 0, 1 on any failure.

#![deny(warnings)]

use clap::Parser;
use cognee::config::{LauncherFile, LogLevel};
use cognee::consts::EXIT_FAILURE;
use cognee_launcher::logging::{LogOptions, build_dispatch};
use cognee_launcher::process::SystemSpawner;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{error, info, info_span};

/// Cognee MCP Launcher - starts the MCP server with settings from the environment
#[derive(Parser, Debug)]
#[command(name = "cognee_launcher")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Starts the Cognee MCP server, falling back to the flat command")]
#[command(long_about = None)]
struct Args {
    /// Launcher file with `[shared]` and `[target]` sections.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let file = args
        .config
        .as_deref()
        .map(LauncherFile::load_validated)
        .transpose();

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        match &file {
            Ok(Some(file)) => file.shared.log_level,
            _ => LogLevel::default(),
        }
    };
    let dispatch = build_dispatch(
        LogOptions {
            level,
            json: args.json,
            ansi: io::stderr().is_terminal(),
        },
        io::stderr,
    );

    let code = tracing::dispatcher::with_default(&dispatch, || {
        let file = match file {
            Ok(file) => file.unwrap_or_default(),
            Err(e) => {
                error!("Failed to load launcher config: {}", e);
                return EXIT_FAILURE;
            }
        };

        info_span!("launcher", service = %file.shared.service_name).in_scope(|| {
            info!("Cognee launcher v{} starting...", env!("CARGO_PKG_VERSION"));
            cognee_launcher::run(|name| std::env::var(name), &file.target, &mut SystemSpawner)
        })
    });

    std::process::exit(code);
}
