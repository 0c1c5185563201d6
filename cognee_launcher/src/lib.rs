//! # Cognee MCP Launcher
//!
//! Starts the Cognee MCP server as a child process. The module-style
//! invocation (`python -m cognee_mcp.server`) is tried first; if that target
//! is unavailable the flat `cognee-mcp` command is tried once. Every other
//! failure is terminal.
//!
//! - [`launcher`] - Two-stage launch with fallback
//! - [`process`] - `std::process` backed [`Spawner`](cognee::spawn::Spawner)
//! - [`logging`] - tracing subscriber construction

pub mod launcher;
pub mod logging;
pub mod process;

pub use launcher::{LaunchError, Launcher, run};
