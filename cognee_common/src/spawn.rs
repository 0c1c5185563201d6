//! # Spawner Contract
//!
//! Defines how the launcher hands a resolved command line to the operating
//! system. The `cognee_launcher` crate implements [`Spawner`] on top of
//! `std::process`; tests substitute scripted implementations.
//!
//! # Design
//!
//! A spawn attempt either succeeds (child exited 0) or fails with a
//! [`SpawnError`]. Only [`SpawnError::Unavailable`] allows the launcher to
//! move on to the next strategy.

use crate::config::TargetConfig;
use crate::launch::LaunchConfig;
use std::fmt;

/// Identifies one of the two ways of starting the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Strategy A: `<interpreter> -m <module> ...`.
    Module,
    /// Strategy B: `<command> ...`.
    Command,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Module => f.write_str("module"),
            Strategy::Command => f.write_str("command"),
        }
    }
}

/// A fully resolved child command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub strategy: Strategy,
    pub program: String,
    pub args: Vec<String>,
    /// Module name for [`Strategy::Module`]; used to recognise
    /// "module not found" diagnostics from the interpreter.
    pub module: Option<String>,
}

impl Invocation {
    /// Strategy A for `config`.
    pub fn module(target: &TargetConfig, config: &LaunchConfig) -> Self {
        let mut args = vec!["-m".to_string(), target.module.clone()];
        args.extend(config.server_args());
        Self {
            strategy: Strategy::Module,
            program: target.interpreter.clone(),
            args,
            module: Some(target.module.clone()),
        }
    }

    /// Strategy B for `config`.
    pub fn command(target: &TargetConfig, config: &LaunchConfig) -> Self {
        Self {
            strategy: Strategy::Command,
            program: target.command.clone(),
            args: config.server_args(),
            module: None,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a failed child terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildStatus {
    /// Exited with a non-zero code.
    Code(i32),
    /// Killed by a signal.
    Signal {
        number: i32,
        /// Symbolic name (`SIGTERM`) when the platform knows it.
        name: Option<&'static str>,
    },
    /// Neither code nor signal is available.
    Unknown,
}

impl fmt::Display for ChildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildStatus::Code(code) => write!(f, "exit code {code}"),
            ChildStatus::Signal {
                number,
                name: Some(name),
            } => write!(f, "signal {number} ({name})"),
            ChildStatus::Signal { number, name: None } => write!(f, "signal {number}"),
            ChildStatus::Unknown => f.write_str("unknown status"),
        }
    }
}

/// Error type for a single spawn attempt.
#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    /// The invocation target does not exist (program not on `PATH`,
    /// module not importable).
    #[error("{program} unavailable: {reason}")]
    Unavailable { program: String, reason: String },

    /// The child ran and exited unsuccessfully.
    #[error("{program} exited with {status}")]
    Exited { program: String, status: ChildStatus },

    /// Spawning or waiting failed for any other reason.
    #[error("failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl SpawnError {
    /// `true` for the only class of failure that permits a fallback.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, SpawnError::Unavailable { .. })
    }
}

/// Runs one invocation to completion.
///
/// Implementations block until the child exits; there is no timeout and
/// no cancellation.
pub trait Spawner {
    /// Spawn `invocation` and wait for it.
    ///
    /// Returns `Ok(())` only when the child exited with status 0.
    fn run(&mut self, invocation: &Invocation) -> Result<(), SpawnError>;
}
