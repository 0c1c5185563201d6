//! Prelude module for common re-exports.
//!
//! ```rust
//! use cognee_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    ConfigError, ConfigLoader, LauncherFile, LogLevel, SharedConfig, TargetConfig,
};
pub use crate::launch::LaunchConfig;

// ─── Constants ──────────────────────────────────────────────────────
pub use crate::consts::{EXIT_FAILURE, EXIT_SUCCESS};

// ─── Spawning ───────────────────────────────────────────────────────
pub use crate::spawn::{ChildStatus, Invocation, SpawnError, Spawner, Strategy};
