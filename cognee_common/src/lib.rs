//! Cognee Common Library
//!
//! Shared constants, configuration loading and launch contracts for the
//! Cognee MCP launcher workspace.
//!
//! # Module Structure
//!
//! - [`consts`] - Environment variable names, defaults and exit codes
//! - [`config`] - Launcher TOML file, log level and configuration errors
//! - [`launch`] - [`launch::LaunchConfig`] resolved from the environment
//! - [`spawn`] - Invocation model and the [`spawn::Spawner`] contract
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use cognee_common::prelude::*;
//!
//! let config = LaunchConfig::from_lookup(|name| match name {
//!     "COGNEE_LLM_PROVIDER" => Ok("openai".to_string()),
//!     _ => Err(std::env::VarError::NotPresent),
//! })
//! .unwrap();
//! assert_eq!(config.port, 8000);
//! ```

pub mod config;
pub mod consts;
pub mod launch;
pub mod prelude;
pub mod spawn;
