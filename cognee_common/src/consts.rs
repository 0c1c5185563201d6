//! Launcher-wide constants.
//!
//! Single source of truth for environment variable names, defaults and
//! exit codes. Imported by all crates — no duplication permitted.

/// Transport mode handed to the server (`--transport`).
pub const ENV_TRANSPORT: &str = "TRANSPORT_MODE";

/// Bind host handed to the server (`--host`).
pub const ENV_HOST: &str = "COGNEE_HOST";

/// Bind port handed to the server (`--port`).
pub const ENV_PORT: &str = "COGNEE_PORT";

/// Route prefix handed to the server (`--path`).
pub const ENV_PATH: &str = "COGNEE_PATH";

/// LLM provider. Required, presence-checked only.
pub const ENV_LLM_PROVIDER: &str = "COGNEE_LLM_PROVIDER";

/// Variables that must be set and non-empty before any launch attempt.
pub const REQUIRED_VARS: &[&str] = &[ENV_LLM_PROVIDER];

pub const DEFAULT_TRANSPORT: &str = "http";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_PATH: &str = "/mcp";

/// Interpreter used for the module-style invocation.
pub const DEFAULT_INTERPRETER: &str = "python";

/// Module run with `<interpreter> -m`.
pub const DEFAULT_MODULE: &str = "cognee_mcp.server";

/// Flat command used when the module is unavailable.
pub const DEFAULT_COMMAND: &str = "cognee-mcp";

/// Default `service_name` reported in logs.
pub const DEFAULT_SERVICE_NAME: &str = "cognee-mcp";

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
