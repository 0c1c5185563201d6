//! Two-stage launch with fallback.

use cognee::config::{ConfigError, TargetConfig};
use cognee::consts::{EXIT_FAILURE, EXIT_SUCCESS};
use cognee::launch::LaunchConfig;
use cognee::spawn::{Invocation, SpawnError, Spawner, Strategy};
use std::env::VarError;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Terminal launcher failures.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Environment or file configuration is missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A strategy failed in a way that does not permit fallback.
    #[error("Failed to start Cognee MCP server ({strategy} strategy): {source}")]
    Failed {
        strategy: Strategy,
        source: SpawnError,
    },
}

/// Validated launch parameters plus the targets to try.
#[derive(Debug, Clone)]
pub struct Launcher {
    config: LaunchConfig,
    target: TargetConfig,
}

impl Launcher {
    pub fn new(config: LaunchConfig, target: TargetConfig) -> Self {
        Self { config, target }
    }

    /// Resolve the environment through `lookup` and build a launcher.
    pub fn from_lookup<F>(lookup: F, target: TargetConfig) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Result<String, VarError>,
    {
        Ok(Self::new(LaunchConfig::from_lookup(lookup)?, target))
    }

    /// Run strategy A, and strategy B only if A's target is unavailable.
    ///
    /// Blocks until the last child exits. Returns the strategy whose child
    /// exited successfully.
    pub fn start<S: Spawner>(&self, spawner: &mut S) -> Result<Strategy, LaunchError> {
        info!("Starting Cognee MCP server");
        info!("Transport: {}", self.config.transport);
        info!("Host: {}", self.config.host);
        info!("Port: {}", self.config.port);
        info!("Path: {}", self.config.path);
        debug!(provider = %self.config.provider, "LLM provider configured");

        let primary = Invocation::module(&self.target, &self.config);
        match attempt(spawner, &primary) {
            Ok(()) => return Ok(Strategy::Module),
            Err(e) if e.is_unavailable() => {
                warn!("Module invocation unavailable: {}", e);
                info!("Attempting alternative startup method...");
            }
            Err(source) => {
                return Err(LaunchError::Failed {
                    strategy: Strategy::Module,
                    source,
                });
            }
        }

        let fallback = Invocation::command(&self.target, &self.config);
        attempt(spawner, &fallback)
            .map(|()| Strategy::Command)
            .map_err(|source| LaunchError::Failed {
                strategy: Strategy::Command,
                source,
            })
    }
}

fn attempt<S: Spawner>(spawner: &mut S, invocation: &Invocation) -> Result<(), SpawnError> {
    info!("Executing: {}", invocation);
    spawner.run(invocation)
}

/// Resolve configuration, launch, and map the outcome to an exit status.
///
/// Configuration errors are reported before any child is spawned.
pub fn run<F, S>(lookup: F, target: &TargetConfig, spawner: &mut S) -> i32
where
    F: FnMut(&str) -> Result<String, VarError>,
    S: Spawner,
{
    let outcome = Launcher::from_lookup(lookup, target.clone())
        .map_err(LaunchError::from)
        .and_then(|launcher| launcher.start(spawner));

    match outcome {
        Ok(strategy) => {
            info!("Cognee MCP server exited cleanly ({strategy} strategy)");
            EXIT_SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cognee::spawn::ChildStatus;
    use std::collections::VecDeque;

    /// Replays canned results and records every invocation.
    #[derive(Default)]
    struct Replay {
        results: VecDeque<Result<(), SpawnError>>,
        seen: Vec<Invocation>,
    }

    impl Spawner for Replay {
        fn run(&mut self, invocation: &Invocation) -> Result<(), SpawnError> {
            self.seen.push(invocation.clone());
            self.results.pop_front().unwrap_or(Ok(()))
        }
    }

    fn launcher() -> Launcher {
        Launcher::from_lookup(
            |name| match name {
                "COGNEE_LLM_PROVIDER" => Ok("openai".to_string()),
                _ => Err(VarError::NotPresent),
            },
            TargetConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_fallback_error_names_command_strategy() {
        let mut spawner = Replay {
            results: VecDeque::from([
                Err(SpawnError::Unavailable {
                    program: "python".to_string(),
                    reason: "not found".to_string(),
                }),
                Err(SpawnError::Exited {
                    program: "cognee-mcp".to_string(),
                    status: ChildStatus::Code(3),
                }),
            ]),
            seen: Vec::new(),
        };

        let err = launcher().start(&mut spawner).unwrap_err();
        assert!(matches!(
            err,
            LaunchError::Failed {
                strategy: Strategy::Command,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Failed to start Cognee MCP server (command strategy): \
             cognee-mcp exited with exit code 3"
        );
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err = LaunchError::from(ConfigError::MissingVariables(vec!["COGNEE_LLM_PROVIDER"]));
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: COGNEE_LLM_PROVIDER"
        );
    }

    #[test]
    fn test_io_error_on_primary_is_terminal() {
        let mut spawner = Replay {
            results: VecDeque::from([Err(SpawnError::Io {
                program: "python".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })]),
            seen: Vec::new(),
        };
        assert!(launcher().start(&mut spawner).is_err());
        assert_eq!(spawner.seen.len(), 1);
    }
}
