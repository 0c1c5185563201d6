//! Tracing subscriber construction.
//!
//! The subscriber is returned as a [`Dispatch`] handle so the caller decides
//! its scope (`tracing::dispatcher::with_default`) instead of installing a
//! process-wide default.

use cognee::config::LogLevel;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Output options for the launcher's log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    /// Minimum level; `RUST_LOG` directives are added on top.
    pub level: LogLevel,
    /// Emit JSON objects instead of human-readable lines.
    pub json: bool,
    /// Colorize output.
    pub ansi: bool,
}

/// Build a subscriber writing timestamp, target, level and message.
///
/// Filter directives come from `RUST_LOG`.
pub fn build_dispatch<W>(options: LogOptions, writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    dispatch_with_directives(options, &directives, writer)
}

/// Like [`build_dispatch`], with explicit `EnvFilter` directives in place of
/// `RUST_LOG`. Invalid directives are skipped.
pub fn dispatch_with_directives<W>(options: LogOptions, directives: &str, writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let level: tracing::Level = options.level.into();
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(options.ansi)
        .with_writer(writer);

    if options.json {
        Dispatch::new(builder.json().finish())
    } else {
        Dispatch::new(builder.finish())
    }
}
