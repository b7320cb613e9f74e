//! # Structured Logging
//!
//! Diagnostics for `ledger-cli` go to stderr through `tracing`. Stdout is
//! reserved for command results (keys, signatures, decoded JSON) so they
//! can be piped into other tools untouched.
//!
//! The filter comes from `LEDGER_LOG`, then `RUST_LOG`, then
//! [`DEFAULT_DIRECTIVES`]. The library is quiet by default; raise it with
//! e.g. `LEDGER_LOG=ledger_base=debug` to see every operation built or
//! decoded.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `LEDGER_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_DIRECTIVES: &str = "ledger_cli=info,ledger_base=warn";

/// Tool-specific filter variable, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "LEDGER_LOG";

/// How diagnostics are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Single human-readable line per event, without source locations.
    Pretty,
    /// One JSON object per event, for scripts wrapping the tool.
    Json,
}

/// First source that parses as a filter, else [`DEFAULT_DIRECTIVES`].
/// Unparsable sources are skipped.
fn resolve_filter(sources: &[Option<String>]) -> EnvFilter {
    sources
        .iter()
        .flatten()
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber. Call once, before any command runs.
pub fn init_logging(format: LogFormat) {
    let filter = resolve_filter(&[
        std::env::var(LOG_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    ]);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(false),
            )
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true))
            .init(),
    }

    tracing::debug!(?format, "logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_are_case_insensitive() {
        assert_eq!(LogFormat::from_str("JSON", true), Ok(LogFormat::Json));
        assert_eq!(LogFormat::from_str("pretty", true), Ok(LogFormat::Pretty));
        assert!(LogFormat::from_str("xml", true).is_err());
    }

    #[test]
    fn falls_back_to_default_directives() {
        let filter = resolve_filter(&[None, None]);
        assert_eq!(filter.to_string(), EnvFilter::new(DEFAULT_DIRECTIVES).to_string());
    }

    #[test]
    fn tool_variable_wins_over_rust_log() {
        let filter = resolve_filter(&[
            Some("ledger_base=debug".to_string()),
            Some("trace".to_string()),
        ]);
        assert_eq!(filter.to_string(), "ledger_base=debug");
    }

    #[test]
    fn unparsable_directives_are_skipped() {
        let filter = resolve_filter(&[Some("ledger_base=loud".to_string()), Some("warn".to_string())]);
        assert_eq!(filter.to_string(), "warn");
    }
}
