//! Tracing subscriber initialisation.
//!
//! `libris-core` only *emits* spans and events; an embedding application
//! calls [`init_logging`] once to decide where they go.
//!
//! # Verbosity mapping
//!
//! | Setting        | Filter level |
//! |----------------|--------------|
//! | `verbose = 0`  | WARN         |
//! | `verbose = 1`  | INFO         |
//! | `verbose = 2`  | DEBUG        |
//! | `verbose >= 3` | TRACE        |
//! | `quiet = true` | ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// How much to log and in which shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub verbose: u8,
    pub quiet: bool,
    /// One JSON object per event instead of human-readable lines.
    pub json: bool,
    pub no_color: bool,
}

/// Initialise the global tracing subscriber.
///
/// Returns an error if a subscriber is already registered in this process.
pub fn init_logging(settings: &LogSettings) -> anyhow::Result<()> {
    let level = derive_level(settings);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("libris_core={level},libris_adapters={level}"))
    });

    let use_ansi = !settings.no_color && !settings.json && std::io::stderr().is_terminal();

    let text_layer = (!settings.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(use_ansi)
            .with_writer(std::io::stderr)
    });

    let json_layer = settings.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

/// Translate the verbosity counter + quiet flag to a level string.
fn derive_level(settings: &LogSettings) -> &'static str {
    if settings.quiet {
        return "error";
    }
    match settings.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(verbose: u8, quiet: bool) -> LogSettings {
        LogSettings {
            verbose,
            quiet,
            ..LogSettings::default()
        }
    }

    #[test]
    fn level_default() {
        assert_eq!(derive_level(&settings(0, false)), "warn");
    }

    #[test]
    fn level_steps_with_verbosity() {
        assert_eq!(derive_level(&settings(1, false)), "info");
        assert_eq!(derive_level(&settings(2, false)), "debug");
        assert_eq!(derive_level(&settings(3, false)), "trace");
        assert_eq!(derive_level(&settings(10, false)), "trace");
    }

    // quiet takes precedence over verbose
    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(derive_level(&settings(3, true)), "error");
    }

    #[test]
    fn second_init_is_an_error_not_a_panic() {
        let settings = LogSettings {
            json: true,
            ..LogSettings::default()
        };
        let _ = init_logging(&settings);
        assert!(init_logging(&settings).is_err());
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let parsed: LogSettings = serde_json::from_str(r#"{ "verbose": 2 }"#).unwrap();
        assert_eq!(parsed, settings(2, false));
    }
}
