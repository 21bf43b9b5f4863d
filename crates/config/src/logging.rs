//! Logging configuration
//!
//! The optional `[log]` table of a pipeline file. `recast run` writes records
//! to stdout, so logs go to stderr unless told otherwise.
//!
//! | level | what recast reports |
//! |-------|---------------------|
//! | `error` | nothing beyond fatal errors |
//! | `warn` | records that failed, expressions naming unknown roots |
//! | `info` | pipeline built, run totals |
//! | `debug` | skipped steps, predicate failures, dropped records |
//! | `trace` | every applied step |

use serde::Deserialize;

/// Verbosity of the `[log]` table
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `EnvFilter` directive for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// How each log event is rendered
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One human-readable line per event
    #[default]
    Console,
    /// One JSON object per event
    Json,
}

/// Where log events are written
///
/// Any string other than `stdout` or `stderr` is a file path, opened for
/// append.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// Shared with `recast run` output
    Stdout,
    #[default]
    Stderr,
    #[serde(untagged)]
    File(String),
}

/// `[log]` table of a pipeline file
///
/// ```toml
/// [log]
/// level = "debug"
/// format = "json"
/// output = "/var/log/recast.log"
/// ```
///
/// Every member is optional; `--log-level` on the command line overrides
/// `level`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Console);
        assert_eq!(config.output, LogOutput::Stderr);
    }

    #[test]
    fn test_deserialize_empty() {
        let config: LogConfig = toml::from_str("").unwrap();
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
level = "debug"
format = "json"
output = "stdout"
"#;
        let config: LogConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.output, LogOutput::Stdout);
    }

    #[test]
    fn test_deserialize_file_output() {
        let config: LogConfig = toml::from_str("output = \"/tmp/recast.log\"").unwrap();
        assert_eq!(config.output, LogOutput::File("/tmp/recast.log".into()));
    }

    #[test]
    fn test_level_directives() {
        let levels: Vec<&str> = [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ]
        .iter()
        .map(LogLevel::as_str)
        .collect();
        assert_eq!(levels, vec!["trace", "debug", "info", "warn", "error"]);
    }

    #[test]
    fn test_unknown_level_rejected() {
        assert!(toml::from_str::<LogConfig>("level = \"verbose\"").is_err());
    }
}
