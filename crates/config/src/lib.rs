//! Recast Configuration
//!
//! Loads a pipeline definition from TOML or JSON into an ordered list of
//! generic step mappings, checking the pipeline-level contract on the way.
//! Typed step parameters are parsed later by the step factories.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse TOML:
//!
//! ```
//! use recast_config::PipelineConfig;
//! use std::str::FromStr;
//!
//! let config = PipelineConfig::from_str("[[steps]]\ntype = \"merge-key-value\"").unwrap();
//! assert_eq!(config.steps.len(), 1);
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [log]
//! level = "debug"
//!
//! [[steps]]
//! type = "drop-fields"
//! fields = ["password"]
//!
//! [[steps]]
//! type = "compute"
//! fields = [
//!   { name = "value.total", expression = "value.price * value.quantity", type = "DOUBLE" },
//! ]
//!
//! [[steps]]
//! type = "drop"
//! when = "value.total == 0"
//! ```
//!
//! The same document as JSON:
//!
//! ```json
//! {"steps": [{"type": "drop-fields", "fields": ["password"], "part": null}]}
//! ```
//!
//! JSON `null` members are treated as absent.

mod error;
mod logging;
mod steps;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel, LogOutput};
pub use steps::{KNOWN_STEP_TYPES, StepInstanceConfig, is_known_step_type};
pub use validation::validate_steps;

/// A validated pipeline definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    /// Steps in execution order
    pub steps: Vec<StepInstanceConfig>,

    /// Logging configuration (`[log]` table)
    pub log: LogConfig,
}

impl PipelineConfig {
    /// Load configuration from a file
    ///
    /// Files ending in `.json` are parsed as JSON, anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, does not parse, or fails
    /// validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_str(&contents)
        }
    }

    /// Parse configuration from a JSON string
    pub fn from_json_str(s: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(s)?;
        Self::from_value(json_to_toml(&json, "config")?)
    }

    /// Build and validate configuration from a generic mapping
    pub fn from_value(value: toml::Value) -> Result<Self> {
        let toml::Value::Table(mut table) = value else {
            return Err(ConfigError::invalid_value(
                "pipeline",
                "config",
                "root",
                "configuration must be a mapping",
            ));
        };

        let raw_steps = match table.remove("steps") {
            None => return Err(ConfigError::missing_field("pipeline", "config", "steps")),
            Some(toml::Value::Array(steps)) => steps,
            Some(other) => {
                return Err(ConfigError::invalid_value(
                    "pipeline",
                    "config",
                    "steps",
                    format!("must be a list, got {}", other.type_str()),
                ));
            }
        };

        let steps = raw_steps
            .iter()
            .enumerate()
            .map(|(index, step)| StepInstanceConfig::from_value(index, step))
            .collect::<Result<Vec<_>>>()?;
        validate_steps(&steps)?;

        let log = match table.remove("log") {
            None => LogConfig::default(),
            Some(log) => log.try_into::<LogConfig>().map_err(|e: toml::de::Error| {
                ConfigError::invalid_value("pipeline", "config", "log", e.to_string())
            })?,
        };

        Ok(Self { steps, log })
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let value: toml::Value = toml::from_str(s)?;
        Self::from_value(value)
    }

    /// Step types in order
    pub fn step_types(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.step_type.as_str()).collect()
    }
}

impl FromStr for PipelineConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Convert JSON into the generic mapping, dropping `null` members
fn json_to_toml(json: &serde_json::Value, at: &str) -> Result<toml::Value> {
    let value = match json {
        serde_json::Value::Null => {
            return Err(ConfigError::invalid_value(
                "pipeline",
                at,
                "value",
                "null is only allowed as a mapping member",
            ));
        }
        serde_json::Value::Bool(b) => toml::Value::Boolean(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => toml::Value::Integer(i),
            None => toml::Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => toml::Value::String(s.clone()),
        serde_json::Value::Array(items) => toml::Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| json_to_toml(item, &format!("{}[{}]", at, i)))
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_json::Value::Object(members) => {
            let mut table = toml::Table::new();
            for (name, member) in members {
                if member.is_null() {
                    continue;
                }
                table.insert(name.clone(), json_to_toml(member, &format!("{}.{}", at, name))?);
            }
            toml::Value::Table(table)
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_minimal_config() {
        let toml = r#"
[[steps]]
type = "drop-fields"
fields = ["a"]
"#;
        let config = PipelineConfig::from_str(toml).unwrap();
        assert_eq!(config.step_types(), vec!["drop-fields"]);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[log]
level = "debug"

[[steps]]
type = "unwrap-key-value"
unwrap-key = true

[[steps]]
type = "compute"
fields = [
  { name = "value.total", expression = "value.a + value.b", type = "INT64" },
]

[[steps]]
type = "drop"
when = "value.total > 10"
"#;
        let config = PipelineConfig::from_str(toml).unwrap();
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(
            config.step_types(),
            vec!["unwrap-key-value", "compute", "drop"]
        );
        assert_eq!(config.steps[0].get_bool("unwrap-key"), Some(true));
        assert_eq!(config.steps[2].when.as_deref(), Some("value.total > 10"));
    }

    #[test]
    fn test_json_config_with_nulls() {
        let json = r#"{
            "steps": [
                {"type": "drop-fields", "fields": ["a"], "part": null, "when": null},
                {"type": "flatten", "delimiter": null}
            ]
        }"#;
        let config = PipelineConfig::from_json_str(json).unwrap();
        assert_eq!(config.steps.len(), 2);
        assert!(!config.steps[0].has("part"));
        assert_eq!(config.steps[0].when, None);
        assert!(!config.steps[1].has("delimiter"));
    }

    #[test]
    fn test_json_null_steps_is_missing() {
        assert!(matches!(
            PipelineConfig::from_json_str(r#"{"steps": null}"#),
            Err(ConfigError::MissingField { field: "steps", .. })
        ));
    }

    #[test]
    fn test_json_null_inside_list() {
        let json = r#"{"steps": [{"type": "drop-fields", "fields": [null]}]}"#;
        assert!(matches!(
            PipelineConfig::from_json_str(json),
            Err(ConfigError::InvalidValue { ref name, .. }) if name == "config.steps[0].fields[0]"
        ));
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(matches!(
            PipelineConfig::from_json_str("{}"),
            Err(ConfigError::MissingField { .. })
        ));
        assert!(matches!(
            PipelineConfig::from_json_str(r#"{"steps": "invalid"}"#),
            Err(ConfigError::InvalidValue { field: "steps", .. })
        ));
        assert!(matches!(
            PipelineConfig::from_json_str(r#"{"steps": []}"#),
            Err(ConfigError::InvalidValue { field: "steps", .. })
        ));
        assert!(matches!(
            PipelineConfig::from_json_str(r#"{"steps": [{}]}"#),
            Err(ConfigError::MissingField { field: "type", .. })
        ));
        assert!(matches!(
            PipelineConfig::from_json_str("[1]"),
            Err(ConfigError::InvalidValue { field: "root", .. })
        ));
    }

    #[test]
    fn test_invalid_log_section() {
        let toml = r#"
log = { level = "loud" }

[[steps]]
type = "drop"
"#;
        assert!(matches!(
            PipelineConfig::from_str(toml),
            Err(ConfigError::InvalidValue { field: "log", .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            PipelineConfig::from_str("invalid { toml"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_from_file_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[[steps]]\ntype = \"merge-key-value\"").unwrap();
        let config = PipelineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.step_types(), vec!["merge-key-value"]);
    }

    #[test]
    fn test_from_file_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"steps": [{{"type": "drop"}}]}}"#).unwrap();
        let config = PipelineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.step_types(), vec!["drop"]);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PipelineConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }
}
