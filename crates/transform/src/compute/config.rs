//! Compute step configuration

use recast_config::StepInstanceConfig;
use recast_expr::Expression;
use recast_record::FieldType;
use std::fmt;

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

/// Where a computed value is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputeTarget {
    /// A field path inside the key part; empty replaces the whole part
    Key(Vec<String>),
    /// A field path inside the value part; empty replaces the whole part
    Value(Vec<String>),
    /// The `destinationTopic` attribute
    DestinationTopic,
    /// The `messageKey` attribute
    MessageKey,
    /// A record property
    Property(String),
}

impl ComputeTarget {
    /// Parse a target name such as `value.total` or `properties.region`
    pub fn parse(name: &str) -> Result<Self, String> {
        let (root, rest) = match name.split_once('.') {
            Some((root, rest)) => (root, Some(rest)),
            None => (name, None),
        };

        match (root, rest) {
            ("key", None) => Ok(Self::Key(Vec::new())),
            ("value", None) => Ok(Self::Value(Vec::new())),
            ("key", Some(rest)) => field_path(name, rest).map(Self::Key),
            ("value", Some(rest)) => field_path(name, rest).map(Self::Value),
            ("destinationTopic", None) => Ok(Self::DestinationTopic),
            ("messageKey", None) => Ok(Self::MessageKey),
            ("properties", Some(property)) if !property.is_empty() => {
                Ok(Self::Property(property.to_string()))
            }
            _ => Err(format!(
                "invalid target '{}', expected key, value, key.<field>, value.<field>, \
                 destinationTopic, messageKey or properties.<name>",
                name
            )),
        }
    }

    /// Whether this target writes into the key part
    pub fn is_key(&self) -> bool {
        matches!(self, Self::Key(_))
    }
}

impl fmt::Display for ComputeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |root: &str, path: &[String]| {
            if path.is_empty() {
                root.to_string()
            } else {
                format!("{}.{}", root, path.join("."))
            }
        };
        match self {
            Self::Key(path) => f.write_str(&join("key", path)),
            Self::Value(path) => f.write_str(&join("value", path)),
            Self::DestinationTopic => f.write_str("destinationTopic"),
            Self::MessageKey => f.write_str("messageKey"),
            Self::Property(name) => write!(f, "properties.{}", name),
        }
    }
}

fn field_path(name: &str, rest: &str) -> Result<Vec<String>, String> {
    let segments: Vec<String> = rest.split('.').map(str::to_string).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(format!("invalid target '{}': empty field name", name));
    }
    Ok(segments)
}

/// One computed field
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeField {
    /// Target as configured
    pub name: String,
    /// Parsed target
    pub target: ComputeTarget,
    /// Compiled expression
    pub expression: Expression,
    /// Declared type of the result
    pub field_type: FieldType,
    /// Whether the result may be null
    pub optional: bool,
}

impl ComputeField {
    /// Create a computed field, compiling its expression
    pub fn new(name: &str, expression: &str, field_type: FieldType) -> Result<Self, String> {
        let target = ComputeTarget::parse(name)?;
        let compiled = Expression::parse(expression)
            .map_err(|e| format!("invalid expression '{}': {}", expression, e))?;

        Ok(Self {
            name: name.to_string(),
            target,
            expression: compiled,
            field_type,
            optional: false,
        })
    }

    /// Allow a null result
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Parse one entry of the `fields` list
    pub fn from_table(table: &toml::Table) -> Result<Self, String> {
        let name = required_str(table, "name")?;
        let expression = required_str(table, "expression")?;
        let type_name = required_str(table, "type")?;

        let field_type = FieldType::parse_scalar(type_name).ok_or_else(|| {
            format!(
                "'type' must be one of: {}, got '{}'",
                FieldType::SCALAR_NAMES.join(", "),
                type_name
            )
        })?;

        let optional = match table.get("optional") {
            None => false,
            Some(toml::Value::Boolean(b)) => *b,
            Some(other) => {
                return Err(format!("'optional' must be a boolean, got {}", other.type_str()));
            }
        };

        Ok(Self::new(name, expression, field_type)?.with_optional(optional))
    }
}

fn required_str<'a>(table: &'a toml::Table, key: &str) -> Result<&'a str, String> {
    match table.get(key) {
        None => Err(format!("'{}' is required", key)),
        Some(toml::Value::String(s)) if s.is_empty() => Err(format!("'{}' must not be empty", key)),
        Some(toml::Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(format!("'{}' must be a string, got {}", key, other.type_str())),
    }
}

/// Configuration for the compute step
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeConfig {
    /// Fields in evaluation order
    pub fields: Vec<ComputeField>,
}

impl ComputeConfig {
    /// Create a config from computed fields
    pub fn new(fields: Vec<ComputeField>) -> Self {
        Self { fields }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fields.is_empty() {
            return Err("'fields' must not be empty".to_string());
        }
        Ok(())
    }
}

impl TryFrom<&StepInstanceConfig> for ComputeConfig {
    type Error = String;

    fn try_from(config: &StepInstanceConfig) -> Result<Self, Self::Error> {
        let tables = config
            .try_get_table_array("fields")?
            .ok_or_else(|| "'fields' is required".to_string())?;

        let fields = tables
            .into_iter()
            .enumerate()
            .map(|(i, table)| {
                ComputeField::from_table(table).map_err(|e| format!("fields[{}]: {}", i, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let compute_config = ComputeConfig::new(fields);
        compute_config.validate()?;
        Ok(compute_config)
    }
}
