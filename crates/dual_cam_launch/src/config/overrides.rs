//! Launch argument overrides from the command line and from YAML files

use indexmap::IndexMap;
use serde_yaml::Value;
use std::path::Path;

/// Argument overrides in the order they were given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentOverrides {
    values: IndexMap<String, String>,
}

impl ArgumentOverrides {
    /// Create an empty set of overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from a YAML mapping of argument name to scalar value
    ///
    /// ```yaml
    /// cam_dn: "/base/axi/pcie@120000/rp1/i2c@88000/imx708@1a"
    /// format: YUYV
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OverrideError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| OverrideError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse overrides from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, OverrideError> {
        let mapping: IndexMap<String, Value> = serde_yaml::from_str(content)?;
        let mut overrides = Self::new();

        for (name, value) in mapping {
            let value = match value {
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Null => String::new(),
                _ => {
                    return Err(OverrideError::Validation(format!(
                        "Argument '{}' must be a scalar value",
                        name
                    )));
                }
            };
            overrides.set(name, value);
        }

        Ok(overrides)
    }

    /// Set an override, replacing any earlier value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Get the override for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Apply `other` on top of these overrides; later values win
    pub fn merge(mut self, other: ArgumentOverrides) -> Self {
        self.values.extend(other.values);
        self
    }

    /// Iterate overrides in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for ArgumentOverrides {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Parse argument override in format "key:=value"
pub fn parse_arg_override(s: &str) -> Result<(String, String), String> {
    match s.split_once(":=") {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!(
            "Invalid argument format '{}'. Expected 'key:=value'",
            s
        )),
    }
}

/// Errors that can occur when loading overrides
#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error("Failed to read params file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse params file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}
