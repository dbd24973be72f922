//! Launch argument declarations and configuration references

use serde::Serialize;

/// A user-overridable launch argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclareLaunchArgument {
    /// Argument name, as used in `name:=value` overrides
    pub name: String,
    /// Value used when the invoking environment does not override it
    pub default_value: String,
    /// One-line help text
    pub description: String,
}

impl DeclareLaunchArgument {
    /// Declare an argument with its default and help text
    pub fn new(
        name: impl Into<String>,
        default_value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            default_value: default_value.into(),
            description: description.into(),
        }
    }

    /// A reference to this argument's value, falling back to its default
    pub fn configuration(&self) -> LaunchConfiguration {
        LaunchConfiguration::new(&self.name).with_default(&self.default_value)
    }
}

/// Deferred reference to a launch configuration value
///
/// Resolved by whoever executes the description, not at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchConfiguration {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl LaunchConfiguration {
    /// Reference a configuration without a fallback value
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// Value used when the configuration is not set
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Frontend spelling of this reference, e.g. `$(var format)`
    pub fn to_substitution(&self) -> String {
        format!("$(var {})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_keeps_default() {
        let arg = DeclareLaunchArgument::new("format", "", "pixel format");
        let config = arg.configuration();
        assert_eq!(config.name, "format");
        assert_eq!(config.default.as_deref(), Some(""));
    }

    #[test]
    fn test_substitution_spelling() {
        assert_eq!(LaunchConfiguration::new("cam_dn").to_substitution(), "$(var cam_dn)");
    }
}
