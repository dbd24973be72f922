//! Composable node descriptors

use super::LaunchConfiguration;
use indexmap::IndexMap;
use serde::Serialize;

/// Extra argument asking the container for zero-copy intra-process delivery
pub const USE_INTRA_PROCESS_COMMS: &str = "use_intra_process_comms";

/// Parameter values accepted by a composable node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    /// Deferred value taken from a launch configuration
    Configuration(LaunchConfiguration),
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Double(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::String(value)
    }
}

impl From<LaunchConfiguration> for ParameterValue {
    fn from(value: LaunchConfiguration) -> Self {
        ParameterValue::Configuration(value)
    }
}

/// Request to instantiate one plugin class inside a component container
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposableNode {
    /// Package providing the plugin
    pub package: String,
    /// Fully-qualified plugin class, e.g. `camera::CameraNode`
    pub plugin: String,
    /// Node name; when unset the plugin keeps its built-in name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Node parameters (ordered map for deterministic output)
    pub parameters: IndexMap<String, ParameterValue>,
    /// Topic remappings as `(from, to)` pairs
    pub remappings: Vec<(String, String)>,
    /// Arguments for the container itself when loading this node
    pub extra_arguments: IndexMap<String, ParameterValue>,
}

impl ComposableNode {
    /// Describe a plugin with no parameters or remappings
    pub fn new(package: impl Into<String>, plugin: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            plugin: plugin.into(),
            name: None,
            parameters: IndexMap::new(),
            remappings: Vec::new(),
            extra_arguments: IndexMap::new(),
        }
    }

    /// Set an explicit node name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add or replace a node parameter
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Add a topic remapping
    pub fn with_remapping(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.remappings.push((from.into(), to.into()));
        self
    }

    /// Add or replace a container-side load argument
    pub fn with_extra_argument(
        mut self,
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Self {
        self.extra_arguments.insert(name.into(), value.into());
        self
    }

    /// Request intra-process communication from the hosting container
    pub fn with_intra_process_comms(self) -> Self {
        self.with_extra_argument(USE_INTRA_PROCESS_COMMS, true)
    }

    /// Whether intra-process communication was requested
    pub fn uses_intra_process_comms(&self) -> bool {
        matches!(
            self.extra_arguments.get(USE_INTRA_PROCESS_COMMS),
            Some(ParameterValue::Bool(true))
        )
    }

    /// Name the node runs under
    ///
    /// Without an explicit name this is the plugin's namespace, which is
    /// the default name of both `camera::CameraNode` (`camera`) and
    /// `image_view::ImageViewNode` (`image_view`).
    pub fn node_name(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None => self
                .plugin
                .split_once("::")
                .map(|(namespace, _)| namespace)
                .unwrap_or(&self.plugin),
        }
    }

    /// Target of the remapping for `from`, if any
    pub fn remapped(&self, from: &str) -> Option<&str> {
        self.remappings
            .iter()
            .find(|(f, _)| f == from)
            .map(|(_, to)| to.as_str())
    }
}
