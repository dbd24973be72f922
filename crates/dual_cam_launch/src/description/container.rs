//! Component container descriptor

use super::ComposableNode;
use serde::Serialize;

/// Groups composable nodes into one host process
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposableNodeContainer {
    pub name: String,
    /// Empty string means the root namespace of the invoking context
    pub namespace: String,
    /// Package providing the host executable
    pub package: String,
    pub executable: String,
    /// Nodes in load order
    pub composable_node_descriptions: Vec<ComposableNode>,
}

impl ComposableNodeContainer {
    /// Create an empty container
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        package: impl Into<String>,
        executable: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            package: package.into(),
            executable: executable.into(),
            composable_node_descriptions: Vec::new(),
        }
    }

    /// Append nodes in load order
    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = ComposableNode>) -> Self {
        self.composable_node_descriptions.extend(nodes);
        self
    }
}
