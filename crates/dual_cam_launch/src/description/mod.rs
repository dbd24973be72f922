//! Declarative launch description types
//!
//! These are plain values handed to an external launch engine. Nothing here
//! performs I/O.

mod argument;
mod container;
mod node;

pub use argument::*;
pub use container::*;
pub use node::*;

use serde::Serialize;

/// A top-level launch entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchEntity {
    Container(ComposableNodeContainer),
    Argument(DeclareLaunchArgument),
}

/// Ordered list of launch entities, as returned by a launch file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LaunchDescription {
    pub entities: Vec<LaunchEntity>,
}

impl LaunchDescription {
    /// Wrap entities in the order they should be processed
    pub fn new(entities: Vec<LaunchEntity>) -> Self {
        Self { entities }
    }

    /// Declared arguments in declaration order
    pub fn arguments(&self) -> impl Iterator<Item = &DeclareLaunchArgument> {
        self.entities.iter().filter_map(|entity| match entity {
            LaunchEntity::Argument(arg) => Some(arg),
            _ => None,
        })
    }

    /// Declared containers in order
    pub fn containers(&self) -> impl Iterator<Item = &ComposableNodeContainer> {
        self.entities.iter().filter_map(|entity| match entity {
            LaunchEntity::Container(container) => Some(container),
            _ => None,
        })
    }

    /// Look up a declared argument by name
    pub fn argument(&self, name: &str) -> Option<&DeclareLaunchArgument> {
        self.arguments().find(|arg| arg.name == name)
    }

    /// Dump the unresolved description as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
