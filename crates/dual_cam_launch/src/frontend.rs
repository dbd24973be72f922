//! Export a launch description as a ROS 2 YAML launch file
//!
//! The output can be handed to `ros2 launch` directly. Launch configurations
//! stay unresolved and are written as `$(var name)`.

use crate::description::{
    ComposableNode, ComposableNodeContainer, DeclareLaunchArgument, LaunchDescription,
    LaunchEntity, ParameterValue,
};
use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;

#[derive(Debug, Serialize)]
struct Document<'a> {
    launch: Vec<Entity<'a>>,
}

/// One list item under `launch:`; exactly one field is set
#[derive(Debug, Default, Serialize)]
struct Entity<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    node_container: Option<Container<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    arg: Option<Arg<'a>>,
}

#[derive(Debug, Serialize)]
struct Container<'a> {
    pkg: &'a str,
    exec: &'a str,
    name: &'a str,
    namespace: &'a str,
    composable_node: Vec<Node<'a>>,
}

#[derive(Debug, Serialize)]
struct Node<'a> {
    pkg: &'a str,
    plugin: &'a str,
    /// Required by the ROS frontend parsers
    name: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    param: Vec<NamedValue<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    remap: Vec<Remap<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    extra_arg: Vec<NamedValue<'a>>,
}

#[derive(Debug, Serialize)]
struct NamedValue<'a> {
    name: &'a str,
    value: Value,
}

#[derive(Debug, Serialize)]
struct Remap<'a> {
    from: &'a str,
    to: &'a str,
}

#[derive(Debug, Serialize)]
struct Arg<'a> {
    name: &'a str,
    default: &'a str,
    description: &'a str,
}

fn to_value(value: &ParameterValue) -> Value {
    match value {
        ParameterValue::Bool(b) => Value::Bool(*b),
        ParameterValue::Integer(i) => Value::Number((*i).into()),
        ParameterValue::Double(d) => Value::Number((*d).into()),
        ParameterValue::String(s) => Value::String(s.clone()),
        ParameterValue::Configuration(config) => Value::String(config.to_substitution()),
    }
}

fn named_values(values: &IndexMap<String, ParameterValue>) -> Vec<NamedValue<'_>> {
    values
        .iter()
        .map(|(name, value)| NamedValue {
            name,
            value: to_value(value),
        })
        .collect()
}

fn node(node: &ComposableNode) -> Node<'_> {
    Node {
        pkg: &node.package,
        plugin: &node.plugin,
        name: node.node_name(),
        param: named_values(&node.parameters),
        remap: node
            .remappings
            .iter()
            .map(|(from, to)| Remap { from, to })
            .collect(),
        extra_arg: named_values(&node.extra_arguments),
    }
}

fn container(container: &ComposableNodeContainer) -> Container<'_> {
    Container {
        pkg: &container.package,
        exec: &container.executable,
        name: &container.name,
        namespace: &container.namespace,
        composable_node: container.composable_node_descriptions.iter().map(node).collect(),
    }
}

fn arg(arg: &DeclareLaunchArgument) -> Arg<'_> {
    Arg {
        name: &arg.name,
        default: &arg.default_value,
        description: &arg.description,
    }
}

/// Render `description` as a YAML launch file, preserving entity order
pub fn to_yaml(description: &LaunchDescription) -> Result<String, FrontendError> {
    let launch = description
        .entities
        .iter()
        .map(|entity| match entity {
            LaunchEntity::Container(c) => Entity {
                node_container: Some(container(c)),
                ..Default::default()
            },
            LaunchEntity::Argument(a) => Entity {
                arg: Some(arg(a)),
                ..Default::default()
            },
        })
        .collect();

    Ok(serde_yaml::to_string(&Document { launch })?)
}

/// Errors that can occur when exporting a launch file
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error("Failed to serialize launch file: {0}")]
    Serialize(#[from] serde_yaml::Error),
}
