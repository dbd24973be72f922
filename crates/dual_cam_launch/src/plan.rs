//! Launch plan - a launch description with every configuration resolved
//!
//! This is what the external launch engine would hand to the component
//! container, computed without starting anything (dry-run).

use crate::config::{ArgumentOverrides, SubstitutionContext, SubstitutionError};
use crate::description::{ComposableNode, ComposableNodeContainer, LaunchDescription, ParameterValue};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A concrete parameter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedValue {
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedValue::Bool(b) => write!(f, "{}", b),
            ResolvedValue::Integer(i) => write!(f, "{}", i),
            ResolvedValue::Double(d) => write!(f, "{}", d),
            ResolvedValue::String(s) => write!(f, "{:?}", s),
        }
    }
}

/// Launch plan for dry-run mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchPlan {
    /// Final argument values in declaration order
    pub arguments: IndexMap<String, String>,
    pub containers: Vec<PlannedContainer>,
}

/// A container in the launch plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedContainer {
    pub name: String,
    pub namespace: String,
    pub package: String,
    pub executable: String,
    pub nodes: Vec<PlannedNode>,
}

/// A composable node in the launch plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedNode {
    pub package: String,
    pub plugin: String,
    pub name: String,
    pub parameters: IndexMap<String, ResolvedValue>,
    pub remappings: Vec<(String, String)>,
    pub extra_arguments: IndexMap<String, ResolvedValue>,
}

impl LaunchPlan {
    /// Resolve `description` against `overrides`
    ///
    /// `ctx` supplies environment overrides and the resource index; its
    /// launch configurations are replaced by the declared arguments.
    pub fn resolve(
        description: &LaunchDescription,
        overrides: &ArgumentOverrides,
        mut ctx: SubstitutionContext<'_>,
    ) -> Result<Self, PlanError> {
        let mut arguments = IndexMap::new();
        ctx.configurations.clear();

        for arg in description.arguments() {
            arguments.insert(arg.name.clone(), arg.default_value.clone());
            ctx.configurations
                .insert(arg.name.clone(), arg.default_value.clone());
        }

        for (name, value) in overrides.iter() {
            if !arguments.contains_key(name) {
                return Err(PlanError::UnknownArgument(name.to_string()));
            }
            let resolved = ctx
                .substitute(value)
                .map_err(|e| PlanError::SubstitutionFailed {
                    context: format!("argument '{}'", name),
                    source: e,
                })?;
            log::debug!("Argument {} := {}", name, resolved);
            arguments.insert(name.to_string(), resolved.clone());
            ctx.configurations.insert(name.to_string(), resolved);
        }

        let containers = description
            .containers()
            .map(|container| Self::plan_container(container, &ctx))
            .collect::<Result<Vec<_>, _>>()?;

        let plan = Self {
            arguments,
            containers,
        };
        log::info!(
            "Launch plan: {} container(s), {} node(s)",
            plan.containers.len(),
            plan.node_count()
        );
        Ok(plan)
    }

    fn plan_container(
        container: &ComposableNodeContainer,
        ctx: &SubstitutionContext<'_>,
    ) -> Result<PlannedContainer, PlanError> {
        let nodes = container
            .composable_node_descriptions
            .iter()
            .map(|node| Self::plan_node(node, ctx))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PlannedContainer {
            name: container.name.clone(),
            namespace: container.namespace.clone(),
            package: container.package.clone(),
            executable: container.executable.clone(),
            nodes,
        })
    }

    fn plan_node(
        node: &ComposableNode,
        ctx: &SubstitutionContext<'_>,
    ) -> Result<PlannedNode, PlanError> {
        let resolve_all = |values: &IndexMap<String, ParameterValue>| {
            values
                .iter()
                .map(|(name, value)| -> Result<_, PlanError> {
                    Ok((name.clone(), resolve_value(node, name, value, ctx)?))
                })
                .collect::<Result<IndexMap<_, _>, _>>()
        };

        Ok(PlannedNode {
            package: node.package.clone(),
            plugin: node.plugin.clone(),
            name: node.node_name().to_string(),
            parameters: resolve_all(&node.parameters)?,
            remappings: node.remappings.clone(),
            extra_arguments: resolve_all(&node.extra_arguments)?,
        })
    }

    /// Total nodes across all containers
    pub fn node_count(&self) -> usize {
        self.containers.iter().map(|c| c.nodes.len()).sum()
    }

    /// Serialize the plan as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn resolve_value(
    node: &ComposableNode,
    name: &str,
    value: &ParameterValue,
    ctx: &SubstitutionContext<'_>,
) -> Result<ResolvedValue, PlanError> {
    Ok(match value {
        ParameterValue::Bool(b) => ResolvedValue::Bool(*b),
        ParameterValue::Integer(i) => ResolvedValue::Integer(*i),
        ParameterValue::Double(d) => ResolvedValue::Double(*d),
        ParameterValue::String(s) => ResolvedValue::String(s.clone()),
        ParameterValue::Configuration(config) => {
            let resolved = ctx
                .configurations
                .get(&config.name)
                .or(config.default.as_ref())
                .ok_or_else(|| PlanError::UndefinedConfiguration {
                    node: node.plugin.clone(),
                    parameter: name.to_string(),
                    configuration: config.name.clone(),
                })?;
            ResolvedValue::String(resolved.clone())
        }
    })
}

/// Errors that can occur while resolving a launch plan
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),

    #[error("Substitution failed in {context}: {source}")]
    SubstitutionFailed {
        context: String,
        #[source]
        source: SubstitutionError,
    },

    #[error("Parameter '{parameter}' of '{node}' refers to undefined launch configuration '{configuration}'")]
    UndefinedConfiguration {
        node: String,
        parameter: String,
        configuration: String,
    },
}

/// Display the launch plan in a human-readable format
impl fmt::Display for LaunchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Launch Plan")?;
        writeln!(f, "===========")?;
        writeln!(f)?;

        if !self.arguments.is_empty() {
            writeln!(f, "Arguments:")?;
            for (key, value) in &self.arguments {
                writeln!(f, "  {}: {:?}", key, value)?;
            }
            writeln!(f)?;
        }

        for container in &self.containers {
            let namespace = if container.namespace.is_empty() {
                "/"
            } else {
                container.namespace.as_str()
            };
            writeln!(
                f,
                "Container: {} (namespace {}) [{} {}]",
                container.name, namespace, container.package, container.executable
            )?;

            for (i, node) in container.nodes.iter().enumerate() {
                writeln!(f)?;
                writeln!(
                    f,
                    "  {}. {} ({}) [{}]",
                    i + 1,
                    node.name,
                    node.plugin,
                    node.package
                )?;

                if !node.parameters.is_empty() {
                    writeln!(f, "     Parameters:")?;
                    for (key, value) in &node.parameters {
                        writeln!(f, "       {}: {}", key, value)?;
                    }
                }

                if !node.remappings.is_empty() {
                    writeln!(f, "     Remappings:")?;
                    for (from, to) in &node.remappings {
                        writeln!(f, "       {} -> {}", from, to)?;
                    }
                }

                if !node.extra_arguments.is_empty() {
                    writeln!(f, "     Extra arguments:")?;
                    for (key, value) in &node.extra_arguments {
                        writeln!(f, "       {}: {}", key, value)?;
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ament::StaticIndex;
    use crate::builder::generate_launch_description;
    use crate::description::{DeclareLaunchArgument, LaunchConfiguration, LaunchEntity};

    fn overrides(pairs: &[(&str, &str)]) -> ArgumentOverrides {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let description = generate_launch_description(&StaticIndex::new());
        let plan = LaunchPlan::resolve(
            &description,
            &ArgumentOverrides::new(),
            SubstitutionContext::new(),
        )
        .unwrap();

        assert_eq!(plan.arguments["cam_dn"], "0");
        assert_eq!(plan.arguments["cam_fr"], "0");
        assert_eq!(plan.arguments["format"], "");
        assert_eq!(plan.node_count(), 2);
        for node in &plan.containers[0].nodes {
            assert_eq!(node.parameters["format"], ResolvedValue::String(String::new()));
        }
    }

    #[test]
    fn test_format_override_reaches_both_cameras() {
        let description = generate_launch_description(&StaticIndex::new());
        let plan = LaunchPlan::resolve(
            &description,
            &overrides(&[("format", "YUYV")]),
            SubstitutionContext::new(),
        )
        .unwrap();

        for node in &plan.containers[0].nodes {
            assert_eq!(node.parameters["format"], ResolvedValue::String("YUYV".into()));
            assert_eq!(node.parameters["width"], ResolvedValue::Integer(640));
            assert_eq!(node.parameters["height"], ResolvedValue::Integer(480));
            assert_eq!(
                node.extra_arguments["use_intra_process_comms"],
                ResolvedValue::Bool(true)
            );
        }
    }

    #[test]
    fn test_unknown_argument_rejected() {
        let description = generate_launch_description(&StaticIndex::new());
        let result = LaunchPlan::resolve(
            &description,
            &overrides(&[("resolution", "1080p")]),
            SubstitutionContext::new(),
        );
        assert!(matches!(result, Err(PlanError::UnknownArgument(name)) if name == "resolution"));
    }

    #[test]
    fn test_override_substitution() {
        let description = generate_launch_description(&StaticIndex::new());
        let ctx = SubstitutionContext::new().with_env("PIXEL_FORMAT", "MJPEG");
        let plan = LaunchPlan::resolve(
            &description,
            &overrides(&[("format", "$(env PIXEL_FORMAT)")]),
            ctx,
        )
        .unwrap();
        assert_eq!(plan.arguments["format"], "MJPEG");
    }

    #[test]
    fn test_override_substitution_failure() {
        let description = generate_launch_description(&StaticIndex::new());
        let result = LaunchPlan::resolve(
            &description,
            &overrides(&[("format", "$(var missing)")]),
            SubstitutionContext::new(),
        );
        assert!(matches!(result, Err(PlanError::SubstitutionFailed { .. })));
    }

    #[test]
    fn test_undeclared_configuration_without_default() {
        let node = ComposableNode::new("pkg", "pkg::Node")
            .with_parameter("mode", LaunchConfiguration::new("mode"));
        let container = ComposableNodeContainer::new("c", "", "rclcpp_components", "component_container")
            .with_nodes([node]);
        let description = LaunchDescription::new(vec![LaunchEntity::Container(container)]);

        let result = LaunchPlan::resolve(
            &description,
            &ArgumentOverrides::new(),
            SubstitutionContext::new(),
        );
        assert!(matches!(result, Err(PlanError::UndefinedConfiguration { .. })));
    }

    #[test]
    fn test_undeclared_configuration_uses_own_default() {
        let node = ComposableNode::new("pkg", "pkg::Node")
            .with_parameter("mode", LaunchConfiguration::new("mode").with_default("auto"));
        let container = ComposableNodeContainer::new("c", "", "rclcpp_components", "component_container")
            .with_nodes([node]);
        let description = LaunchDescription::new(vec![
            LaunchEntity::Container(container),
            LaunchEntity::Argument(DeclareLaunchArgument::new("other", "x", "unrelated")),
        ]);

        let plan = LaunchPlan::resolve(
            &description,
            &ArgumentOverrides::new(),
            SubstitutionContext::new(),
        )
        .unwrap();
        assert_eq!(
            plan.containers[0].nodes[0].parameters["mode"],
            ResolvedValue::String("auto".into())
        );
    }

    #[test]
    fn test_display_lists_nodes() {
        let index = StaticIndex::new().with_package("image_view");
        let description = generate_launch_description(&index);
        let plan = LaunchPlan::resolve(
            &description,
            &ArgumentOverrides::new(),
            SubstitutionContext::new(),
        )
        .unwrap();

        let text = plan.to_string();
        assert!(text.contains("Container: camera_container (namespace /)"));
        assert!(text.contains("camera -> cam_dn"));
        assert!(text.contains("camera -> cam_fr"));
        assert!(text.contains("/image -> /camera/image_raw"));
        assert!(text.contains("3. image_view (image_view::ImageViewNode) [image_view]"));
    }

    #[test]
    fn test_json_output() {
        let description = generate_launch_description(&StaticIndex::new());
        let plan = LaunchPlan::resolve(
            &description,
            &overrides(&[("format", "YUYV")]),
            SubstitutionContext::new(),
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();
        let nodes = &json["containers"][0]["nodes"];
        assert_eq!(nodes[0]["parameters"]["camera"], 0);
        assert_eq!(nodes[1]["parameters"]["camera"], 1);
        assert_eq!(nodes[1]["parameters"]["format"], "YUYV");
        assert_eq!(nodes[0]["remappings"][0][1], "cam_dn");
    }
}
