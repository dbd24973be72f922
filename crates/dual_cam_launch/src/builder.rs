//! Launch description for the down and front cameras plus an optional viewer

use crate::ament::ResourceIndex;
use crate::description::{
    ComposableNode, ComposableNodeContainer, DeclareLaunchArgument, LaunchConfiguration,
    LaunchDescription, LaunchEntity,
};

pub const CAM_DN_ARG: &str = "cam_dn";
pub const CAM_FR_ARG: &str = "cam_fr";
pub const FORMAT_ARG: &str = "format";

pub const CAMERA_PACKAGE: &str = "camera_ros";
pub const CAMERA_PLUGIN: &str = "camera::CameraNode";
pub const VIEWER_PACKAGE: &str = "image_view";
pub const VIEWER_PLUGIN: &str = "image_view::ImageViewNode";

pub const CONTAINER_NAME: &str = "camera_container";
pub const CONTAINER_PACKAGE: &str = "rclcpp_components";
pub const CONTAINER_EXECUTABLE: &str = "component_container";

pub const IMAGE_WIDTH: i64 = 640;
pub const IMAGE_HEIGHT: i64 = 480;

/// Generic output topic of the camera driver
pub const CAMERA_TOPIC: &str = "camera";
pub const DOWN_CAMERA_TOPIC: &str = "cam_dn";
pub const FRONT_CAMERA_TOPIC: &str = "cam_fr";

/// Viewer input topic and the raw image stream it is pointed at
pub const VIEWER_INPUT_TOPIC: &str = "/image";
pub const VIEWER_SOURCE_TOPIC: &str = "/camera/image_raw";

/// Which physical camera a driver instance talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraRole {
    Down,
    Front,
}

impl CameraRole {
    /// Camera index passed to the driver
    pub fn index(self) -> i64 {
        match self {
            CameraRole::Down => 0,
            CameraRole::Front => 1,
        }
    }

    /// Topic the driver's output is remapped to
    pub fn topic(self) -> &'static str {
        match self {
            CameraRole::Down => DOWN_CAMERA_TOPIC,
            CameraRole::Front => FRONT_CAMERA_TOPIC,
        }
    }
}

/// The three overridable arguments, in declaration order
pub fn launch_arguments() -> [DeclareLaunchArgument; 3] {
    [
        DeclareLaunchArgument::new(CAM_DN_ARG, "0", "down camera ID or name"),
        DeclareLaunchArgument::new(CAM_FR_ARG, "0", "front camera ID or name"),
        DeclareLaunchArgument::new(FORMAT_ARG, "", "pixel format"),
    ]
}

/// Camera driver at fixed 640x480, sharing the pixel format override
pub fn camera_node(role: CameraRole, format: &LaunchConfiguration) -> ComposableNode {
    ComposableNode::new(CAMERA_PACKAGE, CAMERA_PLUGIN)
        .with_parameter("camera", role.index())
        .with_parameter("width", IMAGE_WIDTH)
        .with_parameter("height", IMAGE_HEIGHT)
        .with_parameter("format", format.clone())
        .with_remapping(CAMERA_TOPIC, role.topic())
        .with_intra_process_comms()
}

/// Image viewer showing the down camera's raw stream
pub fn viewer_node() -> ComposableNode {
    ComposableNode::new(VIEWER_PACKAGE, VIEWER_PLUGIN)
        .with_remapping(VIEWER_INPUT_TOPIC, VIEWER_SOURCE_TOPIC)
        .with_intra_process_comms()
}

/// Build the full launch description
///
/// The viewer is appended only when `image_view` is installed; otherwise it
/// is skipped without error.
pub fn generate_launch_description(index: &impl ResourceIndex) -> LaunchDescription {
    let [cam_dn, cam_fr, format] = launch_arguments();
    let format_config = format.configuration();

    let mut nodes = vec![
        camera_node(CameraRole::Down, &format_config),
        camera_node(CameraRole::Front, &format_config),
    ];

    if index.has_package(VIEWER_PACKAGE) {
        nodes.push(viewer_node());
    } else {
        log::debug!("{} not installed, skipping viewer", VIEWER_PACKAGE);
    }

    let container =
        ComposableNodeContainer::new(CONTAINER_NAME, "", CONTAINER_PACKAGE, CONTAINER_EXECUTABLE)
            .with_nodes(nodes);

    LaunchDescription::new(vec![
        LaunchEntity::Container(container),
        LaunchEntity::Argument(cam_dn),
        LaunchEntity::Argument(cam_fr),
        LaunchEntity::Argument(format),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ament::StaticIndex;
    use crate::description::ParameterValue;

    fn container(description: &LaunchDescription) -> &ComposableNodeContainer {
        description.containers().next().unwrap()
    }

    #[test]
    fn test_without_viewer() {
        let description = generate_launch_description(&StaticIndex::new());
        let nodes = &container(&description).composable_node_descriptions;
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|n| n.package == CAMERA_PACKAGE));
    }

    #[test]
    fn test_with_viewer() {
        let index = StaticIndex::new().with_package(VIEWER_PACKAGE);
        let description = generate_launch_description(&index);
        let nodes = &container(&description).composable_node_descriptions;
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[2].plugin, VIEWER_PLUGIN);
        assert_eq!(nodes[2].remapped("/image"), Some("/camera/image_raw"));
        assert!(nodes[2].parameters.is_empty());
        assert!(nodes[2].uses_intra_process_comms());
    }

    #[test]
    fn test_cameras_differ_only_in_index_and_topic() {
        let description = generate_launch_description(&StaticIndex::new());
        let nodes = &container(&description).composable_node_descriptions;
        let (down, front) = (&nodes[0], &nodes[1]);

        assert_eq!(down.parameters["camera"], ParameterValue::Integer(0));
        assert_eq!(front.parameters["camera"], ParameterValue::Integer(1));
        assert_eq!(down.remapped("camera"), Some("cam_dn"));
        assert_eq!(front.remapped("camera"), Some("cam_fr"));

        let mut front_as_down = front.clone();
        front_as_down
            .parameters
            .insert("camera".to_string(), ParameterValue::Integer(0));
        front_as_down.remappings = down.remappings.clone();
        assert_eq!(&front_as_down, down);
    }

    #[test]
    fn test_container_settings() {
        let description = generate_launch_description(&StaticIndex::new());
        let container = container(&description);
        assert_eq!(container.name, "camera_container");
        assert_eq!(container.namespace, "");
        assert_eq!(container.package, "rclcpp_components");
        assert_eq!(container.executable, "component_container");
    }

    #[test]
    fn test_format_is_deferred() {
        let description = generate_launch_description(&StaticIndex::new());
        let down = &container(&description).composable_node_descriptions[0];
        assert_eq!(
            down.parameters["format"],
            ParameterValue::Configuration(LaunchConfiguration::new("format").with_default(""))
        );
    }
}
