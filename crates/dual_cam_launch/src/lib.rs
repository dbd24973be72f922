//! Dual camera launch description
//!
//! Builds the launch description that runs two `camera_ros` drivers (down and
//! front camera) and, when installed, an `image_view` viewer inside a single
//! `rclcpp_components` container with intra-process communication enabled.
//!
//! The description is plain data for an external launch engine. This crate
//! can also:
//! - resolve it against argument overrides into a [`LaunchPlan`] (dry run)
//! - export it as a ROS 2 YAML launch file with [`frontend::to_yaml`]
//!
//! # Example
//!
//! ```no_run
//! use dual_cam_launch::{generate_launch_description, AmentIndex};
//!
//! let description = generate_launch_description(&AmentIndex::from_env());
//! println!("{}", dual_cam_launch::frontend::to_yaml(&description).unwrap());
//! ```
//!
//! Arguments, all strings:
//!
//! | name | default | description |
//! |---|---|---|
//! | `cam_dn` | `"0"` | down camera ID or name |
//! | `cam_fr` | `"0"` | front camera ID or name |
//! | `format` | `""` | pixel format |

pub mod ament;
pub mod builder;
pub mod cli;
pub mod config;
pub mod description;
pub mod frontend;
pub mod plan;

pub use ament::{AmentIndex, ResourceIndex, StaticIndex};
pub use builder::generate_launch_description;
pub use cli::{LaunchArgs, OutputFormat};
pub use config::{ArgumentOverrides, OverrideError, SubstitutionContext, SubstitutionError};
pub use description::{
    ComposableNode, ComposableNodeContainer, DeclareLaunchArgument, LaunchConfiguration,
    LaunchDescription, LaunchEntity, ParameterValue,
};
pub use frontend::FrontendError;
pub use plan::{LaunchPlan, PlanError, PlannedContainer, PlannedNode, ResolvedValue};
