//! Ament resource index lookups
//!
//! An installed ROS 2 package registers itself by dropping a marker file at
//! `<prefix>/share/ament_index/resource_index/packages/<name>`. Checking for
//! that file is the only side effect the launch description builder has.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Resource type under which installed packages are registered
pub const PACKAGES: &str = "packages";

/// Environment variable listing install prefixes
pub const AMENT_PREFIX_PATH: &str = "AMENT_PREFIX_PATH";

/// Read-only view of installed resources
pub trait ResourceIndex {
    /// Whether `resource_name` is registered under `resource_type`
    fn has_resource(&self, resource_type: &str, resource_name: &str) -> bool;

    /// Whether `package` is installed
    fn has_package(&self, package: &str) -> bool {
        self.has_resource(PACKAGES, package)
    }

    /// Share directory of `package`, if the index can locate one
    fn package_share(&self, _package: &str) -> Option<PathBuf> {
        None
    }
}

/// Resource index backed by ament install prefixes on disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmentIndex {
    prefixes: Vec<PathBuf>,
}

impl AmentIndex {
    /// Create an index over `prefixes`, searched in order
    pub fn new(prefixes: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            prefixes: prefixes.into_iter().collect(),
        }
    }

    /// Build from `AMENT_PREFIX_PATH`; no prefixes if it is unset
    pub fn from_env() -> Self {
        match std::env::var_os(AMENT_PREFIX_PATH) {
            Some(value) => Self::new(
                std::env::split_paths(&value).filter(|p| !p.as_os_str().is_empty()),
            ),
            None => {
                log::debug!("{} is not set, resource index is empty", AMENT_PREFIX_PATH);
                Self::default()
            }
        }
    }

    /// Search `prefix` before all existing prefixes
    pub fn with_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.prefixes.insert(0, prefix.into());
        self
    }

    /// Install prefixes in search order
    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    fn marker(prefix: &Path, resource_type: &str, resource_name: &str) -> PathBuf {
        prefix
            .join("share")
            .join("ament_index")
            .join("resource_index")
            .join(resource_type)
            .join(resource_name)
    }

    /// First prefix registering `resource_name` under `resource_type`
    pub fn find_prefix(&self, resource_type: &str, resource_name: &str) -> Option<&Path> {
        self.prefixes
            .iter()
            .map(PathBuf::as_path)
            .find(|prefix| Self::marker(prefix, resource_type, resource_name).is_file())
    }
}

impl ResourceIndex for AmentIndex {
    fn has_resource(&self, resource_type: &str, resource_name: &str) -> bool {
        let found = self.find_prefix(resource_type, resource_name);
        log::debug!(
            "Resource {}/{}: {}",
            resource_type,
            resource_name,
            found
                .map(|p| format!("found in {}", p.display()))
                .unwrap_or_else(|| "not found".to_string())
        );
        found.is_some()
    }

    fn package_share(&self, package: &str) -> Option<PathBuf> {
        self.find_prefix(PACKAGES, package)
            .map(|prefix| prefix.join("share").join(package))
    }
}

/// Fixed in-memory resource index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticIndex {
    resources: HashSet<(String, String)>,
}

impl StaticIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource
    pub fn with_resource(
        mut self,
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
    ) -> Self {
        self.resources
            .insert((resource_type.into(), resource_name.into()));
        self
    }

    /// Register an installed package
    pub fn with_package(self, package: impl Into<String>) -> Self {
        self.with_resource(PACKAGES, package)
    }
}

impl ResourceIndex for StaticIndex {
    fn has_resource(&self, resource_type: &str, resource_name: &str) -> bool {
        self.resources
            .contains(&(resource_type.to_string(), resource_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(prefix: &Path, package: &str) {
        let dir = prefix.join("share/ament_index/resource_index/packages");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(package), "").unwrap();
    }

    #[test]
    fn test_finds_registered_package() {
        let prefix = tempfile::tempdir().unwrap();
        register(prefix.path(), "image_view");

        let index = AmentIndex::new([prefix.path().to_path_buf()]);
        assert!(index.has_package("image_view"));
        assert!(!index.has_package("rviz2"));
        assert_eq!(
            index.package_share("image_view"),
            Some(prefix.path().join("share/image_view"))
        );
    }

    #[test]
    fn test_directory_is_not_a_marker() {
        let prefix = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(
            prefix
                .path()
                .join("share/ament_index/resource_index/packages/image_view"),
        )
        .unwrap();

        let index = AmentIndex::new([prefix.path().to_path_buf()]);
        assert!(!index.has_package("image_view"));
    }

    #[test]
    fn test_with_prefix_searched_first() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        register(first.path(), "camera_ros");
        register(second.path(), "camera_ros");

        let index = AmentIndex::new([second.path().to_path_buf()]).with_prefix(first.path());
        assert_eq!(
            index.find_prefix(PACKAGES, "camera_ros"),
            Some(first.path())
        );
    }

    #[test]
    fn test_empty_index() {
        let index = AmentIndex::default();
        assert!(!index.has_package("image_view"));
        assert!(index.package_share("image_view").is_none());
    }

    #[test]
    fn test_static_index() {
        let index = StaticIndex::new().with_package("image_view");
        assert!(index.has_package("image_view"));
        assert!(!index.has_resource("interfaces", "image_view"));
    }
}
