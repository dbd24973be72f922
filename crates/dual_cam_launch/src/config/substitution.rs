//! Substitution engine for $(var), $(env), $(find-pkg-share) patterns

use crate::ament::ResourceIndex;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Regex for matching substitution patterns: $(type value)
static SUBSTITUTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\(([\w-]+)\s+([^)]+)\)|\$\(([\w-]+)\)").unwrap());

const MAX_ITERATIONS: usize = 10;

/// Substitution context containing all available variables
#[derive(Default)]
pub struct SubstitutionContext<'a> {
    /// Launch configurations
    pub configurations: HashMap<String, String>,
    /// Environment overrides checked before the process environment
    pub env: HashMap<String, String>,
    /// Index used for `$(find-pkg-share ...)`
    index: Option<&'a dyn ResourceIndex>,
}

impl<'a> SubstitutionContext<'a> {
    /// Create a new substitution context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a launch configuration
    pub fn with_configuration(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.configurations.insert(name.into(), value.into());
        self
    }

    /// Add an environment variable
    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    /// Resolve `$(find-pkg-share ...)` through `index`
    pub fn with_index(mut self, index: &'a dyn ResourceIndex) -> Self {
        self.index = Some(index);
        self
    }

    /// Substitute all patterns in a string
    pub fn substitute(&self, input: &str) -> Result<String, SubstitutionError> {
        let mut result = input.to_string();
        let mut last_result = String::new();
        let mut iterations = 0;

        // Repeat until stable so substituted values may themselves contain patterns
        while result != last_result && iterations < MAX_ITERATIONS {
            last_result = result.clone();
            result = self.substitute_once(&result)?;
            iterations += 1;
        }

        if iterations >= MAX_ITERATIONS && result.contains("$(") {
            return Err(SubstitutionError::MaxIterationsExceeded(input.to_string()));
        }

        Ok(result)
    }

    /// Perform a single pass of substitution
    fn substitute_once(&self, input: &str) -> Result<String, SubstitutionError> {
        let mut error: Option<SubstitutionError> = None;

        let result = SUBSTITUTION_PATTERN.replace_all(input, |caps: &Captures| {
            if error.is_some() {
                return String::new();
            }

            match self.resolve_capture(caps) {
                Ok(value) => value,
                Err(e) => {
                    error = Some(e);
                    String::new()
                }
            }
        });

        if let Some(e) = error {
            return Err(e);
        }

        Ok(result.into_owned())
    }

    /// Resolve a single capture group
    fn resolve_capture(&self, caps: &Captures) -> Result<String, SubstitutionError> {
        // $(type value), e.g. $(var format)
        if let (Some(subst_type), Some(value)) = (caps.get(1), caps.get(2)) {
            return self.resolve_typed(subst_type.as_str(), value.as_str().trim());
        }

        // $(type) without a value is never valid for the supported types
        if let Some(subst_type) = caps.get(3) {
            return self.resolve_typed(subst_type.as_str(), "");
        }

        Err(SubstitutionError::InvalidPattern(
            caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default(),
        ))
    }

    fn resolve_typed(&self, subst_type: &str, value: &str) -> Result<String, SubstitutionError> {
        match subst_type {
            "var" => self.resolve_var(value),
            "env" => self.resolve_env(value),
            "find-pkg-share" => self.resolve_package_share(value),
            _ => Err(SubstitutionError::UnknownType(subst_type.to_string())),
        }
    }

    /// Resolve a launch configuration reference
    fn resolve_var(&self, name: &str) -> Result<String, SubstitutionError> {
        if name.is_empty() {
            return Err(SubstitutionError::InvalidPattern("$(var)".to_string()));
        }
        self.configurations
            .get(name)
            .cloned()
            .ok_or_else(|| SubstitutionError::UndefinedVariable(name.to_string()))
    }

    /// `NAME` or `NAME default`
    fn resolve_env(&self, value: &str) -> Result<String, SubstitutionError> {
        let (name, default) = match value.split_once(char::is_whitespace) {
            Some((name, default)) => (name, Some(default.trim())),
            None => (value, None),
        };
        if name.is_empty() {
            return Err(SubstitutionError::InvalidPattern("$(env)".to_string()));
        }

        if let Some(value) = self.env.get(name) {
            return Ok(value.clone());
        }

        std::env::var(name).or_else(|_| {
            default
                .map(str::to_string)
                .ok_or_else(|| SubstitutionError::UndefinedEnv(name.to_string()))
        })
    }

    fn resolve_package_share(&self, package: &str) -> Result<String, SubstitutionError> {
        self.index
            .and_then(|index| index.package_share(package))
            .map(|path| path.to_string_lossy().into_owned())
            .ok_or_else(|| SubstitutionError::PackageNotFound(package.to_string()))
    }
}

/// Errors that can occur during substitution
#[derive(Debug, thiserror::Error)]
pub enum SubstitutionError {
    #[error("Unknown substitution type: {0}")]
    UnknownType(String),

    #[error("Undefined launch configuration: {0}")]
    UndefinedVariable(String),

    #[error("Undefined environment variable: {0}")]
    UndefinedEnv(String),

    #[error("Package not found: {0}")]
    PackageNotFound(String),

    #[error("Invalid substitution pattern: {0}")]
    InvalidPattern(String),

    #[error("Maximum substitution iterations exceeded for: {0}")]
    MaxIterationsExceeded(String),
}
