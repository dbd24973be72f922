//! Command-line interface for dual_cam_launch

use crate::config::{parse_arg_override, ArgumentOverrides};
use argh::FromArgs;
use std::path::PathBuf;
use std::str::FromStr;

/// Launch description for the down and front cameras in one component container
#[derive(FromArgs, Debug)]
pub struct LaunchArgs {
    /// override launch arguments (format: key:=value)
    #[argh(option, short = 'a', from_str_fn(parse_arg_override))]
    pub arg: Vec<(String, String)>,

    /// YAML file with argument overrides, applied before --arg
    #[argh(option)]
    pub params_file: Option<PathBuf>,

    /// extra ament install prefix searched before AMENT_PREFIX_PATH
    #[argh(option)]
    pub ament_prefix: Vec<PathBuf>,

    /// output: text or json (resolved plan), yaml (launch file) or description (unresolved, json)
    #[argh(option, short = 'o', default = "OutputFormat::Text")]
    pub output: OutputFormat,

    /// list declared arguments and exit
    #[argh(switch)]
    pub show_args: bool,

    /// log level (error, warn, info, debug, trace)
    #[argh(option, short = 'l', default = "String::from(\"info\")")]
    pub log_level: String,
}

/// What the CLI prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
    Description,
}

impl OutputFormat {
    /// Whether this output shows argument values after overrides
    pub fn is_resolved(self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Json)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "description" => Ok(OutputFormat::Description),
            _ => Err(format!(
                "Invalid output '{}'. Expected 'text', 'json', 'yaml' or 'description'",
                s
            )),
        }
    }
}

impl LaunchArgs {
    /// Command-line argument overrides
    pub fn arg_overrides(&self) -> ArgumentOverrides {
        self.arg.iter().cloned().collect()
    }

    /// Whether overrides were given for an output that ignores them
    pub fn overrides_ignored(&self) -> bool {
        !self.output.is_resolved() && (!self.arg.is_empty() || self.params_file.is_some())
    }

    /// Normalized log filter, falling back to info
    pub fn log_filter(&self) -> &'static str {
        match self.log_level.to_lowercase().as_str() {
            "error" => "error",
            "warn" => "warn",
            "debug" => "debug",
            "trace" => "trace",
            _ => "info",
        }
    }
}
