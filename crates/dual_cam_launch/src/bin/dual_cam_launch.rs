//! Dual camera launch CLI
//!
//! Usage:
//!   dual_cam_launch
//!   dual_cam_launch -a format:=YUYV -o json
//!   dual_cam_launch -o yaml > dual_cam.launch.yaml
//!   dual_cam_launch -o description
//!   dual_cam_launch --show-args

use dual_cam_launch::{
    frontend, generate_launch_description, AmentIndex, ArgumentOverrides, LaunchArgs, LaunchPlan,
    OutputFormat, SubstitutionContext,
};

fn main() {
    let args: LaunchArgs = argh::from_env();

    // Initialize logging
    let env = env_logger::Env::default().default_filter_or(args.log_filter());
    env_logger::init_from_env(env);

    let index = args
        .ament_prefix
        .iter()
        .rev()
        .fold(AmentIndex::from_env(), |index, prefix| {
            index.with_prefix(prefix.clone())
        });
    log::debug!("Ament prefixes: {:?}", index.prefixes());

    let description = generate_launch_description(&index);

    if args.show_args {
        println!("Arguments (pass arguments as '<name>:=<value>'):");
        for arg in description.arguments() {
            println!();
            println!("    '{}':", arg.name);
            println!("        {}", arg.description);
            println!("        (default: '{}')", arg.default_value);
        }
        return;
    }

    if args.overrides_ignored() {
        log::warn!(
            "Argument overrides are not applied to {:?} output; pass them to the launch engine instead",
            args.output
        );
    }

    match args.output {
        OutputFormat::Yaml => {
            match frontend::to_yaml(&description) {
                Ok(yaml) => print!("{}", yaml),
                Err(e) => {
                    log::error!("Failed to export launch file: {}", e);
                    std::process::exit(1);
                }
            }
            return;
        }
        OutputFormat::Description => {
            match description.to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    log::error!("Failed to serialize launch description: {}", e);
                    std::process::exit(1);
                }
            }
            return;
        }
        _ => {}
    }

    // File overrides first, command-line pairs win
    let file_overrides = match &args.params_file {
        Some(path) => {
            log::info!("Loading params file: {}", path.display());
            match ArgumentOverrides::from_file(path) {
                Ok(overrides) => overrides,
                Err(e) => {
                    log::error!("Failed to load params file: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => ArgumentOverrides::new(),
    };
    let overrides = file_overrides.merge(args.arg_overrides());

    let ctx = SubstitutionContext::new().with_index(&index);
    let plan = match LaunchPlan::resolve(&description, &overrides, ctx) {
        Ok(plan) => plan,
        Err(e) => {
            log::error!("Failed to resolve launch plan: {}", e);
            std::process::exit(1);
        }
    };

    match args.output {
        OutputFormat::Json => match plan.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Failed to serialize launch plan: {}", e);
                std::process::exit(1);
            }
        },
        _ => println!("{}", plan),
    }
}
