use std::path::Path;

use miette::Report;
use serde_json::json;

use crate::adapter::inbound::cli::diagnostic::ConfigDiagnostic;
use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::Config;

/// Validate a configuration file without running a search.
///
/// Parse and range errors are rendered against the file contents.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

    let config = match Config::parse_toml(&content) {
        Ok(config) => config,
        Err(Error::Config(e)) => {
            if !output::is_json() {
                if let Some(diagnostic) = ConfigDiagnostic::locate(&e, &content) {
                    eprintln!("{:?}", Report::new(diagnostic));
                }
            }
            return Err(e.into());
        }
        Err(e) => return Err(e),
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "check.config",
            "path": path.display().to_string(),
            "valid": true,
            "annealing": {
                "max_iterations": config.annealing.max_iterations,
                "initial_temperature": config.annealing.initial_temperature,
                "cooling_rate": config.annealing.cooling_rate,
                "seed": config.annealing.seed,
                "chains": config.annealing.chains,
            },
            "estimator": {
                "subintervals": config.estimator.subintervals,
                "integration_limit": config.estimator.integration_limit,
                "quadrature": config.estimator.quadrature,
                "degenerate": config.estimator.degenerate,
            },
        }));
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Annealing");
    output::field("Iterations", config.annealing.max_iterations);
    output::field("Temperature", config.annealing.initial_temperature);
    output::field("Cooling rate", config.annealing.cooling_rate);
    match config.annealing.seed {
        Some(seed) => output::field("Seed", seed),
        None => output::field("Seed", output::muted("random")),
    }
    output::field("Chains", config.annealing.chains);

    output::section("Estimator");
    output::field("Quadrature", config.estimator.quadrature);
    output::field("Subintervals", config.estimator.subintervals);
    output::field("Limit", config.estimator.integration_limit);
    output::field("Degenerate", config.estimator.degenerate);

    if config.annealing.chains > 1 {
        output::hint("several chains keep the best of independent runs, which is not the same as one longer run");
    }

    Ok(())
}
