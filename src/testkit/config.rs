//! Canonical test configurations.

use crate::application::solver::{AnnealingConfig, Annealer, EstimatorConfig};

/// Annealing schedule with the default temperatures and a short run.
pub fn annealing(max_iterations: usize) -> AnnealingConfig {
    AnnealingConfig {
        max_iterations,
        ..AnnealingConfig::default()
    }
}

/// Annealer with default estimator settings and a short run.
pub fn annealer(max_iterations: usize) -> Annealer {
    Annealer::new(annealing(max_iterations), EstimatorConfig::default())
}

/// Config file text with every section spelled out.
pub const FULL_TOML: &str = r#"
[logging]
level = "debug"
format = "json"

[annealing]
max_iterations = 250
initial_temperature = 2.0
cooling_rate = 0.99
seed = 17
chains = 2

[estimator]
subintervals = 2000
integration_limit = 8.0
quadrature = "closed"
degenerate = "zero"
"#;
