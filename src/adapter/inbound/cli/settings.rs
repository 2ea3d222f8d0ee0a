//! Configuration resolution shared by the round commands.

use std::path::Path;

use tracing::debug;

use super::command::{SearchArgs, SettingsArgs};
use super::output;
use crate::adapter::outbound::draw::DrawFile;
use crate::domain::Round;
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::RoundSource;

/// Load the configuration, apply flag overrides, validate, and start
/// logging.
///
/// Log level precedence: `--log-level`, then `-v`/`-vv`, then the file.
/// `RUST_LOG` still wins over all of them.
pub fn resolve(settings: &SettingsArgs, search: Option<&SearchArgs>) -> Result<Config> {
    let mut config = match &settings.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(level) = &settings.log_level {
        config.logging.level = level.clone();
    } else {
        match output::verbosity() {
            0 => {}
            1 => config.logging.level = "debug".into(),
            _ => config.logging.level = "trace".into(),
        }
    }
    if settings.json_logs {
        config.logging.format = "json".into();
    }

    if let Some(search) = search {
        if let Some(seed) = search.seed {
            config.annealing.seed = Some(seed);
        }
        if let Some(iterations) = search.iterations {
            config.annealing.max_iterations = iterations;
        }
        if let Some(chains) = search.chains {
            config.annealing.chains = chains;
        }
    }

    config.validate()?;
    config.logging.init();
    debug!(config = ?settings.config, "configuration resolved");
    Ok(config)
}

/// Read a saved draw list.
pub fn load_round(path: &Path) -> Result<Round> {
    let source = DrawFile::new(path);
    let round = source.load()?;
    debug!(
        source = source.name(),
        path = %path.display(),
        events = round.events.len(),
        "round loaded"
    );
    Ok(round)
}
