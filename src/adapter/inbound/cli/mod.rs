//! CLI module graph and command dispatch.

pub mod check;
pub mod command;
pub mod diagnostic;
pub mod evaluate;
pub mod optimize;
pub mod output;
pub mod round;
pub mod settings;
pub mod sweep;

use self::command::{CheckCommand, Cli, ColorChoice, Commands};
use self::output::OutputConfig;
use crate::error::Result;

/// Apply global flags and run the selected command.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.color {
        ColorChoice::Auto => owo_colors::unset_override(),
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match cli.command {
        Commands::Round(args) => round::execute(&args),
        Commands::Optimize(args) => optimize::execute(args).await,
        Commands::Evaluate(args) => evaluate::execute(args).await,
        Commands::Sweep(args) => sweep::execute(args).await,
        Commands::Check(CheckCommand::Config(args)) => check::config::execute_config(&args.config),
    }
}
