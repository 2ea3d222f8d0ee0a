//! Command-line interface definitions.
//!
//! Defines the CLI structure for the tipsedge application using `clap`.
//! Every search command reads a saved draw list; nothing is fetched.

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Default configuration path for `check config`.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Expected-value system optimizer for pari-mutuel football pools
#[derive(Parser, Debug)]
#[command(name = "tipsedge")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a round: pool economics and the event table
    Round(RoundArgs),

    /// Search for the best system under a hedge budget
    Optimize(OptimizeArgs),

    /// Evaluate a hand-written system
    Evaluate(EvaluateArgs),

    /// Optimize every affordable hedge budget and rank them
    Sweep(SweepArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `tipsedge check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
}

/// Configuration path for `check` commands.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Configuration and logging flags shared by the round commands.
///
/// Without `--config` the built-in defaults apply.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub json_logs: bool,
}

/// Annealing overrides. Unset fields keep the configured values.
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Seed for a reproducible search.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Iterations per chain.
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Independent chains to run; the best one wins.
    #[arg(long)]
    pub chains: Option<usize>,
}

/// Arguments for the `round` subcommand.
#[derive(Parser, Debug)]
pub struct RoundArgs {
    /// Saved draw-list JSON.
    #[arg(short, long)]
    pub round: PathBuf,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Arguments for the `optimize` subcommand.
#[derive(Parser, Debug)]
pub struct OptimizeArgs {
    /// Saved draw-list JSON.
    #[arg(short, long)]
    pub round: PathBuf,

    /// Number of half-hedged events (two outcomes).
    #[arg(long, default_value = "0")]
    pub half: usize,

    /// Number of fully hedged events (all three outcomes).
    #[arg(long, default_value = "0")]
    pub full: usize,

    #[command(flatten)]
    pub search: SearchArgs,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Arguments for the `evaluate` subcommand.
#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// Saved draw-list JSON.
    #[arg(short, long)]
    pub round: PathBuf,

    /// One outcome set per event, e.g. "1 X 2 1X 12 1X2 ...".
    #[arg(short, long)]
    pub system: String,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Arguments for the `sweep` subcommand.
#[derive(Parser, Debug)]
pub struct SweepArgs {
    /// Saved draw-list JSON.
    #[arg(short, long)]
    pub round: PathBuf,

    /// Highest stake cost to consider (one unit per row).
    #[arg(long)]
    pub max_cost: Decimal,

    /// Budgets to show, best first.
    #[arg(long, default_value = "10")]
    pub top: usize,

    #[command(flatten)]
    pub search: SearchArgs,

    #[command(flatten)]
    pub settings: SettingsArgs,
}
