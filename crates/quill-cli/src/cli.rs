//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// quill - file-based SQL migrations and seeds
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Migrations directory (default: db/migrations)
    #[arg(long, global = true)]
    pub dir: Option<String>,

    /// Seeds directory (default: db/seeds)
    #[arg(long = "seed-dir", alias = "seedDir", global = true)]
    pub seed_dir: Option<String>,

    /// Database connection URL (postgres://..., duckdb://...)
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    pub database_url: Option<String>,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the migrations and seeds directories and tracking tables
    Init,

    /// Create a new up/down migration pair
    New(NewArgs),

    /// Apply all pending migrations
    Up,

    /// Revert the most recently applied migrations
    Down(DownArgs),

    /// Show applied/pending state of every migration
    Status(StatusArgs),

    /// Create the seeds directory and tracking table
    SeedInit,

    /// Create a new seed file
    SeedNew(NewArgs),

    /// Apply all seeds not yet applied
    Seed,

    /// Show applied/pending state of every seed
    SeedStatus(StatusArgs),
}

/// Arguments for the new and seed-new commands
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Free-form name; sanitized to lowercase letters, digits, and underscores
    pub name: String,
}

/// Arguments for the down command
#[derive(Args, Debug)]
pub struct DownArgs {
    /// Number of migrations to revert
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub steps: i64,
}

/// Arguments for the status commands
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// One line per unit
    Table,
    /// JSON array
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
