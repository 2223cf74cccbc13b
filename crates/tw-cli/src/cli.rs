//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Trackway - schema migrations and project health scoring
#[derive(Parser, Debug)]
#[command(name = "tw")]
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

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override target (database connection)
    #[arg(short, long, global = true)]
    pub target: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new Trackway project
    Init(InitArgs),

    /// Show applied and pending migrations
    Status(StatusArgs),

    /// Apply all pending migrations
    Migrate(MigrateArgs),

    /// Roll back applied migrations
    Rollback(RollbackArgs),

    /// Score a project's health
    Health(HealthArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Name of the project directory to create
    pub name: String,

    /// Database file path written into the generated config
    #[arg(short, long, default_value = "trackway.duckdb")]
    pub database_path: String,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Also check applied migrations against the files on disk
    #[arg(long)]
    pub verify: bool,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Execute pending migrations, then roll the transaction back
    #[arg(long)]
    pub dry_run: bool,

    /// Apply migrations that trip the dangerous-statement check
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the rollback command
#[derive(Args, Debug)]
pub struct RollbackArgs {
    /// Roll back every migration above this version (default: latest only)
    #[arg(long)]
    pub to: Option<String>,
}

/// Arguments for the health command
#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Project identifier to score
    pub project_id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Output formats for status and health
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
