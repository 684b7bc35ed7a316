use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "xlint")]
#[command(about = "Validate OpenAPI documents and their custom `x-` extensions")]
pub struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    Validate(ValidateCommand),
    #[command(subcommand)]
    Rules(RulesCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum RulesCommand {
    Check(RulesCheckCommand),
}

#[derive(Debug, Clone, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum InputFormat {
    Auto,
    Json,
    Yaml,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ValidateCommand {
    /// Documents or directories; directories are searched for .json, .yaml and .yml files.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub input_format: InputFormat,
    #[arg(long, default_value_t = false)]
    pub no_schema: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct RulesCheckCommand {
    #[arg(long)]
    pub config: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
