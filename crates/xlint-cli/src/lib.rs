mod cli;
mod config;
mod io;
mod logging;
mod run;

pub use cli::{Cli, Commands, InputFormat, OutputFormat, RulesCheckCommand, RulesCommand, ValidateCommand};
pub use config::{
    load_validator_config, parse_validator_config, read_validator_config, validate_validator_config,
    ConfigError, ValidatorConfig,
};
pub use io::{collect_document_paths, read_documents, ReadDocumentError, SourceDocument};
pub use logging::{default_log_directive, init_tracing};
pub use run::{
    execute_rules_check, execute_validate, render_finding_line, CliError, CommandOutcome,
    DocumentReport,
};
