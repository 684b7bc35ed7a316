use crate::cli::{InputFormat, OutputFormat, RulesCheckCommand, ValidateCommand};
use crate::config::{
    load_validator_config, parse_validator_config, read_config_text, validate_validator_config,
    ConfigError,
};
use crate::io::{read_documents, ReadDocumentError};
use serde::Serialize;
use serde_json::json;
use xlint_core::{Finding, Severity, ValidationResult};
use xlint_sdk::{attach_position, DocumentFormat, LineIndex, ValidateOptions, Validator};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Read(#[from] ReadDocumentError),
    #[error("schema load failed: {0}")]
    SchemaLoad(String),
    #[error("json encode failed: {0}")]
    JsonEncode(#[from] serde_json::Error),
}

/// Rendered command output plus whether everything checked was valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub output: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    pub path: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

pub fn execute_validate(command: &ValidateCommand) -> Result<CommandOutcome, CliError> {
    let rules = match &command.config {
        Some(path) => load_validator_config(path.as_path())?.custom_extensions,
        None => Vec::new(),
    };
    let documents = read_documents(&command.paths)?;
    let validator = Validator::new(rules)
        .map_err(|error| CliError::SchemaLoad(error.to_string()))?
        .with_options(ValidateOptions {
            format: document_format(command.input_format),
            check_schema: !command.no_schema,
        });

    let reports = documents
        .iter()
        .map(|document| {
            tracing::debug!(path = %document.path.display(), "validating document");
            DocumentReport {
                path: document.path.display().to_string(),
                result: validator.validate(document.text.as_str()),
            }
        })
        .collect::<Vec<_>>();
    let success = reports.iter().all(|report| report.result.is_valid());

    let output = match command.format {
        OutputFormat::Text => render_validate_text(&reports),
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "schema": "xlint-validate/0.1.0",
            "isValid": success,
            "documents": reports,
        }))?,
    };
    Ok(CommandOutcome { output, success })
}

pub fn execute_rules_check(command: &RulesCheckCommand) -> Result<CommandOutcome, CliError> {
    let raw = read_config_text(command.config.as_path())?;
    let config = parse_validator_config(raw.as_str(), command.config.as_path())?;
    let index = LineIndex::new(raw.as_str());
    let result = ValidationResult::from_findings(
        validate_validator_config(&config)
            .into_iter()
            .map(|finding| attach_position(&index, finding)),
    );
    let success = result.is_valid();
    let report = DocumentReport {
        path: command.config.display().to_string(),
        result,
    };

    let output = match command.format {
        OutputFormat::Text => {
            let mut out = render_findings_text(&report);
            out.push_str(&format!(
                "{} rule(s) checked: {} error(s), {} warning(s)",
                config.custom_extensions.len(),
                report.result.errors().len(),
                report.result.warnings().len()
            ));
            out
        }
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "schema": "xlint-rules-check/0.1.0",
            "rules": config.custom_extensions.len(),
            "report": report,
        }))?,
    };
    Ok(CommandOutcome { output, success })
}

pub fn render_finding_line(file: &str, finding: &Finding) -> String {
    let position = finding.position_or_start();
    format!(
        "{file}:{}:{}: {} [{}] {} ({})",
        position.line,
        position.column,
        severity_label(finding.severity),
        finding.extension_name,
        finding.message,
        finding.path
    )
}

fn render_validate_text(reports: &[DocumentReport]) -> String {
    let mut out = String::new();
    let mut errors = 0;
    let mut warnings = 0;
    for report in reports {
        out.push_str(&render_findings_text(report));
        errors += report.result.errors().len();
        warnings += report.result.warnings().len();
    }
    out.push_str(&format!(
        "{} document(s) checked: {errors} error(s), {warnings} warning(s)",
        reports.len()
    ));
    out
}

fn render_findings_text(report: &DocumentReport) -> String {
    let mut out = String::new();
    for finding in report.result.findings() {
        out.push_str(&render_finding_line(report.path.as_str(), finding));
        out.push('\n');
    }
    out
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

fn document_format(format: InputFormat) -> DocumentFormat {
    match format {
        InputFormat::Auto => DocumentFormat::Auto,
        InputFormat::Json => DocumentFormat::Json,
        InputFormat::Yaml => DocumentFormat::Yaml,
    }
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
