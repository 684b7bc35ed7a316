use super::{execute_rules_check, execute_validate, render_finding_line, CliError};
use crate::cli::{InputFormat, OutputFormat, RulesCheckCommand, ValidateCommand};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use xlint_core::{Finding, FindingKind, Severity, SourcePosition, StructuralPath};

const RULES: &str = r#"
customExtensions:
  - name: x-required
    location: root
    type: string
  - name: x-env
    location: servers
    type: number
"#;

const GOOD: &str = "openapi: 3.1.0
info:
  title: x
  version: 1
x-required: ok
servers:
  - url: https://a
    x-env: 1
";

const BAD: &str = "openapi: 3.1.0
info:
  title: x
  version: 1
x-required: 123
servers:
  - url: https://a
";

fn validate_command(paths: Vec<PathBuf>, config: Option<PathBuf>, format: OutputFormat) -> ValidateCommand {
    ValidateCommand {
        paths,
        config,
        format,
        input_format: InputFormat::Auto,
        no_schema: false,
    }
}

#[test]
fn validate_text_lists_one_line_per_finding() {
    let root = temp_dir("run-text");
    let config = write(root.join("xlint.yaml"), RULES);
    let good = write(root.join("good.yaml"), GOOD);
    let bad = write(root.join("bad.yaml"), BAD);

    let outcome = execute_validate(&validate_command(
        vec![good, bad.clone()],
        Some(config),
        OutputFormat::Text,
    ))
    .expect("validate must run");

    assert!(!outcome.success);
    let lines = outcome.output.lines().collect::<Vec<_>>();
    let bad_path = bad.display().to_string();
    assert_eq!(lines.len(), 3, "unexpected output:\n{}", outcome.output);
    assert_eq!(
        lines[0],
        format!(
            "{bad_path}:5:1: error [x-required] Invalid type for custom extension x-required at x-required: expected string, got number (x-required)"
        )
    );
    assert!(lines[1].starts_with(&format!("{bad_path}:7:5: error [x-env] Missing required custom extension: x-env")));
    assert_eq!(lines[2], "2 document(s) checked: 2 error(s), 0 warning(s)");
}

#[test]
fn validate_succeeds_when_every_document_is_valid() {
    let root = temp_dir("run-valid");
    let config = write(root.join("xlint.yaml"), RULES);
    let specs = root.join("specs");
    fs::create_dir_all(specs.join("nested")).expect("must create specs dir");
    write(specs.join("good.yaml"), GOOD);
    write(specs.join("nested/also-good.yml"), GOOD);

    let outcome = execute_validate(&validate_command(vec![specs], Some(config), OutputFormat::Text))
        .expect("validate must run");
    assert!(outcome.success, "unexpected output:\n{}", outcome.output);
    assert_eq!(outcome.output, "2 document(s) checked: 0 error(s), 0 warning(s)");
}

#[test]
fn validate_json_reports_each_document() {
    let root = temp_dir("run-json");
    let config = write(root.join("rules.json"), r#"{"customExtensions":[{"name":"x-required","location":"root","type":"string"}]}"#);
    let bad = write(root.join("api.yaml"), "openapi: 3.1.0\ninfo:\n  title: x\n  version: 1\n");

    let outcome = execute_validate(&validate_command(vec![bad.clone()], Some(config), OutputFormat::Json))
        .expect("validate must run");
    assert!(!outcome.success);

    let value: Value = serde_json::from_str(outcome.output.as_str()).expect("output must be json");
    assert_eq!(value["schema"], "xlint-validate/0.1.0");
    assert_eq!(value["isValid"], false);
    let document = &value["documents"][0];
    assert_eq!(document["path"], bad.display().to_string());
    assert_eq!(document["isValid"], false);
    assert_eq!(document["errors"][0]["extensionName"], "x-required");
    assert_eq!(document["errors"][0]["kind"], "extension_missing");
}

#[test]
fn validate_without_config_runs_schema_only() {
    let root = temp_dir("run-schema-only");
    let api = write(root.join("api.yaml"), "openapi: 3.1.0\ninfo:\n  version: 1\n");

    let outcome = execute_validate(&validate_command(vec![api.clone()], None, OutputFormat::Text))
        .expect("validate must run");
    assert!(!outcome.success);
    assert!(outcome.output.contains("[openapi-schema]"));

    let mut command = validate_command(vec![api], None, OutputFormat::Text);
    command.no_schema = true;
    let outcome = execute_validate(&command).expect("validate must run");
    assert!(outcome.success);
}

#[test]
fn unparsable_document_is_a_single_parse_error_line() {
    let root = temp_dir("run-parse-error");
    let api = write(root.join("api.yaml"), "openapi: [3.1.0\n");

    let outcome = execute_validate(&validate_command(vec![api.clone()], None, OutputFormat::Text))
        .expect("validate must run");
    let lines = outcome.output.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(&format!("{}:1:1: error [parse-error]", api.display())));
}

#[test]
fn invalid_config_fails_the_command() {
    let root = temp_dir("run-bad-config");
    let config = write(root.join("xlint.yaml"), "customExtensions:\n  - name: nope\n    location: root\n    type: string\n");
    let api = write(root.join("api.yaml"), GOOD);

    let error = execute_validate(&validate_command(vec![api], Some(config), OutputFormat::Text))
        .expect_err("config must be rejected");
    assert!(matches!(error, CliError::Config(_)));
    assert!(error.to_string().contains("must start with `x-`"));
}

#[test]
fn missing_document_fails_the_command() {
    let root = temp_dir("run-missing");
    let error = execute_validate(&validate_command(vec![root.join("absent.yaml")], None, OutputFormat::Text))
        .expect_err("missing input must fail");
    assert!(matches!(error, CliError::Read(_)));
}

#[test]
fn rules_check_locates_config_findings() {
    let root = temp_dir("rules-check");
    let config = write(
        root.join("xlint.yaml"),
        "customExtensions:
  - name: x-a
    location: root
    type: string
  - name: x-a
    location: root
    type: string
  - name: x-when
    location: tags
    type: date
",
    );

    let outcome = execute_rules_check(&RulesCheckCommand {
        config: config.clone(),
        format: OutputFormat::Text,
    })
    .expect("rules check must run");
    assert!(!outcome.success);

    let config_path = config.display().to_string();
    let lines = outcome.output.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3, "unexpected output:\n{}", outcome.output);
    assert!(lines[0].starts_with(&format!("{config_path}:5:5: error [x-a] duplicate rule")));
    assert!(lines[1].starts_with(&format!("{config_path}:10:5: warning [x-when] unsupported type `date`")));
    assert_eq!(lines[2], "3 rule(s) checked: 1 error(s), 1 warning(s)");
}

#[test]
fn rules_check_json_passes_for_clean_config() {
    let root = temp_dir("rules-check-json");
    let config = write(root.join("xlint.yaml"), RULES);

    let outcome = execute_rules_check(&RulesCheckCommand {
        config,
        format: OutputFormat::Json,
    })
    .expect("rules check must run");
    assert!(outcome.success);
    let value: Value = serde_json::from_str(outcome.output.as_str()).expect("output must be json");
    assert_eq!(value["rules"], 2);
    assert_eq!(value["report"]["isValid"], true);
}

#[test]
fn finding_line_falls_back_to_document_start() {
    let finding = Finding::new(
        FindingKind::ExtensionMissing,
        Severity::Warning,
        "x-required",
        StructuralPath::root().child_key("x-required"),
        "Missing required custom extension: x-required",
    );
    assert_eq!(
        render_finding_line("api.yaml", &finding),
        "api.yaml:1:1: warning [x-required] Missing required custom extension: x-required (x-required)"
    );
    let placed = finding.with_position(Some(SourcePosition::new(4, 3)));
    assert!(render_finding_line("api.yaml", &placed).starts_with("api.yaml:4:3: warning"));
}

fn temp_dir(prefix: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time must be monotonic")
        .as_nanos();
    path.push(format!(
        "xlint-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&path).expect("must create temp dir");
    path
}

fn write(path: impl AsRef<Path>, content: &str) -> PathBuf {
    fs::write(path.as_ref(), content).expect("must write fixture");
    path.as_ref().to_path_buf()
}
