use super::{run_validation, ValidateOptions};
use crate::store::RuleStore;
use std::sync::Arc;
use xlint_core::{ExtensionRule, ValidationResult};
use xlint_schema::{OpenApiSchemas, SchemaLoadError};

/// Long-lived validator: schemas compiled once, rules replaceable at any time.
///
/// `validate` takes `&self` and may run from several threads while another thread
/// calls `update_rules`.
#[derive(Debug)]
pub struct Validator {
    rules: RuleStore,
    schemas: OpenApiSchemas,
    options: ValidateOptions,
}

impl Validator {
    pub fn new(rules: Vec<ExtensionRule>) -> Result<Self, SchemaLoadError> {
        Ok(Self {
            rules: RuleStore::new(rules),
            schemas: OpenApiSchemas::load()?,
            options: ValidateOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ValidateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ValidateOptions {
        self.options
    }

    pub fn rules(&self) -> Arc<[ExtensionRule]> {
        self.rules.snapshot()
    }

    pub fn update_rules(&self, rules: Vec<ExtensionRule>) {
        self.rules.update_rules(rules);
    }

    pub fn validate(&self, text: &str) -> ValidationResult {
        let rules = self.rules.snapshot();
        run_validation(text, &rules, self.options, |value| {
            self.schemas.check_document(value)
        })
    }
}
