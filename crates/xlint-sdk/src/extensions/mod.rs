//! Custom extension rule engine.
//!
//! Each rule names a structural location. The engine collects every entry at that
//! location, then checks that the extension field sits directly on the entry with the
//! declared type. Findings are emitted in rule order, then entry order, and carry the
//! rule's severity.

mod targets;
mod value_check;

pub use targets::{collect_targets, ExtensionTarget, BODY_METHODS, HTTP_METHODS};

use crate::locate::LineIndex;
use xlint_core::{DocumentNode, ExtensionRule, Finding, FindingKind};

pub fn check_extensions(text: &str, document: &DocumentNode, rules: &[ExtensionRule]) -> Vec<Finding> {
    check_extensions_with_index(&LineIndex::new(text), document, rules)
}

pub fn check_extensions_with_index(
    index: &LineIndex,
    document: &DocumentNode,
    rules: &[ExtensionRule],
) -> Vec<Finding> {
    let mut findings = Vec::new();
    for rule in rules {
        for target in collect_targets(document, rule.location) {
            value_check::check_rule_on_entry(rule, target.entry, &target.path, &mut findings);
        }
    }
    findings
        .into_iter()
        .map(|finding| attach_position(index, finding))
        .collect()
}

/// Resolves the finding's own path. A missing field has no text of its own, so it
/// falls back to the closest ancestor the resolver can place.
pub fn attach_position(index: &LineIndex, finding: Finding) -> Finding {
    let mut position = index.locate(&finding.path);
    if position.is_none() && finding.kind == FindingKind::ExtensionMissing {
        let mut ancestor = finding.path.parent();
        while let Some(path) = ancestor {
            if path.is_root() {
                break;
            }
            position = index.locate(&path);
            if position.is_some() {
                break;
            }
            ancestor = path.parent();
        }
    }
    if position.is_none() {
        tracing::debug!(path = %finding.path, extension = %finding.extension_name, "no source position for finding");
    }
    finding.with_position(position)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
