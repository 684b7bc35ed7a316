use std::sync::{Arc, PoisonError, RwLock};
use xlint_core::ExtensionRule;

/// The active rule set. Updates swap in a whole new snapshot, so a validation that
/// already took one keeps seeing exactly the rules it started with.
#[derive(Debug)]
pub struct RuleStore {
    active: RwLock<Arc<[ExtensionRule]>>,
}

impl RuleStore {
    pub fn new(rules: Vec<ExtensionRule>) -> Self {
        Self {
            active: RwLock::new(Arc::from(rules)),
        }
    }

    pub fn snapshot(&self) -> Arc<[ExtensionRule]> {
        Arc::clone(&self.active.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn update_rules(&self, rules: Vec<ExtensionRule>) {
        let next: Arc<[ExtensionRule]> = Arc::from(rules);
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        tracing::info!(previous = active.len(), current = next.len(), "replaced extension rules");
        *active = next;
    }
}

impl Default for RuleStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
