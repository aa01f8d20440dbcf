//! Check registry
//!
//! Process-wide, read-only mapping from check name to check function.
//! Built once per run; profiles are resolved against it by exact name.

use crate::target::Target;

use super::checks;
use super::result::CheckResult;

/// A check is a pure function of the target snapshot.
pub type CheckFn = fn(&Target) -> CheckResult;

/// One registered check with its metadata
#[derive(Debug, Clone, Copy)]
pub struct CheckDef {
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub func: CheckFn,
}

/// Registry of audit checks
pub struct CheckRegistry {
    checks: Vec<CheckDef>,
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CheckRegistry {
    /// Empty registry; used by tests composing their own catalogue.
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    /// Registry holding the built-in benchmark catalogue.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        checks::register_all(&mut registry);
        registry
    }

    pub fn register(&mut self, def: CheckDef) {
        self.checks.push(def);
    }

    /// Exact-name lookup. Absence is the caller's `UnknownCheck` condition.
    pub fn get(&self, name: &str) -> Option<&CheckDef> {
        self.checks.iter().find(|c| c.name == name)
    }

    pub fn list(&self, category: Option<&str>) -> Vec<&CheckDef> {
        match category {
            Some(cat) => self
                .checks
                .iter()
                .filter(|c| c.category.eq_ignore_ascii_case(cat))
                .collect(),
            None => self.checks.iter().collect(),
        }
    }

    pub fn categories(&self) -> Vec<&'static str> {
        let mut categories: Vec<&'static str> = Vec::new();
        for check in &self.checks {
            if !categories.contains(&check.category) {
                categories.push(check.category);
            }
        }
        categories
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
