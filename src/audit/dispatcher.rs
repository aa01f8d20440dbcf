//! Check dispatch
//!
//! Resolves a profile against the registry and executes the named checks
//! in profile order. An unknown check name is a configuration error that
//! aborts the whole run; a check that finds problems is just a failing
//! result.

use tracing::debug;

use crate::errors::AuditError;
use crate::profile::Profile;
use crate::target::Target;

use super::registry::CheckRegistry;
use super::result::CheckResult;

/// Run every check the profile names, in category order then checklist
/// order. The returned list preserves execution order and is handed
/// unchanged to both the report builder and the submission payload.
pub fn dispatch(
    profile: &Profile,
    registry: &CheckRegistry,
    target: &Target,
) -> Result<Vec<CheckResult>, AuditError> {
    let mut results = Vec::with_capacity(profile.check_count());

    for category in &profile.audit {
        debug!("Dispatching category '{}'", category.name);
        for name in &category.checklist {
            let def = registry
                .get(name)
                .ok_or_else(|| AuditError::unknown_check(name))?;
            let result = (def.func)(target);
            debug!("{} -> {}", name, result.status);
            results.push(result);
        }
    }

    Ok(results)
}
