//! Daemon configuration checks

use crate::audit::registry::{CheckDef, CheckRegistry};
use crate::audit::result::CheckResult;
use crate::target::Target;

pub fn register(registry: &mut CheckRegistry) {
    registry.register(CheckDef {
        name: "check_live_restore",
        category: "daemon",
        description: "Live restore keeps containers alive across daemon restarts",
        func: check_live_restore,
    });
    registry.register(CheckDef {
        name: "check_insecure_registries",
        category: "daemon",
        description: "No insecure (plain HTTP) registries are configured",
        func: check_insecure_registries,
    });
    registry.register(CheckDef {
        name: "check_experimental",
        category: "daemon",
        description: "Daemon does not run with experimental features",
        func: check_experimental,
    });
}

fn check_live_restore(target: &Target) -> CheckResult {
    if target.info.live_restore_enabled {
        CheckResult::pass("check_live_restore")
    } else {
        CheckResult::fail("check_live_restore", "Live restore is not enabled")
    }
}

fn check_insecure_registries(target: &Target) -> CheckResult {
    // The loopback CIDR is present on every default install.
    let insecure: Vec<&str> = target
        .info
        .registry_config
        .insecure_registry_cidrs
        .iter()
        .map(String::as_str)
        .filter(|cidr| !cidr.starts_with("127.") && *cidr != "::1/128")
        .collect();

    if insecure.is_empty() {
        CheckResult::pass("check_insecure_registries")
    } else {
        CheckResult::fail(
            "check_insecure_registries",
            format!("Insecure registries configured: {}", insecure.join(", ")),
        )
    }
}

fn check_experimental(target: &Target) -> CheckResult {
    if target.info.experimental_build {
        CheckResult::fail(
            "check_experimental",
            "Daemon is running an experimental build",
        )
    } else {
        CheckResult::pass("check_experimental")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::CheckStatus;

    #[test]
    fn live_restore_disabled_fails() {
        let target = Target::default();
        assert_eq!(check_live_restore(&target).status, CheckStatus::Fail);
    }

    #[test]
    fn loopback_registry_is_tolerated() {
        let mut target = Target::default();
        target.info.registry_config.insecure_registry_cidrs = vec!["127.0.0.0/8".to_string()];
        assert_eq!(
            check_insecure_registries(&target).status,
            CheckStatus::Pass
        );
    }

    #[test]
    fn external_insecure_registry_fails() {
        let mut target = Target::default();
        target.info.registry_config.insecure_registry_cidrs =
            vec!["127.0.0.0/8".to_string(), "10.1.0.0/16".to_string()];
        let result = check_insecure_registries(&target);
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.output.contains("10.1.0.0/16"));
    }

    #[test]
    fn experimental_build_fails() {
        let mut target = Target::default();
        target.info.experimental_build = true;
        assert_eq!(check_experimental(&target).status, CheckStatus::Fail);
    }
}
