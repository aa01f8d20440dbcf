//! Network checks: default bridge hygiene

use crate::audit::registry::{CheckDef, CheckRegistry};
use crate::audit::result::CheckResult;
use crate::target::{Target, BRIDGE_ICC_OPTION};

pub fn register(registry: &mut CheckRegistry) {
    registry.register(CheckDef {
        name: "check_icc",
        category: "network",
        description: "Inter-container communication on the default bridge is disabled",
        func: check_icc,
    });
    registry.register(CheckDef {
        name: "check_bridge",
        category: "network",
        description: "No running container is attached to the default bridge",
        func: check_bridge,
    });
}

fn check_icc(target: &Target) -> CheckResult {
    let Some(bridge) = &target.bridge else {
        return CheckResult::error("check_icc", "Default bridge network not found on daemon");
    };

    match bridge.options.get(BRIDGE_ICC_OPTION).map(String::as_str) {
        Some("false") => CheckResult::pass("check_icc"),
        Some(_) | None => CheckResult::fail(
            "check_icc",
            "Inter-container communication is enabled on the default bridge",
        ),
    }
}

fn check_bridge(target: &Target) -> CheckResult {
    let attached = target.container_names(|c| c.network_settings.networks.contains_key("bridge"));
    if attached.is_empty() {
        CheckResult::pass("check_bridge")
    } else {
        CheckResult::fail(
            "check_bridge",
            format!(
                "Containers attached to the default bridge: {}",
                attached.join(", ")
            ),
        )
    }
}
