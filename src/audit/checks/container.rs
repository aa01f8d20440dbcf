//! Running-container checks
//!
//! Each check walks the inspected containers and reports the offenders by
//! name, so a failing result tells the operator exactly where to look.

use crate::audit::registry::{CheckDef, CheckRegistry};
use crate::audit::result::CheckResult;
use crate::target::Target;

pub fn register(registry: &mut CheckRegistry) {
    registry.register(CheckDef {
        name: "check_privileged_containers",
        category: "container",
        description: "No container runs in privileged mode",
        func: check_privileged_containers,
    });
    registry.register(CheckDef {
        name: "check_memory_limits",
        category: "container",
        description: "Every container has a memory limit",
        func: check_memory_limits,
    });
    registry.register(CheckDef {
        name: "check_cpu_shares",
        category: "container",
        description: "Every container has CPU shares configured",
        func: check_cpu_shares,
    });
    registry.register(CheckDef {
        name: "check_host_network_mode",
        category: "container",
        description: "No container shares the host network namespace",
        func: check_host_network_mode,
    });
    registry.register(CheckDef {
        name: "check_readonly_rootfs",
        category: "container",
        description: "Container root filesystems are mounted read-only",
        func: check_readonly_rootfs,
    });
    registry.register(CheckDef {
        name: "check_restart_policy",
        category: "container",
        description: "Restart policy is on-failure with a bounded retry count",
        func: check_restart_policy,
    });
    registry.register(CheckDef {
        name: "check_pid_mode",
        category: "container",
        description: "No container shares the host PID namespace",
        func: check_pid_mode,
    });
    registry.register(CheckDef {
        name: "check_added_capabilities",
        category: "container",
        description: "No container adds Linux capabilities",
        func: check_added_capabilities,
    });
    registry.register(CheckDef {
        name: "check_health_checks",
        category: "container",
        description: "Every container defines a health check",
        func: check_health_checks,
    });
}

/// Pass when no container matches, fail listing the ones that do.
fn offenders(
    name: &'static str,
    target: &Target,
    message: &str,
    predicate: impl Fn(&crate::target::ContainerDetail) -> bool,
) -> CheckResult {
    let matched = target.container_names(predicate);
    if matched.is_empty() {
        CheckResult::pass(name)
    } else {
        CheckResult::fail(name, format!("{}: {}", message, matched.join(", ")))
    }
}

fn check_privileged_containers(target: &Target) -> CheckResult {
    offenders(
        "check_privileged_containers",
        target,
        "Containers running in privileged mode",
        |c| c.host_config.privileged,
    )
}

fn check_memory_limits(target: &Target) -> CheckResult {
    offenders(
        "check_memory_limits",
        target,
        "Containers without a memory limit",
        |c| c.host_config.memory == 0,
    )
}

fn check_cpu_shares(target: &Target) -> CheckResult {
    offenders(
        "check_cpu_shares",
        target,
        "Containers without CPU shares",
        |c| c.host_config.cpu_shares == 0,
    )
}

fn check_host_network_mode(target: &Target) -> CheckResult {
    offenders(
        "check_host_network_mode",
        target,
        "Containers using the host network namespace",
        |c| c.host_config.network_mode == "host",
    )
}

fn check_readonly_rootfs(target: &Target) -> CheckResult {
    offenders(
        "check_readonly_rootfs",
        target,
        "Containers with a writable root filesystem",
        |c| !c.host_config.readonly_rootfs,
    )
}

fn check_restart_policy(target: &Target) -> CheckResult {
    offenders(
        "check_restart_policy",
        target,
        "Containers without a bounded on-failure restart policy",
        |c| {
            let policy = &c.host_config.restart_policy;
            !(policy.name == "on-failure" && policy.maximum_retry_count <= 5)
        },
    )
}

fn check_pid_mode(target: &Target) -> CheckResult {
    offenders(
        "check_pid_mode",
        target,
        "Containers sharing the host PID namespace",
        |c| c.host_config.pid_mode == "host",
    )
}

fn check_added_capabilities(target: &Target) -> CheckResult {
    offenders(
        "check_added_capabilities",
        target,
        "Containers with added capabilities",
        |c| c.host_config.cap_add.as_ref().is_some_and(|caps| !caps.is_empty()),
    )
}

fn check_health_checks(target: &Target) -> CheckResult {
    offenders(
        "check_health_checks",
        target,
        "Containers without a health check",
        |c| c.config.healthcheck.is_none(),
    )
}
