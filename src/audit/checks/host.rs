//! Host-level checks: engine version and kernel security options

use crate::audit::registry::{CheckDef, CheckRegistry};
use crate::audit::result::CheckResult;
use crate::target::Target;

/// Oldest engine line still receiving security fixes
const MINIMUM_VERSION: (u64, u64, u64) = (20, 10, 0);

pub fn register(registry: &mut CheckRegistry) {
    registry.register(CheckDef {
        name: "check_docker_version",
        category: "host",
        description: "Engine version is current enough to receive security fixes",
        func: check_docker_version,
    });
    registry.register(CheckDef {
        name: "check_security_options",
        category: "host",
        description: "Daemon runs with seccomp and a mandatory access control system",
        func: check_security_options,
    });
}

fn check_docker_version(target: &Target) -> CheckResult {
    let raw = &target.version.version;
    match parse_version(raw) {
        Some(version) if version >= MINIMUM_VERSION => CheckResult::pass("check_docker_version"),
        Some(_) => CheckResult::fail(
            "check_docker_version",
            format!(
                "Engine version {} is older than {}.{}.{}",
                raw, MINIMUM_VERSION.0, MINIMUM_VERSION.1, MINIMUM_VERSION.2
            ),
        ),
        None => CheckResult::error(
            "check_docker_version",
            format!("Could not parse engine version '{}'", raw),
        ),
    }
}

fn check_security_options(target: &Target) -> CheckResult {
    let options = &target.info.security_options;
    let has = |name: &str| options.iter().any(|o| o.contains(name));

    let mut missing = Vec::new();
    if !has("seccomp") {
        missing.push("seccomp");
    }
    if !has("apparmor") && !has("selinux") {
        missing.push("apparmor/selinux");
    }

    if missing.is_empty() {
        CheckResult::pass("check_security_options")
    } else {
        CheckResult::fail(
            "check_security_options",
            format!("Daemon is missing security options: {}", missing.join(", ")),
        )
    }
}

fn parse_version(raw: &str) -> Option<(u64, u64, u64)> {
    let mut parts = raw.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    // Patch may carry a suffix like "7-ce"
    let patch = parts
        .next()
        .map(|p| {
            p.chars()
                .take_while(|c| c.is_ascii_digit())
                .collect::<String>()
        })
        .and_then(|p| p.parse().ok())
        .unwrap_or(0);
    Some((major, minor, patch))
}
