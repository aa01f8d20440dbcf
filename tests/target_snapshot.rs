//! Target acquisition against a simulated Docker Engine API

mod common;

use common::{MockCollector, Route};
use dockaudit::target::{EngineClient, Target};
use url::Url;

fn engine_routes() -> Vec<Route> {
    vec![
        Route::new(
            "/info",
            200,
            r#"{
                "Name": "node-1",
                "ServerVersion": "24.0.7",
                "SecurityOptions": ["name=seccomp,profile=builtin", "name=apparmor"],
                "LiveRestoreEnabled": true,
                "ExperimentalBuild": false,
                "RegistryConfig": {"InsecureRegistryCIDRs": ["127.0.0.0/8"]}
            }"#,
        ),
        Route::new(
            "/version",
            200,
            r#"{"Version": "24.0.7", "ApiVersion": "1.43"}"#,
        ),
        Route::new(
            "/networks/bridge",
            200,
            r#"{
                "Name": "bridge",
                "Options": {"com.docker.network.bridge.enable_icc": "false"}
            }"#,
        ),
        Route::new(
            "/containers/json",
            200,
            r#"[{"Id": "abc123", "Names": ["/web"]}]"#,
        ),
        Route::new(
            "/containers/abc123/json",
            200,
            r#"{
                "Id": "abc123",
                "Name": "/web",
                "Config": {},
                "HostConfig": {
                    "Privileged": false,
                    "Memory": 536870912,
                    "CpuShares": 512,
                    "NetworkMode": "backend",
                    "PidMode": "",
                    "ReadonlyRootfs": true,
                    "RestartPolicy": {"Name": "on-failure", "MaximumRetryCount": 3}
                },
                "NetworkSettings": {"Networks": {"backend": {}}}
            }"#,
        ),
    ]
}

#[tokio::test]
async fn acquire_collects_daemon_snapshot() {
    let daemon = MockCollector::start(engine_routes()).await;
    let client = EngineClient::with_client(
        reqwest::Client::new(),
        Url::parse(&daemon.base_url).unwrap(),
    );

    let target = Target::acquire(&client).await.unwrap();

    assert_eq!(target.info.name, "node-1");
    assert!(target.info.live_restore_enabled);
    assert_eq!(target.version.version, "24.0.7");

    let bridge = target.bridge.as_ref().unwrap();
    assert_eq!(
        bridge.options["com.docker.network.bridge.enable_icc"],
        "false"
    );

    assert_eq!(target.containers.len(), 1);
    let web = &target.containers[0];
    assert_eq!(web.short_name(), "web");
    assert_eq!(web.host_config.memory, 536870912);
    assert!(web.host_config.readonly_rootfs);
}

#[tokio::test]
async fn acquired_snapshot_drives_checks() {
    use dockaudit::profile::Category;
    use dockaudit::{dispatch, CheckRegistry, CheckStatus, Profile};

    let daemon = MockCollector::start(engine_routes()).await;
    let client = EngineClient::with_client(
        reqwest::Client::new(),
        Url::parse(&daemon.base_url).unwrap(),
    );
    let target = Target::acquire(&client).await.unwrap();

    let profile = Profile {
        audit: vec![Category {
            name: "network".to_string(),
            checklist: vec![
                "check_icc".to_string(),
                "check_bridge".to_string(),
                "check_memory_limits".to_string(),
            ],
        }],
    };
    let results = dispatch(&profile, &CheckRegistry::builtin(), &target).unwrap();

    assert_eq!(results[0].status, CheckStatus::Pass); // icc disabled
    assert_eq!(results[1].status, CheckStatus::Pass); // no bridge attachment
    assert_eq!(results[2].status, CheckStatus::Pass); // memory limit set
}

#[tokio::test]
async fn unreachable_daemon_is_a_target_error() {
    use dockaudit::AuditError;

    // Bind-then-drop leaves a port with nothing listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = EngineClient::with_client(
        reqwest::Client::new(),
        Url::parse(&format!("http://{}", addr)).unwrap(),
    );
    let err = Target::acquire(&client).await.unwrap_err();
    assert!(matches!(err, AuditError::TargetConnection { .. }));
}
