//! Docker Engine HTTP API client
//!
//! A thin typed wrapper over the daemon's REST endpoints. Only the fields
//! the audit checks read are deserialized; everything else is ignored.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Daemon-wide settings, from `/info`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SystemInfo {
    pub name: String,
    pub server_version: String,
    pub security_options: Vec<String>,
    pub live_restore_enabled: bool,
    pub experimental_build: bool,
    pub registry_config: RegistryConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RegistryConfig {
    #[serde(rename = "InsecureRegistryCIDRs")]
    pub insecure_registry_cidrs: Vec<String>,
}

/// Engine version report, from `/version`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct VersionInfo {
    pub version: String,
    pub api_version: String,
}

/// One entry from `/containers/json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ContainerSummary {
    pub id: String,
    pub names: Vec<String>,
}

/// Full inspection data for one container, from `/containers/{id}/json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ContainerDetail {
    pub id: String,
    pub name: String,
    pub config: ContainerConfig,
    pub host_config: HostConfig,
    pub network_settings: NetworkSettings,
}

impl ContainerDetail {
    /// Container name without the leading slash the API prepends.
    pub fn short_name(&self) -> &str {
        self.name.trim_start_matches('/')
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ContainerConfig {
    pub healthcheck: Option<Healthcheck>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Healthcheck {
    pub test: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct HostConfig {
    pub privileged: bool,
    pub memory: i64,
    pub cpu_shares: i64,
    pub network_mode: String,
    pub pid_mode: String,
    pub readonly_rootfs: bool,
    pub cap_add: Option<Vec<String>>,
    pub restart_policy: RestartPolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RestartPolicy {
    pub name: String,
    pub maximum_retry_count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct NetworkSettings {
    pub networks: std::collections::HashMap<String, serde_json::Value>,
}

/// One network, from `/networks/{name}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct NetworkInfo {
    pub name: String,
    pub options: std::collections::HashMap<String, String>,
}

/// Option key controlling inter-container communication on the bridge
pub const BRIDGE_ICC_OPTION: &str = "com.docker.network.bridge.enable_icc";

/// HTTP client bound to one Docker daemon
#[derive(Debug)]
pub struct EngineClient {
    http: reqwest::Client,
    base: Url,
}

impl EngineClient {
    /// Connect to a daemon address (`tcp://host:port` or `http(s)://host:port`).
    ///
    /// With a certificate directory the connection upgrades to TLS and
    /// presents the directory's `cert.pem`/`key.pem` as client identity;
    /// a `ca.pem` beside them pins the daemon certificate.
    pub fn connect(host: &str, cert_dir: Option<&Path>) -> Result<Self> {
        let base = daemon_url(host, cert_dir.is_some())?;

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .use_rustls_tls();

        if let Some(dir) = cert_dir {
            let mut pem = fs::read(dir.join("cert.pem"))
                .with_context(|| format!("reading {}", dir.join("cert.pem").display()))?;
            pem.extend(
                fs::read(dir.join("key.pem"))
                    .with_context(|| format!("reading {}", dir.join("key.pem").display()))?,
            );
            let identity =
                reqwest::Identity::from_pem(&pem).context("parsing daemon client identity")?;
            builder = builder.identity(identity);

            let ca_path = dir.join("ca.pem");
            if ca_path.exists() {
                let ca = fs::read(&ca_path)
                    .with_context(|| format!("reading {}", ca_path.display()))?;
                let cert =
                    reqwest::Certificate::from_pem(&ca).context("parsing daemon CA certificate")?;
                builder = builder.add_root_certificate(cert);
            }
        }

        let http = builder.build().context("building Docker API client")?;
        Ok(Self { http, base })
    }

    /// Client with caller-supplied HTTP transport, for tests.
    pub fn with_client(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base.join(path)?;
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {}", url))?;
        if !response.status().is_success() {
            anyhow::bail!("GET {} returned {}", url, response.status());
        }
        response
            .json()
            .await
            .with_context(|| format!("decoding {}", url))
    }

    pub async fn system_info(&self) -> Result<SystemInfo> {
        self.get_json("/info").await
    }

    pub async fn version(&self) -> Result<VersionInfo> {
        self.get_json("/version").await
    }

    pub async fn running_containers(&self) -> Result<Vec<ContainerSummary>> {
        self.get_json("/containers/json").await
    }

    pub async fn inspect_container(&self, id: &str) -> Result<ContainerDetail> {
        self.get_json(&format!("/containers/{}/json", id)).await
    }

    pub async fn network(&self, name: &str) -> Result<Option<NetworkInfo>> {
        let url = self.base.join(&format!("/networks/{}", name))?;
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {}", url))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("GET {} returned {}", url, response.status());
        }
        Ok(Some(
            response
                .json()
                .await
                .with_context(|| format!("decoding {}", url))?,
        ))
    }
}

/// Translate a Docker host address into an HTTP base URL.
fn daemon_url(host: &str, tls: bool) -> Result<Url> {
    if let Some(rest) = host.strip_prefix("tcp://") {
        let scheme = if tls { "https" } else { "http" };
        return Url::parse(&format!("{}://{}", scheme, rest))
            .with_context(|| format!("invalid Docker host '{}'", host));
    }
    if host.starts_with("http://") || host.starts_with("https://") {
        return Url::parse(host).with_context(|| format!("invalid Docker host '{}'", host));
    }
    anyhow::bail!(
        "unsupported Docker host '{}': expected tcp:// or http(s):// address",
        host
    )
}
