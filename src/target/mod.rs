//! Audit target - a snapshot of one Docker daemon
//!
//! The snapshot is collected once, before any check runs, so every check is
//! a pure function of the same immutable state. Dropping the Target (on any
//! exit path) releases the underlying connections.

pub mod api;

use anyhow::Result;
use tracing::debug;

pub use api::{
    ContainerDetail, EngineClient, NetworkInfo, SystemInfo, VersionInfo, BRIDGE_ICC_OPTION,
};

use crate::errors::AuditError;

/// Everything the checks can see about the audited daemon
#[derive(Debug, Clone, Default)]
pub struct Target {
    pub info: SystemInfo,
    pub version: VersionInfo,
    /// The default bridge network, when the daemon has one
    pub bridge: Option<NetworkInfo>,
    /// Inspection data for every running container
    pub containers: Vec<ContainerDetail>,
}

impl Target {
    /// Collect the snapshot from a connected daemon.
    pub async fn acquire(client: &EngineClient) -> Result<Self, AuditError> {
        Self::acquire_inner(client)
            .await
            .map_err(|e| AuditError::target(format!("{:#}", e)))
    }

    async fn acquire_inner(client: &EngineClient) -> Result<Self> {
        let info = client.system_info().await?;
        let version = client.version().await?;
        let bridge = client.network("bridge").await?;

        let summaries = client.running_containers().await?;
        debug!("Inspecting {} running containers", summaries.len());
        let mut containers = Vec::with_capacity(summaries.len());
        for summary in &summaries {
            containers.push(client.inspect_container(&summary.id).await?);
        }

        Ok(Self {
            info,
            version,
            bridge,
            containers,
        })
    }

    /// Names of running containers matching a predicate, ready for output.
    pub fn container_names<F>(&self, predicate: F) -> Vec<String>
    where
        F: Fn(&ContainerDetail) -> bool,
    {
        self.containers
            .iter()
            .filter(|c| predicate(c))
            .map(|c| c.short_name().to_string())
            .collect()
    }
}
