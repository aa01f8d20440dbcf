//! Check command - run the audit and report the results
//!
//! One sequential run: acquire the target snapshot, resolve the profile,
//! dispatch the checks, render the local report, and submit to the
//! collector when one is configured.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::audit::{dispatch, CheckRegistry};
use crate::config;
use crate::errors::AuditError;
use crate::profile::Profile;
use crate::reporter::{Report, ReportFormat};
use crate::submit::{ClientCredentials, SubmitConfig, TransmissionClient};
use crate::target::{EngineClient, Target};
use crate::ui::Printer;

/// Arguments for one audit run
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    /// Remote profile identifier; requires a collector server
    pub remote_id: Option<String>,
    /// Local TOML profile path
    pub profile: Option<PathBuf>,
    /// Output format selector (json, xml, anything else = console)
    pub output: String,
    /// Optional file to write the rendered report to
    pub report_file: Option<PathBuf>,
    /// Directory with daemon TLS material (cert.pem/key.pem/ca.pem)
    pub tls_path: Option<PathBuf>,
    /// Collector URL; submission is skipped when absent
    pub server: Option<String>,
    /// Docker daemon address, overrides DOCKER_HOST
    pub docker_host: Option<String>,
}

pub async fn run(args: CheckArgs) -> Result<()> {
    let host = config::docker_host(args.docker_host.as_deref())?;
    let cert_dir = config::docker_cert_dir(args.tls_path.as_ref());

    info!("Connecting to Docker daemon at {}", host);
    let engine = EngineClient::connect(&host, cert_dir.as_deref())
        .map_err(|e| AuditError::target(format!("{:#}", e)))?;
    let target = Target::acquire(&engine).await?;

    let profile = resolve_profile(&args).await?;
    info!(
        "Profile loaded: {} categories, {} checks",
        profile.audit.len(),
        profile.check_count()
    );

    let registry = CheckRegistry::builtin();
    let results = dispatch(&profile, &registry, &target)?;

    let format = ReportFormat::from_selector(&args.output);
    let report = Report::new(&results);
    report.print(format)?;
    if let Some(path) = &args.report_file {
        report.write_file(path, format)?;
    }

    if let Some(server) = &args.server {
        let paths = config::CredentialPaths::from_env()?;
        let node_id = config::node_id()?;
        let credentials = ClientCredentials::load(&paths)?;
        let client = TransmissionClient::new(
            credentials,
            SubmitConfig::new(server.clone(), paths.token_password.clone()),
        )?;
        client.submit(&node_id, &results).await?;
        Printer::new().success("Results submitted to collector.");
    }

    Ok(())
}

/// Remote identifier wins when both sources are given; no source is a
/// configuration error.
async fn resolve_profile(args: &CheckArgs) -> Result<Profile, AuditError> {
    if let Some(id) = &args.remote_id {
        let server = args.server.as_deref().ok_or(AuditError::NoProfileSource)?;
        return Profile::fetch(server, id).await;
    }
    if let Some(path) = &args.profile {
        return Profile::from_file(path);
    }
    Err(AuditError::NoProfileSource)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_profile_source_is_rejected() {
        let err = resolve_profile(&CheckArgs::default()).await.unwrap_err();
        assert!(matches!(err, AuditError::NoProfileSource));
    }

    #[tokio::test]
    async fn remote_id_without_server_is_rejected() {
        let args = CheckArgs {
            remote_id: Some("baseline".to_string()),
            ..Default::default()
        };
        let err = resolve_profile(&args).await.unwrap_err();
        assert!(matches!(err, AuditError::NoProfileSource));
    }
}
