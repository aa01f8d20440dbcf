//! Environment-derived run configuration
//!
//! All environment access lives here so the rest of the pipeline works on
//! explicit values. Variable names match the collector deployment's
//! conventions and are not renamed lightly.

use std::env;
use std::path::PathBuf;

use crate::errors::AuditError;

/// Client certificate presented to the collector
pub const ENV_USER_CERT: &str = "X509_USER_CERT";
/// Private key for the client certificate
pub const ENV_USER_KEY: &str = "X509_USER_KEY";
/// File holding the token-exchange password
pub const ENV_TOKEN_PASSWORD: &str = "TOKEN_PASSWORD";
/// Identifier for this node in submitted results
pub const ENV_NODE: &str = "NODE";
/// Docker daemon address, e.g. tcp://127.0.0.1:2376
pub const ENV_DOCKER_HOST: &str = "DOCKER_HOST";
/// Directory with cert.pem/key.pem/ca.pem for a TLS daemon
pub const ENV_DOCKER_CERT_PATH: &str = "DOCKER_CERT_PATH";

fn require(name: &'static str) -> Result<String, AuditError> {
    env::var(name).map_err(|_| AuditError::MissingEnvVar {
        name: name.to_string(),
    })
}

/// File paths for the collector-facing credential material
#[derive(Debug, Clone)]
pub struct CredentialPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
    pub token_password: PathBuf,
}

impl CredentialPaths {
    pub fn from_env() -> Result<Self, AuditError> {
        Ok(Self {
            cert: PathBuf::from(require(ENV_USER_CERT)?),
            key: PathBuf::from(require(ENV_USER_KEY)?),
            token_password: PathBuf::from(require(ENV_TOKEN_PASSWORD)?),
        })
    }
}

/// Resolve the Docker daemon address: CLI flag wins over DOCKER_HOST.
pub fn docker_host(flag: Option<&str>) -> Result<String, AuditError> {
    if let Some(host) = flag {
        return Ok(host.to_string());
    }
    env::var(ENV_DOCKER_HOST).map_err(|_| AuditError::MissingEnvVar {
        name: ENV_DOCKER_HOST.to_string(),
    })
}

/// Resolve the daemon certificate directory: CLI flag wins over env.
pub fn docker_cert_dir(flag: Option<&PathBuf>) -> Option<PathBuf> {
    flag.cloned()
        .or_else(|| env::var(ENV_DOCKER_CERT_PATH).ok().map(PathBuf::from))
}

/// Node identifier included in the submission payload, as raw bytes.
pub fn node_id() -> Result<Vec<u8>, AuditError> {
    Ok(require(ENV_NODE)?.into_bytes())
}
