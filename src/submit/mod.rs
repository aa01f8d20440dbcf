//! Secure result submission
//!
//! Delivers the result list to the collector with two layers of
//! authentication: the transport presents an X.509 client certificate
//! (mutual TLS), and the request carries a short-lived bearer token
//! obtained through a basic-auth exchange. One client is built per run and
//! reused for both the exchange and the submission.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::audit::CheckResult;
use crate::config::CredentialPaths;
use crate::errors::AuditError;

/// Fixed username for the token exchange
pub const TOKEN_USER: &str = "defaultUser";
/// Token-issuing endpoint on the collector deployment
pub const DEFAULT_TOKEN_URL: &str = "https://server:8000/token";

/// Client certificate and key, loaded and parsed
pub struct ClientCredentials {
    identity: reqwest::Identity,
}

impl ClientCredentials {
    /// Load the identity from the environment-designated PEM files.
    pub fn load(paths: &CredentialPaths) -> Result<Self, AuditError> {
        let mut pem = fs::read(&paths.cert).map_err(|e| {
            AuditError::credentials(format!("reading {}: {}", paths.cert.display(), e))
        })?;
        pem.extend(fs::read(&paths.key).map_err(|e| {
            AuditError::credentials(format!("reading {}: {}", paths.key.display(), e))
        })?);
        let identity = reqwest::Identity::from_pem(&pem)
            .map_err(|e| AuditError::credentials(format!("parsing client certificate: {}", e)))?;
        Ok(Self { identity })
    }
}

/// Where and how to submit
#[derive(Debug, Clone)]
pub struct SubmitConfig {
    /// Collector URL receiving the POST
    pub collector_url: String,
    /// Token-issuing endpoint
    pub token_url: String,
    /// File holding the token-exchange password
    pub password_path: PathBuf,
    /// The collector is pinned by the client certificate on a closed
    /// network; its own certificate is not verified.
    pub accept_invalid_certs: bool,
}

impl SubmitConfig {
    pub fn new(collector_url: impl Into<String>, password_path: impl Into<PathBuf>) -> Self {
        Self {
            collector_url: collector_url.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            password_path: password_path.into(),
            accept_invalid_certs: true,
        }
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }
}

/// Submission payload: the node identifier and the serialized results.
/// Both fields travel base64-encoded, matching the collector's decoder.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionRequest {
    #[serde(rename = "NodeID", with = "base64_bytes")]
    pub node_id: Vec<u8>,
    #[serde(rename = "Results", with = "base64_bytes")]
    pub results: Vec<u8>,
}

impl SubmissionRequest {
    /// Build the payload from the dispatcher's result list.
    pub fn new(node_id: &[u8], results: &[CheckResult]) -> Result<Self, AuditError> {
        let serialized = serde_json::to_vec(results)
            .map_err(|e| AuditError::submission(format!("serializing results: {}", e)))?;
        Ok(Self {
            node_id: node_id.to_vec(),
            results: serialized,
        })
    }
}

mod base64_bytes {
    use super::BASE64;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64.decode(encoded).map_err(serde::de::Error::custom)
    }
}

/// HTTP client for the token exchange and the result submission
pub struct TransmissionClient {
    http: reqwest::Client,
    config: SubmitConfig,
}

impl TransmissionClient {
    /// Build the mutual-TLS client. Credential loading has already
    /// succeeded by the time this runs, so the client always presents the
    /// identity; there is no unauthenticated fallback.
    pub fn new(credentials: ClientCredentials, config: SubmitConfig) -> Result<Self, AuditError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .use_rustls_tls()
            .identity(credentials.identity)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| AuditError::credentials(format!("building TLS client: {}", e)))?;
        Ok(Self { http, config })
    }

    /// Client with caller-supplied HTTP transport, for tests or custom TLS.
    pub fn with_client(http: reqwest::Client, config: SubmitConfig) -> Self {
        Self { http, config }
    }

    /// Exchange the basic-auth password for a bearer token. The full
    /// response body is the token, verbatim.
    pub async fn exchange_token(&self) -> Result<String, AuditError> {
        let password = fs::read_to_string(&self.config.password_path).map_err(|e| {
            AuditError::credentials(format!(
                "reading {}: {}",
                self.config.password_path.display(),
                e
            ))
        })?;

        debug!("Requesting token from {}", self.config.token_url);
        let response = self
            .http
            .get(&self.config.token_url)
            .basic_auth(TOKEN_USER, Some(password))
            .send()
            .await
            .map_err(|e| AuditError::TokenTransport {
                message: e.to_string(),
            })?;

        if response.status().as_u16() != 200 {
            return Err(AuditError::TokenStatus {
                status: response.status().as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| AuditError::TokenTransport {
                message: e.to_string(),
            })
    }

    /// Submit the result list. The token exchange always completes before
    /// the POST starts.
    pub async fn submit(&self, node_id: &[u8], results: &[CheckResult]) -> Result<(), AuditError> {
        let token = self.exchange_token().await?;
        let payload = SubmissionRequest::new(node_id, results)?;

        info!(
            "Submitting {} results to {}",
            results.len(),
            self.config.collector_url
        );
        let response = self
            .http
            .post(&self.config.collector_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AuditError::submission(e.to_string()))?;

        // The collector's body is not inspected beyond completion.
        let status = response.status();
        let _ = response.bytes().await;
        if !status.is_success() {
            return Err(AuditError::submission(format!(
                "collector returned {}",
                status
            )));
        }
        Ok(())
    }
}
