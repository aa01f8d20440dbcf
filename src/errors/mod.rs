//! Error types for the audit pipeline
//!
//! Every fatal condition in a run maps to one `AuditError` variant so that
//! callers (the CLI, tests, future retry wrappers) can observe the failure
//! instead of the process terminating from deep inside the pipeline.

use miette::Diagnostic;
use thiserror::Error;

/// Fatal errors that abort an audit run
#[derive(Error, Debug, Diagnostic)]
pub enum AuditError {
    /// A profile named a check that is not in the registry
    #[error("No check named '{name}'")]
    #[diagnostic(
        code(dockaudit::unknown_check),
        help("Run `dockaudit checks` to list the available check names")
    )]
    UnknownCheck { name: String },

    /// Local profile file does not exist
    #[error("Invalid profile path: {path}")]
    #[diagnostic(
        code(dockaudit::profile::not_found),
        help("Pass a TOML profile with -f/--profile, or a remote profile id together with --server")
    )]
    ProfileNotFound { path: String },

    /// Profile file or body could not be parsed
    #[error("Failed to parse profile {source_name}: {message}")]
    #[diagnostic(code(dockaudit::profile::parse))]
    ProfileParse {
        source_name: String,
        message: String,
    },

    /// Remote profile fetch failed
    #[error("Unable to fetch profile '{id}': {message}")]
    #[diagnostic(code(dockaudit::profile::fetch))]
    ProfileFetch { id: String, message: String },

    /// No profile source was given on the command line
    #[error("No profile source specified")]
    #[diagnostic(
        code(dockaudit::profile::missing),
        help("Use -f/--profile <file> for a local profile, or pass a remote profile id together with --server")
    )]
    NoProfileSource,

    /// Client certificate, key, or token password material unusable
    #[error("Could not load credentials: {message}")]
    #[diagnostic(
        code(dockaudit::credentials),
        help("Check X509_USER_CERT, X509_USER_KEY and TOKEN_PASSWORD point at readable PEM/password files")
    )]
    CredentialLoad { message: String },

    /// Token endpoint answered with a non-200 status
    #[error("Token exchange failed with status {status}")]
    #[diagnostic(code(dockaudit::token::status))]
    TokenStatus { status: u16 },

    /// Token exchange request could not be completed
    #[error("Token exchange request failed: {message}")]
    #[diagnostic(code(dockaudit::token::transport))]
    TokenTransport { message: String },

    /// Result submission to the collector failed
    #[error("Could not submit results: {message}")]
    #[diagnostic(code(dockaudit::submission))]
    Submission { message: String },

    /// The Docker daemon could not be reached or inspected
    #[error("Unable to connect to Docker daemon: {message}")]
    #[diagnostic(
        code(dockaudit::target),
        help("Check DOCKER_HOST (or -d/--docker-host) and, for TLS daemons, DOCKER_CERT_PATH")
    )]
    TargetConnection { message: String },

    /// Required environment variable is not set
    #[error("Missing environment variable: {name}")]
    #[diagnostic(
        code(dockaudit::env::missing),
        help("Set the environment variable:\n  export {name}=<value>")
    )]
    MissingEnvVar { name: String },
}

impl AuditError {
    pub fn unknown_check(name: impl Into<String>) -> Self {
        Self::UnknownCheck { name: name.into() }
    }

    pub fn credentials(message: impl Into<String>) -> Self {
        Self::CredentialLoad {
            message: message.into(),
        }
    }

    pub fn target(message: impl Into<String>) -> Self {
        Self::TargetConnection {
            message: message.into(),
        }
    }

    pub fn submission(message: impl Into<String>) -> Self {
        Self::Submission {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_check_names_the_check() {
        let err = AuditError::unknown_check("check_missing");
        assert_eq!(err.to_string(), "No check named 'check_missing'");
    }

    #[test]
    fn token_status_carries_status() {
        let err = AuditError::TokenStatus { status: 401 };
        assert!(err.to_string().contains("401"));
    }
}
