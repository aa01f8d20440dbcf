//! Audit profiles
//!
//! A profile is an ordered list of categories, each naming an ordered
//! checklist. The TOML array order is the execution order:
//!
//! ```toml
//! [[audit]]
//! name = "network"
//! checklist = ["check_icc", "check_bridge"]
//!
//! [[audit]]
//! name = "container"
//! checklist = ["check_privileged_containers"]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AuditError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub audit: Vec<Category>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub checklist: Vec<String>,
}

impl Profile {
    /// Load a profile from a local TOML file.
    pub fn from_file(path: &Path) -> Result<Self, AuditError> {
        if !path.exists() {
            return Err(AuditError::ProfileNotFound {
                path: path.display().to_string(),
            });
        }
        let raw = fs::read_to_string(path).map_err(|e| AuditError::ProfileParse {
            source_name: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&raw, &path.display().to_string())
    }

    /// Fetch a profile from the collector by identifier.
    pub async fn fetch(server: &str, id: &str) -> Result<Self, AuditError> {
        let url = format!("{}/profiles/{}", server.trim_end_matches('/'), id);
        info!("Fetching profile from {}", url);

        let response = reqwest::get(&url)
            .await
            .map_err(|e| AuditError::ProfileFetch {
                id: id.to_string(),
                message: e.to_string(),
            })?;
        if !response.status().is_success() {
            return Err(AuditError::ProfileFetch {
                id: id.to_string(),
                message: format!("server returned {}", response.status()),
            });
        }
        let body = response.text().await.map_err(|e| AuditError::ProfileFetch {
            id: id.to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&body, id)
    }

    fn parse(raw: &str, source_name: &str) -> Result<Self, AuditError> {
        toml::from_str(raw).map_err(|e| AuditError::ProfileParse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
    }

    /// Total number of check names across all categories.
    pub fn check_count(&self) -> usize {
        self.audit.iter().map(|c| c.checklist.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[[audit]]
name = "network"
checklist = ["check_icc", "check_bridge"]

[[audit]]
name = "container"
checklist = ["check_privileged_containers"]
"#;

    #[test]
    fn parses_categories_in_order() {
        let profile = Profile::parse(SAMPLE, "inline").unwrap();
        assert_eq!(profile.audit.len(), 2);
        assert_eq!(profile.audit[0].name, "network");
        assert_eq!(
            profile.audit[0].checklist,
            vec!["check_icc", "check_bridge"]
        );
        assert_eq!(profile.check_count(), 3);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let profile = Profile::from_file(file.path()).unwrap();
        assert_eq!(profile.audit[1].name, "container");
    }

    #[test]
    fn missing_file_is_profile_not_found() {
        let err = Profile::from_file(Path::new("/nonexistent/profile.toml")).unwrap_err();
        assert!(matches!(err, AuditError::ProfileNotFound { .. }));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Profile::parse("audit = 3", "inline").unwrap_err();
        assert!(matches!(err, AuditError::ProfileParse { .. }));
    }
}
