//! Check results
//!
//! One `CheckResult` per executed check. Results are immutable once
//! produced and serialize identically for the local report and the
//! collector submission.

use serde::{Deserialize, Serialize};

use crate::ui::OutputMode;

/// Outcome class of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The audited configuration satisfies the check
    Pass,
    /// The audited configuration violates the check
    Fail,
    /// The check could not evaluate the target
    Error,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Error => "ERROR",
        }
    }

    /// Status label, colored when the output mode allows it.
    pub fn display(&self, mode: OutputMode) -> String {
        use colored::Colorize;
        if !mode.colors_enabled() {
            return self.as_str().to_string();
        }
        match self {
            CheckStatus::Pass => self.as_str().green().to_string(),
            CheckStatus::Fail => self.as_str().red().to_string(),
            CheckStatus::Error => self.as_str().yellow().to_string(),
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome record for one executed check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check name as registered
    pub name: String,
    pub status: CheckStatus,
    /// Detail for failing or erroring checks; empty on a clean pass
    pub output: String,
}

impl CheckResult {
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Pass,
            output: String::new(),
        }
    }

    pub fn fail(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Fail,
            output: output.into(),
        }
    }

    pub fn error(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Error,
            output: output.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_status() {
        assert_eq!(CheckResult::pass("a").status, CheckStatus::Pass);
        assert_eq!(CheckResult::fail("a", "bad").status, CheckStatus::Fail);
        assert_eq!(CheckResult::error("a", "boom").status, CheckStatus::Error);
    }

    #[test]
    fn serializes_with_lowercase_status() {
        let json = serde_json::to_string(&CheckResult::fail("check_icc", "icc enabled")).unwrap();
        assert!(json.contains("\"status\":\"fail\""));
        assert!(json.contains("\"name\":\"check_icc\""));
    }

    #[test]
    fn json_round_trip_preserves_content() {
        let results = vec![
            CheckResult::pass("check_one"),
            CheckResult::fail("check_two", "detail"),
            CheckResult::error("check_three", "unreachable"),
        ];
        let json = serde_json::to_string(&results).unwrap();
        let decoded: Vec<CheckResult> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, results);
    }

    #[test]
    fn plain_mode_display_is_uncolored() {
        assert_eq!(CheckStatus::Fail.display(OutputMode::Plain), "FAIL");
    }
}
