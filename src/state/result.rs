// Spec and suite result structures, as delivered by the test engine

use serde::{Deserialize, Serialize};

/// Spec status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecStatus {
    Passed,
    Failed,
    Pending,
    Disabled,
    /// Any status the engine sends that the reporter does not know about
    #[serde(other)]
    Other,
}

/// A single failed expectation inside a spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectationResult {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ExpectationResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

/// Spec result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecResult {
    pub status: SpecStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub failed_expectations: Vec<ExpectationResult>,
}

impl SpecResult {
    /// Create a result with the given status and no names
    pub fn with_status(status: SpecStatus) -> Self {
        Self {
            status,
            description: String::new(),
            full_name: String::new(),
            failed_expectations: Vec::new(),
        }
    }

    /// Create a pass result
    pub fn passed(description: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            full_name: full_name.into(),
            ..Self::with_status(SpecStatus::Passed)
        }
    }

    /// Create a fail result
    pub fn failed(
        description: impl Into<String>,
        full_name: impl Into<String>,
        failed_expectations: Vec<ExpectationResult>,
    ) -> Self {
        Self {
            description: description.into(),
            full_name: full_name.into(),
            failed_expectations,
            ..Self::with_status(SpecStatus::Failed)
        }
    }

    /// Create a disabled result
    pub fn disabled(description: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            full_name: full_name.into(),
            ..Self::with_status(SpecStatus::Disabled)
        }
    }
}

/// Suite result. Accepted for protocol completeness only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteResult {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub full_name: String,
}
