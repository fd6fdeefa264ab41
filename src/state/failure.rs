// Failure records retained for the end-of-run summary

use crate::state::{ExpectationResult, SpecResult};

/// Numbered failure captured when a failing spec is reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    index: usize,
    full_name: String,
    failed_expectations: Vec<ExpectationResult>,
}

impl FailureRecord {
    /// Build a record from a failing spec. `index` is 1-based.
    pub fn new(index: usize, result: &SpecResult) -> Self {
        Self {
            index,
            full_name: result.full_name.clone(),
            failed_expectations: result.failed_expectations.clone(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn failed_expectations(&self) -> &[ExpectationResult] {
        &self.failed_expectations
    }
}
