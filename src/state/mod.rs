// State module - per-run reporter state
// Counts and failure records accumulated between run start and run end

pub mod failure;
pub mod result;

pub use failure::FailureRecord;
pub use result::{ExpectationResult, SpecResult, SpecStatus, SuiteResult};

use serde::Serialize;
use std::fmt;

/// Lifecycle phase of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Final tally of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub spec_count: usize,
    pub failure_count: usize,
    pub elapsed_millis: u64,
}

impl RunSummary {
    /// Check if the run had no failing specs
    pub fn all_passed(&self) -> bool {
        self.failure_count == 0
    }
}

/// Run state owned by a reporter for the lifetime of one run
#[derive(Debug, Clone)]
pub struct RunState {
    phase: RunPhase,
    start_time_millis: Option<u64>,
    spec_count: usize,
    failure_count: usize,
    failed_specs: Vec<FailureRecord>,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    pub fn new() -> Self {
        Self {
            phase: RunPhase::Idle,
            start_time_millis: None,
            spec_count: 0,
            failure_count: 0,
            failed_specs: Vec::new(),
        }
    }

    /// Reset counters and enter the running phase
    pub fn start(&mut self, start_time_millis: u64) {
        *self = Self {
            phase: RunPhase::Running,
            start_time_millis: Some(start_time_millis),
            ..Self::new()
        };
    }

    /// Record a spec result. Returns the status that was counted, if any.
    pub fn record(&mut self, result: &SpecResult) -> Option<SpecStatus> {
        match result.status {
            SpecStatus::Passed => {
                self.spec_count += 1;
                Some(SpecStatus::Passed)
            }
            SpecStatus::Failed => {
                self.spec_count += 1;
                self.failure_count += 1;
                self.failed_specs
                    .push(FailureRecord::new(self.failure_count, result));
                Some(SpecStatus::Failed)
            }
            SpecStatus::Pending | SpecStatus::Disabled | SpecStatus::Other => None,
        }
    }

    /// Enter the done phase
    pub fn finish(&mut self) {
        self.phase = RunPhase::Done;
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn start_time_millis(&self) -> Option<u64> {
        self.start_time_millis
    }

    pub fn spec_count(&self) -> usize {
        self.spec_count
    }

    pub fn failure_count(&self) -> usize {
        self.failure_count
    }

    pub fn failed_specs(&self) -> &[FailureRecord] {
        &self.failed_specs
    }
}
