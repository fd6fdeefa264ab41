// Report module - lifecycle observers and console output

pub mod console;
pub mod format;

use crate::state::{RunPhase, SpecResult, SuiteResult};
pub use console::{ConsoleOptions, ConsoleReporter};
pub use format::{Color, colorize, format_elapsed, pluralize};

/// Errors raised by reporters
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A lifecycle event arrived in a phase that does not accept it
    #[error("{event} received while run is {phase}")]
    OutOfOrder { event: &'static str, phase: RunPhase },
}

/// Reporter trait
///
/// Implemented by every reporter variant. The engine calls these hooks
/// synchronously, in lifecycle order.
pub trait Reporter: Send {
    /// Called when the run starts
    fn on_run_start(&mut self) -> Result<(), ReportError>;

    /// Called when a spec finishes
    fn on_spec_result(&mut self, result: &SpecResult) -> Result<(), ReportError>;

    /// Called when a suite finishes
    fn on_suite_result(&mut self, result: &SuiteResult) -> Result<(), ReportError>;

    /// Called when the entire run finishes
    fn on_run_end(&mut self) -> Result<(), ReportError>;
}

/// Ordered set of reporters that receive every lifecycle event
#[derive(Default)]
pub struct ReporterSet {
    reporters: Vec<Box<dyn Reporter>>,
}

impl ReporterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reporter. Events reach reporters in registration order.
    pub fn register(&mut self, reporter: impl Reporter + 'static) {
        self.reporters.push(Box::new(reporter));
    }

    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }
}

impl Reporter for ReporterSet {
    fn on_run_start(&mut self) -> Result<(), ReportError> {
        self.reporters.iter_mut().try_for_each(|r| r.on_run_start())
    }

    fn on_spec_result(&mut self, result: &SpecResult) -> Result<(), ReportError> {
        self.reporters
            .iter_mut()
            .try_for_each(|r| r.on_spec_result(result))
    }

    fn on_suite_result(&mut self, result: &SuiteResult) -> Result<(), ReportError> {
        self.reporters
            .iter_mut()
            .try_for_each(|r| r.on_suite_result(result))
    }

    fn on_run_end(&mut self) -> Result<(), ReportError> {
        self.reporters.iter_mut().try_for_each(|r| r.on_run_end())
    }
}
