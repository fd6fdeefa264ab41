// Console reporter - dot progress line followed by a failure listing and summary

use std::fmt::Write as _;
use std::io::{self, Write};

use tracing::{debug, warn};

use super::format::{Color, colorize, count_of, format_elapsed};
use super::{ReportError, Reporter};
use crate::state::{
    FailureRecord, RunPhase, RunState, RunSummary, SpecResult, SpecStatus, SuiteResult,
};
use crate::time::{Clock, SystemClock};

type PrintFn = Box<dyn FnMut(&str) + Send>;
type CompleteFn = Box<dyn FnOnce() + Send>;

/// Construction-time configuration for [`ConsoleReporter`]
pub struct ConsoleOptions {
    print: Option<PrintFn>,
    show_colors: bool,
    clock: Option<Box<dyn Clock + Send>>,
    on_complete: Option<CompleteFn>,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleOptions {
    pub fn new() -> Self {
        Self {
            print: None,
            show_colors: false,
            clock: None,
            on_complete: None,
        }
    }

    /// Output sink. Defaults to stdout.
    pub fn print(mut self, print: impl FnMut(&str) + Send + 'static) -> Self {
        self.print = Some(Box::new(print));
        self
    }

    /// Color the per-spec progress characters
    pub fn show_colors(mut self, show_colors: bool) -> Self {
        self.show_colors = show_colors;
        self
    }

    /// Clock used for elapsed time. Defaults to the wall clock.
    pub fn now(mut self, clock: impl Clock + Send + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Callback invoked once the summary has been printed
    pub fn on_complete(mut self, on_complete: impl FnOnce() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }
}

fn print_to_stdout(text: &str) {
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

/// Console reporter
pub struct ConsoleReporter {
    print: PrintFn,
    show_colors: bool,
    clock: Box<dyn Clock + Send>,
    on_complete: Option<CompleteFn>,
    state: RunState,
    summary: Option<RunSummary>,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(ConsoleOptions::default())
    }
}

impl ConsoleReporter {
    /// Create new console reporter
    pub fn new(options: ConsoleOptions) -> Self {
        Self {
            print: options.print.unwrap_or_else(|| Box::new(print_to_stdout)),
            show_colors: options.show_colors,
            clock: options.clock.unwrap_or_else(|| Box::new(SystemClock)),
            on_complete: options.on_complete,
            state: RunState::new(),
            summary: None,
        }
    }

    /// Current run state
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Summary of the finished run, once `run_finished` has completed
    pub fn summary(&self) -> Option<RunSummary> {
        self.summary
    }

    pub fn run_started(&mut self) -> Result<(), ReportError> {
        self.expect_phase("run_started", &[RunPhase::Idle])?;

        let now = self.clock.now_millis();
        self.state.start(now);
        debug!(start_time_millis = now, "run started");

        (self.print)("Started\n");
        Ok(())
    }

    pub fn spec_finished(&mut self, result: &SpecResult) -> Result<(), ReportError> {
        self.expect_phase("spec_finished", &[RunPhase::Idle, RunPhase::Running])?;

        let mark = match self.state.record(result) {
            Some(SpecStatus::Passed) => colorize(".", Color::Green, self.show_colors),
            Some(_) => colorize("F", Color::Red, self.show_colors),
            None => {
                debug!(status = ?result.status, full_name = %result.full_name, "spec not counted");
                return Ok(());
            }
        };

        (self.print)(&*mark);
        Ok(())
    }

    pub fn suite_finished(&mut self, result: &SuiteResult) -> Result<(), ReportError> {
        self.expect_phase("suite_finished", &[RunPhase::Idle, RunPhase::Running])?;
        debug!(full_name = %result.full_name, "suite finished");
        Ok(())
    }

    pub fn run_finished(&mut self) -> Result<RunSummary, ReportError> {
        self.expect_phase("run_finished", &[RunPhase::Idle, RunPhase::Running])?;

        // Terminate the progress line
        (self.print)("\n");

        if !self.state.failed_specs().is_empty() {
            let section = render_failures(self.state.failed_specs());
            (self.print)(&section);
        }

        (self.print)("\n");

        let elapsed_millis = self.elapsed_millis();
        (self.print)(&format!("Finished in {}\n", format_elapsed(elapsed_millis)));

        let summary = RunSummary {
            spec_count: self.state.spec_count(),
            failure_count: self.state.failure_count(),
            elapsed_millis,
        };
        (self.print)(&format!(
            "{}, {}\n",
            count_of("spec", summary.spec_count),
            count_of("failure", summary.failure_count)
        ));

        self.state.finish();
        self.summary = Some(summary);
        debug!(?summary, "run finished");

        if let Some(on_complete) = self.on_complete.take() {
            on_complete();
        }

        Ok(summary)
    }

    fn elapsed_millis(&self) -> u64 {
        match self.state.start_time_millis() {
            Some(start) => self.clock.now_millis().saturating_sub(start),
            None => {
                warn!("run finished without a recorded start time, reporting 0 seconds elapsed");
                0
            }
        }
    }

    fn expect_phase(&self, event: &'static str, accepted: &[RunPhase]) -> Result<(), ReportError> {
        let phase = self.state.phase();
        if accepted.contains(&phase) {
            Ok(())
        } else {
            Err(ReportError::OutOfOrder { event, phase })
        }
    }
}

/// Render the numbered failure listing. Stack traces are emitted verbatim.
pub fn render_failures(records: &[FailureRecord]) -> String {
    let mut out = String::from("Failures:\n");
    for record in records {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}) {}", record.index(), record.full_name());
        for expectation in record.failed_expectations() {
            let _ = writeln!(out, "{}", expectation.message);
            if let Some(stack) = &expectation.stack {
                let _ = writeln!(out, "{}", stack);
            }
        }
    }
    out
}

impl Reporter for ConsoleReporter {
    fn on_run_start(&mut self) -> Result<(), ReportError> {
        self.run_started()
    }

    fn on_spec_result(&mut self, result: &SpecResult) -> Result<(), ReportError> {
        self.spec_finished(result)
    }

    fn on_suite_result(&mut self, result: &SuiteResult) -> Result<(), ReportError> {
        self.suite_finished(result)
    }

    fn on_run_end(&mut self) -> Result<(), ReportError> {
        self.run_finished().map(|_| ())
    }
}
