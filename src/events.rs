// Lifecycle event stream - newline-delimited JSON recorded from a test engine

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::report::{ReportError, Reporter};
use crate::state::{SpecResult, SuiteResult};

/// Errors raised while reading or replaying an event stream
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("failed to read event stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid event on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Lifecycle event as emitted by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    RunStarted,
    SpecFinished(SpecResult),
    SuiteFinished(SuiteResult),
    RunFinished,
}

impl RunEvent {
    /// Deliver this event to a reporter
    pub fn dispatch(&self, reporter: &mut dyn Reporter) -> Result<(), ReportError> {
        match self {
            Self::RunStarted => reporter.on_run_start(),
            Self::SpecFinished(result) => reporter.on_spec_result(result),
            Self::SuiteFinished(result) => reporter.on_suite_result(result),
            Self::RunFinished => reporter.on_run_end(),
        }
    }
}

/// Parse a single event line
pub fn parse_event(line: &str) -> Result<RunEvent, serde_json::Error> {
    serde_json::from_str(line)
}

/// Read all events from a reader, skipping blank lines
pub fn read_events(reader: impl BufRead) -> Result<Vec<RunEvent>, EventError> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let event = parse_event(trimmed).map_err(|source| EventError::Parse {
            line: index + 1,
            source,
        })?;
        trace!(line = index + 1, ?event, "parsed event");
        events.push(event);
    }

    debug!(count = events.len(), "read event stream");
    Ok(events)
}

/// Feed events to a reporter in order, stopping at the first error
pub fn replay<'a>(
    events: impl IntoIterator<Item = &'a RunEvent>,
    reporter: &mut dyn Reporter,
) -> Result<(), EventError> {
    for event in events {
        event.dispatch(reporter)?;
    }
    Ok(())
}
