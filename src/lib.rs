pub mod cli;
pub mod config;
pub mod events;
pub mod logging;
pub mod report;
pub mod state;
pub mod time;

pub use events::{RunEvent, read_events, replay};
pub use report::{ConsoleOptions, ConsoleReporter, Reporter, ReporterSet};
