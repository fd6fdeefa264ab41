// CLI argument definitions using Clap

use clap::Parser;
use std::path::PathBuf;

use crate::config::ColorMode;

/// Replay recorded test-run lifecycle events through the dot console reporter
#[derive(Parser, Debug)]
#[command(name = "dotspec")]
#[command(author = "dotspec team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render a dot-style console report from a test event stream", long_about = None)]
pub struct Cli {
    /// Newline-delimited JSON event file (reads stdin when omitted or "-")
    #[arg(value_name = "EVENTS_FILE")]
    pub events: Option<PathBuf>,

    /// When to color progress characters (auto, always, never)
    #[arg(long, value_name = "WHEN")]
    pub color: Option<ColorMode>,

    /// Disable colored output
    #[arg(short = 'c', long, default_value_t = false, conflicts_with = "color")]
    pub no_color: bool,

    /// Enable verbose debug output
    #[arg(short = 'v', long, default_value_t = false)]
    pub verbose: bool,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,

    /// Print shell completion script (bash, zsh, fish, elvish, powershell)
    #[arg(long, value_name = "SHELL_TYPE", value_parser = ["bash", "zsh", "fish", "elvish", "powershell"])]
    pub completion: Option<String>,
}

impl Cli {
    /// Color mode requested on the command line, if any
    pub fn color_flag(&self) -> Option<ColorMode> {
        if self.no_color {
            Some(ColorMode::Never)
        } else {
            self.color
        }
    }

    /// Events file, or `None` for stdin
    pub fn events_path(&self) -> Option<&PathBuf> {
        self.events
            .as_ref()
            .filter(|path| path.as_os_str() != "-")
    }
}
