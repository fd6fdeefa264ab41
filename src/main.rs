// Main entry point for dotspec

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{debug, info};

use dotspec::cli::Cli;
use dotspec::config::{self, Config};
use dotspec::events;
use dotspec::report::{ConsoleOptions, ConsoleReporter};
use dotspec::time;

use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

fn main() -> Result<ExitCode> {
    // Load configuration from file (if exists)
    let config = Config::load();

    let cli = Cli::parse();

    dotspec::logging::init(cli.verbose);

    if cli.verbose {
        info!("Starting dotspec v{}", env!("CARGO_PKG_VERSION"));
    }

    if let Some(ref shell) = cli.completion {
        print_completion(shell)?;
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(ref path) = cli.init_config {
        std::fs::write(path, Config::default().to_toml())
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        println!("Configuration written to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let color_mode = Config::color_mode(config.as_ref(), cli.color_flag());

    if cli.config {
        print_config(config.as_ref(), color_mode);
        return Ok(ExitCode::SUCCESS);
    }

    let events = match cli.events_path() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open event file: {}", path.display()))?;
            events::read_events(BufReader::new(file))
        }
        None => events::read_events(io::stdin().lock()),
    }
    .context("Failed to read lifecycle events")?;

    debug!(
        count = events.len(),
        started_at = %time::now_rfc3339(),
        "replaying events"
    );

    let completed = Arc::new(AtomicBool::new(false));
    let mut reporter = ConsoleReporter::new(
        ConsoleOptions::new()
            .show_colors(color_mode.resolve())
            .on_complete({
                let completed = Arc::clone(&completed);
                move || completed.store(true, Ordering::SeqCst)
            }),
    );

    events::replay(&events, &mut reporter).context("Failed to replay lifecycle events")?;

    match reporter.summary() {
        Some(summary) if completed.load(Ordering::SeqCst) => {
            debug!(
                summary = %serde_json::to_string(&summary).unwrap_or_default(),
                "run complete"
            );
            Ok(if summary.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        _ => anyhow::bail!("Event stream ended before run_finished"),
    }
}

fn print_completion(shell: &str) -> Result<()> {
    use clap_complete::Shell;

    let shell: Shell = shell
        .parse()
        .map_err(|e| anyhow::anyhow!("Unsupported shell {}: {}", shell, e))?;
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

fn print_config(config: Option<&Config>, color_mode: config::ColorMode) {
    println!("Current configuration:");
    println!("    Color: {:?} (resolved: {})", color_mode, color_mode.resolve());

    if let Some(cfg) = config {
        println!("\n  Configuration file loaded:");
        println!("    Color: {:?}", cfg.output.color);
    } else {
        println!("\n  No configuration file loaded");
        println!(
            "  Create one with: dotspec --init-config {}",
            config::CONFIG_FILE_NAME
        );
    }

    println!("\n  Environment variables:");
    match std::env::var(config::ENV_DOTSPEC_COLOR) {
        Ok(value) => println!("    {}: {}", config::ENV_DOTSPEC_COLOR, value),
        Err(_) => println!("    {}: not set (default: auto)", config::ENV_DOTSPEC_COLOR),
    }

    println!("\nConfiguration precedence:");
    println!("  1. Command-line arguments (highest)");
    println!("  2. Configuration file");
    println!("  3. Environment variables");
    println!("  4. Built-in defaults (lowest)");
}
