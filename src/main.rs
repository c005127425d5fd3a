//! tomatick - a terminal Pomodoro timer
//!
//! Alternates work and break phases for a number of rounds:
//! - 25 minutes of focused work
//! - 5 minutes of break
//! - 5 rounds
//!
//! Each phase start beeps and shows a desktop notification. Press q to stop.

use clap::{CommandFactory, Parser};

use tomatick::app::{self, AppOptions};
use tomatick::cli::{Cli, Display};
use tomatick::logging;

/// Main entry point
fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return;
    }

    let config = match cli.to_config() {
        Ok(config) => config,
        Err(e) => {
            Display::show_config_error(&e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    if let Err(e) = logging::init(cli.log_file.as_deref(), cli.verbose) {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    let options = AppOptions {
        notifier: cli.notifier_options(),
        tray: cli.tray,
    };

    match app::run(config, options) {
        Ok(outcome) => Display::show_summary(&outcome),
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "session aborted");
            Display::show_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
