// External crates
use clap::Parser;
use tracing::debug;

// Internal imports
use uber_core::uber_error;
use uber_logging::{init_subscriber, LogSettings};
use uber_messages::{msg, MESSAGES};

// Local modules
mod cli;
mod commands;
mod context;
mod database;
mod progress;

use cli::Args;
use commands::execute_command;

fn main() {
    let args = Args::parse();

    // Tests expect clean output, so logging stays off in test mode
    let log_guard = if std::env::var("UBERSTEAD_TEST_MODE").is_err() {
        init_subscriber(&LogSettings::from_env().with_debug(args.debug))
    } else {
        None
    };

    debug!(command = ?args.command, "starting uberstead");

    if let Err(e) = execute_command(&args) {
        if e.is_fatal() {
            uber_error!("{}", e);
        } else {
            uber_error!("{}", msg!(MESSAGES.common.error_generic, error = e.to_string()));
        }
        drop(log_guard);
        std::process::exit(1);
    }
}
