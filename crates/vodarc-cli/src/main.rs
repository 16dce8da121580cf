use vodarc_core::logging;

mod cli;

use crate::cli::{Cli, RunStatus};

fn main() {
    // File logging first; a read-only state dir must not stop the archiver.
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", e);
    }

    match Cli::run_from_args() {
        Ok(RunStatus::Clean) => {}
        Ok(RunStatus::StrictFailures) => std::process::exit(2),
        Err(err) => {
            eprintln!("vodarc error: {:#}", err);
            std::process::exit(1);
        }
    }
}
