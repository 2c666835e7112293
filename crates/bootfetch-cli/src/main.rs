use bootfetch_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; fall back to stderr if the
    // state dir is unusable.
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("log file unavailable, logging to stderr: {:#}", e);
    }

    // Parse CLI and dispatch.
    if let Err(err) = Cli::run_from_args().await {
        eprintln!("{}", cli::error_message(&err));
        std::process::exit(1);
    }
}
