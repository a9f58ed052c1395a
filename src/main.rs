//! taskq - Priority task queue with dependency-gated execution

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = taskq_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
