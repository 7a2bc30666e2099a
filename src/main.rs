//! worklog - daily work log extraction

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = worklog_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
