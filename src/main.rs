//! prereq CLI - order items by their prerequisites

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = prereq::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
