//! Binary entrypoint for the `phonegen` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env is the normal case
    let _ = dotenvy::dotenv();
    phonegen::logging::init();
    phonegen::interrupt::install();

    match phonegen::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
