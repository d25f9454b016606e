//! Core library for the `phonegen` CLI.
//!
//! Given the first 3 and last 2 digits of a 10-digit phone number, `phonegen`
//! enumerates all 100,000 candidates for the unknown middle and prints them
//! or saves them to a file.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod context;
pub mod emitter;
pub mod interaction;
pub mod interrupt;
pub mod logging;
pub mod phone;
pub mod ports;
pub mod progress;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or the run fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print().map_err(|e| e.to_string())?;
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli)
}
