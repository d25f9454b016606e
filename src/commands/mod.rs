//! Command dispatch.

pub mod generate;

use std::env;
use std::io;
use std::path::PathBuf;

use tracing::info;

use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::cli::Cli;
use crate::context::ServiceContext;
use crate::interaction::Presets;
use generate::{RunOptions, RunOutcome};

/// Environment variable naming a directory to record port interactions into.
pub const RECORD_ENV: &str = "PHONEGEN_RECORD";

/// Environment variable naming a recording directory or cassette file to
/// replay instead of the terminal.
pub const REPLAY_ENV: &str = "PHONEGEN_REPLAY";

/// Build the service context for this run and execute it.
///
/// `PHONEGEN_REPLAY` answers every question (and clock read) from a recording
/// directory of per-port cassettes or from a single cassette file; otherwise
/// `PHONEGEN_RECORD=<dir>` records the live session into per-port cassettes
/// in that directory.
///
/// # Errors
///
/// Returns a printable message if the run fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let (ctx, session) = if let Ok(path) = env::var(REPLAY_ENV) {
        info!(cassette = %path, "replaying session");
        let path = PathBuf::from(path);
        let ctx = if path.is_dir() {
            ServiceContext::replaying_from(&CassetteConfig::in_dir(&path)?)?
        } else {
            ServiceContext::replaying(&path)?
        };
        (ctx, None)
    } else if let Ok(dir) = env::var(RECORD_ENV) {
        let (ctx, session) = ServiceContext::recording_at(PathBuf::from(dir))?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    let presets = Presets::from(cli);
    let options = RunOptions { progress: !cli.no_progress };
    let result = generate::run_with_context(&ctx, &mut io::stdout(), &presets, options);

    // Finish recording even when the run failed
    if let Some(session) = session {
        // Drop the context first so the recorders are no longer shared
        drop(ctx);
        finish_recording(session)?;
    }

    match result? {
        RunOutcome::Completed { sink, count } => info!(%sink, count, "run completed"),
        RunOutcome::Cancelled => info!("run cancelled"),
    }
    Ok(())
}

fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
