//! The generation run: ask, emit, report.

use std::io::Write;

use tracing::{info, warn};

use crate::cli::Cli;
use crate::context::ServiceContext;
use crate::emitter::emit_to_sink;
use crate::interaction::{collect_request, GenerationRequest, Presets};
use crate::interrupt;
use crate::phone::{with_thousands, OutputMode, OutputSink, MIDDLE_COUNT};
use crate::progress::ProgressBar;

/// Message printed when the operator backs out of a question.
pub const CANCELLED_MESSAGE: &str = "Process cancelled by user. Exiting.";

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every combination was delivered to `sink`.
    Completed {
        /// Where the numbers went.
        sink: OutputSink,
        /// How many numbers were emitted.
        count: u64,
    },
    /// The operator cancelled one of the questions.
    Cancelled,
}

/// Options that shape the run but are not answers to questions.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Draw the progress bar on stderr.
    pub progress: bool,
}

impl From<&Cli> for Presets {
    fn from(cli: &Cli) -> Self {
        if cli.output == Some(OutputMode::Console) && cli.file.is_some() {
            warn!("--file is ignored with --output console");
        }
        Self {
            prefix: cli.prefix.clone(),
            suffix: cli.suffix.clone(),
            output: cli.output,
            file: cli.file.clone(),
        }
    }
}

/// Runs one interactive generation pass against `ctx`, writing operator
/// messages to `out`.
///
/// # Errors
///
/// Returns a printable message if the terminal fails or the sink cannot be
/// written. Cancellation is not an error.
pub fn run_with_context(
    ctx: &ServiceContext,
    out: &mut dyn Write,
    presets: &Presets,
    options: RunOptions,
) -> Result<RunOutcome, String> {
    print_banner(out)?;

    let Some(request) = collect_request(ctx.prompt.as_ref(), out, presets)? else {
        info!("operator cancelled");
        say(out, &format!("\n{CANCELLED_MESSAGE}"))?;
        return Ok(RunOutcome::Cancelled);
    };

    let count = generate(ctx, out, &request, options)?;
    let summary = match &request.sink {
        OutputSink::Console => {
            format!("Successfully printed {} combinations.", with_thousands(count))
        }
        OutputSink::File(path) => format!(
            "Successfully saved {} combinations to {}.",
            with_thousands(count),
            path.display()
        ),
    };
    say(out, &format!("\n{summary}"))?;
    Ok(RunOutcome::Completed { sink: request.sink, count })
}

fn print_banner(out: &mut dyn Write) -> Result<(), String> {
    say(out, "=== Phone Number Combination Generator ===")?;
    say(
        out,
        "\nThis tool will help you generate all possible 10-digit phone numbers\n\
         based on the first 3 and last 2 known digits.\n",
    )
}

/// Announces the run, then emits with a progress bar on stderr.
///
/// From here on an interrupt is reported as a failed run.
fn generate(
    ctx: &ServiceContext,
    out: &mut dyn Write,
    request: &GenerationRequest,
    options: RunOptions,
) -> Result<u64, String> {
    let total = with_thousands(u64::from(MIDDLE_COUNT));
    let GenerationRequest { prefix, suffix, sink } = request;
    let label = match sink {
        OutputSink::Console => {
            say(
                out,
                &format!(
                    "\nGenerating and printing {total} possible numbers for: {prefix}XXXXX{suffix}"
                ),
            )?;
            "Generating numbers..."
        }
        OutputSink::File(path) => {
            say(out, &format!("\nGenerating and saving {total} numbers to {}...", path.display()))?;
            "Saving to file..."
        }
    };
    out.flush().map_err(|e| format!("Failed to write to terminal: {e}"))?;

    let _emitting = interrupt::emission_started();
    let result = if options.progress {
        let mut bar = ProgressBar::stderr(label, u64::from(MIDDLE_COUNT), ctx.clock.as_ref());
        let result = emit_to_sink(sink, prefix, suffix, &mut |event| bar.update(event));
        bar.finish();
        result
    } else {
        emit_to_sink(sink, prefix, suffix, &mut |_| {})
    };

    result.map_err(|e| format!("Error: {e}"))
}

fn say(out: &mut dyn Write, line: &str) -> Result<(), String> {
    writeln!(out, "{line}").map_err(|e| format!("Failed to write to terminal: {e}"))
}
