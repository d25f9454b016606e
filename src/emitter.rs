//! Combination emitter: streams every number for a prefix/suffix pair.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::phone::{
    OutputSink, PhonePrefix, PhoneSuffix, MIDDLE_COUNT, MIDDLE_LEN, NUMBER_LEN,
};
use crate::progress::ProgressEvent;

/// Lines held in the sink buffer between flushes.
const BUFFERED_LINES: usize = 4096;

/// Failure to deliver combinations to the chosen sink.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The output file could not be created or written.
    #[error("Could not write to file {}. Check permissions.", path.display())]
    FileWrite {
        /// File the run was writing to.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Standard output was closed or failed mid-stream.
    #[error("Could not write to standard output: {0}")]
    Console(#[source] io::Error),
}

/// Builds the combined number for middle segment `middle`.
#[must_use]
pub fn combined_number(prefix: &PhonePrefix, suffix: &PhoneSuffix, middle: u32) -> String {
    format!("{prefix}{middle:0width$}{suffix}", width = MIDDLE_LEN)
}

/// Lazily yields every combined number in ascending middle-segment order.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    prefix: &'a PhonePrefix,
    suffix: &'a PhoneSuffix,
    next: u32,
}

/// Returns an iterator over all numbers matching `prefix` and `suffix`.
#[must_use]
pub fn combinations<'a>(prefix: &'a PhonePrefix, suffix: &'a PhoneSuffix) -> Combinations<'a> {
    Combinations { prefix, suffix, next: 0 }
}

impl Iterator for Combinations<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= MIDDLE_COUNT {
            return None;
        }
        let number = combined_number(self.prefix, self.suffix, self.next);
        self.next += 1;
        Some(number)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (MIDDLE_COUNT - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Combinations<'_> {}

/// Writes every combination to `writer`, one per line, notifying
/// `on_progress` after each line.
///
/// Returns the number of lines written. Stops at the first write error;
/// lines already handed to `writer` are not retracted.
///
/// # Errors
///
/// Returns the underlying I/O error if a write or the final flush fails.
pub fn emit<W: Write>(
    prefix: &PhonePrefix,
    suffix: &PhoneSuffix,
    writer: &mut W,
    on_progress: &mut dyn FnMut(ProgressEvent),
) -> io::Result<u64> {
    let total = u64::from(MIDDLE_COUNT);
    let mut done = 0u64;
    for number in combinations(prefix, suffix) {
        writeln!(writer, "{number}")?;
        done += 1;
        on_progress(ProgressEvent { done, total });
    }
    writer.flush()?;
    Ok(done)
}

/// Opens `sink` and emits every combination into it.
///
/// A file sink is created fresh (truncating any existing file) and closed
/// before this returns, on success and on failure alike.
///
/// # Errors
///
/// Returns [`EmitError::FileWrite`] naming the path when the file cannot be
/// created or written, or [`EmitError::Console`] when stdout fails.
pub fn emit_to_sink(
    sink: &OutputSink,
    prefix: &PhonePrefix,
    suffix: &PhoneSuffix,
    on_progress: &mut dyn FnMut(ProgressEvent),
) -> Result<u64, EmitError> {
    debug!(%sink, %prefix, %suffix, "starting emission");
    let count = match sink {
        OutputSink::Console => {
            let stdout = io::stdout();
            let mut writer = buffered(stdout.lock());
            emit(prefix, suffix, &mut writer, on_progress).map_err(EmitError::Console)?
        }
        OutputSink::File(path) => {
            let to_file_error = |source| EmitError::FileWrite { path: path.clone(), source };
            let file = File::create(path).map_err(to_file_error)?;
            let mut writer = buffered(file);
            emit(prefix, suffix, &mut writer, on_progress).map_err(to_file_error)?
        }
    };
    info!(%sink, count, "emission finished");
    Ok(count)
}

fn buffered<W: Write>(inner: W) -> BufWriter<W> {
    BufWriter::with_capacity(BUFFERED_LINES * (NUMBER_LEN + 1), inner)
}
