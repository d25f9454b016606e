//! Ctrl+C handling.
//!
//! An interrupt while the operator is still answering questions is a
//! cancellation like end of input and exits successfully. Once emission has
//! started the output is incomplete, so the process exits with 130.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use crate::commands::generate::CANCELLED_MESSAGE;

/// Exit status reported after an interrupt during emission (128 + SIGINT).
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

static EMITTING: AtomicBool = AtomicBool::new(false);

/// Marks emission as running until dropped.
#[must_use = "emission is only marked while the guard is alive"]
pub struct EmissionGuard(());

impl Drop for EmissionGuard {
    fn drop(&mut self) {
        EMITTING.store(false, Ordering::SeqCst);
    }
}

/// Marks the start of emission; the returned guard marks its end.
pub fn emission_started() -> EmissionGuard {
    EMITTING.store(true, Ordering::SeqCst);
    EmissionGuard(())
}

/// Exit status for an interrupt arriving in the given phase.
#[must_use]
pub fn exit_code(emitting: bool) -> i32 {
    if emitting {
        INTERRUPTED_EXIT_CODE
    } else {
        0
    }
}

/// Installs a handler that ends the run with the cancellation message.
///
/// Failure to install leaves the default signal behaviour in place.
pub fn install() {
    if let Err(err) = ctrlc::set_handler(|| {
        let code = exit_code(EMITTING.load(Ordering::SeqCst));
        eprintln!("\n{CANCELLED_MESSAGE}");
        std::process::exit(code);
    }) {
        warn!(%err, "could not install Ctrl+C handler");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_interrupted_emission_is_a_failure() {
        assert_eq!(exit_code(false), 0);
        assert_eq!(exit_code(true), 130);
    }
}
