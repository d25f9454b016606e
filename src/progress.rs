//! Progress reporting for emission.
//!
//! The emitter reports a [`ProgressEvent`] after every line. [`ProgressBar`]
//! forwards an update to an `indicatif` bar only when the whole percentage
//! changes, so a full run costs about a hundred redraws and as many clock
//! reads. The remaining time is projected from the [`Clock`] port rather
//! than from `indicatif`'s own timer, so replayed sessions report the same
//! estimates they were recorded with.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use indicatif::{FormattedDuration, ProgressDrawTarget, ProgressStyle};

use crate::ports::Clock;

/// Label, 30-cell bar, percentage, remaining time.
const TEMPLATE: &str = "{prefix} [{bar:30}] {percent:>3}% {msg}";

/// Shown in place of the remaining time until one item is done.
const UNKNOWN_ETA: &str = "--:--:--";

/// One progress update: how many items are done out of the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Items emitted so far.
    pub done: u64,
    /// Items the run will emit in total.
    pub total: u64,
}

impl ProgressEvent {
    /// Completed share as a whole percentage in `0..=100`.
    #[must_use]
    pub fn percent(&self) -> u64 {
        if self.total == 0 {
            return 100;
        }
        self.done.min(self.total) * 100 / self.total
    }
}

/// Terminal progress bar with a remaining-time estimate.
pub struct ProgressBar<'a> {
    bar: indicatif::ProgressBar,
    clock: &'a dyn Clock,
    started: DateTime<Utc>,
    last_percent: Option<u64>,
}

impl<'a> ProgressBar<'a> {
    /// Starts a bar drawn on stderr.
    ///
    /// `indicatif` hides the bar when stderr is not a terminal; the clock is
    /// still read on every percentage step.
    pub fn stderr(label: impl Into<String>, total: u64, clock: &'a dyn Clock) -> Self {
        Self::start(label, total, clock, ProgressDrawTarget::stderr())
    }

    /// Starts a bar on `target` and draws it at 0%.
    pub fn start(
        label: impl Into<String>,
        total: u64,
        clock: &'a dyn Clock,
        target: ProgressDrawTarget,
    ) -> Self {
        let bar = indicatif::ProgressBar::with_draw_target(Some(total), target);
        bar.set_style(style());
        bar.set_prefix(label.into());
        let started = clock.now();
        let mut progress = Self { bar, clock, started, last_percent: None };
        progress.redraw(ProgressEvent { done: 0, total }, started);
        progress
    }

    /// Records an update, redrawing only when the percentage moves.
    pub fn update(&mut self, event: ProgressEvent) {
        if self.last_percent == Some(event.percent()) {
            return;
        }
        let now = self.clock.now();
        self.redraw(event, now);
    }

    /// Ends the bar, leaving the last drawn line on screen.
    pub fn finish(self) {
        self.bar.finish();
    }

    fn redraw(&mut self, event: ProgressEvent, now: DateTime<Utc>) {
        self.last_percent = Some(event.percent());
        self.bar.set_message(eta_text(event, now - self.started));
        self.bar.set_position(event.done);
    }
}

fn style() -> ProgressStyle {
    ProgressStyle::with_template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

/// Remaining time as `HH:MM:SS`, or a placeholder before the first item.
#[must_use]
pub fn eta_text(event: ProgressEvent, elapsed: Duration) -> String {
    estimate_remaining(event, elapsed)
        .map_or_else(|| UNKNOWN_ETA.to_string(), |left| FormattedDuration(left).to_string())
}

/// Projects the remaining time from the average pace so far.
///
/// Returns `None` until at least one item is done. Negative elapsed time
/// counts as zero; estimates too large to represent saturate.
#[must_use]
pub fn estimate_remaining(event: ProgressEvent, elapsed: Duration) -> Option<StdDuration> {
    if event.done == 0 {
        return None;
    }
    let left = event.total.saturating_sub(event.done);
    let elapsed_ms = u64::try_from(elapsed.num_milliseconds()).unwrap_or(0);
    let remaining_ms = u128::from(elapsed_ms) * u128::from(left) / u128::from(event.done);
    Some(StdDuration::from_millis(u64::try_from(remaining_ms).unwrap_or(u64::MAX)))
}
