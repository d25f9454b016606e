//! Replaying adapter for the `Clock` port.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Replays recorded clock readings from a cassette.
///
/// Once the recorded readings run out (or if there were none, as in a
/// session recorded with `--no-progress`) time stands still at the last
/// reading served, or the Unix epoch before any.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
    last: Mutex<DateTime<Utc>>,
}

impl ReplayingClock {
    /// Creates a replaying clock from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer), last: Mutex::new(DateTime::<Utc>::default()) }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut last = self.last.lock().expect("clock lock poisoned");
        let remaining =
            self.replayer.lock().expect("replayer lock poisoned").remaining("clock", "now");
        if remaining == 0 {
            let held = *last;
            debug!(%held, "clock cassette exhausted; holding last reading");
            return held;
        }
        let output = next_output(&self.replayer, "clock", "now");
        *last = serde_json::from_value(output)
            .expect("clock::now: failed to deserialize DateTime<Utc>");
        *last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use serde_json::json;

    fn clock_reading(seq: u64, at: &str) -> Interaction {
        Interaction {
            seq,
            port: "clock".into(),
            method: "now".into(),
            input: json!(null),
            output: json!(at),
        }
    }

    #[test]
    fn serves_readings_in_recorded_order() {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![
                clock_reading(0, "2024-06-15T10:30:00Z"),
                clock_reading(1, "2024-06-15T10:30:02Z"),
            ],
        };
        let clock = ReplayingClock::new(CassetteReplayer::new(&cassette));

        assert_eq!(clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        assert_eq!(clock.now().to_rfc3339(), "2024-06-15T10:30:02+00:00");
    }

    #[test]
    fn holds_last_reading_once_readings_run_out() {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![clock_reading(0, "2024-06-15T10:30:00Z")],
        };
        let clock = ReplayingClock::new(CassetteReplayer::new(&cassette));
        assert_eq!(clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        assert_eq!(clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
    }

    #[test]
    fn cassette_without_clock_readings_stays_at_epoch() {
        let cassette = Cassette {
            name: "prompts only".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "prompt".into(),
                method: "text".into(),
                input: json!({}),
                output: json!({"Ok": "123"}),
            }],
        };
        let clock = ReplayingClock::new(CassetteReplayer::new(&cassette));
        assert_eq!(clock.now().timestamp(), 0);
        assert_eq!(clock.now().timestamp(), 0);
    }
}
