//! Service context bundling the port trait objects.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::adapters::live::clock::SystemClock;
use crate::adapters::live::prompt::LiveTerminal;
use crate::adapters::recording::{RecordingClock, RecordingPrompter};
use crate::adapters::replaying::{ReplayingClock, ReplayingPrompter};
use crate::cassette::config::CassetteConfig;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::clock::Clock;
use crate::ports::prompt::{Prompter, SelectPrompt, TextPrompt};

/// Bundles every external boundary the generator talks to.
///
/// Constructors wire up different adapters: live, recording or replaying.
pub struct ServiceContext {
    /// The operator's terminal.
    pub prompt: Box<dyn Prompter>,
    /// Wall clock used for progress estimates.
    pub clock: Box<dyn Clock>,
}

impl ServiceContext {
    /// Creates a context talking to the real terminal and system clock.
    #[must_use]
    pub fn live() -> Self {
        Self { prompt: Box::new(LiveTerminal::stdio()), clock: Box::new(SystemClock) }
    }

    /// Creates a live context whose interactions are recorded into `dir`.
    ///
    /// The cassettes are written when the returned session is finished,
    /// which requires this context to be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette directory cannot be created.
    pub fn recording_at(dir: PathBuf) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::at(dir)?;
        info!(dir = %session.output_dir().display(), "recording port interactions");
        let ctx = Self {
            prompt: Box::new(RecordingPrompter::new(
                Box::new(LiveTerminal::stdio()),
                session.prompt.clone(),
            )),
            clock: Box::new(RecordingClock::new(Box::new(SystemClock), session.clock.clone())),
        };
        Ok((ctx, session))
    }

    /// Creates a context replaying a single cassette for every port.
    ///
    /// Each port gets its own replayer over the same cassette, so their
    /// cursors advance independently.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = CassetteConfig::load_cassette(path)?;
        Ok(Self {
            prompt: Box::new(ReplayingPrompter::new(CassetteReplayer::new(&cassette))),
            clock: Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette))),
        })
    }

    /// Creates a context replaying per-port cassettes.
    ///
    /// Ports without a configured cassette panic with a clear message when used.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;
        Ok(Self {
            prompt: match replayers.prompt {
                Some(r) => Box::new(ReplayingPrompter::new(r)),
                None => Box::new(UnconfiguredPrompter),
            },
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(UnconfiguredClock),
            },
        })
    }
}

// --- Panicking adapters for ports without a cassette ---

struct UnconfiguredClock;
impl Clock for UnconfiguredClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        panic!("Clock port not configured in CassetteConfig: no cassette loaded for clock");
    }
}

struct UnconfiguredPrompter;
impl Prompter for UnconfiguredPrompter {
    fn text(
        &self,
        prompt: &TextPrompt,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        panic!(
            "Prompter port not configured in CassetteConfig: cannot answer {:?}",
            prompt.message
        );
    }

    fn select(
        &self,
        prompt: &SelectPrompt,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        panic!(
            "Prompter port not configured in CassetteConfig: cannot answer {:?}",
            prompt.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[test]
    fn monolithic_cassette_feeds_every_port() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("full.cassette.yaml");
        let mut recorder = CassetteRecorder::new(&path, "full", "c");
        recorder.record("clock", "now", json!(null), json!("2024-06-15T10:30:00Z"));
        recorder.record("prompt", "text", json!({}), json!({"Ok": "555"}));
        recorder.finish().unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        let question = TextPrompt { message: "prefix".into(), default: None };
        assert_eq!(ctx.prompt.text(&question).unwrap().as_deref(), Some("555"));
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
    }

    #[test]
    fn per_port_cassettes_leave_other_ports_unconfigured() {
        let dir = tempfile::tempdir().unwrap();
        let clock_path = dir.path().join("clock.cassette.yaml");
        let mut recorder = CassetteRecorder::new(&clock_path, "clock", "c");
        recorder.record("clock", "now", json!(null), json!("2024-01-01T00:00:00Z"));
        recorder.finish().unwrap();

        let config = CassetteConfig { clock: Some(clock_path), ..CassetteConfig::default() };
        let ctx = ServiceContext::replaying_from(&config).unwrap();
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    #[should_panic(expected = "not configured in CassetteConfig")]
    fn unconfigured_prompt_panics_with_clear_message() {
        let ctx = ServiceContext::replaying_from(&CassetteConfig::default()).unwrap();
        let _ = ctx.prompt.text(&TextPrompt { message: "prefix".into(), default: None });
    }

    #[test]
    fn recording_context_hands_recorders_back_to_session() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, session) = ServiceContext::recording_at(dir.path().join("rec")).unwrap();
        let _ = ctx.clock.now();
        drop(ctx);

        let out = session.finish().unwrap();
        let content = std::fs::read_to_string(out.join("clock.cassette.yaml")).unwrap();
        assert!(content.contains("method: now"));
    }
}
