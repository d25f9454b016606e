//! Replaying adapter for the `Prompter` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::prompt::{Prompter, SelectPrompt, TextPrompt};

type PortResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Answers questions with the operator's recorded answers.
pub struct ReplayingPrompter {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingPrompter {
    /// Creates a replaying prompter from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Prompter for ReplayingPrompter {
    fn text(&self, _prompt: &TextPrompt) -> PortResult<Option<String>> {
        let output = next_output(&self.replayer, "prompt", "text");
        replay_result(&output, "prompt::text")
    }

    fn select(&self, _prompt: &SelectPrompt) -> PortResult<Option<String>> {
        let output = next_output(&self.replayer, "prompt", "select");
        replay_result(&output, "prompt::select")
    }
}
