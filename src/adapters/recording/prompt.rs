//! Recording adapter for the `Prompter` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::prompt::{Prompter, SelectPrompt, TextPrompt};

type PortResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Records every question and answer while delegating to an inner prompter.
pub struct RecordingPrompter {
    inner: Box<dyn Prompter>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingPrompter {
    /// Wraps `inner`, appending each exchange to `recorder`.
    pub fn new(inner: Box<dyn Prompter>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl Prompter for RecordingPrompter {
    fn text(&self, prompt: &TextPrompt) -> PortResult<Option<String>> {
        let result = self.inner.text(prompt);
        record_result(&self.recorder, "prompt", "text", prompt, &result);
        result
    }

    fn select(&self, prompt: &SelectPrompt) -> PortResult<Option<String>> {
        let result = self.inner.select(prompt);
        record_result(&self.recorder, "prompt", "select", prompt, &result);
        result
    }
}
