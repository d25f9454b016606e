//! Prompt port for asking the operator questions.

use serde::{Deserialize, Serialize};

/// A free-text question, optionally with a suggested answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextPrompt {
    /// Question shown to the operator.
    pub message: String,
    /// Answer used when the operator submits an empty line.
    pub default: Option<String>,
}

/// A question answered by picking one of a fixed list of choices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectPrompt {
    /// Question shown to the operator.
    pub message: String,
    /// Choices offered, in display order.
    pub choices: Vec<String>,
}

/// Asks the operator questions and returns their answers.
///
/// `Ok(None)` means the operator cancelled the question (end of input);
/// it is not an error. Abstracting the terminal allows deterministic replay
/// of whole interactive sessions from a cassette.
pub trait Prompter: Send + Sync {
    /// Asks a free-text question.
    ///
    /// Returns the raw answer with the line terminator removed, or the
    /// default when the answer is empty and a default exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    fn text(
        &self,
        prompt: &TextPrompt,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;

    /// Asks the operator to pick one choice; returns the chosen entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    fn select(
        &self,
        prompt: &SelectPrompt,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;
}
