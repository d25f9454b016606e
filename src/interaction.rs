//! Operator interaction: the questions asked before a run.
//!
//! Each question loops until it gets a valid answer. End of input at any
//! question cancels the whole run; that is reported as `Ok(None)` rather
//! than as an error.

use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::phone::{
    default_filename, validate_digits, OutputMode, OutputSink, PhonePrefix, PhoneSuffix,
    PREFIX_LEN, SUFFIX_LEN,
};
use crate::ports::prompt::{Prompter, SelectPrompt, TextPrompt};

/// Answers supplied up front (from flags) instead of at the terminal.
#[derive(Debug, Clone, Default)]
pub struct Presets {
    /// Known first digits.
    pub prefix: Option<PhonePrefix>,
    /// Known last digits.
    pub suffix: Option<PhoneSuffix>,
    /// Chosen output mode.
    pub output: Option<OutputMode>,
    /// Output file path.
    pub file: Option<PathBuf>,
}

/// Everything needed for one generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Known first digits.
    pub prefix: PhonePrefix,
    /// Known last digits.
    pub suffix: PhoneSuffix,
    /// Where the numbers go.
    pub sink: OutputSink,
}

/// Asks for whatever `presets` leaves open and assembles the request.
///
/// Returns `Ok(None)` if the operator cancels any question.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or `out` cannot be written.
pub fn collect_request(
    prompter: &dyn Prompter,
    out: &mut dyn Write,
    presets: &Presets,
) -> Result<Option<GenerationRequest>, String> {
    let prefix = match &presets.prefix {
        Some(prefix) => prefix.clone(),
        None => match ask_prefix(prompter, out)? {
            Some(prefix) => prefix,
            None => return Ok(None),
        },
    };
    let suffix = match &presets.suffix {
        Some(suffix) => suffix.clone(),
        None => match ask_suffix(prompter, out)? {
            Some(suffix) => suffix,
            None => return Ok(None),
        },
    };
    say(out, &format!("\nInputs received: Prefix: {prefix}, Suffix: {suffix}"))?;

    let mode = match (presets.output, &presets.file) {
        (Some(mode), _) => mode,
        (None, Some(_)) => OutputMode::File,
        (None, None) => match ask_output_mode(prompter)? {
            Some(mode) => mode,
            None => return Ok(None),
        },
    };

    let sink = match mode {
        OutputMode::Console => OutputSink::Console,
        OutputMode::File => match &presets.file {
            Some(path) => OutputSink::File(path.clone()),
            None => match ask_filename(prompter, &default_filename(&prefix, &suffix))? {
                Some(path) => OutputSink::File(path),
                None => return Ok(None),
            },
        },
    };

    debug!(%prefix, %suffix, %sink, "generation request assembled");
    Ok(Some(GenerationRequest { prefix, suffix, sink }))
}

/// Asks for the known first 3 digits until a valid answer arrives.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or `out` cannot be written.
pub fn ask_prefix(
    prompter: &dyn Prompter,
    out: &mut dyn Write,
) -> Result<Option<PhonePrefix>, String> {
    let answer = ask_digits(prompter, out, "Enter the first 3 known digits:", PREFIX_LEN)?;
    answer.map(|digits| PhonePrefix::parse(&digits).map_err(|e| e.to_string())).transpose()
}

/// Asks for the known last 2 digits until a valid answer arrives.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or `out` cannot be written.
pub fn ask_suffix(
    prompter: &dyn Prompter,
    out: &mut dyn Write,
) -> Result<Option<PhoneSuffix>, String> {
    let answer = ask_digits(prompter, out, "Enter the last 2 known digits:", SUFFIX_LEN)?;
    answer.map(|digits| PhoneSuffix::parse(&digits).map_err(|e| e.to_string())).transpose()
}

/// Re-asks `message` until the answer is exactly `len` digits, explaining
/// each rejection on `out`.
fn ask_digits(
    prompter: &dyn Prompter,
    out: &mut dyn Write,
    message: &str,
    len: usize,
) -> Result<Option<String>, String> {
    let prompt = TextPrompt { message: message.to_string(), default: None };
    loop {
        let Some(answer) = prompter.text(&prompt).map_err(prompt_failed)? else {
            return Ok(None);
        };
        match validate_digits(&answer, len) {
            Ok(()) => return Ok(Some(answer)),
            Err(reason) => {
                debug!(%answer, %reason, "rejected digit answer");
                say(out, &format!(">> {reason}"))?;
            }
        }
    }
}

/// Asks how the numbers should be delivered.
///
/// # Errors
///
/// Returns an error if the terminal fails or answers with something that is
/// not one of the offered choices.
pub fn ask_output_mode(prompter: &dyn Prompter) -> Result<Option<OutputMode>, String> {
    let prompt = SelectPrompt {
        message: "How would you like to output the combinations?".to_string(),
        choices: OutputMode::ALL.iter().map(|mode| mode.label().to_string()).collect(),
    };
    let Some(choice) = prompter.select(&prompt).map_err(prompt_failed)? else {
        return Ok(None);
    };
    OutputMode::from_label(&choice)
        .map(Some)
        .ok_or_else(|| format!("Unexpected output choice: {choice:?}"))
}

/// Asks for the output filename, suggesting `default`.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read.
pub fn ask_filename(prompter: &dyn Prompter, default: &str) -> Result<Option<PathBuf>, String> {
    let prompt = TextPrompt {
        message: "Enter the filename to save the combinations:".to_string(),
        default: Some(default.to_string()),
    };
    let answer = prompter.text(&prompt).map_err(prompt_failed)?;
    Ok(answer.map(|name| {
        if name.trim().is_empty() {
            PathBuf::from(default)
        } else {
            PathBuf::from(name)
        }
    }))
}

fn say(out: &mut dyn Write, line: &str) -> Result<(), String> {
    writeln!(out, "{line}").map_err(|e| format!("Failed to write to terminal: {e}"))
}

fn prompt_failed(err: Box<dyn std::error::Error + Send + Sync>) -> String {
    format!("Failed to read answer: {err}")
}
