//! Live prompt adapter reading answers from a terminal.

use std::fmt::Write as _;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::Mutex;

use crate::ports::prompt::{Prompter, SelectPrompt, TextPrompt};

type PortResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Line-oriented terminal: questions go to `output`, answers come from `input`.
///
/// End of input on any question is reported as a cancellation.
pub struct LiveTerminal {
    input: Mutex<Box<dyn BufRead + Send>>,
    output: Mutex<Box<dyn Write + Send>>,
}

impl LiveTerminal {
    /// Creates a terminal bound to the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }

    /// Creates a terminal over arbitrary streams.
    pub fn new(input: impl BufRead + Send + 'static, output: impl Write + Send + 'static) -> Self {
        Self { input: Mutex::new(Box::new(input)), output: Mutex::new(Box::new(output)) }
    }

    fn say(&self, text: &str) -> PortResult<()> {
        let mut out = self.output.lock().expect("terminal output lock poisoned");
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Reads one line without its terminator; `None` at end of input.
    fn read_answer(&self) -> PortResult<Option<String>> {
        let mut line = String::new();
        let read = self.input.lock().expect("terminal input lock poisoned").read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches('\n').trim_end_matches('\r');
        Ok(Some(trimmed.to_string()))
    }
}

impl Prompter for LiveTerminal {
    fn text(&self, prompt: &TextPrompt) -> PortResult<Option<String>> {
        let question = match &prompt.default {
            Some(default) => format!("? {} [{default}] ", prompt.message),
            None => format!("? {} ", prompt.message),
        };
        self.say(&question)?;

        let Some(answer) = self.read_answer()? else {
            return Ok(None);
        };
        match &prompt.default {
            Some(default) if answer.is_empty() => Ok(Some(default.clone())),
            _ => Ok(Some(answer)),
        }
    }

    fn select(&self, prompt: &SelectPrompt) -> PortResult<Option<String>> {
        let mut menu = format!("? {}\n", prompt.message);
        for (i, choice) in prompt.choices.iter().enumerate() {
            let _ = writeln!(menu, "  {}) {choice}", i + 1);
        }
        self.say(&menu)?;

        let count = prompt.choices.len();
        loop {
            self.say(&format!("  Choice [1-{count}]: "))?;
            let Some(answer) = self.read_answer()? else {
                return Ok(None);
            };
            if let Some(choice) = pick_choice(&prompt.choices, answer.trim()) {
                return Ok(Some(choice.clone()));
            }
            self.say(&format!("  Please enter a number between 1 and {count}.\n"))?;
        }
    }
}

/// Resolves an answer given either as a 1-based index or as the choice text.
fn pick_choice<'a>(choices: &'a [String], answer: &str) -> Option<&'a String> {
    if let Ok(index) = answer.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| choices.get(i));
    }
    choices.iter().find(|choice| choice.eq_ignore_ascii_case(answer))
}
