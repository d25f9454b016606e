//! Phone number parts and the output sink model.
//!
//! A generated number is always `prefix + middle + suffix`, where the prefix
//! and suffix are fixed digit strings supplied by the operator and the middle
//! segment ranges over every 5-digit value.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Number of digits in the known leading part of a number.
pub const PREFIX_LEN: usize = 3;

/// Number of digits in the known trailing part of a number.
pub const SUFFIX_LEN: usize = 2;

/// Number of digits in the enumerated middle segment.
pub const MIDDLE_LEN: usize = 5;

/// Number of distinct middle segments (10^5).
pub const MIDDLE_COUNT: u32 = 100_000;

/// Total length of a combined number.
pub const NUMBER_LEN: usize = PREFIX_LEN + MIDDLE_LEN + SUFFIX_LEN;

/// Why a digit string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigitsError {
    /// The input contained something other than ASCII digits (or was empty).
    #[error("Input must contain only digits.")]
    NotDigits,
    /// The input was all digits but had the wrong length.
    #[error("Input must be exactly {expected} digits long.")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
    },
}

/// Checks that `text` is made of exactly `len` ASCII digits.
///
/// # Errors
///
/// Returns [`DigitsError::NotDigits`] for empty or non-digit input, and
/// [`DigitsError::WrongLength`] when the digit count is off.
pub fn validate_digits(text: &str, len: usize) -> Result<(), DigitsError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DigitsError::NotDigits);
    }
    if text.len() != len {
        return Err(DigitsError::WrongLength { expected: len });
    }
    Ok(())
}

/// The known leading 3 digits of the generated numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhonePrefix(String);

impl PhonePrefix {
    /// Validates and wraps a 3-digit prefix.
    ///
    /// # Errors
    ///
    /// Returns a [`DigitsError`] if the input is not exactly 3 ASCII digits.
    pub fn parse(text: &str) -> Result<Self, DigitsError> {
        validate_digits(text, PREFIX_LEN)?;
        Ok(Self(text.to_string()))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PhonePrefix {
    type Err = DigitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PhonePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The known trailing 2 digits of the generated numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneSuffix(String);

impl PhoneSuffix {
    /// Validates and wraps a 2-digit suffix.
    ///
    /// # Errors
    ///
    /// Returns a [`DigitsError`] if the input is not exactly 2 ASCII digits.
    pub fn parse(text: &str) -> Result<Self, DigitsError> {
        validate_digits(text, SUFFIX_LEN)?;
        Ok(Self(text.to_string()))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PhoneSuffix {
    type Err = DigitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PhoneSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Default output filename suggested for a prefix/suffix pair.
#[must_use]
pub fn default_filename(prefix: &PhonePrefix, suffix: &PhoneSuffix) -> String {
    format!("{prefix}XXXXX{suffix}_combinations.txt")
}

/// How the operator wants the combinations delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputMode {
    /// Print every number to standard output.
    Console,
    /// Save every number to a text file.
    File,
}

impl OutputMode {
    /// All modes in the order they are offered to the operator.
    pub const ALL: [Self; 2] = [Self::Console, Self::File];

    /// Human-facing label used in the selection prompt.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Console => "Print to console",
            Self::File => "Save to a file",
        }
    }

    /// Looks up a mode by its prompt label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.label() == label)
    }
}

/// Destination receiving the emitted combinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Standard output, one number per line.
    Console,
    /// A text file created (or truncated) for this run.
    File(PathBuf),
}

impl fmt::Display for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console => f.write_str("-"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Formats a count with comma thousands separators (`100000` -> `100,000`).
#[must_use]
pub fn with_thousands(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
