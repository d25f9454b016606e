//! CLI argument definitions.
//!
//! Every flag pre-answers one interactive question; whatever is left out is
//! asked at the terminal.

use std::path::PathBuf;

use clap::Parser;

use crate::phone::{OutputMode, PhonePrefix, PhoneSuffix};

/// Top-level CLI parser for `phonegen`.
#[derive(Debug, Parser)]
#[command(
    name = "phonegen",
    version,
    about = "Generate every 10-digit phone number matching a known prefix and suffix"
)]
pub struct Cli {
    /// Known first 3 digits.
    #[arg(long, value_name = "DIGITS")]
    pub prefix: Option<PhonePrefix>,

    /// Known last 2 digits.
    #[arg(long, value_name = "DIGITS")]
    pub suffix: Option<PhoneSuffix>,

    /// Where to send the numbers.
    #[arg(long, value_enum)]
    pub output: Option<OutputMode>,

    /// Output file; implies `--output file`.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Do not draw the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_means_fully_interactive() {
        let cli = Cli::parse_from(["phonegen"]);
        assert!(cli.prefix.is_none());
        assert!(cli.suffix.is_none());
        assert!(cli.output.is_none());
        assert!(cli.file.is_none());
        assert!(!cli.no_progress);
    }

    #[test]
    fn parses_all_presets() {
        let cli = Cli::parse_from([
            "phonegen",
            "--prefix",
            "123",
            "--suffix",
            "45",
            "--output",
            "file",
            "--file",
            "out.txt",
            "--no-progress",
        ]);
        assert_eq!(cli.prefix.unwrap().as_str(), "123");
        assert_eq!(cli.suffix.unwrap().as_str(), "45");
        assert_eq!(cli.output, Some(OutputMode::File));
        assert_eq!(cli.file, Some(PathBuf::from("out.txt")));
        assert!(cli.no_progress);
    }

    #[test]
    fn rejects_malformed_digits_with_the_prompt_message() {
        let err = Cli::try_parse_from(["phonegen", "--prefix", "12a"]).unwrap_err();
        assert!(err.to_string().contains("Input must contain only digits."));

        let err = Cli::try_parse_from(["phonegen", "--suffix", "123"]).unwrap_err();
        assert!(err.to_string().contains("Input must be exactly 2 digits long."));
    }

    #[test]
    fn rejects_unknown_output_mode() {
        assert!(Cli::try_parse_from(["phonegen", "--output", "fax"]).is_err());
    }
}
