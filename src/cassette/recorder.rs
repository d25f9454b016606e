//! Accumulates interactions and writes them as a cassette file.

use std::path::PathBuf;

use chrono::Utc;
use tracing::debug;

use super::format::{Cassette, Interaction};

/// Collects interactions in memory until [`CassetteRecorder::finish`].
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    interactions: Vec<Interaction>,
    next_seq: u64,
}

impl CassetteRecorder {
    /// Creates a recorder that will write to `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            commit: commit.into(),
            interactions: Vec::new(),
            next_seq: 0,
        }
    }

    /// Appends an interaction, assigning the next sequence number.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        self.interactions.push(Interaction {
            seq: self.next_seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
        self.next_seq += 1;
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Writes the cassette YAML to disk and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be produced or the file written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let count = self.len();
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            commit: self.commit,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, yaml)?;
        debug!(path = %self.path.display(), count, "cassette written");
        Ok(self.path)
    }
}
