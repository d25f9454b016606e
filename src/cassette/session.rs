//! Recording session owning one recorder per port.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, warn};

use super::config::port_cassette_name;
use super::recorder::CassetteRecorder;

/// One [`CassetteRecorder`] per port, all writing into a common directory.
pub struct RecordingSession {
    /// Recorder for prompt interactions.
    pub prompt: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for clock interactions.
    pub clock: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Starts a session writing `<port>.cassette.yaml` files into `output_dir`.
    ///
    /// The directory is created if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn at(output_dir: impl Into<PathBuf>) -> Result<Self, String> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            format!("Failed to create cassette directory {}: {e}", output_dir.display())
        })?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let commit = get_commit_hash();
        let make_recorder = |port: &str| {
            let path = output_dir.join(port_cassette_name(port));
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(path, name, &commit)))
        };

        Ok(Self { prompt: make_recorder("prompt"), clock: make_recorder("clock"), output_dir })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes every port's cassette and returns the output directory.
    ///
    /// All adapters holding a recorder must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if a recorder is still shared or a file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            if recorder.is_empty() {
                debug!(port, "no interactions recorded");
            }
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.prompt, "prompt")?;
        finish_one(self.clock, "clock")?;
        Ok(self.output_dir)
    }
}

/// Revision to stamp into cassettes: the crate version plus git HEAD when available.
fn get_commit_hash() -> String {
    let head = std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string());

    let version = env!("CARGO_PKG_VERSION");
    if let Some(head) = head {
        format!("{version}+{head}")
    } else {
        warn!("could not read git HEAD; stamping cassettes with the crate version only");
        version.to_string()
    }
}
