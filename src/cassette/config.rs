//! Per-port cassette selection for composable replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Cassette file to replay for each port. A port left as `None` panics if
/// it is called during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Cassette with the operator's answers.
    pub prompt: Option<PathBuf>,
    /// Cassette with clock readings.
    pub clock: Option<PathBuf>,
}

/// Replayers built from a [`CassetteConfig`].
pub struct PortReplayers {
    /// Replayer for the prompt port.
    pub prompt: Option<CassetteReplayer>,
    /// Replayer for the clock port.
    pub clock: Option<CassetteReplayer>,
}

/// File name of `port`'s cassette inside a recording directory.
#[must_use]
pub fn port_cassette_name(port: &str) -> String {
    format!("{port}.cassette.yaml")
}

impl CassetteConfig {
    /// Points every port at its cassette in a recording directory.
    ///
    /// # Errors
    ///
    /// Returns an error naming the missing file if the directory lacks a
    /// cassette for any port.
    pub fn in_dir(dir: &Path) -> Result<Self, String> {
        let cassette = |port: &str| {
            let path = dir.join(port_cassette_name(port));
            if path.is_file() {
                Ok(path)
            } else {
                Err(format!("No {port} cassette in {}: expected {}", dir.display(), path.display()))
            }
        };
        Ok(Self { prompt: Some(cassette("prompt")?), clock: Some(cassette("clock")?) })
    }

    /// Reads and parses a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid cassette.
    pub fn load_cassette(path: &Path) -> Result<Cassette, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }

    /// Loads a cassette file into a replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_replayer(path: &Path) -> Result<CassetteReplayer, String> {
        Self::load_cassette(path).map(|cassette| CassetteReplayer::new(&cassette))
    }

    /// Loads every configured cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            prompt: self.prompt.as_deref().map(Self::load_replayer).transpose()?,
            clock: self.clock.as_deref().map(Self::load_replayer).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[test]
    fn loads_only_configured_ports() {
        let dir = tempfile::tempdir().unwrap();
        let prompt_path = dir.path().join("prompt.cassette.yaml");
        let mut recorder = CassetteRecorder::new(&prompt_path, "prompt", "c");
        recorder.record("prompt", "text", json!({}), json!({"Ok": "123"}));
        recorder.finish().unwrap();

        let config = CassetteConfig { prompt: Some(prompt_path), ..CassetteConfig::default() };
        let mut replayers = config.load_all().unwrap();

        let prompt = replayers.prompt.as_mut().unwrap();
        assert_eq!(prompt.next_interaction("prompt", "text").output, json!({"Ok": "123"}));
        assert!(replayers.clock.is_none());
    }

    #[test]
    fn recording_directory_maps_to_per_port_files() {
        let dir = tempfile::tempdir().unwrap();
        for port in ["prompt", "clock"] {
            let path = dir.path().join(port_cassette_name(port));
            CassetteRecorder::new(&path, port, "c").finish().unwrap();
        }

        let config = CassetteConfig::in_dir(dir.path()).unwrap();
        assert_eq!(config.prompt, Some(dir.path().join("prompt.cassette.yaml")));
        assert_eq!(config.clock, Some(dir.path().join("clock.cassette.yaml")));
    }

    #[test]
    fn recording_directory_without_clock_cassette_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(port_cassette_name("prompt"));
        CassetteRecorder::new(&path, "prompt", "c").finish().unwrap();

        let err = CassetteConfig::in_dir(dir.path()).unwrap_err();
        assert!(err.contains("clock.cassette.yaml"), "{err}");
    }

    #[test]
    fn missing_file_names_the_path() {
        let config =
            CassetteConfig { clock: Some(PathBuf::from("/nonexistent/clock.yaml")), prompt: None };
        let err = config.load_all().err().unwrap();
        assert!(err.contains("/nonexistent/clock.yaml"));
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "interactions: [this is not: a cassette").unwrap();
        let err = CassetteConfig::load_cassette(&path).unwrap_err();
        assert!(err.starts_with("Failed to parse cassette file"));
    }
}
