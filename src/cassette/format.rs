//! Cassette data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded call on a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number, assigned by the recorder.
    pub seq: u64,
    /// Port name (`"prompt"` or `"clock"`).
    pub port: String,
    /// Method invoked on the port.
    pub method: String,
    /// Arguments passed to the port.
    pub input: serde_json::Value,
    /// Value the port returned.
    pub output: serde_json::Value,
}

/// An ordered list of interactions plus provenance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name.
    pub name: String,
    /// When the cassette was written.
    pub recorded_at: DateTime<Utc>,
    /// Source revision the recording was made with.
    pub commit: String,
    /// Interactions in call order.
    pub interactions: Vec<Interaction>,
}
