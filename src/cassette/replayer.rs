//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Replays a cassette as independent FIFO streams, one per `port::method`.
///
/// Interleaving between different methods is not enforced: a replayed run
/// only has to make the same calls per method in the same order.
pub struct CassetteReplayer {
    streams: HashMap<(String, String), VecDeque<Interaction>>,
    /// Last interaction handed out, kept so callers can borrow it.
    current: Option<Interaction>,
}

impl CassetteReplayer {
    /// Indexes `cassette` into per-method streams.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut streams: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            streams
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { streams, current: None }
    }

    /// Number of interactions not yet served for `port::method`.
    #[must_use]
    pub fn remaining(&self, port: &str, method: &str) -> usize {
        self.streams.get(&(port.to_string(), method.to_string())).map_or(0, VecDeque::len)
    }

    /// Returns the next interaction for `port::method`.
    ///
    /// # Panics
    ///
    /// Panics with a message naming the request and the streams that do
    /// exist when the cassette has nothing (more) for this method.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> &Interaction {
        let key = (port.to_string(), method.to_string());
        let Some(stream) = self.streams.get_mut(&key) else {
            let mut available: Vec<String> =
                self.streams.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        };
        let Some(next) = stream.pop_front() else {
            let last_seq = self.current.as_ref().map_or(0, |i| i.seq);
            panic!(
                "Cassette exhausted: every interaction for port={port:?} method={method:?} \
                 has been consumed (last served seq={last_seq})."
            );
        };
        self.current.insert(next)
    }
}
