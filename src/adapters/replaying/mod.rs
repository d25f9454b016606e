//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod prompt;

pub use clock::ReplayingClock;
pub use prompt::ReplayingPrompter;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

/// Take the recorded output of the next `port::method` interaction.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).output.clone()
}

/// Decode an output stored with the Ok/Err convention of `recording::record_result`.
///
/// A bare value without either key is treated as `Ok`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("Err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("Ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_and_bare_values_decode() {
        let ok: Option<String> = replay_result(&json!({"Ok": "45"}), "t").unwrap();
        assert_eq!(ok.as_deref(), Some("45"));
        let bare: Option<String> = replay_result(&json!("45"), "t").unwrap();
        assert_eq!(bare.as_deref(), Some("45"));
        let cancelled: Option<String> = replay_result(&json!({"Ok": null}), "t").unwrap();
        assert_eq!(cancelled, None);
    }

    #[test]
    fn err_values_become_errors() {
        let output = json!({"Err": "stdin closed"});
        let err = replay_result::<Option<String>>(&output, "t").unwrap_err();
        assert_eq!(err.to_string(), "stdin closed");
    }
}
