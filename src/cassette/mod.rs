//! Cassettes: YAML files of recorded port interactions.
//!
//! A session run with `PHONEGEN_RECORD=<dir>` writes one cassette per port;
//! `PHONEGEN_REPLAY=<file>` feeds a cassette back through the replaying
//! adapters so a whole interactive run can be reproduced without a terminal.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
