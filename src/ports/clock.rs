//! Clock port for obtaining the current time.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// Progress estimates read time through this port so recorded sessions
/// replay with identical remaining-time figures.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
