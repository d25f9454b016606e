//! Adapter implementations of the port traits.
//!
//! - `live`: the real terminal and system clock.
//! - `recording`: wraps another adapter and appends every call to a cassette.
//! - `replaying`: serves calls from a previously recorded cassette.

pub mod live;
pub mod recording;
pub mod replaying;
