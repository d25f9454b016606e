//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the generator and something it
//! does not control: the operator at the terminal and the wall clock.
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod prompt;

pub use clock::Clock;
pub use prompt::{Prompter, SelectPrompt, TextPrompt};
