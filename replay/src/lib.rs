//! Replay and retry on top of the deterministic game core.
//!
//! A finished game's seed and finalized action log are a self-contained
//! script: [`Replay`] plays it back one action at a time at a configurable
//! cadence, and [`retry`] restarts the same mine layout from the recorded
//! opening move. Pacing and cancellation are explicit: the caller drives a
//! step state machine through a [`StepTimer`] and a [`CancelToken`] instead
//! of timer callbacks mutating shared state.

pub use replay::*;
pub use retry::*;
pub use scheduler::*;

mod replay;
mod retry;
mod scheduler;
