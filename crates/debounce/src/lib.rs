//! Debounce controller for Quiesce
//!
//! Converts a high-frequency value stream (keystrokes) into a low-frequency
//! stream of settled values:
//! - One live timer per controller, cancelled before every reschedule
//! - Configurable quiescence window (default 1000ms)
//! - Synchronous cancellation on teardown
//! - Explicit flush of the pending value

pub mod controller;

pub use controller::Debouncer;
