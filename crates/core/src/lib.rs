//! Core primitives for Quiesce
//!
//! This crate provides:
//! - Region tree with inclusive containment tests
//! - Region handles (ref-style slots filled on mount)
//! - Timer slot and release-on-drop guard for scoped resources
//! - Configuration types (TOML)

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod region;

// Re-exports
pub use config::{DebounceConfig, DismissConfig, DispatchOrder, Settings};
pub use error::Error;
pub use lifecycle::{ReleaseGuard, TimerSlot};
pub use region::{NodeId, RegionPath, RegionRef, RegionTree};

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
