//! Outside-interaction detection for Quiesce
//!
//! This crate provides:
//! - An ambient (document-level) interaction scope with bubbling local handlers
//! - RAII listener registrations
//! - A detector that reports interactions outside a registered region

pub mod detector;
pub mod scope;

pub use detector::OutsideClickDetector;
pub use scope::{
    AmbientScope, Interaction, InteractionKind, ListenerId, ListenerRegistration, WeakScope,
};
