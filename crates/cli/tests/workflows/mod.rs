//! Workflow integration tests
//!
//! Tests for complete workflows that exercise the binary end to end.

pub mod config;
pub mod dropdown;
pub mod search;
