//! CLI command implementations

pub mod config;
pub mod dropdown;
pub mod search;
