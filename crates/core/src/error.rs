//! Error types shared across the workspace

use crate::region::NodeId;
use thiserror::Error;

/// Errors raised by core operations
///
/// Tearing down a region or cancelling a timer never produces one of these;
/// those paths degrade to silent no-ops.
#[derive(Debug, Error)]
pub enum Error {
    /// Node is not (or no longer) part of the region tree
    #[error("unknown region node: {0}")]
    UnknownNode(NodeId),

    /// Configuration value outside its accepted range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// I/O error while reading or writing configuration
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
