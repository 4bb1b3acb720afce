//! Widgets composed from the Quiesce interaction core
//!
//! - `SearchBox`: debounced term feeding an async search provider
//! - `Dropdown`: single-select menu dismissed by outside clicks
//!
//! Rendering is left to the host; widgets only own state and region nodes.

pub mod dropdown;
pub mod provider;
pub mod search;

pub use dropdown::{Dropdown, DropdownOption};
pub use provider::{LookupError, SearchHit, SearchProvider, StaticProvider};
pub use search::{SearchBox, SearchState};
