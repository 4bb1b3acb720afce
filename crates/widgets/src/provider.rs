//! Search provider boundary
//!
//! The remote lookup is an external collaborator: the widgets only need
//! `lookup(query) -> ranked hits`. `StaticProvider` ranks a fixed in-memory
//! corpus and stands in for a remote service in demos and tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// One ranked search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Stable page identifier
    pub id: u64,
    /// Result title
    pub title: String,
    /// Short excerpt
    pub snippet: String,
}

impl SearchHit {
    /// Create a hit
    pub fn new(id: u64, title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            snippet: snippet.into(),
        }
    }
}

/// Lookup failures reported by a provider
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// Provider could not be reached
    #[error("search provider unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous ranked text lookup
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Look up `query`, best match first
    async fn lookup(&self, query: &str) -> Result<Vec<SearchHit>, LookupError>;
}

/// Provider over a fixed corpus
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    corpus: Vec<SearchHit>,
    latency: Duration,
}

impl StaticProvider {
    /// Provider over `corpus`
    pub fn new(corpus: Vec<SearchHit>) -> Self {
        Self {
            corpus,
            latency: Duration::ZERO,
        }
    }

    /// Delay every lookup by `latency` (simulated round trip)
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Small built-in corpus for the demo CLI
    pub fn demo() -> Self {
        Self::new(vec![
            SearchHit::new(
                23015,
                "Programming language",
                "A programming language is a system of notation for writing programs",
            ),
            SearchHit::new(
                5311,
                "Computer programming",
                "Computer programming is the process of writing code to perform specific tasks",
            ),
            SearchHit::new(
                29414838,
                "Rust (programming language)",
                "Rust is a general-purpose programming language focused on memory safety",
            ),
            SearchHit::new(
                9845,
                "Debounce",
                "Debouncing ensures a signal that changes rapidly triggers only one action",
            ),
            SearchHit::new(
                1567,
                "Event (computing)",
                "An event is an action recognized by software, often originating asynchronously",
            ),
            SearchHit::new(
                6097297,
                "Drop-down list",
                "A drop-down list is a control element that lets the user choose one value",
            ),
            SearchHit::new(
                18839,
                "Memory safety",
                "Memory safety is the state of being protected from memory access bugs",
            ),
        ])
    }

    /// Rank the corpus against `query`
    ///
    /// Title matches count double. Entries with no match are dropped; ties keep
    /// corpus order.
    pub fn rank(&self, query: &str) -> Vec<SearchHit> {
        let terms: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        if terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &SearchHit)> = self
            .corpus
            .iter()
            .filter_map(|hit| {
                let title = hit.title.to_lowercase();
                let snippet = hit.snippet.to_lowercase();
                let score: usize = terms
                    .iter()
                    .map(|t| {
                        2 * title.matches(t.as_str()).count()
                            + snippet.matches(t.as_str()).count()
                    })
                    .sum();
                (score > 0).then_some((score, hit))
            })
            .collect();

        // Stable sort keeps corpus order for equal scores
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, hit)| hit.clone()).collect()
    }
}

#[async_trait]
impl SearchProvider for StaticProvider {
    async fn lookup(&self, query: &str) -> Result<Vec<SearchHit>, LookupError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.rank(query))
    }
}
