//! Debounced search widget
//!
//! Every keystroke goes into the debouncer. When the term settles, the
//! provider is queried and the results replace the current list. Only the
//! response for the latest settled term is applied; older responses arriving
//! late are dropped.

use crate::provider::{SearchHit, SearchProvider};
use debounce::Debouncer;
use parking_lot::Mutex;
use quiesce_core::DebounceConfig;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Observable state of a search box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Last settled term
    pub debounced_term: String,
    /// Results for the last applied lookup
    pub results: Vec<SearchHit>,
    /// Error from the last applied lookup, if it failed
    pub last_error: Option<String>,
    /// Sequence number of the latest issued lookup (0 = none yet)
    pub issued: u64,
    /// Sequence number of the last applied lookup
    pub applied: u64,
    torn_down: bool,
}

/// Search input with debounced remote lookup
pub struct SearchBox {
    term: String,
    debouncer: Debouncer<String>,
    state: Arc<Mutex<SearchState>>,
    provider: Arc<dyn SearchProvider>,
}

impl SearchBox {
    /// Create a search box starting at the configured initial term
    pub fn new(provider: Arc<dyn SearchProvider>, config: &DebounceConfig) -> Self {
        let state = Arc::new(Mutex::new(SearchState {
            debounced_term: config.initial_term.clone(),
            ..SearchState::default()
        }));

        let sink_state = Arc::clone(&state);
        let sink_provider = Arc::clone(&provider);
        let debouncer = Debouncer::from_config(config, move |term: String| {
            commit(&sink_state, &sink_provider, term);
        });

        Self {
            term: config.initial_term.clone(),
            debouncer,
            state,
            provider,
        }
    }

    /// Issue the lookup for the initial term
    ///
    /// Must be called inside a tokio runtime.
    pub fn mount(&self) {
        let term = self.state.lock().debounced_term.clone();
        commit(&self.state, &self.provider, term);
    }

    /// Input change: record the new term and restart the debounce window
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
        self.debouncer.observe(self.term.clone());
    }

    /// Commit the pending term immediately (e.g. Enter key)
    ///
    /// Returns false if nothing was pending.
    pub fn submit(&self) -> bool {
        self.debouncer.flush()
    }

    /// Tear down: no further lookups are issued and in-flight results are
    /// discarded. Idempotent.
    pub fn unmount(&self) {
        self.debouncer.cancel();
        let mut state = self.state.lock();
        if !state.torn_down {
            state.torn_down = true;
            debug!("Search box unmounted");
        }
    }

    /// Current input value
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Last settled term
    pub fn debounced_term(&self) -> String {
        self.state.lock().debounced_term.clone()
    }

    /// Results for the last settled term
    pub fn results(&self) -> Vec<SearchHit> {
        self.state.lock().results.clone()
    }

    /// Error from the latest lookup
    pub fn last_error(&self) -> Option<String> {
        self.state.lock().last_error.clone()
    }

    /// Whether the latest issued lookup is still outstanding
    pub fn is_loading(&self) -> bool {
        let state = self.state.lock();
        !state.torn_down && state.applied < state.issued
    }

    /// Whether a term is waiting out the debounce window
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Copy of the full state
    pub fn snapshot(&self) -> SearchState {
        self.state.lock().clone()
    }
}

impl Drop for SearchBox {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Record the settled term and spawn its lookup
fn commit(state: &Arc<Mutex<SearchState>>, provider: &Arc<dyn SearchProvider>, term: String) {
    let seq = {
        let mut s = state.lock();
        if s.torn_down {
            return;
        }
        s.debounced_term = term.clone();
        s.issued += 1;
        s.issued
    };
    debug!(seq, term = %term, "Issuing search lookup");

    let state = Arc::clone(state);
    let provider = Arc::clone(provider);
    tokio::spawn(async move {
        let outcome = provider.lookup(&term).await;

        let mut s = state.lock();
        if s.torn_down {
            debug!(seq, "Discarding lookup result after unmount");
            return;
        }
        if seq != s.issued {
            debug!(seq, latest = s.issued, "Discarding stale lookup result");
            return;
        }

        match outcome {
            Ok(hits) => {
                info!(term = %term, hits = hits.len(), "Search results updated");
                s.results = hits;
                s.last_error = None;
            }
            Err(e) => {
                warn!(term = %term, "Search lookup failed: {}", e);
                s.last_error = Some(e.to_string());
            }
        }
        s.applied = seq;
    });
}
