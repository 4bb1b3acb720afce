//! Scripted search session
//!
//! Replays keystrokes against a `SearchBox` backed by the built-in corpus and
//! reports every lookup the debouncer lets through.

use crate::script::{self, Keystroke};
use crate::system_config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use widgets::{LookupError, SearchBox, SearchHit, SearchProvider, StaticProvider};

/// Provider wrapper recording when each lookup was issued
struct RecordingProvider {
    inner: StaticProvider,
    start: Instant,
    quiet: bool,
    lookups: Mutex<Vec<(Duration, String)>>,
}

#[async_trait]
impl SearchProvider for RecordingProvider {
    async fn lookup(&self, query: &str) -> Result<Vec<SearchHit>, LookupError> {
        let at = self.start.elapsed();
        if !self.quiet {
            println!(
                "{:>6}ms  {} {}",
                at.as_millis(),
                "settled".green(),
                query.bold()
            );
        }
        self.lookups.lock().push((at, query.to_string()));
        self.inner.lookup(query).await
    }
}

pub async fn run(
    script: &str,
    window_ms: Option<u64>,
    latency_ms: u64,
    initial: bool,
    json: bool,
) -> Result<()> {
    let mut settings = system_config::load()?;
    if let Some(window_ms) = window_ms {
        settings.debounce.window_ms = window_ms;
    }
    settings.validate().context("Invalid debounce window")?;

    let keystrokes = script::parse_search(script)?;
    let latency = Duration::from_millis(latency_ms);

    let provider = Arc::new(RecordingProvider {
        inner: StaticProvider::demo().with_latency(latency),
        start: Instant::now(),
        quiet: json,
        lookups: Mutex::new(Vec::new()),
    });
    let mut search = SearchBox::new(provider.clone(), &settings.debounce);
    tracing::info!(
        window_ms = settings.debounce.window_ms,
        keystrokes = keystrokes.len(),
        "Starting search session"
    );

    if initial {
        search.mount();
    }

    for Keystroke { at_ms, term } in keystrokes {
        tokio::time::sleep_until(provider.start + Duration::from_millis(at_ms)).await;
        if !json {
            println!("{:>6}ms  {} {}", at_ms, "typed".dimmed(), term);
        }
        search.set_term(term);
    }

    // Let the last window run out and the lookup land
    let drain = settings.debounce.window() + latency + Duration::from_millis(50);
    tokio::time::sleep(drain).await;
    while search.is_loading() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    if json {
        let results = search.results();
        println!(
            "{}",
            serde_json::to_string_pretty(&results).context("Failed to encode results")?
        );
        search.unmount();
        return Ok(());
    }

    let lookups = provider.lookups.lock().len();
    println!(
        "\n{} {} (term: {}, lookups: {})",
        "Results".bold(),
        format!("[{}]", search.results().len()).dimmed(),
        search.debounced_term().cyan(),
        lookups
    );
    if let Some(error) = search.last_error() {
        println!("  {} {}", "error:".red(), error);
    }
    for hit in search.results() {
        println!("  {} {}", format!("{:>9}", hit.id).yellow(), hit.title);
    }

    search.unmount();
    Ok(())
}
