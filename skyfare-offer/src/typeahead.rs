//! Debounced airport suggestions.
//!
//! Every keystroke restarts a short timer; the lookup only runs once the
//! timer fires without being replaced. Each query gets a sequence number and
//! a response is dropped on arrival if a newer query has been typed since.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use skyfare_core::OfferSource;
use skyfare_shared::Airport;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::gateway::search_airports;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeaheadConfig {
    pub debounce: Duration,
    pub min_chars: usize,
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_chars: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Suggestions {
    pub query: String,
    pub airports: Vec<Airport>,
    pub searching: bool,
}

pub struct AirportTypeahead {
    source: Arc<dyn OfferSource>,
    config: TypeaheadConfig,
    sequence: Arc<AtomicU64>,
    timer: Option<JoinHandle<()>>,
    tx: watch::Sender<Suggestions>,
}

impl AirportTypeahead {
    pub fn new(source: Arc<dyn OfferSource>, config: TypeaheadConfig) -> Self {
        let (tx, _) = watch::channel(Suggestions::default());
        Self {
            source,
            config,
            sequence: Arc::new(AtomicU64::new(0)),
            timer: None,
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Suggestions> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> Suggestions {
        self.tx.borrow().clone()
    }

    /// Registers a keystroke. Must be called from within a Tokio runtime.
    pub fn set_query(&mut self, query: &str) {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let query = query.trim().to_string();
        if query.chars().count() < self.config.min_chars {
            self.tx.send_replace(Suggestions { query, airports: Vec::new(), searching: false });
            return;
        }

        let source = self.source.clone();
        let sequence = self.sequence.clone();
        let tx = self.tx.clone();
        let delay = self.config.debounce;

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            // The lookup runs detached so that a newer keystroke cancels only
            // the timer; an in-flight lookup is filtered by sequence instead.
            tokio::spawn(async move {
                tx.send_modify(|s| s.searching = true);
                let airports = search_airports(source.as_ref(), &query).await;

                if sequence.load(Ordering::SeqCst) != seq {
                    debug!("Dropping stale airport suggestions for {:?}", query);
                    return;
                }
                tx.send_replace(Suggestions { query, airports, searching: false });
            });
        }));
    }
}

impl Drop for AirportTypeahead {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
