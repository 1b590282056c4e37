//! Search text and departure candidates.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::AirportRef;
use crate::lookup::AirportLookup;
use crate::prefs::QueryStore;

use super::slot::Slot;

/// Owns the current search text and the departure-candidate view derived
/// from it.
///
/// Each accepted query supersedes any outstanding lookup for the previous
/// text and publishes exactly one terminal value: the new candidate list,
/// or nothing if superseded in turn.
#[derive(Clone)]
pub(crate) struct SearchState {
    query: Arc<watch::Sender<String>>,
    departures: Arc<Slot<Vec<AirportRef>>>,
    lookup: Arc<dyn AirportLookup>,
    prefs: Arc<dyn QueryStore>,
}

impl SearchState {
    pub fn new(lookup: Arc<dyn AirportLookup>, prefs: Arc<dyn QueryStore>) -> Self {
        let (query, _) = watch::channel(String::new());
        Self {
            query: Arc::new(query),
            departures: Arc::new(Slot::new(Vec::new())),
            lookup,
            prefs,
        }
    }

    /// Replace the search text and re-derive the departure candidates.
    ///
    /// Non-blocking: persistence and the lookup run on background tasks.
    /// `persist` is false when restoring the text at startup, which must
    /// not write the value straight back.
    pub fn set_query(&self, text: String, persist: bool) {
        self.query.send_replace(text.clone());

        if persist {
            let prefs = Arc::clone(&self.prefs);
            let saved = text.clone();
            tokio::spawn(async move {
                if let Err(e) = prefs.save(&saved).await {
                    warn!(error = %e, "failed to persist search query");
                }
            });
        }

        let generation = self.departures.begin();
        let this = self.clone();
        tokio::spawn(async move {
            let candidates = match this.lookup.match_departures(&text).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!(query = %text, error = %e, "departure lookup failed");
                    Vec::new()
                }
            };
            if !this.departures.publish(generation, candidates) {
                debug!(query = %text, "discarding superseded departure lookup");
            }
        });
    }

    /// The latest search text.
    pub fn current_query(&self) -> String {
        self.query.borrow().clone()
    }

    pub fn subscribe_query(&self) -> watch::Receiver<String> {
        self.query.subscribe()
    }

    pub fn subscribe_departures(&self) -> watch::Receiver<Vec<AirportRef>> {
        self.departures.subscribe()
    }
}
