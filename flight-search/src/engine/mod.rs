//! The state-synchronization engine.
//!
//! Wires the search text, departure selection, and favorite joins into
//! one coherent state machine: user commands go in, four read-only
//! observable views come out. Every derived view follows latest-wins
//! semantics — when a prerequisite changes mid-flight, the superseded
//! derivation is discarded on arrival, never merged with the newer one.

mod join;
mod search;
mod selection;
mod slot;


pub use selection::ArrivalBoard;

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::domain::{AirportRef, FavoriteRoute, RouteView};
use crate::favorites::{FavoriteStore, FavoriteStoreError};
use crate::lookup::AirportLookup;
use crate::prefs::QueryStore;

use join::FavoriteJoin;
use search::SearchState;
use selection::RouteSelection;

/// Which derived view is currently authoritative for display.
///
/// Purely a UI-mode selector: it owns no data, it only decides which view
/// the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Search text is empty; show the favorites view.
    Favorites,

    /// Text is non-empty and no departure is chosen; show departure
    /// candidates.
    Departures,

    /// A departure has been chosen and not superseded by a new query;
    /// show its routes.
    RoutesForDeparture,
}

/// The composition root.
///
/// Constructed over three collaborators — the airport lookup, the
/// favorite store, and the query-text slot — and a running Tokio runtime.
/// Commands are non-blocking; derived views are observed through
/// [`watch::Receiver`] subscriptions, which deliver the newest value only.
///
/// Background listener tasks are scoped to the engine and aborted when it
/// is dropped.
pub struct SyncEngine {
    search: SearchState,
    selection: RouteSelection,
    join: FavoriteJoin,
    mode: Arc<watch::Sender<DisplayMode>>,
    store: Arc<dyn FavoriteStore>,
    listeners: Vec<JoinHandle<()>>,
}

impl SyncEngine {
    /// Start the engine.
    ///
    /// Loads the persisted search text (falling back to the empty string
    /// on failure — persistence problems are never surfaced), enters the
    /// matching initial mode, and issues the initial departure lookup for
    /// the restored text.
    pub async fn start(
        lookup: Arc<dyn AirportLookup>,
        store: Arc<dyn FavoriteStore>,
        prefs: Arc<dyn QueryStore>,
    ) -> Self {
        let initial_query = match prefs.load().await {
            Ok(query) => query,
            Err(e) => {
                warn!(error = %e, "failed to load persisted search query");
                String::new()
            }
        };

        let search = SearchState::new(Arc::clone(&lookup), prefs);
        let selection = RouteSelection::new(Arc::clone(&lookup));
        let join = FavoriteJoin::new(
            Arc::clone(&store),
            Arc::clone(&lookup),
            selection.subscribe(),
        );

        let initial_mode = if initial_query.is_empty() {
            DisplayMode::Favorites
        } else {
            DisplayMode::Departures
        };
        let (mode, _) = watch::channel(initial_mode);

        let listeners = vec![
            spawn_routes_listener(join.clone(), selection.subscribe(), store.list_all()),
            spawn_favorites_listener(join.clone(), store.list_all()),
        ];

        // Restoring the text derives the departure view exactly like a
        // typed query, but must not write the value straight back.
        search.set_query(initial_query, false);

        Self {
            search,
            selection,
            join,
            mode: Arc::new(mode),
            store,
            listeners,
        }
    }

    /// Replace the search text.
    ///
    /// Persists the text (fire-and-forget), re-derives the departure
    /// candidates with cancellation of any outstanding lookup, discards
    /// any active departure selection, and switches the display mode.
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();

        self.selection.clear();
        self.mode.send_replace(if text.is_empty() {
            DisplayMode::Favorites
        } else {
            DisplayMode::Departures
        });
        self.search.set_query(text, true);
    }

    /// Choose a departure and derive its arrival candidates.
    ///
    /// A second call before the first resolves invalidates the first's
    /// eventual result.
    pub fn select_departure(&self, departure: AirportRef) {
        self.mode.send_replace(DisplayMode::RoutesForDeparture);
        self.selection.select_departure(departure);
    }

    /// Drop the active departure selection and return to the mode implied
    /// by the current search text.
    pub fn clear_selection(&self) {
        self.selection.clear();
        self.mode.send_replace(if self.search.current_query().is_empty() {
            DisplayMode::Favorites
        } else {
            DisplayMode::Departures
        });
    }

    /// Toggle a route's favorite membership.
    ///
    /// Membership is round-tripped through the store — never a cached
    /// flag. The candidate join is re-derived before this returns, so the
    /// flags observed by the caller are immediately consistent. The store
    /// error, if any, is returned for presentation, but the engine state
    /// stays consistent either way.
    pub async fn toggle_favorite(&self, view: &RouteView) -> Result<(), FavoriteStoreError> {
        let favorite = view.route.to_favorite();

        let result = async {
            if self.store.exists(favorite.composite_id).await? {
                self.store.delete(&favorite).await
            } else {
                self.store.insert(favorite).await
            }
        }
        .await;

        if let Err(e) = &result {
            warn!(error = %e, "favorite toggle failed");
        }

        self.join.refresh_routes().await;
        result
    }

    /// The latest search text.
    pub fn current_query(&self) -> String {
        self.search.current_query()
    }

    /// Observe the search text.
    pub fn query(&self) -> watch::Receiver<String> {
        self.search.subscribe_query()
    }

    /// Observe the display mode.
    pub fn mode(&self) -> watch::Receiver<DisplayMode> {
        self.mode.subscribe()
    }

    /// Observe the departure-candidate view.
    pub fn departures(&self) -> watch::Receiver<Vec<AirportRef>> {
        self.search.subscribe_departures()
    }

    /// Observe the arrival board for the current selection.
    pub fn arrival_board(&self) -> watch::Receiver<Option<ArrivalBoard>> {
        self.selection.subscribe()
    }

    /// Observe the candidate join: arrivals with their favorite flags.
    pub fn routes(&self) -> watch::Receiver<Vec<RouteView>> {
        self.join.subscribe_routes()
    }

    /// Observe the favorites view: every stored favorite with full
    /// airport details.
    pub fn favorites(&self) -> watch::Receiver<Vec<RouteView>> {
        self.join.subscribe_favorites()
    }
}

impl Drop for SyncEngine {
    fn drop(&mut self) {
        for listener in &self.listeners {
            listener.abort();
        }
    }
}

/// Recompute the candidate join whenever the arrival board or the
/// favorite listing changes.
fn spawn_routes_listener(
    join: FavoriteJoin,
    mut board: watch::Receiver<Option<ArrivalBoard>>,
    mut listing: watch::Receiver<Vec<FavoriteRoute>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                changed = board.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                changed = listing.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
            join.refresh_routes().await;
        }
    })
}

/// Recompute the favorites join on startup and on every listing change.
fn spawn_favorites_listener(
    join: FavoriteJoin,
    mut listing: watch::Receiver<Vec<FavoriteRoute>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let snapshot = listing.borrow_and_update().clone();
            join.refresh_favorites(&snapshot).await;
            if listing.changed().await.is_err() {
                break;
            }
        }
    })
}
