//! Favorite joins.
//!
//! Two independent derived views over the favorite store:
//!
//! - the *candidate join*: the current arrival board joined with favorite
//!   membership, yielding the "routes with favorite flag" view;
//! - the *favorites join*: the store's live listing joined with full
//!   airport details for the favorites tab.
//!
//! Both are recomputed idempotently from snapshots of their inputs.
//! Recomputations of one view are serialized: each one snapshots its
//! inputs after the previous recomputation published, so the last
//! triggered recomputation always reflects the newest inputs and an
//! earlier slow derivation can never overwrite a later one.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};

use crate::domain::{AirportRef, FavoriteRoute, IataCode, RouteCandidate, RouteView};
use crate::favorites::FavoriteStore;
use crate::lookup::AirportLookup;

use super::selection::ArrivalBoard;

/// Derives the route views from the arrival board and the favorite store.
#[derive(Clone)]
pub(crate) struct FavoriteJoin {
    routes: Arc<watch::Sender<Vec<RouteView>>>,
    routes_lock: Arc<Mutex<()>>,
    favorites: Arc<watch::Sender<Vec<RouteView>>>,
    favorites_lock: Arc<Mutex<()>>,
    store: Arc<dyn FavoriteStore>,
    lookup: Arc<dyn AirportLookup>,
    board: watch::Receiver<Option<ArrivalBoard>>,
}

impl FavoriteJoin {
    pub fn new(
        store: Arc<dyn FavoriteStore>,
        lookup: Arc<dyn AirportLookup>,
        board: watch::Receiver<Option<ArrivalBoard>>,
    ) -> Self {
        let (routes, _) = watch::channel(Vec::new());
        let (favorites, _) = watch::channel(Vec::new());
        Self {
            routes: Arc::new(routes),
            routes_lock: Arc::new(Mutex::new(())),
            favorites: Arc::new(favorites),
            favorites_lock: Arc::new(Mutex::new(())),
            store,
            lookup,
            board,
        }
    }

    /// Recompute the candidate join from the current arrival board.
    ///
    /// Membership checks run concurrently across arrivals; the published
    /// list preserves the arrival order. A failed membership check
    /// degrades that entry to not-favorite rather than dropping the view.
    pub async fn refresh_routes(&self) {
        let _serialized = self.routes_lock.lock().await;

        let Some(board) = self.board.borrow().clone() else {
            self.routes.send_replace(Vec::new());
            return;
        };

        let checks = board.arrivals.into_iter().map(|arrival| {
            let route = RouteCandidate::new(board.departure.clone(), arrival);
            let store = Arc::clone(&self.store);
            async move {
                let is_favorite = match store.exists(route.composite_id()).await {
                    Ok(is_favorite) => is_favorite,
                    Err(e) => {
                        warn!(composite_id = route.composite_id(), error = %e,
                            "favorite membership check failed");
                        false
                    }
                };
                RouteView { route, is_favorite }
            }
        });

        let views = join_all(checks).await;
        self.routes.send_replace(views);
    }

    /// Recompute the favorites join from a snapshot of the store listing.
    ///
    /// Both endpoints of every favorite are resolved through the lookup;
    /// entries whose endpoints no longer resolve are omitted.
    pub async fn refresh_favorites(&self, listing: &[FavoriteRoute]) {
        let _serialized = self.favorites_lock.lock().await;

        let resolutions = listing.iter().map(|favorite| {
            let lookup = Arc::clone(&self.lookup);
            let favorite = favorite.clone();
            async move {
                let departure = resolve_endpoint(&lookup, &favorite.departure_code).await?;
                let arrival = resolve_endpoint(&lookup, &favorite.destination_code).await?;
                Some(RouteView {
                    route: RouteCandidate::new(departure, arrival),
                    is_favorite: true,
                })
            }
        });

        let views: Vec<RouteView> = join_all(resolutions).await.into_iter().flatten().collect();
        self.favorites.send_replace(views);
    }

    pub fn subscribe_routes(&self) -> watch::Receiver<Vec<RouteView>> {
        self.routes.subscribe()
    }

    pub fn subscribe_favorites(&self) -> watch::Receiver<Vec<RouteView>> {
        self.favorites.subscribe()
    }
}

/// Resolve one favorite endpoint, treating both absence and source
/// failure as an omitted entry.
async fn resolve_endpoint(
    lookup: &Arc<dyn AirportLookup>,
    code: &IataCode,
) -> Option<AirportRef> {
    match lookup.resolve(code).await {
        Ok(Some(airport)) => Some(airport),
        Ok(None) => {
            debug!(code = %code, "favorite endpoint no longer resolves");
            None
        }
        Err(e) => {
            warn!(code = %code, error = %e, "favorite endpoint resolution failed");
            None
        }
    }
}
