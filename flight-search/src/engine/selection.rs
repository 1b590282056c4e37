//! Departure selection and arrival candidates.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::AirportRef;
use crate::lookup::AirportLookup;

use super::slot::Slot;

/// The arrival candidates for one chosen departure.
///
/// Departure and arrivals travel together as one value, so a consumer can
/// never observe one departure's label with another departure's airports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalBoard {
    /// The chosen departure.
    pub departure: AirportRef,

    /// Arrival candidates for the departure; empty while the lookup is in
    /// flight.
    pub arrivals: Vec<AirportRef>,
}

/// Owns the currently chosen departure and its arrival candidates.
///
/// At most one departure is active at a time. Selecting a new one
/// discards the previous board synchronously, before any arrival for the
/// new departure can arrive downstream.
#[derive(Clone)]
pub(crate) struct RouteSelection {
    board: Arc<Slot<Option<ArrivalBoard>>>,
    lookup: Arc<dyn AirportLookup>,
}

impl RouteSelection {
    pub fn new(lookup: Arc<dyn AirportLookup>) -> Self {
        Self {
            board: Arc::new(Slot::new(None)),
            lookup,
        }
    }

    /// Record the chosen departure and derive its arrival candidates.
    ///
    /// The empty board for the new departure is published immediately; a
    /// second call before the lookup resolves invalidates the first's
    /// eventual result.
    pub fn select_departure(&self, departure: AirportRef) {
        let generation = self.board.publish_now(Some(ArrivalBoard {
            departure: departure.clone(),
            arrivals: Vec::new(),
        }));

        let this = self.clone();
        tokio::spawn(async move {
            let arrivals = match this.lookup.match_arrivals(&departure).await {
                Ok(arrivals) => arrivals,
                Err(e) => {
                    warn!(departure = %departure.code, error = %e, "arrival lookup failed");
                    Vec::new()
                }
            };
            let board = ArrivalBoard {
                departure: departure.clone(),
                arrivals,
            };
            if !this.board.publish(generation, Some(board)) {
                debug!(departure = %departure.code, "discarding superseded arrival lookup");
            }
        });
    }

    /// Return to the initial state: no departure, empty arrivals.
    ///
    /// Any in-flight arrival lookup is invalidated.
    pub fn clear(&self) {
        self.board.publish_now(None);
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ArrivalBoard>> {
        self.board.subscribe()
    }
}
