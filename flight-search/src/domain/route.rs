//! Route types: candidate pairs, favorite records, and the joined view.

use super::airport::{AirportRef, IataCode};

/// An ordered departure/arrival pair of airports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCandidate {
    /// The chosen departure airport.
    pub departure: AirportRef,

    /// The arrival airport.
    pub arrival: AirportRef,
}

impl RouteCandidate {
    /// Create a new route candidate.
    pub fn new(departure: AirportRef, arrival: AirportRef) -> Self {
        Self { departure, arrival }
    }

    /// The composite identity used for favorite membership.
    ///
    /// This is the sum of the two endpoint airport ids. The sum is not
    /// injective: distinct pairs can produce the same composite id, and
    /// such pairs share favorite membership. This is the established
    /// identity convention for favorites and is relied upon by the store.
    pub fn composite_id(&self) -> i64 {
        self.departure.id + self.arrival.id
    }

    /// Convert to the persistable favorite record.
    pub fn to_favorite(&self) -> FavoriteRoute {
        FavoriteRoute {
            composite_id: self.composite_id(),
            departure_code: self.departure.code,
            destination_code: self.arrival.code,
        }
    }
}

/// A persisted favorite route, keyed by composite id.
///
/// Created when a user toggles a route to favorite, destroyed on
/// toggle-off. Lifetime is owned by the favorite store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteRoute {
    /// Composite identity (sum of the endpoint airport ids).
    pub composite_id: i64,

    /// IATA code of the departure airport.
    pub departure_code: IataCode,

    /// IATA code of the destination airport.
    pub destination_code: IataCode,
}

/// A route candidate joined with its favorite status.
///
/// Ephemeral: recomputed from upstream sources, never persisted directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteView {
    /// The underlying route pair.
    pub route: RouteCandidate,

    /// Whether the route's composite id is present in the favorite store.
    pub is_favorite: bool,
}
