//! Domain types for the flight search engine.
//!
//! This module contains the core domain model: validated airport
//! identifiers, airport references, and route pairs. Types enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod airport;
mod route;

pub use airport::{AirportRef, IataCode, InvalidIata};
pub use route::{FavoriteRoute, RouteCandidate, RouteView};
