//! Airport lookup source.
//!
//! Provides text search over airports, arrival candidates for a chosen
//! departure, and exact code resolution. The engine only depends on the
//! [`AirportLookup`] trait; [`AirportDirectory`] is the in-memory
//! reference implementation backed by a JSON dataset.

mod directory;
mod error;

pub use directory::{AirportDirectory, AirportRecord};
pub use error::LookupError;

use async_trait::async_trait;

use crate::domain::{AirportRef, IataCode};

/// Read-only airport lookup source.
///
/// Implementations may have nondeterministic latency and may complete on
/// any worker; callers must not assume completion ordering between
/// concurrently issued calls.
#[async_trait]
pub trait AirportLookup: Send + Sync {
    /// Airports matching a text fragment, eligible as departures.
    ///
    /// Substring match over code or name, ranked by descending traffic
    /// volume. The empty string is not special-cased here; it matches
    /// according to the implementation's own policy.
    async fn match_departures(&self, text: &str) -> Result<Vec<AirportRef>, LookupError>;

    /// Arrival candidates for a chosen departure.
    ///
    /// All airports except those whose code or name equals the
    /// departure's code (self-match exclusion only).
    async fn match_arrivals(&self, departure: &AirportRef) -> Result<Vec<AirportRef>, LookupError>;

    /// Exact lookup by code. Absence is a valid, non-error outcome.
    async fn resolve(&self, code: &IataCode) -> Result<Option<AirportRef>, LookupError>;
}
