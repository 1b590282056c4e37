//! In-memory airport directory.
//!
//! Serves airport data loaded from a JSON dataset file. Useful on its own
//! for small datasets and in tests as a stand-in for a database-backed
//! lookup source.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{AirportRef, IataCode};

use super::AirportLookup;
use super::error::LookupError;

/// Raw airport record as it appears in the dataset file.
#[derive(Debug, Clone, Deserialize)]
pub struct AirportRecord {
    pub id: i64,
    pub iata_code: String,
    pub name: String,
    /// Yearly passenger volume, the ranking key for departure matches.
    pub passengers: u64,
}

/// Wrapper for the dataset file.
#[derive(Debug, Deserialize)]
struct AirportsFile {
    airports: Vec<AirportRecord>,
}

/// A validated directory row.
#[derive(Debug, Clone)]
struct Airport {
    id: i64,
    code: IataCode,
    name: String,
    passengers: u64,
}

impl Airport {
    fn to_ref(&self) -> AirportRef {
        AirportRef::new(self.id, self.code, self.name.clone())
    }
}

/// In-memory airport lookup backed by a fixed dataset.
///
/// The dataset is immutable after construction; clones share it.
#[derive(Debug, Clone)]
pub struct AirportDirectory {
    airports: Arc<Vec<Airport>>,
}

impl AirportDirectory {
    /// Build a directory from raw records.
    ///
    /// Records whose code is not a valid IATA code are dropped. Codes are
    /// uppercased before validation, so lowercase dataset entries are
    /// accepted.
    pub fn new(records: Vec<AirportRecord>) -> Self {
        let airports = records
            .into_iter()
            .filter_map(|r| {
                let upper = r.iata_code.to_uppercase();
                match IataCode::parse(&upper) {
                    Ok(code) => Some(Airport {
                        id: r.id,
                        code,
                        name: r.name,
                        passengers: r.passengers,
                    }),
                    Err(e) => {
                        tracing::warn!(code = %r.iata_code, error = %e, "dropping airport record");
                        None
                    }
                }
            })
            .collect();

        Self {
            airports: Arc::new(airports),
        }
    }

    /// Load a directory from a JSON dataset file.
    ///
    /// Expects `{"airports": [{"id": .., "iata_code": .., "name": ..,
    /// "passengers": ..}, ..]}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LookupError> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| LookupError::Io {
            message: format!("{}: {}", path.as_ref().display(), e),
        })?;

        let file: AirportsFile = serde_json::from_str(&json).map_err(|e| LookupError::Parse {
            message: e.to_string(),
        })?;

        Ok(Self::new(file.airports))
    }

    /// Number of airports in the directory.
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

#[async_trait]
impl AirportLookup for AirportDirectory {
    async fn match_departures(&self, text: &str) -> Result<Vec<AirportRef>, LookupError> {
        let needle = text.to_lowercase();

        let mut matches: Vec<&Airport> = self
            .airports
            .iter()
            .filter(|a| {
                a.code.as_str().to_lowercase().contains(&needle)
                    || a.name.to_lowercase().contains(&needle)
            })
            .collect();

        matches.sort_by(|a, b| b.passengers.cmp(&a.passengers));

        Ok(matches.into_iter().map(Airport::to_ref).collect())
    }

    async fn match_arrivals(&self, departure: &AirportRef) -> Result<Vec<AirportRef>, LookupError> {
        // An airport is excluded only when its code or name equals the
        // departure's code; everything else is an arrival candidate.
        let key = departure.code.as_str();

        Ok(self
            .airports
            .iter()
            .filter(|a| a.code.as_str() != key && a.name != key)
            .map(Airport::to_ref)
            .collect())
    }

    async fn resolve(&self, code: &IataCode) -> Result<Option<AirportRef>, LookupError> {
        Ok(self
            .airports
            .iter()
            .find(|a| a.code == *code)
            .map(Airport::to_ref))
    }
}
