//! Flight route search engine.
//!
//! An in-process library that keeps a flight-search UI's derived views
//! consistent under rapid, overlapping user actions: search text,
//! departure candidates, arrival routes with favorite flags, and the
//! favorites list with full airport details. Superseded lookups are
//! discarded on arrival (latest-wins), never merged with newer results.

pub mod cache;
pub mod domain;
pub mod engine;
pub mod favorites;
pub mod lookup;
pub mod prefs;
