//! Query and scoring layer.
//!
//! # Responsibility
//! - Match academics against search criteria.
//! - Rank related academics by connections and shared taxonomy tags.
//! - Summarize taxonomy usage across the catalogue.
//!
//! # Invariants
//! - Every function is pure over the snapshot it receives.
//! - Misses return empty results, never errors.

pub mod related;
pub mod search;
pub mod taxonomy;
