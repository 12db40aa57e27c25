//! Core domain logic for Scholia, an academic catalogue.
//! This crate is the single source of truth for catalogue invariants.

pub mod config;
pub mod contribution;
pub mod db;
pub mod graph;
pub mod logging;
pub mod model;
pub mod novelty;
pub mod query;
pub mod service;
pub mod storage;
pub mod store;

pub use config::{resolve_db_path, StoreConfig};
pub use contribution::kind::{ContributionField, ContributionKind};
pub use contribution::{apply_contribution, Contribution, ContributionError, ContributionForm};
pub use graph::{build_graph, GraphData, GraphLink, GraphNode, LinkKind};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::academic::{AcademicRecord, Event, Paper, Taxonomies, TaxonomyCategory};
pub use model::tile::NoveltyTile;
pub use model::ModelError;
pub use novelty::{generate_procedural_tile, tile_from_contribution};
pub use query::related::RelatedAcademic;
pub use query::search::{SearchCriteria, SortKey};
pub use storage::{DurableStore, MemoryStore, SqliteStore, StorageError, StorageResult};
pub use store::{
    CatalogSnapshot, InMemoryRecordStore, LoadReport, LoadWarning, RecordStore, SaveOutcome,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
