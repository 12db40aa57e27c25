//! Record store owning academics, novelty tiles and favorites.
//!
//! # Responsibility
//! - Own the three catalogue collections; callers mutate only through
//!   store methods.
//! - Load, save and merge through a [`DurableStore`] backend.
//! - Expose lookup, search and related-academics queries.
//!
//! # Invariants
//! - Academics are keyed by their exact, case-sensitive `name`.
//! - Iteration order is ascending by name and is the tie-break order for
//!   related-academics ranking.
//! - A backend that fails its probe at `open` as unavailable is dropped; the
//!   store then runs in memory and persistence calls are silent no-ops.
//! - A backend that is only short of capacity is kept and loaded.
//! - Favorites never contain blank names.

mod persist;
pub mod seed;

pub use persist::{CatalogSnapshot, LoadReport, LoadWarning, SaveOutcome};

use crate::config::StoreConfig;
use crate::model::academic::{AcademicRecord, TaxonomyCategory};
use crate::model::tile::{newest_first, NoveltyTile};
use crate::model::ModelError;
use crate::query::related::{rank_related, RelatedAcademic};
use crate::query::search::{search, SearchCriteria};
use crate::query::taxonomy::{academics_by_taxonomy, taxonomy_values};
use crate::storage::{DurableStore, MemoryStore};
use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet};

/// Record store over a durable slot backend.
pub struct RecordStore<S: DurableStore> {
    academics: BTreeMap<String, AcademicRecord>,
    tiles: Vec<NoveltyTile>,
    favorites: BTreeSet<String>,
    backend: Option<S>,
    config: StoreConfig,
    load_report: LoadReport,
}

/// Store without durable persistence.
pub type InMemoryRecordStore = RecordStore<MemoryStore>;

impl<S: DurableStore> RecordStore<S> {
    /// Opens a store over `backend` and restores persisted state.
    ///
    /// The backend is probed once. When the probe reports the backend as
    /// unusable the store keeps running in memory, seeded with the built-in
    /// defaults. A probe rejected for capacity still proves the backend is
    /// reachable, so it is kept.
    pub fn open(mut backend: S, config: StoreConfig) -> Self {
        let backend = match backend.probe() {
            Ok(()) => Some(backend),
            Err(err) if err.is_capacity_exceeded() => {
                warn!(
                    "event=store_open module=store status=degraded reason=capacity_exceeded error={err}"
                );
                Some(backend)
            }
            Err(err) => {
                warn!(
                    "event=store_open module=store status=degraded reason=storage_unavailable error={err}"
                );
                None
            }
        };

        let mut store = Self::empty(backend, config);
        store.load_from_durable_store();
        info!(
            "event=store_open module=store status=ok persistent={} academics={} tiles={} favorites={}",
            store.is_persistent(),
            store.academics.len(),
            store.tiles.len(),
            store.favorites.len()
        );
        store
    }

    /// Creates a store with no backend, seeded with the built-in defaults.
    pub fn in_memory(config: StoreConfig) -> Self {
        let mut store = Self::empty(None, config);
        store.load_from_durable_store();
        store
    }

    /// Creates a store with no backend and no records.
    pub fn empty_in_memory(config: StoreConfig) -> Self {
        Self::empty(None, config)
    }

    fn empty(backend: Option<S>, config: StoreConfig) -> Self {
        Self {
            academics: BTreeMap::new(),
            tiles: Vec::new(),
            favorites: BTreeSet::new(),
            backend,
            config,
            load_report: LoadReport::default(),
        }
    }

    /// Saves once and hands the backend back to the caller.
    pub fn close(mut self) -> Option<S> {
        let outcome = self.save_to_durable_store();
        info!("event=store_close module=store status=ok outcome={}", outcome.label());
        self.backend.take()
    }

    /// Whether writes reach a durable backend.
    pub fn is_persistent(&self) -> bool {
        self.backend.is_some()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Report of the most recent load.
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Read access to the backend, mainly for diagnostics.
    pub fn backend(&self) -> Option<&S> {
        self.backend.as_ref()
    }

    /// Exact, case-sensitive lookup.
    pub fn get_academic(&self, name: &str) -> Option<&AcademicRecord> {
        self.academics.get(name)
    }

    /// All academics in iteration order (ascending name).
    pub fn get_all_academics(&self) -> Vec<&AcademicRecord> {
        self.academics.values().collect()
    }

    pub fn academic_count(&self) -> usize {
        self.academics.len()
    }

    /// Case-insensitive search; never fails.
    pub fn search_academics(&self, criteria: &SearchCriteria) -> Vec<&AcademicRecord> {
        search(self.academics.values(), &self.favorites, criteria)
    }

    /// Inserts or replaces a record, returning the previous value.
    pub fn add_academic(
        &mut self,
        mut record: AcademicRecord,
    ) -> Result<Option<AcademicRecord>, ModelError> {
        record.validate()?;
        record.normalize();
        Ok(self.academics.insert(record.name.clone(), record))
    }

    pub fn remove_academic(&mut self, name: &str) -> Option<AcademicRecord> {
        self.academics.remove(name)
    }

    /// Union-merges `record` into the stored record of the same name,
    /// inserting it when absent.
    pub fn merge_academic(&mut self, mut record: AcademicRecord) -> Result<&AcademicRecord, ModelError> {
        record.validate()?;
        record.normalize();
        let name = record.name.clone();
        let merged = match self.academics.remove(&name) {
            Some(mut existing) => {
                existing.merge_from(record);
                existing
            }
            None => record,
        };
        let stored: &AcademicRecord = self.academics.entry(name).or_insert(merged);
        Ok(stored)
    }

    /// Mutable access for in-place edits by contribution handlers.
    pub(crate) fn academic_mut(&mut self, name: &str) -> Option<&mut AcademicRecord> {
        self.academics.get_mut(name)
    }

    /// Related academics, highest score first. `None` uses the configured
    /// default limit.
    pub fn get_related_academics(
        &self,
        record: &AcademicRecord,
        limit: Option<usize>,
    ) -> Vec<&AcademicRecord> {
        self.related_academics_scored(record, limit)
            .into_iter()
            .map(|related| related.record)
            .collect()
    }

    /// Related academics with their scores.
    pub fn related_academics_scored(
        &self,
        record: &AcademicRecord,
        limit: Option<usize>,
    ) -> Vec<RelatedAcademic<'_>> {
        let limit = limit.unwrap_or(self.config.related_limit);
        rank_related(record, self.academics.values(), limit)
    }

    pub fn taxonomy_values(&self, category: TaxonomyCategory) -> Vec<(String, usize)> {
        taxonomy_values(self.academics.values(), category)
    }

    pub fn academics_by_taxonomy(
        &self,
        category: TaxonomyCategory,
        value: &str,
    ) -> Vec<&AcademicRecord> {
        academics_by_taxonomy(self.academics.values(), category, value)
    }

    /// Adds a favorite. Returns `true` when the name was newly added;
    /// blank names are rejected.
    pub fn add_to_favorites(&mut self, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        self.favorites.insert(name.to_string())
    }

    /// Removes a favorite. Returns `true` when the name was present.
    pub fn remove_from_favorites(&mut self, name: &str) -> bool {
        self.favorites.remove(name)
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorites.contains(name)
    }

    /// Favorites in ascending order.
    pub fn favorites(&self) -> Vec<&str> {
        self.favorites.iter().map(String::as_str).collect()
    }

    /// Appends a tile. Unbounded in memory; persistence keeps the newest.
    pub fn add_novelty_tile(&mut self, tile: NoveltyTile) -> Result<(), ModelError> {
        tile.validate()?;
        self.tiles.push(tile);
        Ok(())
    }

    /// Tiles newest first.
    pub fn novelty_tiles(&self) -> Vec<&NoveltyTile> {
        newest_first(&self.tiles)
    }

    pub fn novelty_tile_count(&self) -> usize {
        self.tiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryRecordStore;
    use crate::config::StoreConfig;
    use crate::model::academic::{AcademicRecord, TaxonomyCategory};

    #[test]
    fn in_memory_store_is_seeded_and_not_persistent() {
        let store = InMemoryRecordStore::in_memory(StoreConfig::default());
        assert!(!store.is_persistent());
        assert!(store.academic_count() > 0);
    }

    #[test]
    fn merge_inserts_then_unions() {
        let mut store = InMemoryRecordStore::empty_in_memory(StoreConfig::default());
        store
            .merge_academic(AcademicRecord::new("A").with_tag(TaxonomyCategory::Era, "Modern"))
            .expect("insert via merge");
        let merged = store
            .merge_academic(AcademicRecord::new("A").with_connection("B"))
            .expect("merge");
        assert!(merged.connections.contains("B"));
        assert!(merged.has_tag(TaxonomyCategory::Era, "modern"));
    }

    #[test]
    fn blank_favorites_are_rejected() {
        let mut store = InMemoryRecordStore::empty_in_memory(StoreConfig::default());
        assert!(!store.add_to_favorites(""));
        assert!(!store.add_to_favorites("  "));
        assert!(store.add_to_favorites("X"));
        assert_eq!(store.favorites(), vec!["X"]);
    }

    #[test]
    fn record_with_empty_category_reads_back_unchanged() {
        let mut store = InMemoryRecordStore::empty_in_memory(StoreConfig::default());
        let mut record = AcademicRecord::new("A");
        record.taxonomies.entry(TaxonomyCategory::Theme).or_default();
        store.add_academic(record.clone()).expect("add");
        assert_eq!(store.get_academic("A"), Some(&record));
    }

    #[test]
    fn related_uses_configured_default_limit() {
        let config = StoreConfig {
            related_limit: 1,
            ..StoreConfig::default()
        };
        let mut store = InMemoryRecordStore::empty_in_memory(config);
        for name in ["A", "B", "C"] {
            store
                .add_academic(AcademicRecord::new(name).with_tag(TaxonomyCategory::Theme, "X"))
                .expect("add");
        }
        let a = store.get_academic("A").expect("A exists").clone();
        assert_eq!(store.get_related_academics(&a, None).len(), 1);
        assert_eq!(store.get_related_academics(&a, Some(5)).len(), 2);
    }
}
