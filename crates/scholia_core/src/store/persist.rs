//! Slot persistence for the record store.
//!
//! # Responsibility
//! - Encode the three collections into JSON slots and write them.
//! - Restore collections entry by entry, dropping corrupt entries.
//! - Export and import whole-catalogue snapshots.
//!
//! # Invariants
//! - Save and load never return errors or panic; failures are logged and
//!   reported through [`SaveOutcome`] / [`LoadReport`].
//! - A capacity-exceeded write triggers exactly one tile eviction and one
//!   retry of the whole write.
//! - An empty academics collection after load is re-seeded with defaults.

use super::seed::default_academics;
use super::RecordStore;
use crate::model::academic::AcademicRecord;
use crate::model::tile::{newest_first, NoveltyTile};
use crate::storage::{DurableStore, StorageError};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Result of [`RecordStore::save_to_durable_store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// All slots written on the first attempt.
    Saved,
    /// All slots written after evicting `evicted` tiles.
    SavedAfterEviction { evicted: usize },
    /// No durable backend; nothing written.
    Skipped,
    /// Write failed; in-memory state is unchanged apart from any eviction.
    Failed { reason: String },
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved | Self::SavedAfterEviction { .. })
    }

    /// Short label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::SavedAfterEviction { .. } => "saved_after_eviction",
            Self::Skipped => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}

/// One dropped slot or entry during load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub slot: String,
    /// Entry key or index within the slot; `None` for whole-slot problems.
    pub entry: Option<String>,
    pub reason: String,
}

/// Summary of [`RecordStore::load_from_durable_store`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub academics_loaded: usize,
    pub tiles_loaded: usize,
    pub favorites_loaded: usize,
    /// Defaults were inserted because no academics survived the load.
    pub seeded: bool,
    pub warnings: Vec<LoadWarning>,
}

/// Whole-catalogue export/import document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub academics: BTreeMap<String, AcademicRecord>,
    #[serde(default)]
    pub novelty_tiles: Vec<NoveltyTile>,
    #[serde(default)]
    pub favorites: BTreeSet<String>,
}

struct SlotPayloads {
    academics: String,
    tiles: String,
    favorites: String,
}

impl<S: DurableStore> RecordStore<S> {
    /// Writes the academics, tiles and favorites slots.
    ///
    /// On `CapacityExceeded` the oldest tiles are evicted down to
    /// `eviction_keep` and the write is retried once.
    pub fn save_to_durable_store(&mut self) -> SaveOutcome {
        if self.backend.is_none() {
            debug!("event=store_save module=store status=skipped reason=no_backend");
            return SaveOutcome::Skipped;
        }

        match self.write_all_slots() {
            Ok(()) => {
                debug!(
                    "event=store_save module=store status=ok academics={} tiles={}",
                    self.academics.len(),
                    self.tiles.len()
                );
                SaveOutcome::Saved
            }
            Err(err) if err.is_capacity_exceeded() => {
                let evicted = self.evict_oldest_tiles();
                warn!(
                    "event=store_save module=store status=degraded reason=capacity_exceeded evicted_tiles={evicted} error={err}"
                );
                match self.write_all_slots() {
                    Ok(()) => SaveOutcome::SavedAfterEviction { evicted },
                    Err(retry_err) => {
                        error!(
                            "event=store_save module=store status=error stage=retry error={retry_err}"
                        );
                        SaveOutcome::Failed {
                            reason: retry_err.to_string(),
                        }
                    }
                }
            }
            Err(err) => {
                error!("event=store_save module=store status=error stage=write error={err}");
                SaveOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Replaces in-memory collections with the persisted slots.
    ///
    /// Corrupt slots and entries are dropped with a warning. When no
    /// academics survive, the built-in defaults are seeded.
    pub fn load_from_durable_store(&mut self) -> &LoadReport {
        let mut report = LoadReport::default();

        if let Some(backend) = self.backend.as_ref() {
            let academics_slot = read_slot(backend, &self.config.slot_academics, &mut report);
            let tiles_slot = read_slot(backend, &self.config.slot_tiles, &mut report);
            let favorites_slot = read_slot(backend, &self.config.slot_favorites, &mut report);

            self.academics = academics_slot
                .map(|value| decode_academics(&self.config.slot_academics, value, &mut report))
                .unwrap_or_default();
            self.tiles = tiles_slot
                .map(|value| decode_tiles(&self.config.slot_tiles, value, &mut report))
                .unwrap_or_default();
            self.favorites = favorites_slot
                .map(|value| decode_favorites(&self.config.slot_favorites, value, &mut report))
                .unwrap_or_default();
        }

        report.academics_loaded = self.academics.len();
        report.tiles_loaded = self.tiles.len();
        report.favorites_loaded = self.favorites.len();

        if self.academics.is_empty() {
            self.seed_defaults();
            report.seeded = true;
        }

        info!(
            "event=store_load module=store status=ok academics={} tiles={} favorites={} warnings={} seeded={}",
            report.academics_loaded,
            report.tiles_loaded,
            report.favorites_loaded,
            report.warnings.len(),
            report.seeded
        );

        self.load_report = report;
        &self.load_report
    }

    /// Copies every collection into a snapshot document.
    pub fn export_snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            academics: self.academics.clone(),
            novelty_tiles: self.tiles.clone(),
            favorites: self.favorites.clone(),
        }
    }

    /// Merges a snapshot into the store.
    ///
    /// Academics are union-merged, tiles with unseen ids are appended and
    /// favorites are unioned. Invalid entries are skipped. Returns the number
    /// of academics merged.
    pub fn import_snapshot(&mut self, snapshot: CatalogSnapshot) -> usize {
        let mut merged = 0;
        for (key, mut record) in snapshot.academics {
            if record.name.trim().is_empty() {
                record.name = key;
            }
            match self.merge_academic(record) {
                Ok(_) => merged += 1,
                Err(err) => warn!(
                    "event=store_import module=store status=degraded reason=invalid_academic error={err}"
                ),
            }
        }

        let known: BTreeSet<String> = self.tiles.iter().map(|tile| tile.id.clone()).collect();
        for tile in snapshot.novelty_tiles {
            if known.contains(&tile.id) || tile.validate().is_err() {
                continue;
            }
            self.tiles.push(tile);
        }

        self.favorites.extend(
            snapshot
                .favorites
                .into_iter()
                .filter(|name| !name.trim().is_empty()),
        );

        info!("event=store_import module=store status=ok academics_merged={merged}");
        merged
    }

    fn seed_defaults(&mut self) {
        for record in default_academics() {
            self.academics.insert(record.name.clone(), record);
        }
        info!(
            "event=store_seed module=store status=ok academics={}",
            self.academics.len()
        );
    }

    fn encode_slots(&self) -> Result<SlotPayloads, serde_json::Error> {
        let persisted_tiles: Vec<&NoveltyTile> = newest_first(&self.tiles)
            .into_iter()
            .take(self.config.novelty_persist_limit)
            .collect();

        Ok(SlotPayloads {
            academics: serde_json::to_string(&self.academics)?,
            tiles: serde_json::to_string(&persisted_tiles)?,
            favorites: serde_json::to_string(&self.favorites)?,
        })
    }

    fn write_all_slots(&mut self) -> Result<(), StorageError> {
        let payloads = self.encode_slots().map_err(|err| {
            StorageError::Unavailable(format!("failed to encode slots: {err}"))
        })?;
        let Some(backend) = self.backend.as_mut() else {
            return Ok(());
        };

        backend.set(&self.config.slot_academics, &payloads.academics)?;
        backend.set(&self.config.slot_tiles, &payloads.tiles)?;
        backend.set(&self.config.slot_favorites, &payloads.favorites)?;
        Ok(())
    }

    /// Keeps the newest `eviction_keep` tiles. Returns the number dropped.
    fn evict_oldest_tiles(&mut self) -> usize {
        let keep = self.config.eviction_keep;
        if self.tiles.len() <= keep {
            return 0;
        }

        let mut kept: Vec<NoveltyTile> = newest_first(&self.tiles)
            .into_iter()
            .take(keep)
            .cloned()
            .collect();
        kept.reverse();
        let evicted = self.tiles.len() - kept.len();
        self.tiles = kept;
        evicted
    }
}

fn read_slot<S: DurableStore>(backend: &S, slot: &str, report: &mut LoadReport) -> Option<Value> {
    let raw = match backend.get(slot) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            push_warning(report, slot, None, format!("slot unreadable: {err}"));
            return None;
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            push_warning(report, slot, None, format!("slot is not valid JSON: {err}"));
            None
        }
    }
}

fn decode_academics(
    slot: &str,
    value: Value,
    report: &mut LoadReport,
) -> BTreeMap<String, AcademicRecord> {
    let Value::Object(entries) = value else {
        push_warning(report, slot, None, "expected an object of academics".to_string());
        return BTreeMap::new();
    };

    let keys: BTreeSet<String> = entries.keys().cloned().collect();
    let mut academics = BTreeMap::new();
    for (key, entry) in entries {
        let mut record = match serde_json::from_value::<AcademicRecord>(entry) {
            Ok(record) => record,
            Err(err) => {
                push_warning(report, slot, Some(key), err.to_string());
                continue;
            }
        };
        if record.name.trim().is_empty() {
            record.name = key.clone();
        }
        if let Err(err) = record.validate() {
            push_warning(report, slot, Some(key), err.to_string());
            continue;
        }
        if record.name != key {
            // An entry keyed by its own name wins over one that only claims it.
            if keys.contains(&record.name) || academics.contains_key(&record.name) {
                let reason = format!(
                    "key does not match name `{}`, which is already taken; entry dropped",
                    record.name
                );
                push_warning(report, slot, Some(key), reason);
                continue;
            }
            let reason = format!("key does not match name `{}`; loaded under name", record.name);
            push_warning(report, slot, Some(key), reason);
        }
        record.normalize();
        academics.insert(record.name.clone(), record);
    }
    academics
}

fn decode_tiles(slot: &str, value: Value, report: &mut LoadReport) -> Vec<NoveltyTile> {
    let Value::Array(entries) = value else {
        push_warning(report, slot, None, "expected an array of tiles".to_string());
        return Vec::new();
    };

    let mut tiles = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let decoded = serde_json::from_value::<NoveltyTile>(entry)
            .map_err(|err| err.to_string())
            .and_then(|tile| tile.validate().map(|()| tile).map_err(|err| err.to_string()));
        match decoded {
            Ok(tile) => tiles.push(tile),
            Err(reason) => push_warning(report, slot, Some(index.to_string()), reason),
        }
    }
    // Slot is stored newest first; memory keeps insertion order (oldest first).
    tiles.reverse();
    tiles
}

fn decode_favorites(slot: &str, value: Value, report: &mut LoadReport) -> BTreeSet<String> {
    let Value::Array(entries) = value else {
        push_warning(report, slot, None, "expected an array of names".to_string());
        return BTreeSet::new();
    };

    let mut favorites = BTreeSet::new();
    for (index, entry) in entries.into_iter().enumerate() {
        match entry {
            Value::String(name) if !name.trim().is_empty() => {
                favorites.insert(name);
            }
            other => push_warning(
                report,
                slot,
                Some(index.to_string()),
                format!("expected a non-empty name, got `{other}`"),
            ),
        }
    }
    favorites
}

fn push_warning(report: &mut LoadReport, slot: &str, entry: Option<String>, reason: String) {
    warn!(
        "event=store_load module=store status=degraded slot={slot} entry={} reason={}",
        entry.as_deref().unwrap_or("-"),
        reason
    );
    report.warnings.push(LoadWarning {
        slot: slot.to_string(),
        entry,
        reason,
    });
}

#[cfg(test)]
mod tests {
    use crate::config::StoreConfig;
    use crate::model::tile::NoveltyTile;
    use crate::storage::{DurableStore, MemoryStore};
    use crate::store::{RecordStore, SaveOutcome};
    use chrono::NaiveDate;

    #[test]
    fn tiles_roundtrip_preserves_newest_first_order() {
        let mut store = RecordStore::open(MemoryStore::new(), StoreConfig::default());
        for day in 1..=3 {
            let date = NaiveDate::from_ymd_opt(2025, 1, day).expect("valid date");
            store
                .add_novelty_tile(NoveltyTile::new(format!("day {day}"), date))
                .expect("add tile");
        }
        assert_eq!(store.save_to_durable_store(), SaveOutcome::Saved);

        let backend = store.close().expect("backend returned");
        let reopened = RecordStore::open(backend, StoreConfig::default());
        let titles: Vec<&str> = reopened
            .novelty_tiles()
            .into_iter()
            .map(|tile| tile.title.as_str())
            .collect();
        assert_eq!(titles, vec!["day 3", "day 2", "day 1"]);
    }

    #[test]
    fn persisted_tiles_are_truncated_to_limit() {
        let config = StoreConfig {
            novelty_persist_limit: 2,
            eviction_keep: 1,
            ..StoreConfig::default()
        };
        let mut store = RecordStore::open(MemoryStore::new(), config.clone());
        for day in 1..=4 {
            let date = NaiveDate::from_ymd_opt(2025, 2, day).expect("valid date");
            store
                .add_novelty_tile(NoveltyTile::new(format!("d{day}"), date))
                .expect("add tile");
        }
        store.save_to_durable_store();
        assert_eq!(store.novelty_tile_count(), 4);

        let backend = store.close().expect("backend returned");
        let raw = backend
            .get(&config.slot_tiles)
            .expect("get")
            .expect("tiles slot exists");
        let tiles: Vec<NoveltyTile> = serde_json::from_str(&raw).expect("tiles parse");
        let titles: Vec<&str> = tiles.iter().map(|tile| tile.title.as_str()).collect();
        assert_eq!(titles, vec!["d4", "d3"]);
    }

    #[test]
    fn academic_entry_under_a_foreign_key_is_reported() {
        let mut backend = MemoryStore::new();
        backend
            .set(
                "academics",
                r#"{"X": {"name": "Y", "bio": "impostor"}, "Y": {"bio": "original"}, "Z": {"name": "W"}}"#,
            )
            .expect("seed academics");
        let store = RecordStore::open(backend, StoreConfig::default());
        let report = store.load_report();
        assert_eq!(report.academics_loaded, 2);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.warnings[0].entry.as_deref(), Some("X"));
        assert_eq!(store.get_academic("Y").expect("Y kept").bio, "original");
        assert!(store.get_academic("W").is_some());
        assert!(store.get_academic("Z").is_none());
    }

    #[test]
    fn favorites_slot_drops_non_string_entries() {
        let mut backend = MemoryStore::new();
        backend
            .set("favorites", r#"["Hannah Arendt", 42, ""]"#)
            .expect("seed favorites");
        let store = RecordStore::open(backend, StoreConfig::default());
        assert_eq!(store.favorites(), vec!["Hannah Arendt"]);
        assert_eq!(store.load_report().warnings.len(), 2);
    }
}
