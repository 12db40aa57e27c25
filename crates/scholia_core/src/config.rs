//! Record store configuration.
//!
//! # Responsibility
//! - Hold persistence limits, ranking defaults and slot names.
//! - Read optional overrides from the process environment.
//!
//! # Invariants
//! - `eviction_keep <= novelty_persist_limit`.
//! - Invalid environment values are ignored with a warning, never fatal.

use log::warn;
use std::path::PathBuf;

/// Default slot name for the academics mapping.
pub const SLOT_ACADEMICS: &str = "academics";
/// Default slot name for persisted novelty tiles.
pub const SLOT_NOVELTY_TILES: &str = "noveltyTiles";
/// Default slot name for favorites.
pub const SLOT_FAVORITES: &str = "favorites";

const DB_FILE_NAME: &str = "scholia.sqlite3";
const ENV_DB_PATH: &str = "SCHOLIA_DB_PATH";
const ENV_NOVELTY_LIMIT: &str = "SCHOLIA_NOVELTY_LIMIT";
const ENV_EVICTION_KEEP: &str = "SCHOLIA_EVICTION_KEEP";
const ENV_RELATED_LIMIT: &str = "SCHOLIA_RELATED_LIMIT";

/// Tunables for [`crate::RecordStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum tiles written to the tile slot.
    pub novelty_persist_limit: usize,
    /// Tiles kept in memory after a capacity-exceeded write.
    pub eviction_keep: usize,
    /// Default `limit` for related-academics ranking.
    pub related_limit: usize,
    pub slot_academics: String,
    pub slot_tiles: String,
    pub slot_favorites: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            novelty_persist_limit: 50,
            eviction_keep: 20,
            related_limit: 6,
            slot_academics: SLOT_ACADEMICS.to_string(),
            slot_tiles: SLOT_NOVELTY_TILES.to_string(),
            slot_favorites: SLOT_FAVORITES.to_string(),
        }
    }
}

impl StoreConfig {
    /// Builds a config from defaults plus `SCHOLIA_*` overrides.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from defaults plus overrides resolved by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(value) = parse_count(&lookup, ENV_NOVELTY_LIMIT) {
            config.novelty_persist_limit = value;
        }
        if let Some(value) = parse_count(&lookup, ENV_EVICTION_KEEP) {
            config.eviction_keep = value;
        }
        if let Some(value) = parse_count(&lookup, ENV_RELATED_LIMIT) {
            config.related_limit = value;
        }
        if config.eviction_keep > config.novelty_persist_limit {
            warn!(
                "event=config_load module=config status=degraded reason=eviction_keep_clamped eviction_keep={} novelty_persist_limit={}",
                config.eviction_keep, config.novelty_persist_limit
            );
            config.eviction_keep = config.novelty_persist_limit;
        }
        config
    }
}

/// Resolves the slot database path.
///
/// `SCHOLIA_DB_PATH` wins when set and non-blank; otherwise the file lives in
/// the system temp directory.
pub fn resolve_db_path() -> PathBuf {
    resolve_db_path_with(|key| std::env::var(key).ok())
}

fn resolve_db_path_with(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(raw) = lookup(ENV_DB_PATH) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DB_FILE_NAME)
}

fn parse_count(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<usize> {
    let raw = lookup(key)?;
    match raw.trim().parse::<usize>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("event=config_load module=config status=degraded reason=invalid_value key={key}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_db_path_with, StoreConfig};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_persistence_contract() {
        let config = StoreConfig::default();
        assert_eq!(config.novelty_persist_limit, 50);
        assert_eq!(config.eviction_keep, 20);
        assert_eq!(config.related_limit, 6);
        assert_eq!(config.slot_tiles, "noveltyTiles");
    }

    #[test]
    fn overrides_apply_and_invalid_values_are_ignored() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("SCHOLIA_NOVELTY_LIMIT", "30"),
            ("SCHOLIA_RELATED_LIMIT", "many"),
        ]));
        assert_eq!(config.novelty_persist_limit, 30);
        assert_eq!(config.related_limit, 6);
    }

    #[test]
    fn eviction_keep_is_clamped_to_persist_limit() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("SCHOLIA_NOVELTY_LIMIT", "10"),
            ("SCHOLIA_EVICTION_KEEP", "40"),
        ]));
        assert_eq!(config.eviction_keep, 10);
    }

    #[test]
    fn db_path_falls_back_to_temp_dir_for_blank_override() {
        let path = resolve_db_path_with(lookup_from(&[("SCHOLIA_DB_PATH", "   ")]));
        assert!(path.ends_with("scholia.sqlite3"));

        let path = resolve_db_path_with(lookup_from(&[("SCHOLIA_DB_PATH", "/data/s.db")]));
        assert_eq!(path, std::path::PathBuf::from("/data/s.db"));
    }
}
