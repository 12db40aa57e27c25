//! Novelty tile model.
//!
//! # Responsibility
//! - Define the short note linking one or more academics shown in the
//!   browsing grid.
//! - Provide the date ordering used for persistence truncation.
//!
//! # Invariants
//! - `id` and `title` are non-empty after trimming.
//! - `date` serializes as `YYYY-MM-DD`.

use super::ModelError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One generated or contributed novelty tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoveltyTile {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub academics: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl NoveltyTile {
    /// Creates a tile with a generated v4 id.
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            date,
            academics: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_academics<I, S>(mut self, academics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.academics.extend(academics.into_iter().map(Into::into));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Checks tile invariants.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.id.trim().is_empty() {
            return Err(ModelError::EmptyTileId);
        }
        if self.title.trim().is_empty() {
            return Err(ModelError::EmptyTileTitle);
        }
        Ok(())
    }

    /// Returns whether this tile mentions `name`.
    pub fn mentions(&self, name: &str) -> bool {
        self.academics.iter().any(|academic| academic == name)
    }
}

/// Returns tiles ordered newest first.
///
/// Tiles sharing a date keep reverse insertion order, so the most recently
/// appended tile wins truncation ties.
pub fn newest_first(tiles: &[NoveltyTile]) -> Vec<&NoveltyTile> {
    let mut ordered: Vec<&NoveltyTile> = tiles.iter().rev().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));
    ordered
}
