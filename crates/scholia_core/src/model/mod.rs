//! Catalogue domain model.
//!
//! # Responsibility
//! - Define the canonical records owned by the record store.
//! - Keep serialized field names stable for the persisted slots.
//!
//! # Invariants
//! - Every academic is identified by a non-empty, unique `name`.
//! - Container fields are never optional; absent input means empty.

pub mod academic;
pub mod tile;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation error for catalogue records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Academic name is empty after trimming.
    EmptyName,
    /// Tile identifier is empty after trimming.
    EmptyTileId,
    /// Tile title is empty after trimming.
    EmptyTileTitle,
    /// Unknown taxonomy category string.
    UnknownCategory(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "academic name must not be empty"),
            Self::EmptyTileId => write!(f, "novelty tile id must not be empty"),
            Self::EmptyTileTitle => write!(f, "novelty tile title must not be empty"),
            Self::UnknownCategory(value) => {
                write!(
                    f,
                    "unknown taxonomy category `{value}`; expected discipline|tradition|era|methodology|theme"
                )
            }
        }
    }
}

impl Error for ModelError {}
