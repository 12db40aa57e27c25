//! Novelty tile generation.
//!
//! # Responsibility
//! - Summarize accepted contributions as tiles.
//! - Procedurally build tiles linking academics who share a taxonomy value.
//!
//! # Invariants
//! - Generated tiles always pass `NoveltyTile::validate`.
//! - Procedural tiles name exactly two academics who exist in the store.

use crate::contribution::Contribution;
use crate::model::academic::AcademicRecord;
use crate::model::tile::NoveltyTile;
use crate::query::taxonomy::{academics_by_taxonomy, shared_values};
use crate::storage::DurableStore;
use crate::store::RecordStore;
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

/// Builds a tile announcing an accepted contribution.
pub fn tile_from_contribution(contribution: &Contribution, date: NaiveDate) -> NoveltyTile {
    let academic = contribution.academic();
    let (title, description) = match contribution {
        Contribution::Paper { title, year, coauthors, .. } => {
            let with = if coauthors.is_empty() {
                String::new()
            } else {
                format!(
                    " with {}",
                    coauthors.iter().cloned().collect::<Vec<_>>().join(", ")
                )
            };
            (
                format!("New paper: {title}"),
                format!("{academic} published \"{title}\" ({year}){with}."),
            )
        }
        Contribution::Event { title, year, location, .. } => {
            let place = if location.trim().is_empty() {
                String::new()
            } else {
                format!(" in {location}")
            };
            (
                format!("New event: {title}"),
                format!("{academic} took part in \"{title}\" ({year}){place}."),
            )
        }
        Contribution::Connection { target, .. } => (
            format!("New connection: {academic} and {target}"),
            format!("{academic} is now linked to {target}."),
        ),
        Contribution::Taxonomy { category, value, .. } => (
            format!("New {category} tag: {value}"),
            format!("{academic} is now tagged with {category} \"{value}\"."),
        ),
    };

    NoveltyTile::new(title, date)
        .with_academics(contribution.mentioned_names())
        .with_description(description)
}

/// Builds a tile pairing two academics that share a random taxonomy value.
///
/// Returns `None` when no value is shared by at least two academics.
pub fn generate_procedural_tile<S: DurableStore, R: Rng + ?Sized>(
    store: &RecordStore<S>,
    rng: &mut R,
    date: NaiveDate,
) -> Option<NoveltyTile> {
    let academics = store.get_all_academics();
    let shared = shared_values(academics.iter().copied());
    let (category, value) = shared.choose(rng)?;

    let holders: Vec<&AcademicRecord> =
        academics_by_taxonomy(academics.iter().copied(), *category, value);
    let pair: Vec<&&AcademicRecord> = holders.choose_multiple(rng, 2).collect();
    let [first, second] = pair.as_slice() else {
        return None;
    };

    let connected = first.connections.contains(&second.name) || second.connections.contains(&first.name);
    let description = if connected {
        format!(
            "{} and {} are connected and both work on {category} \"{value}\".",
            first.name, second.name
        )
    } else {
        format!(
            "{} and {} never connected directly, yet both work on {category} \"{value}\".",
            first.name, second.name
        )
    };

    Some(
        NoveltyTile::new(format!("Shared {category}: {value}"), date)
            .with_academics([first.name.clone(), second.name.clone()])
            .with_description(description),
    )
}

#[cfg(test)]
mod tests {
    use super::{generate_procedural_tile, tile_from_contribution};
    use crate::config::StoreConfig;
    use crate::contribution::Contribution;
    use crate::model::academic::{AcademicRecord, TaxonomyCategory};
    use crate::store::InMemoryRecordStore;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    #[test]
    fn paper_tile_mentions_coauthors() {
        let contribution = Contribution::Paper {
            academic: "A".to_string(),
            title: "T".to_string(),
            year: 2001,
            coauthors: BTreeSet::from(["B".to_string()]),
        };
        let tile = tile_from_contribution(&contribution, today());
        assert_eq!(tile.title, "New paper: T");
        assert_eq!(tile.academics, vec!["A".to_string(), "B".to_string()]);
        assert!(tile.description.contains("with B"));
        tile.validate().expect("generated tile is valid");
    }

    #[test]
    fn procedural_tile_pairs_academics_sharing_a_value() {
        let mut store = InMemoryRecordStore::empty_in_memory(StoreConfig::default());
        store
            .add_academic(AcademicRecord::new("A").with_tag(TaxonomyCategory::Theme, "Power"))
            .expect("add A");
        store
            .add_academic(AcademicRecord::new("B").with_tag(TaxonomyCategory::Theme, "Power"))
            .expect("add B");
        store
            .add_academic(AcademicRecord::new("C").with_tag(TaxonomyCategory::Era, "Modern"))
            .expect("add C");

        let mut rng = StdRng::seed_from_u64(7);
        let tile = generate_procedural_tile(&store, &mut rng, today()).expect("tile generated");
        let mut named = tile.academics.clone();
        named.sort();
        assert_eq!(named, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(tile.title, "Shared theme: Power");
    }

    #[test]
    fn procedural_tile_is_none_without_shared_values() {
        let mut store = InMemoryRecordStore::empty_in_memory(StoreConfig::default());
        store
            .add_academic(AcademicRecord::new("A").with_tag(TaxonomyCategory::Theme, "X"))
            .expect("add A");
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_procedural_tile(&store, &mut rng, today()).is_none());
    }
}
