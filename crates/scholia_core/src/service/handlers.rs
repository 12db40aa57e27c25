//! Request handlers over an explicit record store.
//!
//! # Responsibility
//! - Translate loosely typed UI requests into store operations.
//! - Persist after every mutation and report the save outcome.
//!
//! # Invariants
//! - Handlers never panic and never return `Err`; failures are reported in
//!   the response envelope with `ok = false`.
//! - Search limits are normalized to `1..=SEARCH_LIMIT_MAX`.

use crate::contribution::{apply_contribution, Contribution, ContributionForm};
use crate::graph::{build_graph, GraphData};
use crate::model::academic::{AcademicRecord, TaxonomyCategory};
use crate::model::tile::NoveltyTile;
use crate::novelty::{generate_procedural_tile, tile_from_contribution};
use crate::query::search::{SearchCriteria, SortKey};
use crate::storage::DurableStore;
use crate::store::{RecordStore, SaveOutcome};
use chrono::NaiveDate;
use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const SEARCH_DEFAULT_LIMIT: u32 = 20;
pub const SEARCH_LIMIT_MAX: u32 = 100;
pub const FEED_DEFAULT_LIMIT: u32 = 12;

/// Catalogue search input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchRequest {
    /// Free text matched against names, bios, titles and tags.
    #[serde(default)]
    pub text: String,
    /// Optional taxonomy filter; both must be set to apply.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub favorites_only: bool,
    /// `name|papers|connections`; anything else sorts by name.
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// List row for search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcademicSummary {
    pub name: String,
    pub discipline: Option<String>,
    pub paper_count: usize,
    pub connection_count: usize,
    pub favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResponse {
    pub items: Vec<AcademicSummary>,
    pub message: String,
    pub applied_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcademicResponse {
    pub ok: bool,
    pub academic: Option<AcademicRecord>,
    pub favorite: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedItem {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedResponse {
    pub ok: bool,
    pub items: Vec<RelatedItem>,
    pub message: String,
}

/// Mutation envelope shared by favorites, contributions and tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResponse {
    pub ok: bool,
    /// Name or tile id the action touched.
    pub subject: Option<String>,
    /// Favorite state after a favorite action.
    pub favorite: Option<bool>,
    /// Save outcome label, or `None` when nothing was saved.
    pub save: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            ok: true,
            subject: Some(subject.into()),
            favorite: None,
            save: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            subject: None,
            favorite: None,
            save: None,
            message: message.into(),
        }
    }

    fn with_save(mut self, outcome: &SaveOutcome) -> Self {
        self.save = Some(outcome.label().to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedResponse {
    pub items: Vec<NoveltyTile>,
    pub total: usize,
}

pub fn handle_search<S: DurableStore>(store: &RecordStore<S>, request: &SearchRequest) -> SearchResponse {
    let applied_limit = normalize_search_limit(request.limit);
    let mut criteria = SearchCriteria::default()
        .sorted_by(parse_sort(request.sort.as_deref()))
        .limited_to(applied_limit as usize);
    let text = request.text.trim();
    if !text.is_empty() {
        criteria.text = Some(text.to_string());
    }
    if request.favorites_only {
        criteria = criteria.favorites_only();
    }
    if let (Some(category), Some(value)) = (request.category.as_deref(), request.value.as_deref()) {
        match TaxonomyCategory::parse(category) {
            Ok(category) => criteria = criteria.with_taxonomy(category, value.trim()),
            Err(err) => {
                return SearchResponse {
                    items: Vec::new(),
                    message: format!("search failed: {err}"),
                    applied_limit,
                };
            }
        }
    }

    let items: Vec<AcademicSummary> = store
        .search_academics(&criteria)
        .into_iter()
        .map(|record| summarize(store, record))
        .collect();
    let message = if items.is_empty() {
        "No results.".to_string()
    } else {
        format!("Found {} result(s).", items.len())
    };
    SearchResponse {
        items,
        message,
        applied_limit,
    }
}

pub fn handle_get_academic<S: DurableStore>(store: &RecordStore<S>, name: &str) -> AcademicResponse {
    match store.get_academic(name) {
        Some(record) => AcademicResponse {
            ok: true,
            academic: Some(record.clone()),
            favorite: store.is_favorite(name),
            message: "Academic found.".to_string(),
        },
        None => AcademicResponse {
            ok: false,
            academic: None,
            favorite: false,
            message: format!("academic not found: {name}"),
        },
    }
}

/// Related academics for `name`; `limit = None` uses the store default.
pub fn handle_related<S: DurableStore>(
    store: &RecordStore<S>,
    name: &str,
    limit: Option<u32>,
) -> RelatedResponse {
    let Some(record) = store.get_academic(name) else {
        return RelatedResponse {
            ok: false,
            items: Vec::new(),
            message: format!("academic not found: {name}"),
        };
    };
    let items: Vec<RelatedItem> = store
        .related_academics_scored(record, limit.map(|value| value as usize))
        .into_iter()
        .map(|related| RelatedItem {
            name: related.record.name.clone(),
            score: related.score,
        })
        .collect();
    RelatedResponse {
        ok: true,
        message: format!("Found {} related academic(s).", items.len()),
        items,
    }
}

/// Flips the favorite state of `name` and saves.
pub fn handle_toggle_favorite<S: DurableStore>(
    store: &mut RecordStore<S>,
    name: &str,
) -> ActionResponse {
    let name = name.trim();
    if name.is_empty() {
        return ActionResponse::failure("toggle_favorite failed: name cannot be empty");
    }
    let favorite = if store.is_favorite(name) {
        store.remove_from_favorites(name);
        false
    } else {
        store.add_to_favorites(name);
        true
    };
    let outcome = store.save_to_durable_store();
    info!(
        "event=favorite_toggle module=service status=ok favorite={favorite} save={}",
        outcome.label()
    );
    let message = if favorite {
        "Added to favorites."
    } else {
        "Removed from favorites."
    };
    let mut response = ActionResponse::success(message, name).with_save(&outcome);
    response.favorite = Some(favorite);
    response
}

/// Validates and applies a contribution form, records a novelty tile for it
/// and saves.
pub fn handle_submit_contribution<S: DurableStore>(
    store: &mut RecordStore<S>,
    form: &ContributionForm,
    today: NaiveDate,
) -> ActionResponse {
    let contribution = match Contribution::from_form(form) {
        Ok(contribution) => contribution,
        Err(err) => {
            warn!("event=contribution_submit module=service status=error stage=validate error={err}");
            return ActionResponse::failure(format!("contribution rejected: {err}"));
        }
    };
    let tile = tile_from_contribution(&contribution, today);
    let updated = match apply_contribution(store, contribution) {
        Ok(record) => record,
        Err(err) => {
            warn!("event=contribution_submit module=service status=error stage=apply error={err}");
            return ActionResponse::failure(format!("contribution rejected: {err}"));
        }
    };
    if let Err(err) = store.add_novelty_tile(tile) {
        warn!("event=contribution_submit module=service status=degraded stage=tile error={err}");
    }
    let outcome = store.save_to_durable_store();
    ActionResponse::success("Contribution accepted.", updated.name).with_save(&outcome)
}

/// Generates one procedural tile and saves. Fails when no taxonomy value is
/// shared by two academics.
pub fn handle_generate_tile<S: DurableStore, R: Rng + ?Sized>(
    store: &mut RecordStore<S>,
    rng: &mut R,
    today: NaiveDate,
) -> ActionResponse {
    let Some(tile) = generate_procedural_tile(store, rng, today) else {
        return ActionResponse::failure("no shared taxonomy value to build a tile from");
    };
    let tile_id = tile.id.clone();
    if let Err(err) = store.add_novelty_tile(tile) {
        return ActionResponse::failure(format!("generate_tile failed: {err}"));
    }
    let outcome = store.save_to_durable_store();
    ActionResponse::success("Tile generated.", tile_id).with_save(&outcome)
}

/// Newest tiles first, at most `limit` (default [`FEED_DEFAULT_LIMIT`]).
pub fn handle_novelty_feed<S: DurableStore>(store: &RecordStore<S>, limit: Option<u32>) -> FeedResponse {
    let limit = limit.filter(|value| *value > 0).unwrap_or(FEED_DEFAULT_LIMIT) as usize;
    FeedResponse {
        items: store
            .novelty_tiles()
            .into_iter()
            .take(limit)
            .cloned()
            .collect(),
        total: store.novelty_tile_count(),
    }
}

pub fn handle_graph<S: DurableStore>(store: &RecordStore<S>) -> GraphData {
    build_graph(store)
}

fn summarize<S: DurableStore>(store: &RecordStore<S>, record: &AcademicRecord) -> AcademicSummary {
    AcademicSummary {
        name: record.name.clone(),
        discipline: record
            .tags(TaxonomyCategory::Discipline)
            .next()
            .map(str::to_string),
        paper_count: record.papers.len(),
        connection_count: record.connections.len(),
        favorite: store.is_favorite(&record.name),
    }
}

fn normalize_search_limit(limit: Option<u32>) -> u32 {
    match limit {
        None | Some(0) => SEARCH_DEFAULT_LIMIT,
        Some(value) => value.min(SEARCH_LIMIT_MAX),
    }
}

fn parse_sort(raw: Option<&str>) -> SortKey {
    match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("papers") => SortKey::PaperCount,
        Some("connections") => SortKey::ConnectionCount,
        _ => SortKey::Name,
    }
}
