//! Case-insensitive catalogue search with light filtering and sorting.

use crate::model::academic::{AcademicRecord, TaxonomyCategory};
use std::collections::BTreeSet;

/// Result ordering for [`search`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Store iteration order (ascending name).
    #[default]
    Name,
    /// Most papers first, then name.
    PaperCount,
    /// Most connections first, then name.
    ConnectionCount,
}

/// Exact (case-insensitive) taxonomy tag filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyFilter {
    pub category: TaxonomyCategory,
    pub value: String,
}

/// Search criteria. Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Substring matched against `name`, ignoring case.
    pub name: Option<String>,
    /// Substring matched against name, bio, paper/event titles and tags.
    pub text: Option<String>,
    pub taxonomy: Option<TaxonomyFilter>,
    /// Restrict to names in the favorites set.
    pub favorites_only: bool,
    pub sort: SortKey,
    /// Maximum results; `None` returns every match.
    pub limit: Option<usize>,
}

impl SearchCriteria {
    /// Criteria matching names containing `name`.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Criteria matching `text` anywhere in a record.
    pub fn by_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_taxonomy(mut self, category: TaxonomyCategory, value: impl Into<String>) -> Self {
        self.taxonomy = Some(TaxonomyFilter {
            category,
            value: value.into(),
        });
        self
    }

    pub fn favorites_only(mut self) -> Self {
        self.favorites_only = true;
        self
    }

    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn limited_to(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Returns records matching `criteria`, in the requested order.
pub fn search<'a, I>(
    records: I,
    favorites: &BTreeSet<String>,
    criteria: &SearchCriteria,
) -> Vec<&'a AcademicRecord>
where
    I: IntoIterator<Item = &'a AcademicRecord>,
{
    let name_needle = criteria.name.as_deref().map(str::to_lowercase);
    let text_needle = criteria
        .text
        .as_deref()
        .map(|text| text.trim().to_lowercase())
        .filter(|text| !text.is_empty());

    let mut matches: Vec<&AcademicRecord> = records
        .into_iter()
        .filter(|record| match name_needle.as_deref() {
            Some(needle) => record.name.to_lowercase().contains(needle),
            None => true,
        })
        .filter(|record| match text_needle.as_deref() {
            Some(needle) => matches_text(record, needle),
            None => true,
        })
        .filter(|record| match criteria.taxonomy.as_ref() {
            Some(filter) => record.has_tag(filter.category, &filter.value),
            None => true,
        })
        .filter(|record| !criteria.favorites_only || favorites.contains(&record.name))
        .collect();

    match criteria.sort {
        SortKey::Name => {}
        SortKey::PaperCount => matches.sort_by(|a, b| {
            b.papers
                .len()
                .cmp(&a.papers.len())
                .then_with(|| a.name.cmp(&b.name))
        }),
        SortKey::ConnectionCount => matches.sort_by(|a, b| {
            b.connections
                .len()
                .cmp(&a.connections.len())
                .then_with(|| a.name.cmp(&b.name))
        }),
    }

    if let Some(limit) = criteria.limit {
        matches.truncate(limit);
    }
    matches
}

/// `needle` must already be lowercase.
fn matches_text(record: &AcademicRecord, needle: &str) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(needle);
    contains(record.name.as_str())
        || contains(record.bio.as_str())
        || record.papers.iter().any(|paper| contains(paper.title.as_str()))
        || record.events.iter().any(|event| contains(event.title.as_str()))
        || record
            .taxonomies
            .values()
            .flatten()
            .any(|value| contains(value.as_str()))
}
