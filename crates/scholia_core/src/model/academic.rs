//! Academic record model.
//!
//! # Responsibility
//! - Define the catalogued individual with bio, taxonomy tags, papers,
//!   events and named connections.
//! - Provide normalization and union-merge helpers used by the store.
//!
//! # Invariants
//! - `name` is non-empty after trimming.
//! - `connections` may name academics that do not exist; they are kept as-is.
//! - Taxonomy sets never contain blank values. An empty set is kept so a
//!   stored record reads back equal to what was added.

use super::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

/// Fixed taxonomy categories used to tag academics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyCategory {
    Discipline,
    Tradition,
    Era,
    Methodology,
    Theme,
}

impl TaxonomyCategory {
    /// All categories in canonical order.
    pub const ALL: [TaxonomyCategory; 5] = [
        Self::Discipline,
        Self::Tradition,
        Self::Era,
        Self::Methodology,
        Self::Theme,
    ];

    /// Stable string id used in persisted data and request payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discipline => "discipline",
            Self::Tradition => "tradition",
            Self::Era => "era",
            Self::Methodology => "methodology",
            Self::Theme => "theme",
        }
    }

    /// Parses a category from user input, ignoring case and surrounding space.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "discipline" => Ok(Self::Discipline),
            "tradition" => Ok(Self::Tradition),
            "era" => Ok(Self::Era),
            "methodology" => Ok(Self::Methodology),
            "theme" => Ok(Self::Theme),
            _ => Err(ModelError::UnknownCategory(value.trim().to_string())),
        }
    }
}

impl Display for TaxonomyCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category name to tag values.
pub type Taxonomies = BTreeMap<TaxonomyCategory, BTreeSet<String>>;

/// One publication attributed to an academic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub coauthors: BTreeSet<String>,
}

impl Paper {
    pub fn new(title: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            year,
            coauthors: BTreeSet::new(),
        }
    }

    /// Adds coauthors, skipping blank names.
    pub fn with_coauthors<I, S>(mut self, coauthors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in coauthors {
            let name = name.into();
            if !name.trim().is_empty() {
                self.coauthors.insert(name);
            }
        }
        self
    }
}

/// One dated event (lecture, conference, appointment) for an academic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub location: String,
}

impl Event {
    pub fn new(title: impl Into<String>, year: i32, location: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year,
            location: location.into(),
        }
    }
}

/// Canonical catalogue record for one academic.
///
/// Serialized with `#[serde(default)]` on every container so partially
/// populated persisted entries still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicRecord {
    /// Primary key. Case-sensitive.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub taxonomies: Taxonomies,
    #[serde(default)]
    pub papers: Vec<Paper>,
    #[serde(default)]
    pub events: Vec<Event>,
    /// Names of other academics. Not required to exist in the store.
    #[serde(default)]
    pub connections: BTreeSet<String>,
}

impl AcademicRecord {
    /// Creates an empty record for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bio: String::new(),
            taxonomies: Taxonomies::new(),
            papers: Vec::new(),
            events: Vec::new(),
            connections: BTreeSet::new(),
        }
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    /// Adds one tag value under `category`. Blank values are ignored.
    pub fn with_tag(mut self, category: TaxonomyCategory, value: impl Into<String>) -> Self {
        self.add_tag(category, value);
        self
    }

    pub fn with_paper(mut self, paper: Paper) -> Self {
        self.papers.push(paper);
        self
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_connection(mut self, name: impl Into<String>) -> Self {
        self.add_connection(name);
        self
    }

    /// Adds one tag value. Returns `true` when the value was not present.
    pub fn add_tag(&mut self, category: TaxonomyCategory, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.trim().is_empty() {
            return false;
        }
        self.taxonomies.entry(category).or_default().insert(value)
    }

    /// Adds one connection name. Returns `true` when the name was not present.
    pub fn add_connection(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.trim().is_empty() {
            return false;
        }
        self.connections.insert(name)
    }

    /// Tag values for one category; empty when the category is unset.
    pub fn tags(&self, category: TaxonomyCategory) -> impl Iterator<Item = &str> {
        self.taxonomies
            .get(&category)
            .into_iter()
            .flat_map(|values| values.iter().map(String::as_str))
    }

    /// Returns whether any tag in `category` equals `value`, ignoring case.
    pub fn has_tag(&self, category: TaxonomyCategory, value: &str) -> bool {
        let needle = value.trim().to_lowercase();
        self.tags(category).any(|tag| tag.to_lowercase() == needle)
    }

    /// Counts tag values shared with `other`, across all categories.
    pub fn shared_tag_count(&self, other: &AcademicRecord) -> usize {
        self.taxonomies
            .iter()
            .map(|(category, values)| match other.taxonomies.get(category) {
                Some(other_values) => values.intersection(other_values).count(),
                None => 0,
            })
            .sum()
    }

    /// Checks record invariants.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::EmptyName);
        }
        Ok(())
    }

    /// Drops blank tags and blank connections.
    pub fn normalize(&mut self) {
        for values in self.taxonomies.values_mut() {
            values.retain(|value| !value.trim().is_empty());
        }
        self.connections.retain(|name| !name.trim().is_empty());
        for paper in &mut self.papers {
            paper.coauthors.retain(|name| !name.trim().is_empty());
        }
    }

    /// Union-merges `incoming` into this record.
    ///
    /// - `bio` is replaced only by a non-blank incoming bio.
    /// - Taxonomies and connections are unioned.
    /// - Papers/events are appended unless one with the same title and year
    ///   already exists; a matching paper gains the incoming coauthors.
    pub fn merge_from(&mut self, incoming: AcademicRecord) {
        if !incoming.bio.trim().is_empty() {
            self.bio = incoming.bio;
        }

        for (category, values) in incoming.taxonomies {
            for value in values {
                self.add_tag(category, value);
            }
        }

        for name in incoming.connections {
            self.add_connection(name);
        }

        for paper in incoming.papers {
            match self
                .papers
                .iter_mut()
                .find(|existing| existing.title == paper.title && existing.year == paper.year)
            {
                Some(existing) => existing.coauthors.extend(paper.coauthors),
                None => self.papers.push(paper),
            }
        }

        for event in incoming.events {
            let exists = self
                .events
                .iter()
                .any(|existing| existing.title == event.title && existing.year == event.year);
            if !exists {
                self.events.push(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AcademicRecord, Event, Paper, TaxonomyCategory};
    use crate::model::ModelError;
    use std::collections::BTreeSet;

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(
            TaxonomyCategory::parse(" Theme ").expect("theme should parse"),
            TaxonomyCategory::Theme
        );
        let err = TaxonomyCategory::parse("school").expect_err("unknown category must fail");
        assert_eq!(err, ModelError::UnknownCategory("school".to_string()));
    }

    #[test]
    fn validate_rejects_blank_name() {
        let err = AcademicRecord::new("  ").validate().expect_err("blank name");
        assert_eq!(err, ModelError::EmptyName);
    }

    #[test]
    fn shared_tag_count_sums_across_categories() {
        let a = AcademicRecord::new("A")
            .with_tag(TaxonomyCategory::Theme, "Power")
            .with_tag(TaxonomyCategory::Theme, "Discourse")
            .with_tag(TaxonomyCategory::Era, "Modern");
        let b = AcademicRecord::new("B")
            .with_tag(TaxonomyCategory::Theme, "Power")
            .with_tag(TaxonomyCategory::Theme, "Discourse")
            .with_tag(TaxonomyCategory::Era, "Modern")
            .with_tag(TaxonomyCategory::Discipline, "History");
        assert_eq!(a.shared_tag_count(&b), 3);
        assert_eq!(b.shared_tag_count(&a), 3);
    }

    #[test]
    fn merge_unions_tags_and_skips_duplicate_works() {
        let mut base = AcademicRecord::new("A")
            .with_bio("original")
            .with_tag(TaxonomyCategory::Theme, "Power")
            .with_paper(Paper::new("Discipline and Punish", 1975))
            .with_event(Event::new("Lecture", 1970, "Paris"));

        let incoming = AcademicRecord::new("A")
            .with_bio("   ")
            .with_tag(TaxonomyCategory::Theme, "Sexuality")
            .with_paper(Paper::new("Discipline and Punish", 1975).with_coauthors(["X"]))
            .with_paper(Paper::new("The Order of Things", 1966))
            .with_event(Event::new("Lecture", 1970, "Paris"))
            .with_connection("B");

        base.merge_from(incoming);

        assert_eq!(base.bio, "original");
        assert_eq!(base.tags(TaxonomyCategory::Theme).count(), 2);
        assert_eq!(base.papers.len(), 2);
        assert!(base.papers[0].coauthors.contains("X"));
        assert_eq!(base.events.len(), 1);
        assert!(base.connections.contains("B"));
    }

    #[test]
    fn normalize_drops_blank_values_but_keeps_categories() {
        let mut record = AcademicRecord::new("A");
        record
            .taxonomies
            .entry(TaxonomyCategory::Era)
            .or_default()
            .insert(" ".to_string());
        record.connections.insert(String::new());
        record.normalize();
        assert_eq!(record.taxonomies.get(&TaxonomyCategory::Era), Some(&BTreeSet::new()));
        assert!(record.connections.is_empty());
    }

    #[test]
    fn missing_containers_deserialize_as_empty() {
        let record: AcademicRecord =
            serde_json::from_str(r#"{"name":"Solo"}"#).expect("minimal record should parse");
        assert_eq!(record, AcademicRecord::new("Solo"));
    }
}
