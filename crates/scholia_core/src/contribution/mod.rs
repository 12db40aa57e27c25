//! User contributions to existing academic records.
//!
//! # Responsibility
//! - Turn loosely typed form input into a typed [`Contribution`] using the
//!   per-kind field capability set.
//! - Validate and apply contributions to the record store.
//!
//! # Invariants
//! - Every contribution targets an academic that exists in the store.
//! - Connection targets are not required to exist.
//! - Years are limited to `MIN_YEAR..=MAX_YEAR`.

pub mod kind;

use crate::model::academic::{AcademicRecord, Event, Paper, TaxonomyCategory};
use crate::model::ModelError;
use crate::storage::DurableStore;
use crate::store::RecordStore;
use kind::{parse_contribution_kind, ContributionField, ContributionKind, ContributionKindError};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MIN_YEAR: i32 = -3000;
pub const MAX_YEAR: i32 = 2100;

static COAUTHOR_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*(?:,|;|(?i:\band\b)|&)\s*").expect("valid coauthor separator regex")
});
static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(-?\d{1,4})\s*$").expect("valid year regex"));

/// Typed contribution, one variant per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Contribution {
    Paper {
        academic: String,
        title: String,
        year: i32,
        #[serde(default)]
        coauthors: BTreeSet<String>,
    },
    Event {
        academic: String,
        title: String,
        year: i32,
        #[serde(default)]
        location: String,
    },
    Connection {
        academic: String,
        target: String,
    },
    Taxonomy {
        academic: String,
        category: TaxonomyCategory,
        value: String,
    },
}

/// Raw form input as submitted by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionForm {
    pub kind: String,
    pub academic: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub coauthors: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl ContributionForm {
    fn field(&self, field: ContributionField) -> Option<&str> {
        let value = match field {
            ContributionField::Title => self.title.as_deref(),
            ContributionField::Year => self.year.as_deref(),
            ContributionField::Coauthors => self.coauthors.as_deref(),
            ContributionField::Location => self.location.as_deref(),
            ContributionField::Target => self.target.as_deref(),
            ContributionField::Category => self.category.as_deref(),
            ContributionField::Value => self.value.as_deref(),
        };
        value.map(str::trim).filter(|value| !value.is_empty())
    }
}

/// Contribution validation/application error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContributionError {
    Kind(ContributionKindError),
    EmptyAcademic,
    MissingField {
        kind: ContributionKind,
        field: ContributionField,
    },
    InvalidYear(String),
    YearOutOfRange(i32),
    Model(ModelError),
    UnknownAcademic(String),
    SelfConnection(String),
}

impl Display for ContributionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kind(err) => write!(f, "{err}"),
            Self::EmptyAcademic => write!(f, "contribution must name an academic"),
            Self::MissingField { kind, field } => {
                write!(f, "{} contribution requires `{field}`", kind.as_str())
            }
            Self::InvalidYear(value) => write!(f, "invalid year `{value}`"),
            Self::YearOutOfRange(year) => write!(
                f,
                "year {year} is outside the supported range {MIN_YEAR}..={MAX_YEAR}"
            ),
            Self::Model(err) => write!(f, "{err}"),
            Self::UnknownAcademic(name) => write!(f, "academic not found: {name}"),
            Self::SelfConnection(name) => write!(f, "academic cannot connect to itself: {name}"),
        }
    }
}

impl Error for ContributionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kind(err) => Some(err),
            Self::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContributionKindError> for ContributionError {
    fn from(value: ContributionKindError) -> Self {
        Self::Kind(value)
    }
}

impl From<ModelError> for ContributionError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

impl Contribution {
    /// Builds a typed contribution from form input.
    ///
    /// Required fields come from [`ContributionKind::required_fields`];
    /// fields the kind does not accept are ignored.
    pub fn from_form(form: &ContributionForm) -> Result<Self, ContributionError> {
        let kind = parse_contribution_kind(&form.kind)?;
        let academic = form.academic.trim();
        if academic.is_empty() {
            return Err(ContributionError::EmptyAcademic);
        }
        for field in kind.required_fields() {
            if form.field(*field).is_none() {
                return Err(ContributionError::MissingField {
                    kind,
                    field: *field,
                });
            }
        }

        let text = |field: ContributionField| form.field(field).unwrap_or_default().to_string();
        let academic = academic.to_string();
        let contribution = match kind {
            ContributionKind::Paper => Self::Paper {
                academic,
                title: text(ContributionField::Title),
                year: parse_year(&text(ContributionField::Year))?,
                coauthors: split_coauthors(&text(ContributionField::Coauthors)),
            },
            ContributionKind::Event => Self::Event {
                academic,
                title: text(ContributionField::Title),
                year: parse_year(&text(ContributionField::Year))?,
                location: text(ContributionField::Location),
            },
            ContributionKind::Connection => Self::Connection {
                academic,
                target: text(ContributionField::Target),
            },
            ContributionKind::Taxonomy => Self::Taxonomy {
                academic,
                category: TaxonomyCategory::parse(&text(ContributionField::Category))?,
                value: text(ContributionField::Value),
            },
        };
        contribution.validate()?;
        Ok(contribution)
    }

    pub fn kind(&self) -> ContributionKind {
        match self {
            Self::Paper { .. } => ContributionKind::Paper,
            Self::Event { .. } => ContributionKind::Event,
            Self::Connection { .. } => ContributionKind::Connection,
            Self::Taxonomy { .. } => ContributionKind::Taxonomy,
        }
    }

    /// Name of the academic this contribution edits.
    pub fn academic(&self) -> &str {
        match self {
            Self::Paper { academic, .. }
            | Self::Event { academic, .. }
            | Self::Connection { academic, .. }
            | Self::Taxonomy { academic, .. } => academic,
        }
    }

    /// Checks field-level invariants independent of store contents.
    pub fn validate(&self) -> Result<(), ContributionError> {
        if self.academic().trim().is_empty() {
            return Err(ContributionError::EmptyAcademic);
        }
        let kind = self.kind();
        let missing = |field| ContributionError::MissingField { kind, field };
        match self {
            Self::Paper { title, year, .. } | Self::Event { title, year, .. } => {
                if title.trim().is_empty() {
                    return Err(missing(ContributionField::Title));
                }
                check_year_range(*year)?;
            }
            Self::Connection { academic, target } => {
                if target.trim().is_empty() {
                    return Err(missing(ContributionField::Target));
                }
                if target == academic {
                    return Err(ContributionError::SelfConnection(target.clone()));
                }
            }
            Self::Taxonomy { value, .. } => {
                if value.trim().is_empty() {
                    return Err(missing(ContributionField::Value));
                }
            }
        }
        Ok(())
    }

    /// Names mentioned by this contribution, target academic first.
    pub fn mentioned_names(&self) -> Vec<String> {
        let mut names = vec![self.academic().to_string()];
        match self {
            Self::Paper { coauthors, .. } => names.extend(coauthors.iter().cloned()),
            Self::Connection { target, .. } => names.push(target.clone()),
            Self::Event { .. } | Self::Taxonomy { .. } => {}
        }
        names
    }

    fn apply_to(self, record: &mut AcademicRecord) {
        match self {
            Self::Paper {
                title,
                year,
                coauthors,
                ..
            } => {
                let paper = Paper::new(title, year).with_coauthors(coauthors);
                let mut incoming = AcademicRecord::new(record.name.clone());
                incoming.papers.push(paper);
                record.merge_from(incoming);
            }
            Self::Event {
                title,
                year,
                location,
                ..
            } => {
                let mut incoming = AcademicRecord::new(record.name.clone());
                incoming.events.push(Event::new(title, year, location));
                record.merge_from(incoming);
            }
            Self::Connection { target, .. } => {
                record.add_connection(target);
            }
            Self::Taxonomy {
                category, value, ..
            } => {
                record.add_tag(category, value);
            }
        }
    }
}

/// Applies `contribution` to its target academic and returns the updated
/// record.
pub fn apply_contribution<S: DurableStore>(
    store: &mut RecordStore<S>,
    contribution: Contribution,
) -> Result<AcademicRecord, ContributionError> {
    contribution.validate()?;
    let kind = contribution.kind();
    let name = contribution.academic().to_string();
    let Some(record) = store.academic_mut(&name) else {
        return Err(ContributionError::UnknownAcademic(name));
    };
    contribution.apply_to(record);
    info!(
        "event=contribution_apply module=contribution status=ok kind={}",
        kind.as_str()
    );
    Ok(record.clone())
}

/// Splits free-text coauthor input on commas, semicolons, `&` and `and`.
pub fn split_coauthors(raw: &str) -> BTreeSet<String> {
    COAUTHOR_SEPARATOR_RE
        .split(raw.trim())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_year(raw: &str) -> Result<i32, ContributionError> {
    let year = YEAR_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse::<i32>().ok())
        .ok_or_else(|| ContributionError::InvalidYear(raw.to_string()))?;
    check_year_range(year)?;
    Ok(year)
}

fn check_year_range(year: i32) -> Result<(), ContributionError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(ContributionError::YearOutOfRange(year))
    }
}
