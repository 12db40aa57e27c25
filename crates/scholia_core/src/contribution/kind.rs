//! Contribution kinds and the form fields each kind requires.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Request string value for paper contributions.
pub const CONTRIBUTION_KIND_PAPER: &str = "paper";
/// Request string value for event contributions.
pub const CONTRIBUTION_KIND_EVENT: &str = "event";
/// Request string value for connection contributions.
pub const CONTRIBUTION_KIND_CONNECTION: &str = "connection";
/// Request string value for taxonomy contributions.
pub const CONTRIBUTION_KIND_TAXONOMY: &str = "taxonomy";

const SUPPORTED_CONTRIBUTION_KINDS: &[&str] = &[
    CONTRIBUTION_KIND_PAPER,
    CONTRIBUTION_KIND_EVENT,
    CONTRIBUTION_KIND_CONNECTION,
    CONTRIBUTION_KIND_TAXONOMY,
];

/// Kind of user submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContributionKind {
    Paper,
    Event,
    Connection,
    Taxonomy,
}

/// One form field a contribution kind may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContributionField {
    Title,
    Year,
    Coauthors,
    Location,
    Target,
    Category,
    Value,
}

impl ContributionField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Year => "year",
            Self::Coauthors => "coauthors",
            Self::Location => "location",
            Self::Target => "target",
            Self::Category => "category",
            Self::Value => "value",
        }
    }
}

impl Display for ContributionField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ContributionKind {
    /// Stable string id used in request payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paper => CONTRIBUTION_KIND_PAPER,
            Self::Event => CONTRIBUTION_KIND_EVENT,
            Self::Connection => CONTRIBUTION_KIND_CONNECTION,
            Self::Taxonomy => CONTRIBUTION_KIND_TAXONOMY,
        }
    }

    /// Fields that must be present and non-blank.
    pub fn required_fields(self) -> &'static [ContributionField] {
        match self {
            Self::Paper => &[ContributionField::Title, ContributionField::Year],
            Self::Event => &[ContributionField::Title, ContributionField::Year],
            Self::Connection => &[ContributionField::Target],
            Self::Taxonomy => &[ContributionField::Category, ContributionField::Value],
        }
    }

    /// Fields that may be present in addition to the required ones.
    pub fn optional_fields(self) -> &'static [ContributionField] {
        match self {
            Self::Paper => &[ContributionField::Coauthors],
            Self::Event => &[ContributionField::Location],
            Self::Connection | Self::Taxonomy => &[],
        }
    }

    /// Whether this kind reads `field` at all.
    pub fn accepts(self, field: ContributionField) -> bool {
        self.required_fields().contains(&field) || self.optional_fields().contains(&field)
    }

    /// User-facing short description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Paper => "Add a paper with its year and optional coauthors.",
            Self::Event => "Add an event with its year and optional location.",
            Self::Connection => "Link this academic to another academic by name.",
            Self::Taxonomy => "Tag this academic under a taxonomy category.",
        }
    }
}

/// Returns supported contribution kind strings.
pub fn supported_contribution_kinds() -> &'static [&'static str] {
    SUPPORTED_CONTRIBUTION_KINDS
}

/// Parses one contribution kind from a request string.
pub fn parse_contribution_kind(value: &str) -> Result<ContributionKind, ContributionKindError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(ContributionKindError::EmptyKind);
    }

    match normalized {
        CONTRIBUTION_KIND_PAPER => Ok(ContributionKind::Paper),
        CONTRIBUTION_KIND_EVENT => Ok(ContributionKind::Event),
        CONTRIBUTION_KIND_CONNECTION => Ok(ContributionKind::Connection),
        CONTRIBUTION_KIND_TAXONOMY => Ok(ContributionKind::Taxonomy),
        other => Err(ContributionKindError::UnsupportedKind(other.to_string())),
    }
}

/// Contribution kind parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContributionKindError {
    EmptyKind,
    UnsupportedKind(String),
}

impl Display for ContributionKindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKind => write!(f, "contribution kind must not be empty"),
            Self::UnsupportedKind(value) => {
                write!(f, "contribution kind is unsupported: {value}")
            }
        }
    }
}

impl Error for ContributionKindError {}

#[cfg(test)]
mod tests {
    use super::{
        parse_contribution_kind, supported_contribution_kinds, ContributionField,
        ContributionKind, ContributionKindError,
    };

    #[test]
    fn parses_all_supported_kinds() {
        for value in supported_contribution_kinds() {
            let kind = parse_contribution_kind(value).expect("supported kind parses");
            assert_eq!(kind.as_str(), *value);
        }
    }

    #[test]
    fn rejects_empty_and_non_lowercase_kinds() {
        assert_eq!(
            parse_contribution_kind("  "),
            Err(ContributionKindError::EmptyKind)
        );
        assert_eq!(
            parse_contribution_kind("Paper"),
            Err(ContributionKindError::UnsupportedKind("Paper".to_string()))
        );
    }

    #[test]
    fn field_capabilities_differ_per_kind() {
        assert!(ContributionKind::Paper.accepts(ContributionField::Coauthors));
        assert!(!ContributionKind::Paper.accepts(ContributionField::Location));
        assert!(ContributionKind::Event.accepts(ContributionField::Location));
        assert_eq!(
            ContributionKind::Connection.required_fields(),
            &[ContributionField::Target]
        );
        assert!(!ContributionKind::Taxonomy.accepts(ContributionField::Year));
    }
}
