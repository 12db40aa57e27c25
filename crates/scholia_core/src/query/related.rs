//! Related-academics ranking.
//!
//! # Invariants
//! - The queried record is never its own candidate.
//! - Zero-score candidates are excluded.
//! - Equal scores keep snapshot iteration order (stable sort).

use crate::model::academic::AcademicRecord;

/// Score bonus for a candidate listed in the record's connections.
pub const CONNECTION_BONUS: u32 = 5;
/// Score per taxonomy value shared with the candidate.
pub const SHARED_TAG_POINTS: u32 = 2;

/// One ranked candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelatedAcademic<'a> {
    pub record: &'a AcademicRecord,
    pub score: u32,
}

/// Similarity of `candidate` to `record`.
pub fn similarity_score(record: &AcademicRecord, candidate: &AcademicRecord) -> u32 {
    let connection = if record.connections.contains(&candidate.name) {
        CONNECTION_BONUS
    } else {
        0
    };
    let shared = u32::try_from(record.shared_tag_count(candidate)).unwrap_or(u32::MAX);
    connection.saturating_add(shared.saturating_mul(SHARED_TAG_POINTS))
}

/// Ranks `candidates` by similarity to `record`, highest first, keeping at
/// most `limit` entries.
pub fn rank_related<'a, I>(record: &AcademicRecord, candidates: I, limit: usize) -> Vec<RelatedAcademic<'a>>
where
    I: IntoIterator<Item = &'a AcademicRecord>,
{
    let mut ranked: Vec<RelatedAcademic<'a>> = candidates
        .into_iter()
        .filter(|candidate| candidate.name != record.name)
        .map(|candidate| RelatedAcademic {
            record: candidate,
            score: similarity_score(record, candidate),
        })
        .filter(|related| related.score > 0)
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::{rank_related, similarity_score};
    use crate::model::academic::{AcademicRecord, TaxonomyCategory};

    #[test]
    fn connection_and_shared_tag_scores_add_up() {
        let a = AcademicRecord::new("A")
            .with_connection("B")
            .with_tag(TaxonomyCategory::Theme, "Power");
        let b = AcademicRecord::new("B")
            .with_tag(TaxonomyCategory::Theme, "Power")
            .with_tag(TaxonomyCategory::Era, "Modern");
        assert_eq!(similarity_score(&a, &b), 7);
    }

    #[test]
    fn ties_keep_input_order_and_zero_scores_drop() {
        let target = AcademicRecord::new("T").with_tag(TaxonomyCategory::Era, "Modern");
        let records = vec![
            AcademicRecord::new("C1").with_tag(TaxonomyCategory::Era, "Modern"),
            AcademicRecord::new("C2"),
            AcademicRecord::new("C3").with_tag(TaxonomyCategory::Era, "Modern"),
            target.clone(),
        ];
        let ranked = rank_related(&target, &records, 6);
        let names: Vec<&str> = ranked.iter().map(|r| r.record.name.as_str()).collect();
        assert_eq!(names, vec!["C1", "C3"]);
    }

    #[test]
    fn limit_truncates_after_sorting() {
        let target = AcademicRecord::new("T")
            .with_connection("Strong")
            .with_tag(TaxonomyCategory::Theme, "X");
        let records = vec![
            AcademicRecord::new("Weak").with_tag(TaxonomyCategory::Theme, "X"),
            AcademicRecord::new("Strong"),
        ];
        let ranked = rank_related(&target, &records, 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].record.name, "Strong");
        assert_eq!(ranked[0].score, 5);
    }
}
