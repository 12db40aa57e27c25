//! Taxonomy usage summaries.

use crate::model::academic::{AcademicRecord, TaxonomyCategory};
use std::collections::BTreeMap;

/// Distinct values used under `category`, with the number of academics
/// carrying each value. Sorted by value.
pub fn taxonomy_values<'a, I>(records: I, category: TaxonomyCategory) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a AcademicRecord>,
{
    let mut counts: BTreeMap<&'a str, usize> = BTreeMap::new();
    for record in records {
        for value in record.tags(category) {
            *counts.entry(value).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

/// Academics tagged with `value` under `category`, ignoring case.
pub fn academics_by_taxonomy<'a, I>(
    records: I,
    category: TaxonomyCategory,
    value: &str,
) -> Vec<&'a AcademicRecord>
where
    I: IntoIterator<Item = &'a AcademicRecord>,
{
    records
        .into_iter()
        .filter(|record| record.has_tag(category, value))
        .collect()
}

/// Values shared by at least two academics, across every category.
pub fn shared_values<'a, I>(records: I) -> Vec<(TaxonomyCategory, String)>
where
    I: IntoIterator<Item = &'a AcademicRecord> + Clone,
{
    TaxonomyCategory::ALL
        .iter()
        .flat_map(|category| {
            taxonomy_values(records.clone(), *category)
                .into_iter()
                .filter(|(_, count)| *count >= 2)
                .map(move |(value, _)| (*category, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{academics_by_taxonomy, shared_values, taxonomy_values};
    use crate::model::academic::{AcademicRecord, TaxonomyCategory};

    fn sample() -> Vec<AcademicRecord> {
        vec![
            AcademicRecord::new("A")
                .with_tag(TaxonomyCategory::Theme, "Power")
                .with_tag(TaxonomyCategory::Era, "Modern"),
            AcademicRecord::new("B").with_tag(TaxonomyCategory::Theme, "Power"),
            AcademicRecord::new("C").with_tag(TaxonomyCategory::Theme, "Gender"),
        ]
    }

    #[test]
    fn values_are_counted_and_sorted() {
        let records = sample();
        assert_eq!(
            taxonomy_values(&records, TaxonomyCategory::Theme),
            vec![("Gender".to_string(), 1), ("Power".to_string(), 2)]
        );
    }

    #[test]
    fn by_taxonomy_matches_ignoring_case() {
        let records = sample();
        let hits = academics_by_taxonomy(&records, TaxonomyCategory::Theme, "power");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn shared_values_require_two_holders() {
        let records = sample();
        assert_eq!(
            shared_values(&records),
            vec![(TaxonomyCategory::Theme, "Power".to_string())]
        );
    }
}
