use scholia_core::{
    AcademicRecord, InMemoryRecordStore, SearchCriteria, SortKey, StoreConfig, TaxonomyCategory,
};

fn store_with(records: Vec<AcademicRecord>) -> InMemoryRecordStore {
    let mut store = InMemoryRecordStore::empty_in_memory(StoreConfig::default());
    for record in records {
        store.add_academic(record).unwrap();
    }
    store
}

#[test]
fn lookup_returns_equal_record_for_every_stored_name() {
    let store = InMemoryRecordStore::in_memory(StoreConfig::default());
    for record in store.get_all_academics() {
        assert_eq!(store.get_academic(&record.name), Some(record));
    }
    assert!(store.get_academic("hannah arendt").is_none());
}

#[test]
fn name_search_is_case_insensitive_substring() {
    let store = InMemoryRecordStore::in_memory(StoreConfig::default());
    let hits = store.search_academics(&SearchCriteria::by_name("FOUC"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Michel Foucault");

    let everything = store.search_academics(&SearchCriteria::by_name(""));
    assert_eq!(everything.len(), store.academic_count());
    assert!(store
        .search_academics(&SearchCriteria::by_name("zzz-no-match"))
        .is_empty());
}

#[test]
fn text_search_with_taxonomy_filter_and_sort() {
    let store = store_with(vec![
        AcademicRecord::new("A")
            .with_bio("Writes on power")
            .with_tag(TaxonomyCategory::Era, "Modern"),
        AcademicRecord::new("B")
            .with_tag(TaxonomyCategory::Theme, "Power")
            .with_tag(TaxonomyCategory::Era, "Modern")
            .with_connection("A")
            .with_connection("C"),
        AcademicRecord::new("C").with_tag(TaxonomyCategory::Theme, "Power"),
    ]);

    let criteria = SearchCriteria::by_text("power")
        .with_taxonomy(TaxonomyCategory::Era, "modern")
        .sorted_by(SortKey::ConnectionCount);
    let names: Vec<&str> = store
        .search_academics(&criteria)
        .into_iter()
        .map(|record| record.name.as_str())
        .collect();
    assert_eq!(names, vec!["B", "A"]);
}

#[test]
fn connected_academic_with_shared_theme_scores_seven() {
    let store = store_with(vec![
        AcademicRecord::new("A")
            .with_connection("B")
            .with_tag(TaxonomyCategory::Theme, "Power"),
        AcademicRecord::new("B")
            .with_tag(TaxonomyCategory::Theme, "Power")
            .with_tag(TaxonomyCategory::Era, "Modern"),
    ]);
    let a = store.get_academic("A").unwrap();

    let related = store.related_academics_scored(a, None);
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].record.name, "B");
    assert_eq!(related[0].score, 7);
}

#[test]
fn related_excludes_self_respects_limit_and_orders_by_score() {
    let mut records = vec![AcademicRecord::new("Root")
        .with_tag(TaxonomyCategory::Theme, "Power")
        .with_tag(TaxonomyCategory::Era, "Modern")
        .with_connection("P01")];
    for index in 1..=9 {
        let mut record =
            AcademicRecord::new(format!("P{index:02}")).with_tag(TaxonomyCategory::Theme, "Power");
        if index % 2 == 0 {
            record = record.with_tag(TaxonomyCategory::Era, "Modern");
        }
        records.push(record);
    }
    records.push(AcademicRecord::new("Unrelated").with_tag(TaxonomyCategory::Theme, "Other"));
    let store = store_with(records);
    let root = store.get_academic("Root").unwrap();

    let related = store.related_academics_scored(root, None);
    assert_eq!(related.len(), 6);
    assert!(related.iter().all(|item| item.record.name != "Root"));
    assert!(related.iter().all(|item| item.score > 0));
    assert!(related.windows(2).all(|pair| pair[0].score >= pair[1].score));
    assert_eq!(related[0].record.name, "P01");
    assert_eq!(related[0].score, 7);

    let tied: Vec<&str> = related[1..]
        .iter()
        .map(|item| item.record.name.as_str())
        .collect();
    assert_eq!(tied, vec!["P02", "P04", "P06", "P08", "P03"]);

    assert!(store.get_related_academics(root, Some(0)).is_empty());
}

#[test]
fn favorites_are_idempotent() {
    let mut store = InMemoryRecordStore::in_memory(StoreConfig::default());
    assert!(store.add_to_favorites("Judith Butler"));
    assert!(!store.add_to_favorites("Judith Butler"));
    assert_eq!(store.favorites(), vec!["Judith Butler"]);

    assert!(store.remove_from_favorites("Judith Butler"));
    assert!(!store.remove_from_favorites("Judith Butler"));
    assert!(store.favorites().is_empty());
}

#[test]
fn favorites_only_search_restricts_results() {
    let mut store = InMemoryRecordStore::in_memory(StoreConfig::default());
    store.add_to_favorites("Pierre Bourdieu");
    let hits = store.search_academics(&SearchCriteria::default().favorites_only());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Pierre Bourdieu");
}
