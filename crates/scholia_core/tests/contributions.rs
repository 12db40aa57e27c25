use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scholia_core::service::handlers::{
    handle_generate_tile, handle_graph, handle_novelty_feed, handle_submit_contribution,
};
use scholia_core::{
    apply_contribution, Contribution, ContributionError, ContributionForm, MemoryStore,
    RecordStore, StoreConfig,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn paper_form(academic: &str) -> ContributionForm {
    ContributionForm {
        kind: "paper".to_string(),
        academic: academic.to_string(),
        title: Some("A Thousand Plateaus".to_string()),
        year: Some("1980".to_string()),
        coauthors: Some("Félix Guattari and Michel Foucault".to_string()),
        ..ContributionForm::default()
    }
}

#[test]
fn accepted_paper_is_persisted_with_its_tile() {
    let mut store = RecordStore::open(MemoryStore::new(), StoreConfig::default());
    let response = handle_submit_contribution(&mut store, &paper_form("Gilles Deleuze"), today());
    assert!(response.ok, "{}", response.message);
    assert_eq!(response.subject.as_deref(), Some("Gilles Deleuze"));
    assert_eq!(response.save.as_deref(), Some("saved"));

    let backend = store.close().unwrap();
    let reopened = RecordStore::open(backend, StoreConfig::default());
    let deleuze = reopened.get_academic("Gilles Deleuze").unwrap();
    let paper = deleuze
        .papers
        .iter()
        .find(|paper| paper.title == "A Thousand Plateaus")
        .unwrap();
    assert!(paper.coauthors.contains("Michel Foucault"));

    let feed = handle_novelty_feed(&reopened, None);
    assert_eq!(feed.total, 1);
    assert_eq!(feed.items[0].academics[0], "Gilles Deleuze");
}

#[test]
fn contribution_for_unknown_academic_is_rejected_without_side_effects() {
    let mut store = RecordStore::open(MemoryStore::new(), StoreConfig::default());
    let response = handle_submit_contribution(&mut store, &paper_form("Nobody"), today());
    assert!(!response.ok);
    assert!(response.message.contains("academic not found"));
    assert_eq!(store.novelty_tile_count(), 0);
}

#[test]
fn connection_target_need_not_exist_and_shows_no_graph_link() {
    let mut store = RecordStore::open(MemoryStore::new(), StoreConfig::default());
    let contribution = Contribution::Connection {
        academic: "Edward Said".to_string(),
        target: "Erich Auerbach".to_string(),
    };
    let updated = apply_contribution(&mut store, contribution).unwrap();
    assert!(updated.connections.contains("Erich Auerbach"));

    let graph = handle_graph(&store);
    assert!(graph
        .links
        .iter()
        .all(|link| link.source != "Erich Auerbach" && link.target != "Erich Auerbach"));
    assert_eq!(graph.nodes.len(), store.academic_count());
}

#[test]
fn unknown_kind_is_rejected() {
    let form = ContributionForm {
        kind: "podcast".to_string(),
        academic: "Judith Butler".to_string(),
        ..ContributionForm::default()
    };
    assert!(matches!(
        Contribution::from_form(&form),
        Err(ContributionError::Kind(_))
    ));
}

#[test]
fn generated_tile_is_added_and_saved() {
    let mut store = RecordStore::open(MemoryStore::new(), StoreConfig::default());
    let mut rng = StdRng::seed_from_u64(2026);
    let response = handle_generate_tile(&mut store, &mut rng, today());
    assert!(response.ok, "{}", response.message);
    assert_eq!(response.save.as_deref(), Some("saved"));

    let tiles = store.novelty_tiles();
    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0].academics.len(), 2);
    assert!(tiles[0]
        .academics
        .iter()
        .all(|name| store.get_academic(name).is_some()));
}
