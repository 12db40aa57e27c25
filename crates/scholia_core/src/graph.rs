//! Network graph data for the external graph renderer.
//!
//! # Invariants
//! - Every link endpoint is a node; dangling connections are skipped.
//! - Links are undirected: `A -> B` and `B -> A` collapse into one link.
//! - Node and link order is deterministic (ascending names).

use crate::model::academic::{AcademicRecord, TaxonomyCategory};
use crate::storage::DurableStore;
use crate::store::RecordStore;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Link origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Connection,
    Coauthor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    /// First discipline tag, or `"unclassified"`.
    pub group: String,
    pub favorite: bool,
    pub degree: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub kind: LinkKind,
}

/// `{nodes, links}` payload consumed by the graph renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Builds graph data for every academic in the store.
pub fn build_graph<S: DurableStore>(store: &RecordStore<S>) -> GraphData {
    let academics = store.get_all_academics();
    let known: BTreeSet<&str> = academics.iter().map(|record| record.name.as_str()).collect();

    // Keyed by sorted endpoint pair; a connection wins over a coauthor link.
    let mut edges: BTreeMap<(&str, &str), LinkKind> = BTreeMap::new();
    for record in &academics {
        for other in &record.connections {
            if let Some(pair) = edge_key(&known, &record.name, other) {
                edges.insert(pair, LinkKind::Connection);
            }
        }
        for coauthor in record.papers.iter().flat_map(|paper| paper.coauthors.iter()) {
            if let Some(pair) = edge_key(&known, &record.name, coauthor) {
                edges.entry(pair).or_insert(LinkKind::Coauthor);
            }
        }
    }

    let mut degree: BTreeMap<&str, usize> = BTreeMap::new();
    for &(source, target) in edges.keys() {
        *degree.entry(source).or_default() += 1;
        *degree.entry(target).or_default() += 1;
    }

    let nodes = academics
        .iter()
        .map(|record| GraphNode {
            id: record.name.clone(),
            group: node_group(record),
            favorite: store.is_favorite(&record.name),
            degree: degree.get(record.name.as_str()).copied().unwrap_or(0),
        })
        .collect();

    let links = edges
        .into_iter()
        .map(|((source, target), kind)| GraphLink {
            source: source.to_string(),
            target: target.to_string(),
            kind,
        })
        .collect();

    GraphData { nodes, links }
}

fn edge_key<'a>(known: &BTreeSet<&'a str>, from: &'a str, to: &'a str) -> Option<(&'a str, &'a str)> {
    if from == to || !known.contains(to) {
        return None;
    }
    Some(if from < to { (from, to) } else { (to, from) })
}

fn node_group(record: &AcademicRecord) -> String {
    record
        .tags(TaxonomyCategory::Discipline)
        .next()
        .unwrap_or("unclassified")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{build_graph, LinkKind};
    use crate::config::StoreConfig;
    use crate::model::academic::{AcademicRecord, Paper, TaxonomyCategory};
    use crate::store::InMemoryRecordStore;

    #[test]
    fn links_are_undirected_and_skip_dangling_names() {
        let mut store = InMemoryRecordStore::empty_in_memory(StoreConfig::default());
        store
            .add_academic(
                AcademicRecord::new("A")
                    .with_tag(TaxonomyCategory::Discipline, "Sociology")
                    .with_connection("B")
                    .with_connection("Ghost"),
            )
            .expect("add A");
        store
            .add_academic(AcademicRecord::new("B").with_connection("A"))
            .expect("add B");
        store
            .add_academic(
                AcademicRecord::new("C").with_paper(Paper::new("Joint", 2000).with_coauthors(["A"])),
            )
            .expect("add C");
        store.add_to_favorites("C");

        let graph = build_graph(&store);
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.links.len(), 2);
        assert_eq!(graph.links[0].kind, LinkKind::Connection);
        assert_eq!(graph.links[1].kind, LinkKind::Coauthor);

        let a = &graph.nodes[0];
        assert_eq!(a.group, "Sociology");
        assert_eq!(a.degree, 2);
        assert!(graph.nodes[2].favorite);
        assert_eq!(graph.nodes[1].group, "unclassified");
    }

    #[test]
    fn graph_serializes_as_nodes_and_links() {
        let store = InMemoryRecordStore::in_memory(StoreConfig::default());
        let json = serde_json::to_value(build_graph(&store)).expect("serialize graph");
        assert!(json["nodes"].is_array());
        assert!(json["links"].is_array());
    }
}
