#![allow(missing_docs)]

mod common;

use std::collections::BTreeMap;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use slotgraph::{
    storage::{CounterMetrics, GraphFlag, GraphOptions, TableOptions, UndirectedGraph},
    types::{NodeId, Result, SlotGraphError},
};

fn nid(id: i64) -> NodeId {
    NodeId(id)
}

#[test]
fn self_loop_scenario() -> Result<()> {
    common::init_tracing();
    let mut graph = UndirectedGraph::new();
    for id in 0..3 {
        graph.add_node(nid(id))?;
    }
    graph.add_edge(nid(0), nid(1))?;
    graph.add_edge(nid(1), nid(2))?;
    graph.add_edge(nid(0), nid(0))?;
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.degree(nid(0))?, 2);

    graph.del_node(nid(1))?;
    assert_eq!(graph.edge_count(), 1);
    assert!(!graph.is_node(nid(1)));
    assert!(graph.edges().all(|e| e.src() != nid(1) && e.dst() != nid(1)));
    graph.check()?;
    Ok(())
}

#[test]
fn small_graph_flags_and_views() -> Result<()> {
    let graph = UndirectedGraph::small_graph()?;
    assert!(!graph.has_flag(GraphFlag::Directed));
    assert!(!graph.is_directed());

    let degrees: BTreeMap<i64, usize> = graph.nodes().map(|n| (n.id().0, n.deg())).collect();
    assert_eq!(
        degrees,
        BTreeMap::from([(0, 4), (1, 2), (2, 2), (3, 1), (4, 1)])
    );
    for node in graph.nodes() {
        for k in 0..node.deg() {
            let nbr = node.nbr_id(k).expect("k below degree");
            assert!(graph.is_edge(nbr, node.id()));
        }
    }
    Ok(())
}

#[test]
fn random_graph_stays_consistent_under_deletion() -> Result<()> {
    common::init_tracing();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut graph = UndirectedGraph::new();
    for _ in 0..300 {
        graph.add_node_auto()?;
    }
    for _ in 0..2000 {
        let a = nid(rng.gen_range(0..300));
        let b = nid(rng.gen_range(0..300));
        graph.add_edge(a, b)?;
    }
    assert_eq!(graph.edge_count(), 2000);
    assert_eq!(graph.edges().count(), 2000);
    graph.check()?;

    while graph.node_count() > 100 {
        let id = graph.random_node_id(&mut rng).expect("graph not empty");
        graph.del_node(id)?;
        assert!(!graph.is_node(id));
    }
    let report = graph.audit();
    assert!(report.success, "{:?}", report.findings);
    assert_eq!(report.counts.nodes, 100);
    assert_eq!(report.counts.edges_derived, graph.edge_count());
    assert_eq!(graph.edges().count() as u64, graph.edge_count());
    Ok(())
}

#[test]
fn audit_report_serializes_to_json() -> Result<()> {
    let mut graph = UndirectedGraph::small_graph()?;
    graph.add_edge(nid(3), nid(3))?;
    graph.add_edge(nid(0), nid(1))?;
    let report = graph.audit();
    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["success"], true);
    assert_eq!(json["counts"]["nodes"], 5);
    assert_eq!(json["counts"]["self_loops"], 1);
    assert_eq!(json["counts"]["edges_recorded"], 7);
    assert_eq!(json["findings"][0]["severity"], "warning");
    Ok(())
}

#[test]
fn sampling_threshold_comes_from_graph_options() -> Result<()> {
    let metrics = Arc::new(CounterMetrics::default());
    let opts = GraphOptions::new()
        .table(TableOptions::new().metrics(metrics.clone()))
        .sample_occupancy(0.0);
    let mut graph = UndirectedGraph::with_options(opts);
    for id in 0..8 {
        graph.add_node(nid(id))?;
    }
    for id in 0..6 {
        graph.del_node(nid(id))?;
    }
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..20 {
        let id = graph.random_node_id(&mut rng).expect("two nodes left");
        assert!(id == nid(6) || id == nid(7));
    }
    assert_eq!(metrics.rejection_samples.load(Ordering::Relaxed), 20);
    assert_eq!(metrics.scan_samples.load(Ordering::Relaxed), 0);
    Ok(())
}

#[test]
fn errors_leave_graph_untouched() -> Result<()> {
    let mut graph = UndirectedGraph::small_graph()?;
    let before = graph.clone();
    assert!(matches!(
        graph.add_node(nid(2)),
        Err(SlotGraphError::AlreadyExists(_))
    ));
    assert!(matches!(
        graph.add_edge(nid(2), nid(99)),
        Err(SlotGraphError::NodeNotFound(_))
    ));
    assert!(matches!(
        graph.del_edge(nid(99), nid(2)),
        Err(SlotGraphError::NodeNotFound(_))
    ));
    assert!(!graph.del_edge(nid(3), nid(4))?);
    assert_eq!(graph, before);
    Ok(())
}
