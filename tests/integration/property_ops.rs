#![allow(missing_docs)]

use std::collections::HashMap;
use std::io::Cursor;

use proptest::prelude::*;
use slotgraph::{
    storage::{Persist, SlotTable, UndirectedGraph},
    types::{KeyId, NodeId},
};

#[derive(Debug, Clone)]
enum TableOp {
    Insert { key: i64, value: u32 },
    Remove { key: i64 },
    RemoveHandle { pick: usize },
    Clear,
}

fn arb_table_op() -> impl Strategy<Value = TableOp> {
    prop_oneof![
        6 => (0i64..64, any::<u32>()).prop_map(|(key, value)| TableOp::Insert { key, value }),
        3 => (0i64..64).prop_map(|key| TableOp::Remove { key }),
        2 => any::<usize>().prop_map(|pick| TableOp::RemoveHandle { pick }),
        1 => Just(TableOp::Clear),
    ]
}

#[derive(Debug, Clone)]
enum GraphOp {
    AddNode(i64),
    AddEdge(i64, i64),
    DelEdge(i64, i64),
    DelNode(i64),
}

fn arb_graph_op() -> impl Strategy<Value = GraphOp> {
    prop_oneof![
        3 => (0i64..24).prop_map(GraphOp::AddNode),
        6 => (0i64..24, 0i64..24).prop_map(|(a, b)| GraphOp::AddEdge(a, b)),
        2 => (0i64..24, 0i64..24).prop_map(|(a, b)| GraphOp::DelEdge(a, b)),
        1 => (0i64..24).prop_map(GraphOp::DelNode),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn table_matches_hash_map(ops in prop::collection::vec(arb_table_op(), 1..300)) {
        let mut table: SlotTable<i64, u32> = SlotTable::new();
        let mut model: HashMap<i64, u32> = HashMap::new();
        let mut handles: Vec<KeyId> = Vec::new();

        for op in ops {
            match op {
                TableOp::Insert { key, value } => {
                    let existing = table.key_id(&key);
                    let id = table.insert(key, value).unwrap();
                    if existing.is_some() {
                        prop_assert_eq!(existing, Some(id));
                    }
                    prop_assert_eq!(table.key_id(&key), Some(id));
                    model.insert(key, value);
                    handles.push(id);
                }
                TableOp::Remove { key } => {
                    prop_assert_eq!(table.remove(&key), model.remove(&key));
                }
                TableOp::RemoveHandle { pick } => {
                    if handles.is_empty() {
                        continue;
                    }
                    let id = handles[pick % handles.len()];
                    match table.remove_id(id) {
                        Ok((key, value)) => prop_assert_eq!(model.remove(&key), Some(value)),
                        Err(_) => prop_assert!(!table.is_key_id(id)),
                    }
                }
                TableOp::Clear => {
                    table.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(table.len(), model.len());
        }

        for (key, value) in &model {
            let id = table.key_id(key).unwrap();
            prop_assert_eq!(table.key(id).unwrap(), key);
            prop_assert_eq!(table.dat(id).unwrap(), value);
        }
        prop_assert_eq!(table.iter().count(), model.len());
        prop_assert_eq!(table.key_ids().count(), model.len());

        let mut image = Vec::new();
        table.save(&mut image).unwrap();
        let loaded: SlotTable<i64, u32> = SlotTable::load(&mut Cursor::new(image)).unwrap();
        prop_assert_eq!(&loaded, &table);
        prop_assert_eq!(
            loaded.keys().collect::<Vec<_>>(),
            table.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn graph_invariants_hold(ops in prop::collection::vec(arb_graph_op(), 1..200)) {
        let mut graph = UndirectedGraph::new();
        for op in ops {
            match op {
                GraphOp::AddNode(id) => {
                    let existed = graph.is_node(NodeId(id));
                    prop_assert_eq!(graph.add_node(NodeId(id)).is_err(), existed);
                }
                GraphOp::AddEdge(a, b) => {
                    let valid = graph.is_node(NodeId(a)) && graph.is_node(NodeId(b));
                    let before = graph.edge_count();
                    prop_assert_eq!(graph.add_edge(NodeId(a), NodeId(b)).is_ok(), valid);
                    if valid {
                        prop_assert_eq!(graph.edge_count(), before + 1);
                        prop_assert!(graph.is_edge(NodeId(a), NodeId(b)));
                        prop_assert!(graph.is_edge(NodeId(b), NodeId(a)));
                    }
                }
                GraphOp::DelEdge(a, b) => {
                    let before = graph.edge_count();
                    if let Ok(removed) = graph.del_edge(NodeId(a), NodeId(b)) {
                        prop_assert_eq!(graph.edge_count(), before - u64::from(removed));
                    }
                }
                GraphOp::DelNode(id) => {
                    if let Ok(deg) = graph.degree(NodeId(id)) {
                        let before = graph.edge_count();
                        graph.del_node(NodeId(id)).unwrap();
                        prop_assert_eq!(before - graph.edge_count(), deg as u64);
                        prop_assert!(!graph.is_node(NodeId(id)));
                    }
                }
            }
            let report = graph.audit();
            prop_assert!(report.success, "{:?}", report.findings);
        }

        let degree_sum: u64 = graph.nodes().map(|node| node.deg() as u64).sum();
        let loops: u64 = graph.nodes().map(|node| node.self_loops() as u64).sum();
        prop_assert_eq!(degree_sum + loops, 2 * graph.edge_count());
        prop_assert_eq!(graph.edges().count() as u64, graph.edge_count());

        let mut image = Vec::new();
        graph.save(&mut image).unwrap();
        let loaded = UndirectedGraph::load(&mut image.as_slice()).unwrap();
        prop_assert_eq!(loaded, graph);
    }
}
