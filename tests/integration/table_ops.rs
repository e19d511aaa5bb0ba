#![allow(missing_docs)]

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slotgraph::{
    storage::{CounterMetrics, KeySet, SlotTable, TableOptions},
    types::{NodeId, Result, SlotGraphError},
};

#[test]
fn string_keys_resolve_by_borrowed_str() -> Result<()> {
    common::init_tracing();
    let mut table: SlotTable<String, u32> = SlotTable::new();
    let alpha = table.insert("alpha".to_string(), 1)?;
    table.insert("beta".to_string(), 2)?;
    table.insert("gamma".to_string(), 3)?;

    assert_eq!(table.get("beta"), Some(&2));
    assert_eq!(table.key_id("alpha"), Some(alpha));
    assert_eq!(table.key(alpha)?, "alpha");
    assert!(matches!(table.try_get("delta"), Err(SlotGraphError::KeyNotFound)));

    *table.get_mut("gamma").expect("gamma present") += 10;
    assert_eq!(table.dat(table.key_id("gamma").expect("gamma id"))?, &13);
    Ok(())
}

#[test]
fn cursor_and_iterator_agree_after_churn() -> Result<()> {
    let mut table: SlotTable<u64, u64> = SlotTable::new();
    for k in 0..200u64 {
        table.insert(k * 7919, k)?;
    }
    for k in (0..200u64).step_by(3) {
        assert!(table.remove(&(k * 7919)).is_some());
    }
    for k in 200..230u64 {
        table.insert(k * 7919, k)?;
    }

    let mut cursor = table.first_key_id();
    let mut via_cursor = Vec::new();
    while table.next_key_id(&mut cursor) {
        via_cursor.push(cursor.key_id().expect("cursor rests on a live id"));
    }
    assert!(cursor.key_id().is_none());
    let via_iter: Vec<_> = table.key_ids().collect();
    assert_eq!(via_cursor, via_iter);
    assert_eq!(via_iter.len(), table.len());
    assert!(via_iter.iter().all(|id| id.index() < table.max_key_ids()));

    let keys: Vec<u64> = table.keys().copied().collect();
    let from_ids: Vec<u64> = via_iter
        .iter()
        .map(|&id| table.key(id).copied())
        .collect::<Result<_>>()?;
    assert_eq!(keys, from_ids);
    Ok(())
}

#[test]
fn metrics_observe_churn_and_sampling() -> Result<()> {
    let metrics = Arc::new(CounterMetrics::default());
    let opts = TableOptions::new().initial_buckets(4).metrics(metrics.clone());
    let mut table: SlotTable<i64, ()> = SlotTable::with_options(opts);
    for k in 0..64 {
        table.insert(k, ())?;
    }
    table.insert(5, ())?;
    for k in 0..60 {
        table.remove(&k);
    }

    assert_eq!(metrics.inserts.load(Ordering::Relaxed), 64);
    assert_eq!(metrics.overwrites.load(Ordering::Relaxed), 1);
    assert_eq!(metrics.deletes.load(Ordering::Relaxed), 60);
    assert!(metrics.rehashes.load(Ordering::Relaxed) >= 2);
    assert!(table.bucket_count() >= 64);

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..10 {
        let id = table.random_key_id(&mut rng, 0.5).expect("table not empty");
        assert!(*table.key(id)? >= 60);
    }
    assert_eq!(metrics.scan_samples.load(Ordering::Relaxed), 10);
    assert_eq!(metrics.rejection_samples.load(Ordering::Relaxed), 0);
    Ok(())
}

#[test]
fn key_id_limit_is_enforced_until_a_slot_frees() -> Result<()> {
    let mut table: SlotTable<u32, u32> =
        SlotTable::with_options(TableOptions::new().key_id_limit(3));
    for k in 0..3 {
        table.insert(k, k)?;
    }
    let err = table.insert(3, 3).unwrap_err();
    assert!(matches!(err, SlotGraphError::CapacityExceeded { limit: 3 }));
    assert_eq!(err.to_string(), "key id space exhausted (limit 3)");

    table.insert(1, 10)?;
    assert_eq!(table.remove(&0), Some(0));
    let recycled = table.insert(3, 3)?;
    assert_eq!(recycled.index(), 0);
    assert_eq!(table.len(), 3);
    Ok(())
}

#[test]
fn handles_from_before_clear_stay_invalid() -> Result<()> {
    let mut table: SlotTable<i32, &str> = SlotTable::new();
    let old = table.insert(1, "one")?;
    table.clear();
    let new = table.insert(2, "two")?;
    assert_eq!(old.index(), new.index());
    assert!(!table.is_key_id(old));
    assert!(matches!(table.key(old), Err(SlotGraphError::InvalidHandle(_))));
    assert_eq!(table.dat(new)?, &"two");
    Ok(())
}

#[test]
fn key_set_of_pairs() -> Result<()> {
    let mut set: KeySet<(NodeId, NodeId)> = KeySet::new();
    let first = set.add_key((NodeId(1), NodeId(2)))?;
    assert_eq!(set.add_key((NodeId(1), NodeId(2)))?, first);
    set.add_key((NodeId(2), NodeId(1)))?;
    assert_eq!(set.len(), 2);
    assert!(set.is_key(&(NodeId(2), NodeId(1))));
    assert!(set.del_key(&(NodeId(1), NodeId(2))));
    assert!(!set.del_key(&(NodeId(1), NodeId(2))));
    assert!(matches!(set.key(first), Err(SlotGraphError::InvalidHandle(_))));

    let copy = set.clone();
    assert_eq!(copy, set);
    set.clear();
    assert!(set.is_empty());
    assert_eq!(copy.len(), 1);
    Ok(())
}

#[test]
fn clone_is_independent() -> Result<()> {
    let mut table: SlotTable<i32, i32> = SlotTable::new();
    for k in 0..10 {
        table.insert(k, k * k)?;
    }
    let mut copy = table.clone();
    assert_eq!(copy, table);
    copy.insert(3, 0)?;
    copy.remove(&4);
    assert_ne!(copy, table);
    assert_eq!(table.get(&3), Some(&9));
    assert_eq!(table.get(&4), Some(&16));
    Ok(())
}
