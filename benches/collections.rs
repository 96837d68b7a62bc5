#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::{HashMap, VecDeque};

use chainmap::{ChainedHashMap, LinkedDeque};
use criterion::{Criterion, criterion_group, criterion_main};
use proptest::{
    collection::vec,
    prelude::{Strategy, any},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const DEQUE_ITEMS: u32 = 10_000;
const SAMPLE_SIZE: usize = 10;

fn hash_map_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items =
        vec(any::<(String, String)>(), ITEMS_AMOUNT).new_tree(&mut runner).unwrap().current();

    let mut group = c.benchmark_group("Hash map comparison benchmark");
    group.sample_size(SAMPLE_SIZE);
    let mut chained_map = ChainedHashMap::new();
    let mut rust_map = HashMap::new();
    group.bench_function("chained put", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                chained_map.put(key, value);
            }
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                rust_map.insert(key, value);
            }
        });
    });
    group.bench_function("chained get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = chained_map.get(key);
            }
        });
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = rust_map.get(key);
            }
        });
    });
    group.finish();
}

fn deque_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("Deque comparison benchmark");
    group.sample_size(SAMPLE_SIZE);
    group.bench_function("linked push/pop both ends", |b| {
        b.iter(|| {
            let mut deque = LinkedDeque::new();
            for i in 0..DEQUE_ITEMS {
                deque.add_first(i);
                deque.add_last(i);
            }
            while deque.remove_first().is_some() {
                deque.remove_last();
            }
        });
    });
    group.bench_function("std VecDeque push/pop both ends", |b| {
        b.iter(|| {
            let mut deque = VecDeque::new();
            for i in 0..DEQUE_ITEMS {
                deque.push_front(i);
                deque.push_back(i);
            }
            while deque.pop_front().is_some() {
                deque.pop_back();
            }
        });
    });

    let linked: LinkedDeque<u32> = (0..DEQUE_ITEMS).collect();
    group.bench_function("linked get vs get_recursive", |b| {
        b.iter(|| {
            for i in (0..DEQUE_ITEMS as usize).step_by(500) {
                assert_eq!(linked.get(i), linked.get_recursive(i));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, hash_map_benches, deque_benches);

criterion_main!(benches);
