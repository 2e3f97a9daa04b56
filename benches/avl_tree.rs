use avl_collections::avl_tree::AvlTree;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 1000;

fn keys() -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(1);
    (0..NUM_OF_OPERATIONS).map(|_| rng.gen::<u32>()).collect()
}

fn bench_btreeset_insert(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("bench btreeset insert", |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for key in &keys {
                set.insert(*key);
            }
            set
        })
    });
}

fn bench_avl_tree_add(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("bench avl_tree add", |b| {
        b.iter(|| {
            let mut tree = AvlTree::new();
            for key in &keys {
                tree.add(*key).unwrap();
            }
            tree
        })
    });
}

fn bench_avl_tree_add_ascending(c: &mut Criterion) {
    c.bench_function("bench avl_tree add ascending", |b| {
        b.iter(|| {
            let mut tree = AvlTree::with_capacity(NUM_OF_OPERATIONS);
            for key in 0..NUM_OF_OPERATIONS {
                tree.add(key).unwrap();
            }
            tree
        })
    });
}

fn bench_btreeset_contains(c: &mut Criterion) {
    let keys = keys();
    let set: BTreeSet<u32> = keys.iter().cloned().collect();
    c.bench_function("bench btreeset contains", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(set.contains(key));
            }
        })
    });
}

fn bench_avl_tree_contains(c: &mut Criterion) {
    let keys = keys();
    let mut tree = AvlTree::new();
    for key in &keys {
        tree.add(*key).unwrap();
    }
    c.bench_function("bench avl_tree contains", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(tree.contains(key).unwrap());
            }
        })
    });
}

fn bench_avl_tree_remove(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("bench avl_tree remove", |b| {
        b.iter(|| {
            let mut tree = AvlTree::new();
            for key in &keys {
                tree.add(*key).unwrap();
            }
            for key in &keys {
                black_box(tree.remove(key).unwrap());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_btreeset_insert,
    bench_avl_tree_add,
    bench_avl_tree_add_ascending,
    bench_btreeset_contains,
    bench_avl_tree_contains,
    bench_avl_tree_remove,
);
criterion_main!(benches);
