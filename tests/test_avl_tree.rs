use avl_collections::avl_tree::AvlTree;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

const NUM_OF_OPERATIONS: usize = 20_000;
const KEY_RANGE: u32 = 500;

#[test]
fn test_random_operations_match_btreemap() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut tree = AvlTree::new();
    let mut expected: BTreeMap<u32, usize> = BTreeMap::new();
    let mut adds = 0;
    let mut removals = 0;

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0..KEY_RANGE);
        if rng.gen_bool(0.55) {
            tree.add(key).unwrap();
            *expected.entry(key).or_insert(0) += 1;
            adds += 1;
        } else {
            let present = expected.get(&key).copied().unwrap_or(0) > 0;
            assert_eq!(tree.remove(&key), Ok(present));
            if present {
                *expected.get_mut(&key).unwrap() -= 1;
                removals += 1;
            }
        }

        tree.assert_invariants();
        assert_eq!(tree.len(), adds - removals);
        let in_expected = expected.get(&key).copied().unwrap_or(0) > 0;
        assert_eq!(tree.contains(&key), Ok(in_expected));
    }

    let expected_values: Vec<u32> = expected
        .iter()
        .flat_map(|(key, count)| std::iter::repeat(*key).take(*count))
        .collect();
    assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), expected_values);
}

#[test]
fn test_ascending_insertions_stay_logarithmic() {
    let mut tree = AvlTree::new();
    for value in 1..=1000u32 {
        tree.add(value).unwrap();
    }
    tree.assert_invariants();

    let height = tree.height().unwrap() as f64;
    assert!(height <= 1.44 * 1001f64.log2(), "height {} is too large", height);
    assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), (1..=1000).collect::<Vec<u32>>());
}

#[test]
fn test_descending_insertions_stay_logarithmic() {
    let mut tree = AvlTree::new();
    for value in (1..=1000u32).rev() {
        tree.add(value).unwrap();
    }
    tree.assert_invariants();
    assert!(tree.height().unwrap() as f64 <= 1.44 * 1001f64.log2());
}

#[test]
fn test_remove_everything_in_random_order() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut values: Vec<u32> = (0..2000).collect();
    values.shuffle(&mut rng);

    let mut tree = AvlTree::with_capacity(values.len());
    for value in &values {
        tree.add(*value).unwrap();
    }

    values.shuffle(&mut rng);
    for (removed, value) in values.iter().enumerate() {
        assert_eq!(tree.remove(value), Ok(true));
        assert_eq!(tree.contains(value), Ok(false));
        assert_eq!(tree.len(), values.len() - removed - 1);
        if removed % 50 == 0 {
            tree.assert_invariants();
        }
    }
    tree.assert_invariants();
    assert!(tree.is_empty());
    assert!(tree.root().is_none());
}

#[test]
fn test_add_remove_round_trip() {
    let mut tree = AvlTree::new();
    for value in &[10, 5, 15, 3, 7] {
        tree.add(*value).unwrap();
    }
    let before: Vec<i32> = tree.root().unwrap().preorder().cloned().collect();

    // 20 lands under 15 without triggering a rotation
    tree.add(20).unwrap();
    assert_eq!(tree.contains(&20), Ok(true));
    assert_eq!(tree.remove(&20), Ok(true));
    assert_eq!(tree.contains(&20), Ok(false));

    let after: Vec<i32> = tree.root().unwrap().preorder().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn test_levels_and_parents() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut tree = AvlTree::new();
    for _ in 0..300 {
        tree.add(rng.gen_range(0..100u32)).unwrap();
    }

    let root = tree.root().unwrap();
    let mut stack = vec![(root, 1)];
    while let Some((node, level)) = stack.pop() {
        assert_eq!(node.level(), level);
        assert_eq!(node.height(), node.recompute_height());
        assert!(node.balance_factor().abs() <= 1);
        if node != root {
            assert!(node.is_descendant_of(&root));
        }
        for child in node.left().into_iter().chain(node.right()) {
            assert_eq!(child.parent(), Some(node));
            stack.push((child, level + 1));
        }
    }
    assert_eq!(root.subtree_len(), tree.len());
}
