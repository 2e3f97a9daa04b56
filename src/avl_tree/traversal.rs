//! Lazy traversals over any subtree of an `AvlTree`.
//!
//! Every traversal starts from an optional `NodeRef`, so it can walk the whole tree (via
//! `AvlTree::root`) or any subtree below it. Traversals never recurse; deep trees only grow an
//! explicit stack or queue. The iterators are `Clone`, and starting a fresh traversal from the
//! same `NodeRef` restarts the sequence.

use crate::arena::{Arena, NodeId};
use crate::avl_tree::node::{Node, NodeRef};
use std::collections::VecDeque;

fn arena_of<'a, T>(start: &Option<NodeRef<'a, T>>) -> Option<&'a Arena<Node<T>>> {
    start.as_ref().map(|node| node.arena())
}

/// An iterator yielding values in pre-order (node, left, right).
pub struct Preorder<'a, T> {
    arena: Option<&'a Arena<Node<T>>>,
    stack: Vec<NodeId>,
}

/// Returns a pre-order iterator over the subtree rooted at `start`.
pub fn preorder<'a, T>(start: Option<NodeRef<'a, T>>) -> Preorder<'a, T> {
    Preorder {
        arena: arena_of(&start),
        stack: start.map(|node| node.id()).into_iter().collect(),
    }
}

impl<'a, T> Iterator for Preorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena?;
        let node = &arena[self.stack.pop()?];
        if let Some(right) = node.right {
            self.stack.push(right);
        }
        if let Some(left) = node.left {
            self.stack.push(left);
        }
        Some(&node.value)
    }
}

impl<'a, T> Clone for Preorder<'a, T> {
    fn clone(&self) -> Self {
        Preorder {
            arena: self.arena,
            stack: self.stack.clone(),
        }
    }
}

/// An iterator yielding values in in-order (left, node, right), which is ascending comparator
/// order.
pub struct Inorder<'a, T> {
    arena: Option<&'a Arena<Node<T>>>,
    curr: Option<NodeId>,
    stack: Vec<NodeId>,
}

/// Returns an in-order iterator over the subtree rooted at `start`.
pub fn inorder<'a, T>(start: Option<NodeRef<'a, T>>) -> Inorder<'a, T> {
    Inorder {
        arena: arena_of(&start),
        curr: start.map(|node| node.id()),
        stack: Vec::new(),
    }
}

impl<'a, T> Iterator for Inorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena?;
        while let Some(id) = self.curr {
            self.stack.push(id);
            self.curr = arena[id].left;
        }
        let node = &arena[self.stack.pop()?];
        self.curr = node.right;
        Some(&node.value)
    }
}

impl<'a, T> Clone for Inorder<'a, T> {
    fn clone(&self) -> Self {
        Inorder {
            arena: self.arena,
            curr: self.curr,
            stack: self.stack.clone(),
        }
    }
}

/// An iterator yielding values in post-order (left, right, node).
pub struct Postorder<'a, T> {
    arena: Option<&'a Arena<Node<T>>>,
    // The flag records whether the node's children have already been pushed.
    stack: Vec<(NodeId, bool)>,
}

/// Returns a post-order iterator over the subtree rooted at `start`.
pub fn postorder<'a, T>(start: Option<NodeRef<'a, T>>) -> Postorder<'a, T> {
    Postorder {
        arena: arena_of(&start),
        stack: start.map(|node| (node.id(), false)).into_iter().collect(),
    }
}

impl<'a, T> Iterator for Postorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena?;
        while let Some((id, expanded)) = self.stack.pop() {
            let node = &arena[id];
            if expanded {
                return Some(&node.value);
            }
            self.stack.push((id, true));
            if let Some(right) = node.right {
                self.stack.push((right, false));
            }
            if let Some(left) = node.left {
                self.stack.push((left, false));
            }
        }
        None
    }
}

impl<'a, T> Clone for Postorder<'a, T> {
    fn clone(&self) -> Self {
        Postorder {
            arena: self.arena,
            stack: self.stack.clone(),
        }
    }
}

/// An iterator yielding values level by level, left to right within a level.
pub struct LevelOrder<'a, T> {
    arena: Option<&'a Arena<Node<T>>>,
    queue: VecDeque<NodeId>,
}

/// Returns a level-order iterator over the subtree rooted at `start`.
pub fn level_order<'a, T>(start: Option<NodeRef<'a, T>>) -> LevelOrder<'a, T> {
    LevelOrder {
        arena: arena_of(&start),
        queue: start.map(|node| node.id()).into_iter().collect(),
    }
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena?;
        let node = &arena[self.queue.pop_front()?];
        if let Some(left) = node.left {
            self.queue.push_back(left);
        }
        if let Some(right) = node.right {
            self.queue.push_back(right);
        }
        Some(&node.value)
    }
}

impl<'a, T> Clone for LevelOrder<'a, T> {
    fn clone(&self) -> Self {
        LevelOrder {
            arena: self.arena,
            queue: self.queue.clone(),
        }
    }
}

/// Calls `visit` on every value of the subtree rooted at `start` in pre-order.
pub fn visit_preorder<T, F>(start: Option<NodeRef<T>>, visit: F)
where
    F: FnMut(&T),
{
    preorder(start).for_each(visit);
}

/// Calls `visit` on every value of the subtree rooted at `start` in ascending order.
///
/// # Examples
///
/// ```
/// use avl_collections::avl_tree::{traversal, AvlTree};
///
/// let mut tree = AvlTree::new();
/// for value in &[5, 1, 4, 2, 3] {
///     tree.add(*value).unwrap();
/// }
///
/// let mut seen = Vec::new();
/// traversal::visit_inorder(tree.root(), |value| seen.push(*value));
/// assert_eq!(seen, vec![1, 2, 3, 4, 5]);
/// ```
pub fn visit_inorder<T, F>(start: Option<NodeRef<T>>, visit: F)
where
    F: FnMut(&T),
{
    inorder(start).for_each(visit);
}

/// Calls `visit` on every value of the subtree rooted at `start` in post-order.
pub fn visit_postorder<T, F>(start: Option<NodeRef<T>>, visit: F)
where
    F: FnMut(&T),
{
    postorder(start).for_each(visit);
}

/// Calls `visit` on every value of the subtree rooted at `start` level by level.
pub fn visit_level_order<T, F>(start: Option<NodeRef<T>>, visit: F)
where
    F: FnMut(&T),
{
    level_order(start).for_each(visit);
}

#[cfg(test)]
mod tests {
    use super::{inorder, level_order, postorder, preorder, visit_postorder, visit_preorder};
    use crate::avl_tree::AvlTree;

    fn perfect_tree() -> AvlTree<u32> {
        let mut tree = AvlTree::new();
        for value in 1..=7 {
            tree.add(value).unwrap();
        }
        tree
    }

    #[test]
    fn test_empty_traversals() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert_eq!(preorder(tree.root()).next(), None);
        assert_eq!(inorder(tree.root()).next(), None);
        assert_eq!(postorder(tree.root()).next(), None);
        assert_eq!(level_order(tree.root()).next(), None);
    }

    #[test]
    fn test_preorder() {
        let tree = perfect_tree();
        assert_eq!(
            preorder(tree.root()).cloned().collect::<Vec<u32>>(),
            vec![4, 2, 1, 3, 6, 5, 7],
        );
    }

    #[test]
    fn test_inorder() {
        let tree = perfect_tree();
        assert_eq!(
            inorder(tree.root()).cloned().collect::<Vec<u32>>(),
            vec![1, 2, 3, 4, 5, 6, 7],
        );
    }

    #[test]
    fn test_postorder() {
        let tree = perfect_tree();
        assert_eq!(
            postorder(tree.root()).cloned().collect::<Vec<u32>>(),
            vec![1, 3, 2, 5, 7, 6, 4],
        );
    }

    #[test]
    fn test_level_order() {
        let tree = perfect_tree();
        assert_eq!(
            level_order(tree.root()).cloned().collect::<Vec<u32>>(),
            vec![4, 2, 6, 1, 3, 5, 7],
        );
    }

    #[test]
    fn test_subtree_traversal() {
        let tree = perfect_tree();
        let right = tree.root().and_then(|root| root.right());
        assert_eq!(inorder(right).cloned().collect::<Vec<u32>>(), vec![5, 6, 7]);
        assert_eq!(level_order(right).cloned().collect::<Vec<u32>>(), vec![6, 5, 7]);
    }

    #[test]
    fn test_restart_and_clone() {
        let tree = perfect_tree();
        let mut iter = inorder(tree.root());
        iter.next();
        let rest = iter.clone().cloned().collect::<Vec<u32>>();
        assert_eq!(rest, vec![2, 3, 4, 5, 6, 7]);
        assert_eq!(iter.count(), 6);
        assert_eq!(inorder(tree.root()).count(), 7);
    }

    #[test]
    fn test_visitors() {
        let tree = perfect_tree();
        let mut pre = Vec::new();
        visit_preorder(tree.root(), |value| pre.push(*value));
        let mut post = Vec::new();
        visit_postorder(tree.root(), |value| post.push(*value));
        assert_eq!(pre, vec![4, 2, 1, 3, 6, 5, 7]);
        assert_eq!(post, vec![1, 3, 2, 5, 7, 6, 4]);
    }
}
