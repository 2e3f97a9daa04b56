use crate::arena::{Arena, NodeId};
use crate::avl_tree::node::{self, Node, NodeRef};
use crate::avl_tree::traversal::{self, Inorder};
use crate::comparator::{Comparator, Natural};
use crate::error::{Error, Result};
use log::{debug, trace};
use std::cmp::Ordering;
use std::fmt;
use std::mem;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Retrace {
    Insert,
    Remove,
}

/// An ordered multiset implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Nodes live in an arena and
/// are linked by id, with each node also pointing back at its parent. Values are ordered by a
/// `Comparator`; equal values are kept as distinct nodes.
///
/// # Examples
///
/// ```
/// use avl_collections::avl_tree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.add(0).unwrap().add(3).unwrap().add(3).unwrap();
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.contains(&3), Ok(true));
/// assert_eq!(tree.min(), Some(&0));
///
/// assert_eq!(tree.remove(&3), Ok(true));
/// assert_eq!(tree.remove(&1), Ok(false));
/// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&0, &3]);
/// ```
pub struct AvlTree<T, C = Natural> {
    arena: Arena<Node<T>>,
    root: Option<NodeId>,
    len: usize,
    comparator: C,
}

impl<T> AvlTree<T, Natural>
where
    T: Ord,
{
    /// Constructs a new, empty `AvlTree<T>` ordered by `T`'s natural order.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = AvlTree::new();
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Constructs a new, empty `AvlTree<T>` with room for `capacity` nodes before its arena
    /// reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<T, C> AvlTree<T, C>
where
    C: Comparator<T>,
{
    /// Constructs a new, empty tree ordered by `comparator`. The comparator is fixed for the
    /// lifetime of the tree.
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity_and_comparator(0, comparator)
    }

    /// Constructs a new, empty tree ordered by `comparator` with room for `capacity` nodes
    /// before its arena reallocates.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    /// use avl_collections::comparator::Partial;
    ///
    /// let mut tree = AvlTree::with_capacity_and_comparator(16, Partial);
    /// tree.add(0.5).unwrap();
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        AvlTree {
            arena: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            comparator,
        }
    }

    fn validate(&self, value: &T) -> Result<()> {
        if self.comparator.is_comparable(value) {
            Ok(())
        } else {
            Err(Error::InvalidInput)
        }
    }

    fn compare(&self, a: &T, b: &T) -> Result<Ordering> {
        self.comparator.compare(a, b).ok_or(Error::InvalidInput)
    }

    /// Inserts a value into the tree. Values equal to ones already present are inserted as new
    /// nodes. Returns the tree so that insertions can be chained.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the comparator cannot order `value`. The tree is left
    /// untouched.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1).unwrap().add(1).unwrap();
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn add(&mut self, value: T) -> Result<&mut Self> {
        self.validate(&value)?;

        let mut parent = None;
        let mut is_left = false;
        let mut curr = self.root;
        while let Some(id) = curr {
            let node = &self.arena[id];
            is_left = self.compare(&value, &node.value)? == Ordering::Less;
            parent = Some(id);
            curr = if is_left { node.left } else { node.right };
        }

        let id = self.arena.allocate(Node::new(value, parent));
        match parent {
            None => self.root = Some(id),
            Some(parent) if is_left => self.arena[parent].left = Some(id),
            Some(parent) => self.arena[parent].right = Some(id),
        }
        self.len += 1;
        self.retrace(parent, Retrace::Insert);
        Ok(self)
    }

    /// Removes one node holding a value equal to `value`. Returns `Ok(false)` if there is no such
    /// node.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the comparator cannot order `value`.
    pub fn remove(&mut self, value: &T) -> Result<bool> {
        self.take(value).map(|removed| removed.is_some())
    }

    /// Removes one node holding a value equal to `value` and returns the stored value, or
    /// `Ok(None)` if there is no such node.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1).unwrap();
    /// assert_eq!(tree.take(&1), Ok(Some(1)));
    /// assert_eq!(tree.take(&1), Ok(None));
    /// ```
    pub fn take(&mut self, value: &T) -> Result<Option<T>> {
        self.validate(value)?;
        let mut target = match self.locate(value)? {
            Some(id) => id,
            None => return Ok(None),
        };

        // Sink the doomed value into a leaf by swapping it with its replacement at each step.
        loop {
            let replacement = {
                let node = &self.arena[target];
                match (node.left, node.right) {
                    (None, None) => break,
                    (Some(child), None) | (None, Some(child)) => child,
                    (Some(left), Some(right)) => {
                        if node::balance_factor(&self.arena, target) >= 0 {
                            self.rightmost(left)
                        } else {
                            self.leftmost(right)
                        }
                    }
                }
            };
            self.swap_values(target, replacement);
            target = replacement;
        }

        let removed = self.detach_leaf(target);
        debug!("removed {:?}, {} values remain", target, self.len);
        Ok(Some(removed))
    }

    /// Checks if a value equal to `value` exists in the tree. An empty tree never contains
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` on a non-empty tree if the comparator cannot order `value`.
    pub fn contains(&self, value: &T) -> Result<bool> {
        if self.root.is_none() {
            return Ok(false);
        }
        self.validate(value)?;
        Ok(self.locate(value)?.is_some())
    }

    /// Returns the first node on the search path holding a value equal to `value`.
    pub fn find(&self, value: &T) -> Result<Option<NodeRef<T>>> {
        self.validate(value)?;
        Ok(self.locate(value)?.map(|id| NodeRef::new(&self.arena, id)))
    }

    fn locate(&self, value: &T) -> Result<Option<NodeId>> {
        let mut curr = self.root;
        while let Some(id) = curr {
            let node = &self.arena[id];
            curr = match self.compare(value, &node.value)? {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Ok(Some(id)),
            };
        }
        Ok(None)
    }

    /// Returns a reference to the comparator ordering this tree.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Checks every structural invariant of the tree and panics with a description of the first
    /// violation found.
    ///
    /// Checked: in-order values are non-decreasing under the comparator, every balance factor is
    /// in `-1..=1`, every cached height matches the heights of the node's children, every
    /// non-root node is a child of its parent, and the number of reachable nodes equals `len()`.
    pub fn assert_invariants(&self) {
        let root = match self.root {
            Some(root) => root,
            None => {
                assert_eq!(self.len, 0, "empty tree reports {} values", self.len);
                assert!(self.arena.is_empty(), "empty tree still owns nodes");
                return;
            }
        };
        assert_eq!(self.arena[root].parent, None, "root {:?} has a parent", root);

        // Each entry carries the inclusive bounds its subtree must respect.
        let mut stack: Vec<(NodeId, Option<NodeId>, Option<NodeId>)> = vec![(root, None, None)];
        let mut reachable = 0;
        while let Some((id, lower, upper)) = stack.pop() {
            reachable += 1;
            let node = &self.arena[id];

            if let Some(lower) = lower {
                assert!(
                    self.comparator.compare(&self.arena[lower].value, &node.value)
                        != Some(Ordering::Greater),
                    "{:?} is out of order with ancestor {:?}",
                    id,
                    lower,
                );
            }
            if let Some(upper) = upper {
                assert!(
                    self.comparator.compare(&node.value, &self.arena[upper].value)
                        != Some(Ordering::Greater),
                    "{:?} is out of order with ancestor {:?}",
                    id,
                    upper,
                );
            }

            let left_height = node::height(&self.arena, node.left);
            let right_height = node::height(&self.arena, node.right);
            let expected = std::cmp::max(left_height, right_height) + 1;
            assert_eq!(node.height as isize, expected, "stale height at {:?}", id);
            let balance = left_height - right_height;
            assert!(balance.abs() <= 1, "{:?} has balance factor {}", id, balance);

            for child in node.left.iter().chain(node.right.iter()) {
                assert_eq!(
                    self.arena[*child].parent,
                    Some(id),
                    "{:?} does not point back at its parent {:?}",
                    child,
                    id,
                );
            }
            if let Some(left) = node.left {
                stack.push((left, lower, Some(id)));
            }
            if let Some(right) = node.right {
                stack.push((right, Some(id), upper));
            }
        }

        assert_eq!(reachable, self.len, "reachable nodes do not match len");
        assert_eq!(self.arena.len(), self.len, "arena holds unreachable nodes");
    }
}

impl<T, C> AvlTree<T, C> {
    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of values in the tree. Same as `len`.
    pub fn count(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the tree, removing all values.
    pub fn clear(&mut self) {
        debug!("clearing tree of {} values", self.len);
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns the root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<NodeRef<T>> {
        self.root.map(|id| NodeRef::new(&self.arena, id))
    }

    /// Returns the height of the tree, where a single node has height 0. Returns `None` if the
    /// tree is empty.
    pub fn height(&self) -> Option<usize> {
        self.root.map(|id| self.arena[id].height)
    }

    /// Returns the minimum value of the tree. Returns `None` if the tree is empty.
    pub fn min(&self) -> Option<&T> {
        self.root.map(|id| &self.arena[self.leftmost(id)].value)
    }

    /// Returns the maximum value of the tree. Returns `None` if the tree is empty.
    pub fn max(&self) -> Option<&T> {
        self.root.map(|id| &self.arena[self.rightmost(id)].value)
    }

    /// Returns an iterator over the tree. The iterator will yield values using in-order
    /// traversal.
    pub fn iter(&self) -> Inorder<T> {
        traversal::inorder(self.root())
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.arena[id].left {
            id = left;
        }
        id
    }

    fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.arena[id].right {
            id = right;
        }
        id
    }

    fn swap_values(&mut self, a: NodeId, b: NodeId) {
        match self.arena.get_pair_mut(a, b) {
            Some((x, y)) => mem::swap(&mut x.value, &mut y.value),
            None => debug_assert!(false, "cannot swap {:?} with {:?}", a, b),
        }
    }

    fn detach_leaf(&mut self, id: NodeId) -> T {
        debug_assert!(self.arena[id].is_leaf(), "{:?} is not a leaf", id);
        let parent = self.arena[id].parent;
        match parent {
            None => self.root = None,
            Some(parent) => {
                let parent_node = &mut self.arena[parent];
                if parent_node.left == Some(id) {
                    parent_node.left = None;
                } else {
                    parent_node.right = None;
                }
            }
        }
        self.len -= 1;
        let node = self.arena.free(id);
        self.retrace(parent, Retrace::Remove);
        node.value
    }

    // Walks from `start` to the root, refreshing heights and rotating where a node is out of
    // balance. An insertion is fully absorbed by the first rotation or by the first ancestor
    // whose height does not change; a removal may need rotations all the way up.
    fn retrace(&mut self, mut curr: Option<NodeId>, mode: Retrace) {
        while let Some(id) = curr {
            let old_height = self.arena[id].height;
            node::update_height(&mut self.arena, id);

            let balance = node::balance_factor(&self.arena, id);
            let subtree = if balance > 1 || balance < -1 {
                let subtree = self.rebalance(id, balance);
                if mode == Retrace::Insert {
                    return;
                }
                subtree
            } else {
                if mode == Retrace::Insert && self.arena[id].height == old_height {
                    return;
                }
                id
            };
            curr = self.arena[subtree].parent;
        }
    }

    // Returns the node now at the top of the rebalanced subtree.
    fn rebalance(&mut self, id: NodeId, balance: isize) -> NodeId {
        if balance > 1 {
            let left = match self.arena[id].left {
                Some(left) => left,
                None => {
                    debug_assert!(false, "{:?} is left-heavy without a left child", id);
                    return id;
                }
            };
            let child_balance = node::balance_factor(&self.arena, left);
            debug_assert!(child_balance.abs() <= 1);
            if child_balance < 0 {
                trace!("left-right rotation at {:?}", id);
                self.rotate_left(left);
            } else {
                trace!("left-left rotation at {:?}", id);
            }
            self.rotate_right(id)
        } else {
            let right = match self.arena[id].right {
                Some(right) => right,
                None => {
                    debug_assert!(false, "{:?} is right-heavy without a right child", id);
                    return id;
                }
            };
            let child_balance = node::balance_factor(&self.arena, right);
            debug_assert!(child_balance.abs() <= 1);
            if child_balance > 0 {
                trace!("right-left rotation at {:?}", id);
                self.rotate_right(right);
            } else {
                trace!("right-right rotation at {:?}", id);
            }
            self.rotate_left(id)
        }
    }

    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        match parent {
            None => self.root = Some(new),
            Some(parent) => {
                let parent_node = &mut self.arena[parent];
                if parent_node.left == Some(old) {
                    parent_node.left = Some(new);
                } else {
                    debug_assert_eq!(parent_node.right, Some(old));
                    parent_node.right = Some(new);
                }
            }
        }
    }

    // Lifts the left child of `id` into its place.
    fn rotate_right(&mut self, id: NodeId) -> NodeId {
        let child = match self.arena[id].left {
            Some(child) => child,
            None => {
                debug_assert!(false, "rotating {:?} right without a left child", id);
                return id;
            }
        };
        let parent = self.arena[id].parent;
        let inner = self.arena[child].right;

        self.arena[id].left = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(id);
        }
        self.arena[child].right = Some(id);
        self.arena[id].parent = Some(child);
        self.arena[child].parent = parent;
        self.replace_child(parent, id, child);

        node::update_height(&mut self.arena, id);
        node::update_height(&mut self.arena, child);
        child
    }

    // Lifts the right child of `id` into its place.
    fn rotate_left(&mut self, id: NodeId) -> NodeId {
        let child = match self.arena[id].right {
            Some(child) => child,
            None => {
                debug_assert!(false, "rotating {:?} left without a right child", id);
                return id;
            }
        };
        let parent = self.arena[id].parent;
        let inner = self.arena[child].left;

        self.arena[id].right = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(id);
        }
        self.arena[child].left = Some(id);
        self.arena[id].parent = Some(child);
        self.arena[child].parent = parent;
        self.replace_child(parent, id, child);

        node::update_height(&mut self.arena, id);
        node::update_height(&mut self.arena, child);
        child
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTree<T, C> {
    type Item = &'a T;
    type IntoIter = Inorder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> Default for AvlTree<T, C>
where
    C: Comparator<T> + Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> fmt::Debug for AvlTree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
