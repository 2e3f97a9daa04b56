use crate::arena::{Arena, NodeId};
use crate::avl_tree::traversal::{self, Inorder, LevelOrder, Postorder, Preorder};
use std::cmp;
use std::fmt;
use std::ptr;

/// A struct representing an internal node of an avl tree.
///
/// Children are owned through their ids; `parent` is a back-reference only.
pub struct Node<T> {
    pub value: T,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
    pub height: usize,
}

impl<T> Node<T> {
    pub fn new(value: T, parent: Option<NodeId>) -> Self {
        Node {
            value,
            left: None,
            right: None,
            parent,
            height: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

// An absent subtree sits one level below a leaf.
pub fn height<T>(arena: &Arena<Node<T>>, id: Option<NodeId>) -> isize {
    match id {
        None => -1,
        Some(id) => arena[id].height as isize,
    }
}

pub fn balance_factor<T>(arena: &Arena<Node<T>>, id: NodeId) -> isize {
    let node = &arena[id];
    height(arena, node.left) - height(arena, node.right)
}

pub fn update_height<T>(arena: &mut Arena<Node<T>>, id: NodeId) {
    let new_height = {
        let node = &arena[id];
        cmp::max(height(arena, node.left), height(arena, node.right)) + 1
    };
    arena[id].height = new_height as usize;
}

/// A read-only handle to a node of an `AvlTree`.
///
/// Handles borrow the tree, so they cannot outlive a mutation. They are cheap to copy; any
/// handle can serve as the starting point of a traversal over its subtree.
pub struct NodeRef<'a, T> {
    arena: &'a Arena<Node<T>>,
    id: NodeId,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(arena: &'a Arena<Node<T>>, id: NodeId) -> Self {
        NodeRef { arena, id }
    }

    pub(crate) fn arena(&self) -> &'a Arena<Node<T>> {
        self.arena
    }

    fn node(&self) -> &'a Node<T> {
        &self.arena[self.id]
    }

    fn wrap(&self, id: Option<NodeId>) -> Option<NodeRef<'a, T>> {
        id.map(|id| NodeRef::new(self.arena, id))
    }

    /// Returns the arena id of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the value stored in this node.
    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    /// Returns the root of the left subtree, holding values that sort before this one.
    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.wrap(self.node().left)
    }

    /// Returns the root of the right subtree.
    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.wrap(self.node().right)
    }

    /// Returns the node holding this one as a child, or `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.wrap(self.node().parent)
    }

    /// Returns the cached length of the longest downward path to a leaf. Leaves have height 0.
    pub fn height(&self) -> usize {
        self.node().height
    }

    /// Returns the height of the left subtree minus the height of the right subtree, where an
    /// absent subtree has height -1.
    pub fn balance_factor(&self) -> isize {
        balance_factor(self.arena, self.id)
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    /// Returns `true` if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// Returns the number of nodes from the root down to and including this node. The root is at
    /// level 1. Walks parent links, so it takes time proportional to the depth.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(2).unwrap().add(1).unwrap();
    /// assert_eq!(tree.root().unwrap().level(), 1);
    /// assert_eq!(tree.find(&1).unwrap().unwrap().level(), 2);
    /// ```
    pub fn level(&self) -> usize {
        let mut level = 1;
        let mut curr = self.node().parent;
        while let Some(id) = curr {
            level += 1;
            curr = self.arena[id].parent;
        }
        level
    }

    /// Returns `true` if this node lies strictly below `other`. Walks parent links from this node,
    /// so it takes time proportional to the depth.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(2).unwrap().add(1).unwrap();
    /// let root = tree.root().unwrap();
    /// let leaf = tree.find(&1).unwrap().unwrap();
    /// assert!(leaf.is_descendant_of(&root));
    /// assert!(!root.is_descendant_of(&leaf));
    /// ```
    pub fn is_descendant_of(&self, other: &NodeRef<'a, T>) -> bool {
        if !ptr::eq(self.arena, other.arena) {
            return false;
        }
        let mut curr = self.node().parent;
        while let Some(id) = curr {
            if id == other.id {
                return true;
            }
            curr = self.arena[id].parent;
        }
        false
    }

    /// Computes the height of this subtree by visiting every node in it, ignoring cached
    /// heights.
    pub fn recompute_height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.id, 0)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.arena[id];
            max_depth = cmp::max(max_depth, depth);
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
        }
        max_depth
    }

    /// Returns the number of nodes in this subtree.
    pub fn subtree_len(&self) -> usize {
        self.preorder().count()
    }

    /// Returns an iterator over this subtree in pre-order (node, left, right).
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1).unwrap().add(2).unwrap().add(3).unwrap();
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.preorder().collect::<Vec<_>>(), vec![&2, &1, &3]);
    /// ```
    pub fn preorder(&self) -> Preorder<'a, T> {
        traversal::preorder(Some(*self))
    }

    /// Returns an iterator over this subtree in ascending order.
    pub fn inorder(&self) -> Inorder<'a, T> {
        traversal::inorder(Some(*self))
    }

    /// Returns an iterator over this subtree in post-order (left, right, node).
    pub fn postorder(&self) -> Postorder<'a, T> {
        traversal::postorder(Some(*self))
    }

    /// Returns an iterator over this subtree level by level.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// for value in 1..=7 {
    ///     tree.add(value).unwrap();
    /// }
    /// let right = tree.root().unwrap().right().unwrap();
    /// assert_eq!(right.level_order().collect::<Vec<_>>(), vec![&6, &5, &7]);
    /// ```
    pub fn level_order(&self) -> LevelOrder<'a, T> {
        traversal::level_order(Some(*self))
    }
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> PartialEq for NodeRef<'a, T> {
    fn eq(&self, other: &NodeRef<'a, T>) -> bool {
        ptr::eq(self.arena, other.arena) && self.id == other.id
    }
}

impl<'a, T> Eq for NodeRef<'a, T> {}

impl<'a, T> fmt::Debug for NodeRef<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", self.value())
            .field("height", &self.height())
            .field("balance_factor", &self.balance_factor())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{balance_factor, height, update_height, Node, NodeRef};
    use crate::arena::{Arena, NodeId};

    // 3 -> 2 -> 1 down the left spine
    fn chain() -> (Arena<Node<u32>>, [NodeId; 3]) {
        let mut arena = Arena::new();
        let top = arena.allocate(Node::new(3, None));
        let mid = arena.allocate(Node::new(2, Some(top)));
        let low = arena.allocate(Node::new(1, Some(mid)));
        arena[top].left = Some(mid);
        arena[mid].left = Some(low);
        update_height(&mut arena, mid);
        update_height(&mut arena, top);
        (arena, [top, mid, low])
    }

    #[test]
    fn test_height_of_absent_subtree() {
        let arena: Arena<Node<u32>> = Arena::new();
        assert_eq!(height(&arena, None), -1);
    }

    #[test]
    fn test_update_height_and_balance() {
        let (arena, [top, mid, low]) = chain();
        assert_eq!(arena[top].height, 2);
        assert_eq!(arena[mid].height, 1);
        assert_eq!(arena[low].height, 0);
        assert_eq!(balance_factor(&arena, top), 2);
        assert_eq!(balance_factor(&arena, mid), 1);
        assert_eq!(balance_factor(&arena, low), 0);
    }

    #[test]
    fn test_node_ref_accessors() {
        let (arena, [top, mid, low]) = chain();
        let root = NodeRef::new(&arena, top);
        let leaf = NodeRef::new(&arena, low);

        assert!(root.is_root());
        assert!(leaf.is_leaf());
        assert_eq!(leaf.level(), 3);
        assert_eq!(leaf.parent().map(|node| node.id()), Some(mid));
        assert_eq!(root.left().and_then(|node| node.left()), Some(leaf));
        assert!(root.right().is_none());
        assert!(leaf.is_descendant_of(&root));
        assert!(!root.is_descendant_of(&leaf));
        assert!(!root.is_descendant_of(&root));
        assert_eq!(root.recompute_height(), 2);
        assert_eq!(root.subtree_len(), 3);
    }
}
