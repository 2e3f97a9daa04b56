//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one.

mod node;
pub mod traversal;
mod tree;

pub use self::node::NodeRef;
pub use self::traversal::{Inorder, LevelOrder, Postorder, Preorder};
pub use self::tree::AvlTree;
