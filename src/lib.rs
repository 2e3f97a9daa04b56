//! An arena-backed AVL tree.
//!
//! `AvlTree` keeps its nodes in an `Arena` and links them by `NodeId`, with every node also
//! holding the id of its parent. Values are ordered by a `Comparator`, which may refuse to order
//! some values (`f64::NAN` under `Partial`); such values are rejected with `Error::InvalidInput`.

pub mod arena;
pub mod avl_tree;
pub mod comparator;
mod error;

pub use self::arena::NodeId;
pub use self::avl_tree::AvlTree;
pub use self::error::{Error, Result};
