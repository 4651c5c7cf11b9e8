//! Height-tracking AVL primitives over an index arena.

pub mod types;
pub mod util;

pub use types::{AvlNodeLike, MemberNode};
pub use util::{assert_avl_tree, balance_factor, height_of, rebalance, rotate_left, rotate_right};
