//! Walks over the links of an arena tree.
//!
//! Only [`find`] looks at keys, through the accessor and comparator its
//! caller passes in. Everything else follows `p`/`l`/`r` links alone, so the
//! walks that climb ([`next`], [`path_to_root`]) trust the parent links.

use std::iter::successors;

use crate::types::Node;

/// Leftmost node under `root`.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    successors(root, |&i| arena[i as usize].l()).last()
}

/// In-order successor of `node`.
pub fn next<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(r) = arena[node as usize].r() {
        return first(arena, Some(r));
    }
    // The successor is the first ancestor reached from its left side.
    let mut child = node;
    for parent in successors(arena[node as usize].p(), |&i| arena[i as usize].p()) {
        if arena[parent as usize].l() == Some(child) {
            return Some(parent);
        }
        child = parent;
    }
    None
}

/// Indices in key order, starting from the leftmost node under `root`.
///
/// The walk climbs through parent links, so `root` must be the tree root for
/// it to stop at the last node of the tree.
pub fn in_order<N: Node>(arena: &[N], root: Option<u32>) -> impl Iterator<Item = u32> + '_ {
    successors(first(arena, root), move |&i| next(arena, i))
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |i| {
        let n = &arena[i as usize];
        1 + size(arena, n.l()) + size(arena, n.r())
    })
}

/// `[node, parent, grandparent, …, root]`.
pub fn path_to_root<N: Node>(arena: &[N], node: u32) -> Vec<u32> {
    successors(Some(node), |&i| arena[i as usize].p()).collect()
}

/// Descends from `root` to the node whose key compares equal to `key`.
pub fn find<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let n = &arena[i as usize];
        curr = match comparator(key, key_of(n)) {
            0 => return Some(i),
            c if c < 0 => n.l(),
            _ => n.r(),
        };
    }
    None
}
