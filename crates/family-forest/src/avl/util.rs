use crate::util::in_order;

use super::types::AvlNodeLike;

#[inline]
fn set_p<N: AvlNodeLike>(arena: &mut [N], i: u32, v: Option<u32>) {
    arena[i as usize].set_p(v);
}

#[inline]
fn set_l<N: AvlNodeLike>(arena: &mut [N], i: u32, v: Option<u32>) {
    arena[i as usize].set_l(v);
}

#[inline]
fn set_r<N: AvlNodeLike>(arena: &mut [N], i: u32, v: Option<u32>) {
    arena[i as usize].set_r(v);
}

/// Stored height, `0` for an empty slot.
#[inline]
pub fn height_of<N: AvlNodeLike>(arena: &[N], node: Option<u32>) -> u32 {
    node.map_or(0, |i| arena[i as usize].height())
}

/// `height(left) - height(right)`, `0` for an empty slot.
pub fn balance_factor<N: AvlNodeLike>(arena: &[N], node: Option<u32>) -> i32 {
    let Some(i) = node else {
        return 0;
    };
    let n = &arena[i as usize];
    height_of(arena, n.l()) as i32 - height_of(arena, n.r()) as i32
}

/// Recomputes the stored height of `i` from its children.
pub fn update_height<N: AvlNodeLike>(arena: &mut [N], i: u32) {
    let n = &arena[i as usize];
    let h = 1 + height_of(arena, n.l()).max(height_of(arena, n.r()));
    arena[i as usize].set_height(h);
}

/// Promotes `y.l` over `y` and returns it as the new subtree root.
///
/// The former parent of `y` is not touched; the caller links the returned
/// index into whatever slot `y` occupied.
pub fn rotate_right<N: AvlNodeLike>(arena: &mut [N], y: u32) -> u32 {
    let x = arena[y as usize].l().expect("left child exists");
    let p = arena[y as usize].p();
    let t2 = arena[x as usize].r();

    set_r(arena, x, Some(y));
    set_l(arena, y, t2);
    set_p(arena, x, p);
    set_p(arena, y, Some(x));
    if let Some(t2) = t2 {
        set_p(arena, t2, Some(y));
    }

    update_height(arena, y);
    update_height(arena, x);
    x
}

/// Mirror of [`rotate_right`].
pub fn rotate_left<N: AvlNodeLike>(arena: &mut [N], x: u32) -> u32 {
    let y = arena[x as usize].r().expect("right child exists");
    let p = arena[x as usize].p();
    let t2 = arena[y as usize].l();

    set_l(arena, y, Some(x));
    set_r(arena, x, t2);
    set_p(arena, y, p);
    set_p(arena, x, Some(y));
    if let Some(t2) = t2 {
        set_p(arena, t2, Some(x));
    }

    update_height(arena, x);
    update_height(arena, y);
    y
}

/// Restores the AVL bound at `node` and returns the subtree root.
///
/// A child that is itself perfectly balanced takes the single rotation.
pub fn rebalance<N: AvlNodeLike>(arena: &mut [N], node: u32) -> u32 {
    update_height(arena, node);
    let balance = balance_factor(arena, Some(node));

    if balance > 1 {
        let l = arena[node as usize].l().expect("left child exists");
        if balance_factor(arena, Some(l)) < 0 {
            let l = rotate_left(arena, l);
            set_l(arena, node, Some(l));
        }
        return rotate_right(arena, node);
    }

    if balance < -1 {
        let r = arena[node as usize].r().expect("right child exists");
        if balance_factor(arena, Some(r)) > 0 {
            let r = rotate_right(arena, r);
            set_r(arena, node, Some(r));
        }
        return rotate_left(arena, node);
    }

    node
}

fn tree_height<N: AvlNodeLike>(arena: &[N], node: u32) -> u32 {
    let l = arena[node as usize]
        .l()
        .map(|i| tree_height(arena, i))
        .unwrap_or(0);
    let r = arena[node as usize]
        .r()
        .map(|i| tree_height(arena, i))
        .unwrap_or(0);
    1 + l.max(r)
}

/// Checks links, stored heights, the AVL bound and strict key order.
pub fn assert_avl_tree<K, N, F, C>(
    arena: &[N],
    root: Option<u32>,
    key_of: F,
    comparator: C,
) -> Result<(), String>
where
    N: AvlNodeLike,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if arena[root as usize].p().is_some() {
        return Err("Root has parent".to_string());
    }

    fn validate_links_and_height<N: AvlNodeLike>(arena: &[N], node: u32) -> Result<(), String> {
        let l = arena[node as usize].l();
        let r = arena[node as usize].r();

        if let Some(l) = l {
            if arena[l as usize].p() != Some(node) {
                return Err(format!("Broken parent link on left child of node {node}"));
            }
            validate_links_and_height(arena, l)?;
        }
        if let Some(r) = r {
            if arena[r as usize].p() != Some(node) {
                return Err(format!("Broken parent link on right child of node {node}"));
            }
            validate_links_and_height(arena, r)?;
        }

        let expected = tree_height(arena, node);
        let actual = arena[node as usize].height();
        if actual != expected {
            return Err(format!(
                "Height mismatch at node {node}: expected {expected}, got {actual}"
            ));
        }
        let bf = balance_factor(arena, Some(node));
        if !(-1..=1).contains(&bf) {
            return Err(format!("AVL balance violated at node {node}: bf={bf}"));
        }

        Ok(())
    }

    validate_links_and_height(arena, root)?;

    let mut prev_node: Option<u32> = None;
    for i in in_order(arena, Some(root)) {
        if let Some(prev) = prev_node {
            let cmp = comparator(key_of(&arena[prev as usize]), key_of(&arena[i as usize]));
            if cmp >= 0 {
                return Err("Node order violated".to_string());
            }
        }
        prev_node = Some(i);
    }

    Ok(())
}

/// Debug printer for AVL trees.
pub fn print<N, F>(arena: &[N], node: Option<u32>, tab: &str, label: &F) -> String
where
    N: AvlNodeLike,
    F: Fn(&N) -> String,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print(arena, n.l(), &format!("{tab}  "), label);
            let right = print(arena, n.r(), &format!("{tab}  "), label);
            format!(
                "Node[{i}] [h={}] {{ {} }}\n{tab}L={left}\n{tab}R={right}",
                n.height(),
                label(n)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::types::MemberNode;

    fn node(key: f64) -> MemberNode {
        MemberNode::new(format!("m{key}"), key)
    }

    fn key_cmp(a: &f64, b: &f64) -> i32 {
        a.partial_cmp(b).map_or(0, |o| o as i32)
    }

    /// 30 <- 20 <- 10, a left-left chain rooted at index 0.
    fn left_chain() -> Vec<MemberNode> {
        let mut arena = vec![node(30.0), node(20.0), node(10.0)];
        arena[0].l = Some(1);
        arena[1].p = Some(0);
        arena[1].l = Some(2);
        arena[2].p = Some(1);
        update_height(&mut arena, 2);
        update_height(&mut arena, 1);
        update_height(&mut arena, 0);
        arena
    }

    #[test]
    fn heights_and_balance_of_chain() {
        let arena = left_chain();
        assert_eq!(height_of(&arena, Some(0)), 3);
        assert_eq!(height_of(&arena, None), 0);
        assert_eq!(balance_factor(&arena, Some(0)), 2);
        assert_eq!(balance_factor(&arena, Some(2)), 0);
    }

    #[test]
    fn rebalance_left_left_rotates_right() {
        let mut arena = left_chain();
        let root = rebalance(&mut arena, 0);
        assert_eq!(root, 1);
        assert_eq!(arena[1].p, None);
        assert_eq!(arena[1].l, Some(2));
        assert_eq!(arena[1].r, Some(0));
        assert_eq!(arena[0].p, Some(1));
        assert_eq!(arena[2].p, Some(1));
        assert_eq!(arena[1].height, 2);
        assert_avl_tree(&arena, Some(root), |n: &MemberNode| &n.key, key_cmp).unwrap();
    }

    #[test]
    fn rebalance_left_right_takes_double_rotation() {
        // 30 <- 10 -> 20
        let mut arena = vec![node(30.0), node(10.0), node(20.0)];
        arena[0].l = Some(1);
        arena[1].p = Some(0);
        arena[1].r = Some(2);
        arena[2].p = Some(1);
        update_height(&mut arena, 2);
        update_height(&mut arena, 1);

        let root = rebalance(&mut arena, 0);
        assert_eq!(root, 2);
        assert_eq!(arena[2].l, Some(1));
        assert_eq!(arena[2].r, Some(0));
        assert_avl_tree(&arena, Some(root), |n: &MemberNode| &n.key, key_cmp).unwrap();
    }

    #[test]
    fn balanced_left_child_takes_single_rotation() {
        // 50 has left 30 (children 20, 40) and no right subtree.
        let mut arena = vec![node(50.0), node(30.0), node(20.0), node(40.0)];
        arena[0].l = Some(1);
        arena[1].p = Some(0);
        arena[1].l = Some(2);
        arena[1].r = Some(3);
        arena[2].p = Some(1);
        arena[3].p = Some(1);
        for i in [2, 3, 1] {
            update_height(&mut arena, i);
        }
        assert_eq!(balance_factor(&arena, Some(1)), 0);

        let root = rebalance(&mut arena, 0);
        assert_eq!(root, 1);
        assert_eq!(arena[1].r, Some(0));
        assert_eq!(arena[0].l, Some(3));
        assert_eq!(arena[3].p, Some(0));
        assert_eq!(arena[1].height, 3);
        assert_avl_tree(&arena, Some(root), |n: &MemberNode| &n.key, key_cmp).unwrap();
    }

    #[test]
    fn rotation_moves_inner_subtree() {
        // 40 has left 20 (children 10, 30); rotating right hands 30 to 40.
        let mut arena = vec![node(40.0), node(20.0), node(10.0), node(30.0)];
        arena[0].l = Some(1);
        arena[1].p = Some(0);
        arena[1].l = Some(2);
        arena[1].r = Some(3);
        arena[2].p = Some(1);
        arena[3].p = Some(1);
        for i in [2, 3, 1, 0] {
            update_height(&mut arena, i);
        }

        let root = rotate_right(&mut arena, 0);
        assert_eq!(root, 1);
        assert_eq!(arena[0].l, Some(3));
        assert_eq!(arena[3].p, Some(0));
        assert_eq!(arena[0].height, 2);
        assert_eq!(arena[1].height, 3);
    }

    #[test]
    fn validator_reports_broken_parent_link() {
        let mut arena = left_chain();
        arena[2].p = None;
        let err = assert_avl_tree(&arena, Some(0), |n: &MemberNode| &n.key, key_cmp).unwrap_err();
        assert!(err.contains("Broken parent link"));
    }
}
