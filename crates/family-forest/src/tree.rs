//! The family tree: an AVL tree keyed by score, with name-based queries.
//!
//! Members are ordered by their `f64` key. Names are not unique and are not
//! ordered consistently with keys, so every name lookup is a full scan.

use log::debug;

use crate::avl::util::{assert_avl_tree, height_of, print, rebalance};
use crate::avl::MemberNode;
use crate::error::FamilyError;
use crate::event::{fmt_key, Event, EventLog};
use crate::util::{find, in_order, path_to_root, size};

fn comparator(a: &f64, b: &f64) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}

/// Arena-backed AVL tree of family members.
///
/// Released slots are kept on a free list and reused by later insertions,
/// so a node index is only stable while its member stays in the tree.
#[derive(Clone, Debug, Default)]
pub struct FamilyTree {
    root: Option<u32>,
    size: usize,
    arena: Vec<MemberNode>,
    free: Vec<u32>,
}

impl FamilyTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Node at `idx`. Panics if `idx` was never allocated.
    pub fn get(&self, idx: u32) -> &MemberNode {
        &self.arena[idx as usize]
    }

    pub fn height(&self) -> u32 {
        height_of(&self.arena, self.root)
    }

    fn alloc(&mut self, name: &str, key: f64) -> u32 {
        let node = MemberNode::new(name.to_string(), key);
        match self.free.pop() {
            Some(idx) => {
                self.arena[idx as usize] = node;
                idx
            }
            None => {
                self.arena.push(node);
                (self.arena.len() - 1) as u32
            }
        }
    }

    fn release(&mut self, idx: u32) {
        let n = &mut self.arena[idx as usize];
        n.p = None;
        n.l = None;
        n.r = None;
        n.name.clear();
        self.free.push(idx);
    }

    fn attach_left(&mut self, parent: u32, child: Option<u32>) {
        self.arena[parent as usize].l = child;
        if let Some(c) = child {
            self.arena[c as usize].p = Some(parent);
        }
    }

    fn attach_right(&mut self, parent: u32, child: Option<u32>) {
        self.arena[parent as usize].r = child;
        if let Some(c) = child {
            self.arena[c as usize].p = Some(parent);
        }
    }

    fn set_root(&mut self, root: Option<u32>) {
        self.root = root;
        if let Some(r) = root {
            self.arena[r as usize].p = None;
        }
    }

    /// Index of the member with exactly this key.
    pub fn find_key(&self, key: f64) -> Option<u32> {
        find(&self.arena, self.root, &key, |n| &n.key, comparator)
    }

    pub fn contains_key(&self, key: f64) -> bool {
        self.find_key(key).is_some()
    }

    /// Inserts a member, recording one welcome per ancestor on the way down.
    ///
    /// Returns `false`, with nothing logged, if the key is already present.
    pub fn insert(&mut self, name: &str, key: f64, log: &mut EventLog) -> bool {
        if self.contains_key(key) {
            debug!("duplicate key {} for {name} ignored", fmt_key(key));
            return false;
        }
        let root = self.insert_member(self.root, name, key, log);
        self.set_root(Some(root));
        self.size += 1;
        true
    }

    fn insert_member(
        &mut self,
        node: Option<u32>,
        name: &str,
        key: f64,
        log: &mut EventLog,
    ) -> u32 {
        let Some(n) = node else {
            return self.alloc(name, key);
        };

        let cmp = comparator(&key, &self.arena[n as usize].key);
        if cmp == 0 {
            return n;
        }

        log.push(Event::Welcomed {
            host: self.arena[n as usize].name.clone(),
            guest: name.to_string(),
        });
        if cmp < 0 {
            let l = self.insert_member(self.arena[n as usize].l, name, key, log);
            self.attach_left(n, Some(l));
        } else {
            let r = self.insert_member(self.arena[n as usize].r, name, key, log);
            self.attach_right(n, Some(r));
        }

        rebalance(&mut self.arena, n)
    }

    /// Removes the member with `key` and logs who took its place.
    ///
    /// `name` is only used for the event text; the node is located by key.
    pub fn remove(
        &mut self,
        name: &str,
        key: f64,
        log: &mut EventLog,
    ) -> Result<(), FamilyError> {
        if !self.contains_key(key) {
            return Err(FamilyError::KeyNotFound(key));
        }
        let mut replacement = None;
        let root = self.delete_member(self.root, key, &mut replacement);
        self.set_root(root);
        self.size -= 1;
        log.push(Event::Departed {
            name: name.to_string(),
            replacement,
        });
        Ok(())
    }

    fn delete_member(
        &mut self,
        node: Option<u32>,
        key: f64,
        replacement: &mut Option<String>,
    ) -> Option<u32> {
        let n = node?;

        let cmp = comparator(&key, &self.arena[n as usize].key);
        if cmp < 0 {
            let l = self.delete_member(self.arena[n as usize].l, key, replacement);
            self.attach_left(n, l);
        } else if cmp > 0 {
            let r = self.delete_member(self.arena[n as usize].r, key, replacement);
            self.attach_right(n, r);
        } else {
            let (l, r) = (self.arena[n as usize].l, self.arena[n as usize].r);
            let successor = match (l, r) {
                (Some(_), Some(r)) => self.lowest_key_above(r, key).map(|succ| (r, succ)),
                _ => None,
            };
            match successor {
                Some((r, succ)) => {
                    let succ_name = self.arena[succ as usize].name.clone();
                    let succ_key = self.arena[succ as usize].key;
                    self.arena[n as usize].name = succ_name.clone();
                    self.arena[n as usize].key = succ_key;

                    let mut discarded = None;
                    let r = self.delete_member(Some(r), succ_key, &mut discarded);
                    self.attach_right(n, r);
                    *replacement = Some(succ_name);
                }
                None => {
                    debug_assert!(l.is_none() || r.is_none(), "full node without successor");
                    let child = l.or(r);
                    *replacement = child.map(|c| self.arena[c as usize].name.clone());
                    self.release(n);
                    return child;
                }
            }
        }

        Some(rebalance(&mut self.arena, n))
    }

    /// Smallest key strictly greater than `key` under `subtree`.
    fn lowest_key_above(&self, subtree: u32, key: f64) -> Option<u32> {
        let mut curr = Some(subtree);
        let mut successor: Option<u32> = None;
        while let Some(i) = curr {
            let n = &self.arena[i as usize];
            if n.key > key {
                if successor.is_none_or(|s| n.key < self.arena[s as usize].key) {
                    successor = Some(i);
                }
                curr = n.l;
            } else {
                curr = n.r;
            }
        }
        successor
    }

    /// First member named `name` in pre-order, left subtree before right.
    pub fn find_by_name(&self, name: &str) -> Option<u32> {
        self.find_by_name_from(self.root, name)
    }

    fn find_by_name_from(&self, node: Option<u32>, name: &str) -> Option<u32> {
        let n = node?;
        let member = &self.arena[n as usize];
        if member.name == name {
            return Some(n);
        }
        self.find_by_name_from(member.l, name)
            .or_else(|| self.find_by_name_from(member.r, name))
    }

    fn member(&self, name: &str) -> Result<u32, FamilyError> {
        self.find_by_name(name)
            .ok_or_else(|| FamilyError::MemberNotFound(name.to_string()))
    }

    /// `[node, parent, …, root]`.
    pub fn path_to_root(&self, node: u32) -> Vec<u32> {
        path_to_root(&self.arena, node)
    }

    /// Lowest common ancestor of the two named members.
    pub fn target(
        &self,
        first: &str,
        second: &str,
        log: &mut EventLog,
    ) -> Result<u32, FamilyError> {
        let a = self.member(first)?;
        let b = self.member(second)?;

        let path1 = self.path_to_root(a);
        let path2 = self.path_to_root(b);
        let target = path2
            .into_iter()
            .find(|m| path1.contains(m))
            .or(self.root)
            .ok_or_else(|| FamilyError::MemberNotFound(first.to_string()))?;

        let t = &self.arena[target as usize];
        log.push(Event::Target {
            name: t.name.clone(),
            key: t.key,
        });
        Ok(target)
    }

    /// Rewrites every node's `rank` with its depth from the root.
    pub fn recompute_ranks(&mut self) {
        self.assign_rank(self.root, 0);
    }

    fn assign_rank(&mut self, node: Option<u32>, rank: u32) {
        let Some(n) = node else {
            return;
        };
        self.arena[n as usize].rank = rank;
        let (l, r) = (self.arena[n as usize].l, self.arena[n as usize].r);
        self.assign_rank(l, rank + 1);
        self.assign_rank(r, rank + 1);
    }

    /// Members at the same depth as `name`, left to right.
    pub fn same_rank(
        &mut self,
        name: &str,
        log: &mut EventLog,
    ) -> Result<Vec<u32>, FamilyError> {
        self.recompute_ranks();
        let base = self.member(name)?;
        let rank = self.arena[base as usize].rank;

        let mut matches = Vec::new();
        self.collect_rank(self.root, rank, &mut matches);

        log.push(Event::Rank {
            members: matches
                .iter()
                .map(|&i| {
                    let n = &self.arena[i as usize];
                    (n.name.clone(), n.key)
                })
                .collect(),
        });
        Ok(matches)
    }

    fn collect_rank(&self, node: Option<u32>, rank: u32, out: &mut Vec<u32>) {
        let Some(n) = node else {
            return;
        };
        let member = &self.arena[n as usize];
        // Ranks only grow downwards; nothing below a deeper node can match.
        if member.rank > rank {
            return;
        }
        self.collect_rank(member.l, rank, out);
        if member.rank == rank {
            out.push(n);
        }
        self.collect_rank(member.r, rank, out);
    }

    /// Size of a maximum independent set over the tree shape.
    pub fn divide(&self, log: &mut EventLog) -> usize {
        let (include, exclude) = self.independent_counts(self.root);
        let count = include.max(exclude);
        log.push(Event::Division { count });
        count
    }

    /// `(include, exclude)` counts for the subtree at `node`.
    fn independent_counts(&self, node: Option<u32>) -> (usize, usize) {
        let Some(n) = node else {
            return (0, 0);
        };
        let member = &self.arena[n as usize];
        let (li, le) = self.independent_counts(member.l);
        let (ri, re) = self.independent_counts(member.r);
        (1 + le + re, li.max(le) + ri.max(re))
    }

    /// In-order `(name, key)` pairs.
    pub fn members(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        in_order(&self.arena, self.root).map(|i| {
            let n = &self.arena[i as usize];
            (n.name.as_str(), n.key)
        })
    }

    pub fn assert_valid(&self) -> Result<(), String> {
        assert_avl_tree(&self.arena, self.root, |n| &n.key, comparator)?;
        let counted = size(&self.arena, self.root);
        if counted != self.size {
            return Err(format!("Size mismatch: counted {counted}, stored {}", self.size));
        }
        Ok(())
    }

    pub fn print(&self) -> String {
        print(&self.arena, self.root, "", &|n: &MemberNode| {
            format!("{} = {}", n.name, fmt_key(n.key))
        })
    }
}
