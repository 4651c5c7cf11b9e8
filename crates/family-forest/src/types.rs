//! Node link trait.
//!
//! Nodes never own each other. Each "pointer" is an `Option<u32>` index into
//! a [`Vec`]-backed arena owned by the tree, so a parent link is a plain
//! index field rather than a second owner. All tree-manipulation functions
//! take the arena as a slice and work with indices.

/// Parent and child links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

