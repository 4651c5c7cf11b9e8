use crate::types::Node;

/// A family member stored in the tree arena.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberNode {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub name: String,
    pub key: f64,
    /// `1 + max(height(l), height(r))`, a leaf has height 1.
    pub height: u32,
    /// Depth from the root. Only meaningful right after a rank recomputation.
    pub rank: u32,
}

impl MemberNode {
    pub fn new(name: String, key: f64) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            name,
            key,
            height: 1,
            rank: 0,
        }
    }
}

impl Node for MemberNode {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

/// Height-tracking node behavior.
pub trait AvlNodeLike: Node {
    fn height(&self) -> u32;
    fn set_height(&mut self, height: u32);
}

impl AvlNodeLike for MemberNode {
    fn height(&self) -> u32 {
        self.height
    }

    fn set_height(&mut self, height: u32) {
        self.height = height;
    }
}
