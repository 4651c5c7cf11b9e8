//! Arena-backed AVL family tree.
//!
//! Members are kept in a height-balanced binary search tree ordered by a
//! numeric key. On top of the tree sit four queries: the lowest common
//! ancestor of two members ("target"), the largest set of members with no
//! parent/child pair ("divide"), the members sharing a depth ("rank"), and
//! audited insertion and removal.
//!
//! All "pointers" are `Option<u32>` indices into a `Vec` arena owned by the
//! tree, so parent links never form ownership cycles.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] link trait |
//! [`util`] | `first`, `next`, `in_order`, `size`, `find`, `path_to_root` over any arena |
//! [`avl`] | [`MemberNode`], rotations, `rebalance`, validator |
//! [`tree`] | [`FamilyTree`] insert/remove and queries |
//! [`event`] | [`Event`] output lines and [`EventLog`] |
//! [`command`] | [`Command`] and its line parser |
//! [`session`] | [`Session`], applying commands to a tree |
//! [`cli`] | file plumbing for the binaries |

pub mod avl;
pub mod cli;
pub mod command;
pub mod error;
pub mod event;
pub mod session;
pub mod tree;
pub mod types;
pub mod util;

pub use avl::MemberNode;
pub use command::Command;
pub use error::FamilyError;
pub use event::{fmt_key, Event, EventLog};
pub use session::Session;
pub use tree::FamilyTree;
pub use types::Node;
