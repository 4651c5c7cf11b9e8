use std::path::PathBuf;

use thiserror::Error;

use crate::event::fmt_key;

#[derive(Debug, Error)]
pub enum FamilyError {
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("no member named {0}")]
    MemberNotFound(String),
    #[error("no member with key {}", fmt_key(*.0))]
    KeyNotFound(f64),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
