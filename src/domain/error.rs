//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent lookups that cannot be satisfied by the tree.
///
/// The tree operations themselves are total; only addressing a node by
/// a human-readable path can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("no node at path: {0}")]
    NodeNotFound(String),

    #[error("empty node path")]
    EmptyPath,
}
