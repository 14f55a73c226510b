//! Error types for suffix tree construction and access

use crate::tree::types::{NodeId, Symbol};
use thiserror::Error;

/// Errors that can occur while building or inspecting a suffix tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuffixTreeError {
    /// Empty input, input containing the terminator, or input too large
    #[error("empty or invalid input: {0}")]
    EmptyOrInvalidInput(String),

    #[error("index {index} out of range for text of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A node already has an edge starting with this symbol
    #[error("node {node} already has a child edge starting with {symbol:#04x}")]
    DuplicateFirstSymbol { node: NodeId, symbol: Symbol },

    /// Only internal nodes own child edges
    #[error("node {node} is a leaf and cannot own child edges")]
    LeafHasNoChildren { node: NodeId },

    /// Suffix links may only connect internal nodes
    #[error("node {node} is a leaf and cannot take part in a suffix link")]
    InvalidSuffixLinkTarget { node: NodeId },

    /// Structural check failed on a built tree
    #[error("corrupt tree: {0}")]
    CorruptTree(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl SuffixTreeError {
    /// Invariant violations mean the constructor corrupted the tree
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            SuffixTreeError::DuplicateFirstSymbol { .. }
                | SuffixTreeError::LeafHasNoChildren { .. }
                | SuffixTreeError::InvalidSuffixLinkTarget { .. }
                | SuffixTreeError::CorruptTree(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SuffixTreeError>;
