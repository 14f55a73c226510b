//! Suffix tree module
//!
//! This module provides O(n) suffix tree construction with Ukkonen's
//! algorithm and O(m) substring search over the result.
//!
//! ## Architecture
//!
//! - `text`: Immutable symbol buffer with the appended terminator
//! - `arena`: Node storage, child edges and suffix links by index
//! - `builder`: The online constructor (active point, rules 1-3)
//! - `suffix_tree`: The finished, read-only tree
//! - `search`: Substring queries
//! - `render`: Depth-first text and structured exports
//! - `stats`: Summary counts and invariant checks
//! - `types`: Core type definitions

pub mod arena;
pub mod builder;
pub mod render;
pub mod search;
pub mod stats;
pub mod suffix_tree;
pub mod text;
pub mod types;

// Re-exports for convenience
pub use arena::{Children, Node, NodeArena, NodeKind};
pub use builder::SuffixTreeBuilder;
pub use render::{EdgeDump, ChildKind, EdgeLine, TreeDisplay, TreeDump};
pub use suffix_tree::SuffixTree;
pub use text::TextStore;
pub use types::*;
