//! Types for suffix tree indexing
//!
//! This module defines the core types shared by the text store, the node
//! arena, the online constructor and the query engine.

use crate::error::{Result, SuffixTreeError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Position in the stored text (terminator included)
pub type TextPosition = u32;

/// Index of a node in the arena
pub type NodeId = u32;

/// A single symbol of the input alphabet
pub type Symbol = u8;

/// Terminator appended once to every stored text.
/// Input containing this byte is rejected, so it never collides with a
/// legitimate symbol.
pub const TERMINATOR: Symbol = 0x00;

/// How the terminator is shown in renderings
pub const TERMINATOR_DISPLAY: char = '$';

/// The root is always the first node allocated
pub const ROOT: NodeId = 0;

/// Largest text whose tree fits the `u32` id space; a text of `n` symbols
/// yields at most `2(n + 1)` nodes
pub const MAX_TEXT_LEN: u64 = (NodeId::MAX / 2) as u64 - 1;

/// End of an edge label.
///
/// Leaf edges read through the shared end counter so that every leaf grows
/// by one symbol per phase without being touched (rule 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    /// Exclusive end frozen at a fixed position
    Fixed(TextPosition),
    /// Exclusive end equal to the tree's current leaf end
    Leaf,
}

impl EdgeEnd {
    /// Resolve against the shared leaf end
    #[inline]
    pub fn resolve(self, leaf_end: TextPosition) -> TextPosition {
        match self {
            EdgeEnd::Fixed(end) => end,
            EdgeEnd::Leaf => leaf_end,
        }
    }
}

/// Configuration for suffix tree building
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Maximum accepted text length in bytes (default: 256MB)
    pub max_text_len: u64,
    /// Build over ASCII-lowercased text and lowercase patterns (default: false)
    pub case_insensitive: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_text_len: 256 * 1024 * 1024, // 256MB
            case_insensitive: false,
        }
    }
}

impl TreeConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| {
            SuffixTreeError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_slice(&data).map_err(|e| {
            SuffixTreeError::Config(format!("invalid config {}: {}", path.display(), e))
        })
    }

    /// Effective length limit, clamped to what positions can address
    pub fn effective_max_len(&self) -> u64 {
        self.max_text_len.min(MAX_TEXT_LEN)
    }
}

/// Counters collected while the constructor runs.
///
/// `operations()` grows linearly with the text length for a correct
/// implementation of the skip/count trick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// One phase per stored symbol
    pub phases: u64,
    /// Leaf edges created (rule 2)
    pub leaves_created: u64,
    /// Edges split to create internal nodes (rule 2, mid-edge)
    pub splits: u64,
    /// Suffix links written
    pub suffix_links_set: u64,
    /// Nodes skipped over by walk-down
    pub walk_down_skips: u64,
    /// Phases ended early because the suffix was already present (rule 3)
    pub rule3_stops: u64,
    /// Wall-clock construction time in microseconds
    pub elapsed_micros: u64,
}

impl BuildStats {
    /// Structural operations performed: edge creations, splits and links
    pub fn operations(&self) -> u64 {
        self.leaves_created + self.splits + self.suffix_links_set
    }
}

/// Summary of a constructed tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Length of the original text (terminator excluded)
    pub text_len: usize,
    /// All nodes, root included
    pub node_count: usize,
    /// One leaf per suffix
    pub leaf_count: usize,
    /// Internal nodes, root included
    pub internal_count: usize,
    /// Number of edges (every node but the root has exactly one)
    pub edge_count: usize,
    /// Longest root-to-node label length over internal nodes
    pub max_internal_depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_edge_end_resolve() {
        assert_eq!(EdgeEnd::Fixed(3).resolve(10), 3);
        assert_eq!(EdgeEnd::Leaf.resolve(10), 10);
    }

    #[test]
    fn test_config_defaults() {
        let config = TreeConfig::default();
        assert!(!config.case_insensitive);
        assert_eq!(config.max_text_len, 256 * 1024 * 1024);
    }

    #[test]
    fn test_effective_max_len_is_clamped() {
        let config = TreeConfig {
            max_text_len: u64::MAX,
            ..Default::default()
        };
        assert_eq!(config.effective_max_len(), MAX_TEXT_LEN);
    }

    #[test]
    fn test_max_text_len_fits_node_ids() {
        let max_nodes = 2 * (MAX_TEXT_LEN + 1);
        assert!(max_nodes <= NodeId::MAX as u64 + 1);
        assert!(MAX_TEXT_LEN < TextPosition::MAX as u64);
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "case_insensitive": true }}"#).unwrap();

        let config = TreeConfig::load(file.path()).unwrap();
        assert!(config.case_insensitive);
        assert_eq!(config.max_text_len, TreeConfig::default().max_text_len);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = TreeConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, SuffixTreeError::Config(_)));
    }

    #[test]
    fn test_operations_sum() {
        let stats = BuildStats {
            leaves_created: 7,
            splits: 3,
            suffix_links_set: 2,
            walk_down_skips: 100,
            ..Default::default()
        };
        assert_eq!(stats.operations(), 12);
    }
}
