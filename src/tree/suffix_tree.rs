//! The constructed, read-only suffix tree

use super::arena::{Node, NodeArena};
use super::builder::SuffixTreeBuilder;
use super::text::TextStore;
use super::types::*;
use crate::error::Result;

/// A suffix tree over one text.
///
/// Immutable once built: queries take `&self`, so a tree can be shared
/// across threads and searched concurrently without locking.
#[derive(Debug, Clone)]
pub struct SuffixTree {
    pub(crate) text: TextStore,
    pub(crate) arena: NodeArena,
    config: TreeConfig,
    build_stats: BuildStats,
}

impl SuffixTree {
    /// Build a tree over `text` with the default configuration.
    ///
    /// Fails with `EmptyOrInvalidInput` on empty text or text containing
    /// the terminator byte.
    pub fn new(text: impl AsRef<[u8]>) -> Result<Self> {
        SuffixTreeBuilder::with_defaults().build(text.as_ref())
    }

    /// Build a tree over `text` with the given configuration
    pub fn with_config(text: impl AsRef<[u8]>, config: TreeConfig) -> Result<Self> {
        SuffixTreeBuilder::new(config).build(text.as_ref())
    }

    pub(crate) fn from_parts(
        text: TextStore,
        arena: NodeArena,
        config: TreeConfig,
        build_stats: BuildStats,
    ) -> Self {
        Self {
            text,
            arena,
            config,
            build_stats,
        }
    }

    /// The original text, terminator excluded
    pub fn text(&self) -> &[u8] {
        self.text.original_text()
    }

    /// The original text as UTF-8, if it is valid UTF-8
    pub fn text_str(&self) -> Option<&str> {
        std::str::from_utf8(self.text()).ok()
    }

    /// Stored symbol at `i` (case-folded if configured, terminator at `len`)
    pub fn symbol_at(&self, i: usize) -> Result<Symbol> {
        self.text.symbol_at(i)
    }

    /// Length of the original text
    pub fn len(&self) -> usize {
        self.text.len() - 1
    }

    /// Always false: empty texts are rejected at construction
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn build_stats(&self) -> &BuildStats {
        &self.build_stats
    }

    /// Total number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.arena.iter().filter(|n| n.is_leaf()).count()
    }

    /// Internal nodes, root included
    pub fn internal_count(&self) -> usize {
        self.node_count() - self.leaf_count()
    }

    /// Node by id; ids run from `ROOT` to `node_count() - 1`
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.node(id)
    }

    /// Resolved `[start, end)` range of the edge into `id`
    pub fn edge_range(&self, id: NodeId) -> (TextPosition, TextPosition) {
        self.arena.edge_range(id)
    }

    /// Label of the edge into `id`, as stored (terminator included)
    pub fn edge_label(&self, id: NodeId) -> &[Symbol] {
        let (start, end) = self.arena.edge_range(id);
        self.text.slice(start, end)
    }
}
