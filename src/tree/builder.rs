//! Online suffix tree constructor
//!
//! Builds the tree with Ukkonen's algorithm, one phase per stored symbol:
//! 1. Advance the shared leaf end, which extends every leaf edge at once
//! 2. Insert the pending suffixes starting from the active point, following
//!    suffix links between extensions
//! 3. Stop the phase as soon as a suffix is already present
//!
//! Total work is O(n): each walk-down skip is paid for by growth of the
//! active length, and every phase inserts pending suffixes at most once.

use super::arena::NodeArena;
use super::suffix_tree::SuffixTree;
use super::text::TextStore;
use super::types::*;
use crate::error::Result;
use std::time::Instant;

/// Phases between two progress callbacks
const PROGRESS_INTERVAL: TextPosition = 1 << 16;

/// Where the next extension begins
#[derive(Debug, Clone, Copy)]
struct ActivePoint {
    node: NodeId,
    /// Text position of the first symbol of the active edge
    edge: TextPosition,
    /// Symbols consumed along the active edge
    length: TextPosition,
}

/// Builder for constructing suffix trees from text
#[derive(Debug, Clone, Default)]
pub struct SuffixTreeBuilder {
    config: TreeConfig,
}

impl SuffixTreeBuilder {
    /// Create a new suffix tree builder with the given configuration
    pub fn new(config: TreeConfig) -> Self {
        Self { config }
    }

    /// Create a builder with default configuration
    pub fn with_defaults() -> Self {
        Self::new(TreeConfig::default())
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Build a suffix tree over `text`
    pub fn build(&self, text: &[u8]) -> Result<SuffixTree> {
        self.build_with_progress(text, |_| {})
    }

    /// Build a suffix tree, reporting the number of processed symbols
    /// periodically and once more when construction completes
    pub fn build_with_progress<F>(&self, text: &[u8], mut on_progress: F) -> Result<SuffixTree>
    where
        F: FnMut(usize),
    {
        let started = Instant::now();
        let store = TextStore::build(text, &self.config)?;
        let len = store.len() as TextPosition;

        let mut ukkonen = Ukkonen::new(&store);
        for pos in 0..len {
            ukkonen.extend(pos)?;
            if (pos + 1) % PROGRESS_INTERVAL == 0 {
                on_progress(pos as usize + 1);
            }
        }
        on_progress(len as usize);

        debug_assert_eq!(ukkonen.remainder, 0, "terminator must make every suffix explicit");

        let mut arena = ukkonen.arena;
        arena.freeze();

        let mut stats = *arena.counters();
        stats.elapsed_micros = started.elapsed().as_micros() as u64;

        tracing::debug!(
            text_len = text.len(),
            nodes = arena.len(),
            leaves = stats.leaves_created,
            splits = stats.splits,
            suffix_links = stats.suffix_links_set,
            elapsed_us = stats.elapsed_micros,
            "suffix tree built"
        );

        Ok(SuffixTree::from_parts(store, arena, self.config.clone(), stats))
    }
}

/// Construction state; never outlives a single build
struct Ukkonen<'a> {
    text: &'a TextStore,
    arena: NodeArena,
    active: ActivePoint,
    /// Suffixes not yet explicit in the current phase
    remainder: TextPosition,
}

impl<'a> Ukkonen<'a> {
    fn new(text: &'a TextStore) -> Self {
        Self {
            text,
            arena: NodeArena::with_capacity(text.len() * 2),
            active: ActivePoint {
                node: ROOT,
                edge: 0,
                length: 0,
            },
            remainder: 0,
        }
    }

    /// Run the phase for the symbol at `pos`
    fn extend(&mut self, pos: TextPosition) -> Result<()> {
        let text = self.text;
        let symbols = text.symbols();
        let current = symbols[pos as usize];

        // Rule 1: every leaf edge reads this end
        self.arena.advance_leaf_end(pos + 1);
        self.arena.counters_mut().phases += 1;
        self.remainder += 1;

        let mut last_new_node: Option<NodeId> = None;

        while self.remainder > 0 {
            if self.active.length == 0 {
                self.active.edge = pos;
            }
            let edge_symbol = symbols[self.active.edge as usize];

            match self.arena.child(self.active.node, edge_symbol) {
                None => {
                    // Rule 2: new leaf straight off the active node
                    let leaf = self.arena.create_leaf(pos, pos + 1 - self.remainder);
                    self.arena.add_child(self.active.node, edge_symbol, leaf)?;

                    if let Some(node) = last_new_node.take() {
                        self.arena.set_suffix_link(node, self.active.node)?;
                    }
                }
                Some(next) => {
                    // Skip/count: hop over whole edges without comparing symbols
                    let edge_len = self.arena.edge_len(next);
                    if self.active.length >= edge_len {
                        self.active.edge += edge_len;
                        self.active.length -= edge_len;
                        self.active.node = next;
                        self.arena.counters_mut().walk_down_skips += 1;
                        continue;
                    }

                    let next_start = self.arena.node(next).start;
                    if symbols[(next_start + self.active.length) as usize] == current {
                        // Rule 3: suffix already present, the phase ends here
                        if let Some(node) = last_new_node.take() {
                            self.arena.set_suffix_link(node, self.active.node)?;
                        }
                        self.active.length += 1;
                        self.arena.counters_mut().rule3_stops += 1;
                        break;
                    }

                    // Rule 2: mismatch inside the edge
                    let split = self
                        .arena
                        .split_edge(text, self.active.node, next, self.active.length)?;
                    let leaf = self.arena.create_leaf(pos, pos + 1 - self.remainder);
                    self.arena.add_child(split, current, leaf)?;

                    if let Some(node) = last_new_node {
                        self.arena.set_suffix_link(node, split)?;
                    }
                    last_new_node = Some(split);
                }
            }

            self.remainder -= 1;

            if self.active.node == ROOT {
                if self.active.length > 0 {
                    self.active.length -= 1;
                    self.active.edge = pos + 1 - self.remainder;
                }
            } else {
                self.active.node = self.arena.node(self.active.node).suffix_link().unwrap_or(ROOT);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SuffixTreeError;

    #[test]
    fn test_build_simple() {
        let tree = SuffixTreeBuilder::with_defaults().build(b"banana").unwrap();
        assert_eq!(tree.leaf_count(), 7); // "banana" + terminator
        assert_eq!(tree.text(), b"banana");
    }

    #[test]
    fn test_every_phase_runs() {
        let tree = SuffixTreeBuilder::with_defaults().build(b"mississippi").unwrap();
        let stats = tree.build_stats();
        assert_eq!(stats.phases, 12);
        assert_eq!(stats.leaves_created, 12);
        assert_eq!(stats.splits as usize, tree.internal_count() - 1);
    }

    #[test]
    fn test_internal_nodes_get_links() {
        let tree = SuffixTreeBuilder::with_defaults().build(b"xabxac").unwrap();
        for id in 1..tree.node_count() as NodeId {
            let node = tree.node(id);
            if !node.is_leaf() {
                assert!(node.suffix_link().is_some(), "node {} has no suffix link", id);
            }
        }
    }

    #[test]
    fn test_leaf_edges_frozen() {
        let tree = SuffixTreeBuilder::with_defaults().build(b"abcabx").unwrap();
        for id in 0..tree.node_count() as NodeId {
            assert!(matches!(tree.node(id).end, EdgeEnd::Fixed(_)));
        }
    }

    #[test]
    fn test_progress_reports_completion() {
        let mut reported = Vec::new();
        SuffixTreeBuilder::with_defaults()
            .build_with_progress(b"abracadabra", |n| reported.push(n))
            .unwrap();
        assert_eq!(reported, vec![12]);
    }

    #[test]
    fn test_rejects_bad_input() {
        let builder = SuffixTreeBuilder::with_defaults();
        assert!(matches!(
            builder.build(b""),
            Err(SuffixTreeError::EmptyOrInvalidInput(_))
        ));
        assert!(matches!(
            builder.build(b"a\x00b"),
            Err(SuffixTreeError::EmptyOrInvalidInput(_))
        ));
    }

    #[test]
    fn test_case_insensitive_build() {
        let builder = SuffixTreeBuilder::new(TreeConfig {
            case_insensitive: true,
            ..Default::default()
        });
        let tree = builder.build(b"BaNaNa").unwrap();
        assert_eq!(tree.text(), b"BaNaNa");
        assert!(tree.search("nan"));
        assert!(tree.search("NAN"));
    }
}
