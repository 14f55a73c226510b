//! Node arena
//!
//! All nodes live in one `Vec` and refer to each other by [`NodeId`].
//! Child edges and suffix links are plain index fields, so suffix links can
//! cross arbitrary parts of the tree without any ownership cycles.
//!
//! An edge is not a separate object: its label `[start, end)` is stored on
//! the child it points to, since every non-root node has exactly one
//! incoming edge.

use super::text::TextStore;
use super::types::*;
use crate::error::{Result, SuffixTreeError};

/// Outgoing edges of an internal node, keyed by first symbol.
///
/// Keys are kept sorted so traversal order is deterministic. Lookup scans
/// the key bytes with `memchr`, which beats hashing for the small fan-out
/// typical of suffix trees.
#[derive(Debug, Clone, Default)]
pub struct Children {
    keys: Vec<Symbol>,
    nodes: Vec<NodeId>,
}

impl Children {
    #[inline]
    pub fn get(&self, symbol: Symbol) -> Option<NodeId> {
        memchr::memchr(symbol, &self.keys).map(|i| self.nodes[i])
    }

    /// Insert keeping keys sorted. Returns `false` if the key exists.
    fn insert(&mut self, symbol: Symbol, node: NodeId) -> bool {
        match self.keys.binary_search(&symbol) {
            Ok(_) => false,
            Err(pos) => {
                self.keys.insert(pos, symbol);
                self.nodes.insert(pos, node);
                true
            }
        }
    }

    /// Point an existing key at a different node
    fn replace(&mut self, symbol: Symbol, node: NodeId) -> Option<NodeId> {
        let i = memchr::memchr(symbol, &self.keys)?;
        Some(std::mem::replace(&mut self.nodes[i], node))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `(first symbol, child)` pairs in ascending symbol order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Symbol, NodeId)> + '_ {
        self.keys.iter().copied().zip(self.nodes.iter().copied())
    }
}

/// Leaf or internal node payload
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Terminates exactly one suffix
    Leaf { suffix_start: TextPosition },
    /// Root or branching node
    Internal {
        children: Children,
        suffix_link: Option<NodeId>,
    },
}

/// A node together with the label of its incoming edge
#[derive(Debug, Clone)]
pub struct Node {
    /// Label start of the incoming edge
    pub start: TextPosition,
    /// Label end of the incoming edge (exclusive)
    pub end: EdgeEnd,
    pub kind: NodeKind,
}

impl Node {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Child edges; empty for leaves
    pub fn children(&self) -> Option<&Children> {
        match &self.kind {
            NodeKind::Internal { children, .. } => Some(children),
            NodeKind::Leaf { .. } => None,
        }
    }

    pub fn suffix_link(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Internal { suffix_link, .. } => suffix_link,
            NodeKind::Leaf { .. } => None,
        }
    }

    pub fn suffix_start(&self) -> Option<TextPosition> {
        match self.kind {
            NodeKind::Leaf { suffix_start } => Some(suffix_start),
            NodeKind::Internal { .. } => None,
        }
    }
}

/// Owner of every node of one tree
#[derive(Debug, Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
    /// Shared exclusive end of all leaf edges
    leaf_end: TextPosition,
    counters: BuildStats,
}

impl NodeArena {
    /// Arena holding only the root
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// A text of length `n` produces at most `2n` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node {
            start: 0,
            end: EdgeEnd::Fixed(0),
            kind: NodeKind::Internal {
                children: Children::default(),
                suffix_link: None,
            },
        });
        Self {
            nodes,
            leaf_end: 0,
            counters: BuildStats::default(),
        }
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    #[inline]
    pub fn leaf_end(&self) -> TextPosition {
        self.leaf_end
    }

    /// Move the shared leaf end forward, extending every leaf at once
    #[inline]
    pub fn advance_leaf_end(&mut self, end: TextPosition) {
        debug_assert!(end >= self.leaf_end);
        self.leaf_end = end;
    }

    pub fn counters(&self) -> &BuildStats {
        &self.counters
    }

    pub fn counters_mut(&mut self) -> &mut BuildStats {
        &mut self.counters
    }

    /// Resolved `[start, end)` label range of the edge into `id`
    #[inline]
    pub fn edge_range(&self, id: NodeId) -> (TextPosition, TextPosition) {
        let node = self.node(id);
        (node.start, node.end.resolve(self.leaf_end))
    }

    #[inline]
    pub fn edge_len(&self, id: NodeId) -> TextPosition {
        let (start, end) = self.edge_range(id);
        end - start
    }

    #[inline]
    pub fn child(&self, parent: NodeId, symbol: Symbol) -> Option<NodeId> {
        self.node(parent).children().and_then(|c| c.get(symbol))
    }

    /// Allocate a leaf whose edge label starts at `start` and grows with the
    /// shared leaf end
    pub fn create_leaf(&mut self, start: TextPosition, suffix_start: TextPosition) -> NodeId {
        self.counters.leaves_created += 1;
        self.push(Node {
            start,
            end: EdgeEnd::Leaf,
            kind: NodeKind::Leaf { suffix_start },
        })
    }

    /// Allocate an internal node with a fixed `[start, end)` label
    pub fn create_internal(&mut self, start: TextPosition, end: TextPosition) -> NodeId {
        self.push(Node {
            start,
            end: EdgeEnd::Fixed(end),
            kind: NodeKind::Internal {
                children: Children::default(),
                suffix_link: None,
            },
        })
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    /// Attach `child` under `parent` keyed by `first_symbol`
    pub fn add_child(&mut self, parent: NodeId, first_symbol: Symbol, child: NodeId) -> Result<()> {
        match &mut self.node_mut(parent).kind {
            NodeKind::Internal { children, .. } => {
                if children.insert(first_symbol, child) {
                    Ok(())
                } else {
                    Err(SuffixTreeError::DuplicateFirstSymbol {
                        node: parent,
                        symbol: first_symbol,
                    })
                }
            }
            NodeKind::Leaf { .. } => Err(SuffixTreeError::LeafHasNoChildren { node: parent }),
        }
    }

    /// Split the edge `parent -> child` after `offset` symbols.
    ///
    /// The new internal node takes over the first `offset` symbols of the
    /// label and becomes the parent of `child`, whose label is shortened
    /// accordingly. Returns the new node.
    pub fn split_edge(
        &mut self,
        text: &TextStore,
        parent: NodeId,
        child: NodeId,
        offset: TextPosition,
    ) -> Result<NodeId> {
        let (start, end) = self.edge_range(child);
        if offset == 0 || offset >= end - start {
            return Err(SuffixTreeError::IndexOutOfRange {
                index: offset as usize,
                len: (end - start) as usize,
            });
        }

        let symbols = text.symbols();
        let split = self.create_internal(start, start + offset);

        if let NodeKind::Internal { children, .. } = &mut self.node_mut(parent).kind {
            if children.replace(symbols[start as usize], split).is_none() {
                return Err(SuffixTreeError::DuplicateFirstSymbol {
                    node: parent,
                    symbol: symbols[start as usize],
                });
            }
        } else {
            return Err(SuffixTreeError::LeafHasNoChildren { node: parent });
        }

        self.node_mut(child).start = start + offset;
        self.add_child(split, symbols[(start + offset) as usize], child)?;

        self.counters.splits += 1;
        tracing::trace!(parent, child, split, offset, "split edge");
        Ok(split)
    }

    /// Overwrite the suffix link of internal node `from`
    pub fn set_suffix_link(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        if self.node(to).is_leaf() {
            return Err(SuffixTreeError::InvalidSuffixLinkTarget { node: to });
        }
        match &mut self.nodes[from as usize].kind {
            NodeKind::Internal { suffix_link, .. } => {
                *suffix_link = Some(to);
                self.counters.suffix_links_set += 1;
                Ok(())
            }
            NodeKind::Leaf { .. } => Err(SuffixTreeError::InvalidSuffixLinkTarget { node: from }),
        }
    }

    /// Write the final leaf end into every leaf edge
    pub fn freeze(&mut self) {
        let end = self.leaf_end;
        for node in &mut self.nodes {
            if node.end == EdgeEnd::Leaf {
                node.end = EdgeEnd::Fixed(end);
            }
        }
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}
