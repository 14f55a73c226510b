//! Traversal and export
//!
//! Depth-first walk from the root, children in ascending first-symbol
//! order, so every rendering of the same tree is byte-identical. The text
//! form is meant for humans; the structured form serializes to JSON for
//! tooling. Neither is a stable storage format.

use super::suffix_tree::SuffixTree;
use super::types::*;
use serde::Serialize;
use std::fmt;
use std::io;

/// Kind of the node an edge leads to, as shown in exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildKind {
    Leaf,
    Internal,
}

/// One edge of the tree, in traversal order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeDump {
    /// Number of edges from the root to `child`
    pub depth: usize,
    pub parent: NodeId,
    pub child: NodeId,
    pub start: TextPosition,
    pub end: TextPosition,
    /// Escaped label, terminator shown as `$`
    pub label: String,
    pub kind: ChildKind,
    /// Suffix offset for leaves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix_start: Option<TextPosition>,
    /// Suffix link target for internal nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix_link: Option<NodeId>,
}

/// Whole-tree export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeDump {
    pub text_len: usize,
    pub node_count: usize,
    pub leaf_count: usize,
    pub root: NodeId,
    pub edges: Vec<EdgeDump>,
}

impl SuffixTree {
    /// Edges in depth-first order
    pub fn edges(&self) -> impl Iterator<Item = EdgeDump> + '_ {
        let mut stack: Vec<(NodeId, NodeId, usize)> = Vec::new();
        self.push_children(&mut stack, ROOT, 1);

        std::iter::from_fn(move || {
            let (parent, child, depth) = stack.pop()?;
            let node = self.arena.node(child);
            let (start, end) = self.arena.edge_range(child);

            self.push_children(&mut stack, child, depth + 1);

            Some(EdgeDump {
                depth,
                parent,
                child,
                start,
                end,
                label: escape_label(self.text.slice(start, end)),
                kind: if node.is_leaf() {
                    ChildKind::Leaf
                } else {
                    ChildKind::Internal
                },
                suffix_start: node.suffix_start(),
                suffix_link: node.suffix_link(),
            })
        })
    }

    /// Push children reversed so they pop in ascending order
    fn push_children(
        &self,
        stack: &mut Vec<(NodeId, NodeId, usize)>,
        parent: NodeId,
        depth: usize,
    ) {
        if let Some(children) = self.arena.node(parent).children() {
            stack.extend(children.iter().rev().map(|(_, child)| (parent, child, depth)));
        }
    }

    /// Structured export of the whole tree
    pub fn dump(&self) -> TreeDump {
        TreeDump {
            text_len: self.len(),
            node_count: self.node_count(),
            leaf_count: self.leaf_count(),
            root: ROOT,
            edges: self.edges().collect(),
        }
    }

    /// Displayable rendering of the tree
    pub fn display(&self) -> TreeDisplay<'_> {
        TreeDisplay { tree: self }
    }

    /// Human-readable rendering of the tree
    pub fn render(&self) -> String {
        self.display().to_string()
    }

    /// Write the rendering to `out`
    pub fn write_tree<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.display())
    }
}

/// Text rendering, one edge per line, indented by depth
pub struct TreeDisplay<'a> {
    tree: &'a SuffixTree,
}

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "root #{}", ROOT)?;
        for edge in self.tree.edges() {
            writeln!(f, "{}", EdgeLine(&edge))?;
        }
        Ok(())
    }
}

/// Single rendered edge line
pub struct EdgeLine<'a>(pub &'a EdgeDump);

impl fmt::Display for EdgeLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = self.0;
        write!(
            f,
            "{:indent$}{} [{},{}) #{} -> #{}",
            "",
            edge.label,
            edge.start,
            edge.end,
            edge.parent,
            edge.child,
            indent = edge.depth * 2
        )?;
        match (edge.suffix_start, edge.suffix_link) {
            (Some(start), _) => write!(f, " leaf @{}", start),
            (None, Some(link)) => write!(f, " link #{}", link),
            (None, None) => Ok(()),
        }
    }
}

/// Escape a label for display; the terminator becomes `$`
pub fn escape_label(symbols: &[Symbol]) -> String {
    let mut out = String::with_capacity(symbols.len());
    for &b in symbols {
        if b == TERMINATOR {
            out.push(TERMINATOR_DISPLAY);
        } else {
            out.extend(std::ascii::escape_default(b).map(char::from));
        }
    }
    out
}
