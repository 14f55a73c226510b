//! Query engine
//!
//! Substring search walks down from the root, matching pattern symbols
//! against edge labels in bulk. All queries are pure reads taking O(m)
//! time for a pattern of length m (plus the size of the output for
//! `find_all`).

use super::suffix_tree::SuffixTree;
use super::types::*;
use rayon::prelude::*;
use std::borrow::Cow;

impl SuffixTree {
    /// Check if `pattern` occurs in the text.
    ///
    /// The empty pattern is always found.
    pub fn search(&self, pattern: impl AsRef<[u8]>) -> bool {
        self.locate(pattern.as_ref()).is_some()
    }

    /// Search many patterns in parallel
    pub fn search_many<P>(&self, patterns: &[P]) -> Vec<bool>
    where
        P: AsRef<[u8]> + Sync,
    {
        patterns
            .par_iter()
            .map(|p| self.locate(p.as_ref()).is_some())
            .collect()
    }

    /// Number of occurrences of `pattern`
    pub fn count(&self, pattern: impl AsRef<[u8]>) -> usize {
        match self.locate(pattern.as_ref()) {
            Some(node) => self.leaves_below(node).count(),
            None => 0,
        }
    }

    /// Sorted start offsets of every occurrence of `pattern`.
    ///
    /// The empty pattern matches at every offset `0..=len`.
    pub fn find_all(&self, pattern: impl AsRef<[u8]>) -> Vec<usize> {
        let Some(node) = self.locate(pattern.as_ref()) else {
            return Vec::new();
        };

        let mut offsets: Vec<usize> = self
            .leaves_below(node)
            .map(|start| start as usize)
            .collect();
        offsets.sort_unstable();
        offsets
    }

    /// Find the node at or just below the end of the match.
    ///
    /// Returns `None` if the pattern does not occur.
    fn locate(&self, pattern: &[u8]) -> Option<NodeId> {
        // The terminator is not part of the original text
        if memchr::memchr(TERMINATOR, pattern).is_some() {
            return None;
        }

        let pattern = self.fold_pattern(pattern);
        let symbols = self.text.symbols();

        let mut node = ROOT;
        let mut cursor = 0;

        while cursor < pattern.len() {
            let child = self.arena.child(node, pattern[cursor])?;
            let (start, end) = self.arena.edge_range(child);
            let start = start as usize;

            let take = (end as usize - start).min(pattern.len() - cursor);
            if symbols[start..start + take] != pattern[cursor..cursor + take] {
                return None;
            }

            cursor += take;
            node = child;
        }

        Some(node)
    }

    /// Apply the same case folding the text went through
    fn fold_pattern<'p>(&self, pattern: &'p [u8]) -> Cow<'p, [u8]> {
        if self.config().case_insensitive && pattern.iter().any(u8::is_ascii_uppercase) {
            Cow::Owned(pattern.to_ascii_lowercase())
        } else {
            Cow::Borrowed(pattern)
        }
    }

    /// Suffix offsets of every leaf in the subtree rooted at `node`
    fn leaves_below(&self, node: NodeId) -> impl Iterator<Item = TextPosition> + '_ {
        let mut stack = vec![node];
        std::iter::from_fn(move || {
            while let Some(id) = stack.pop() {
                let node = self.arena.node(id);
                match node.children() {
                    Some(children) => stack.extend(children.iter().map(|(_, child)| child)),
                    None => return node.suffix_start(),
                }
            }
            None
        })
    }
}
