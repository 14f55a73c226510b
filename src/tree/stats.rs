//! Tree statistics and structural validation

use super::suffix_tree::SuffixTree;
use super::types::*;
use crate::error::{Result, SuffixTreeError};

impl SuffixTree {
    /// Summary counts for this tree
    pub fn stats(&self) -> TreeStats {
        let depths = self.string_depths();
        let max_internal_depth = self
            .arena
            .iter()
            .zip(&depths)
            .filter(|(node, _)| !node.is_leaf())
            .map(|(_, &depth)| depth as usize)
            .max()
            .unwrap_or(0);

        let leaf_count = self.leaf_count();
        TreeStats {
            text_len: self.len(),
            node_count: self.node_count(),
            leaf_count,
            internal_count: self.node_count() - leaf_count,
            edge_count: self.node_count() - 1,
            max_internal_depth,
        }
    }

    /// Check the structural invariants of the tree:
    /// - one leaf per suffix, each reached by a path spelling that suffix
    /// - every internal node except the root branches at least twice
    /// - child keys match the first symbol of their edge label
    /// - suffix links join internal nodes and drop exactly one symbol
    /// - no edge still reads the shared leaf end
    pub fn validate(&self) -> Result<()> {
        let symbols = self.text.symbols();
        let stored_len = symbols.len() as TextPosition;
        let depths = self.string_depths();
        let mut seen = vec![false; symbols.len()];

        for (id, node) in self.arena.iter().enumerate() {
            let id = id as NodeId;
            if !matches!(node.end, EdgeEnd::Fixed(_)) {
                return Err(corrupt(format!("node {} still reads the shared leaf end", id)));
            }

            if let Some(start) = node.suffix_start() {
                let slot = seen.get_mut(start as usize).ok_or_else(|| {
                    corrupt(format!("leaf {} has offset {} past the text", id, start))
                })?;
                if std::mem::replace(slot, true) {
                    return Err(corrupt(format!("suffix {} has two leaves", start)));
                }
                if depths[id as usize] != stored_len - start {
                    return Err(corrupt(format!(
                        "leaf {} spells {} symbols, suffix {} has {}",
                        id,
                        depths[id as usize],
                        start,
                        stored_len - start
                    )));
                }
                continue;
            }

            let children = node
                .children()
                .ok_or_else(|| corrupt(format!("node {} has no kind", id)))?;
            if id != ROOT && children.len() < 2 {
                return Err(corrupt(format!(
                    "internal node {} has {} children",
                    id,
                    children.len()
                )));
            }

            for (symbol, child) in children.iter() {
                let (start, end) = self.arena.edge_range(child);
                if start >= end || symbols[start as usize] != symbol {
                    return Err(corrupt(format!(
                        "edge {} -> {} keyed {:#04x} has label [{},{})",
                        id, child, symbol, start, end
                    )));
                }
            }

            if id != ROOT {
                let link = node
                    .suffix_link()
                    .ok_or_else(|| corrupt(format!("internal node {} has no suffix link", id)))?;
                if self.arena.node(link).is_leaf() {
                    return Err(SuffixTreeError::InvalidSuffixLinkTarget { node: link });
                }
                if depths[link as usize] + 1 != depths[id as usize] {
                    return Err(corrupt(format!(
                        "suffix link {} -> {} spans depth {} -> {}",
                        id, link, depths[id as usize], depths[link as usize]
                    )));
                }
            }
        }

        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(corrupt(format!("suffix {} has no leaf", missing)));
        }

        Ok(())
    }

    /// Label length from the root to every node, indexed by node id
    fn string_depths(&self) -> Vec<TextPosition> {
        let mut depths = vec![0; self.node_count()];
        let mut stack = vec![ROOT];

        while let Some(id) = stack.pop() {
            if let Some(children) = self.arena.node(id).children() {
                for (_, child) in children.iter() {
                    depths[child as usize] = depths[id as usize] + self.arena.edge_len(child);
                    stack.push(child);
                }
            }
        }

        depths
    }
}

fn corrupt(message: String) -> SuffixTreeError {
    SuffixTreeError::CorruptTree(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_banana() {
        let tree = SuffixTree::new("banana").unwrap();
        let stats = tree.stats();
        assert_eq!(stats.text_len, 6);
        assert_eq!(stats.leaf_count, 7);
        // root, "a", "ana", "na"
        assert_eq!(stats.internal_count, 4);
        assert_eq!(stats.edge_count, 10);
        assert_eq!(stats.max_internal_depth, 3);
    }

    #[test]
    fn test_stats_aaaa() {
        let stats = SuffixTree::new("aaaa").unwrap().stats();
        assert_eq!(stats.leaf_count, 5);
        assert_eq!(stats.max_internal_depth, 3);
    }

    #[test]
    fn test_validate_accepts_built_trees() {
        for text in ["a", "ab", "aaaa", "banana", "mississippi", "xabxac", "abcabxabcd"] {
            let tree = SuffixTree::new(text).unwrap();
            tree.validate()
                .unwrap_or_else(|e| panic!("{:?} failed validation: {}", text, e));
        }
    }

    #[test]
    fn test_validate_rejects_unary_node() {
        let mut tree = SuffixTree::new("banana").unwrap();
        // Turn the "a" node into a unary chain by splitting one of its edges
        let a = tree.arena.child(ROOT, b'a').unwrap();
        let child = tree.arena.child(a, b'n').unwrap();
        let text = tree.text.clone();
        tree.arena.split_edge(&text, a, child, 1).unwrap();

        let err = tree.validate().unwrap_err();
        assert!(matches!(err, SuffixTreeError::CorruptTree(_)));
        assert!(err.is_internal());
    }
}
