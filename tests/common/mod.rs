//! Shared helpers for integration tests

#![allow(dead_code)]

use ukkonen_tree::tree::{NodeId, SuffixTree, ROOT};

/// Reference substring check
pub fn naive_contains(text: &[u8], pattern: &[u8]) -> bool {
    pattern.is_empty() || text.windows(pattern.len()).any(|w| w == pattern)
}

/// Reference occurrence offsets, empty pattern matching at `0..=len`
pub fn naive_positions(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    if pattern.is_empty() {
        return (0..=text.len()).collect();
    }
    text.windows(pattern.len())
        .enumerate()
        .filter(|(_, w)| *w == pattern)
        .map(|(i, _)| i)
        .collect()
}

/// Path labels of every internal node below the root, sorted
pub fn internal_paths(tree: &SuffixTree) -> Vec<Vec<u8>> {
    let mut paths = Vec::new();
    let mut stack: Vec<(NodeId, Vec<u8>)> = vec![(ROOT, Vec::new())];

    while let Some((id, path)) = stack.pop() {
        let Some(children) = tree.node(id).children() else {
            continue;
        };
        if id != ROOT {
            paths.push(path.clone());
        }
        for (_, child) in children.iter() {
            let mut child_path = path.clone();
            child_path.extend_from_slice(tree.edge_label(child));
            stack.push((child, child_path));
        }
    }

    paths.sort();
    paths
}

/// Fibonacci word, a classic worst case for suffix structures
pub fn fibonacci_word(len: usize) -> Vec<u8> {
    let (mut a, mut b) = (b"a".to_vec(), b"ab".to_vec());
    while b.len() < len {
        let next = [b.as_slice(), a.as_slice()].concat();
        a = b;
        b = next;
    }
    b.truncate(len);
    b
}
