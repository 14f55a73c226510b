//! End-to-end tests for construction, search and export.

mod common;

use common::{fibonacci_word, internal_paths, naive_contains};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::thread;
use ukkonen_tree::tree::{ChildKind, SuffixTree, TreeConfig};
use ukkonen_tree::utils::{random_text, Alphabet};
use ukkonen_tree::SuffixTreeError;

fn dna(len: usize, seed: u64) -> Vec<u8> {
    random_text(Alphabet::Dna, len, &mut StdRng::seed_from_u64(seed))
}

#[test]
fn test_banana_queries() {
    let tree = SuffixTree::new("banana").unwrap();
    assert!(tree.search("ana"));
    assert!(tree.search("nan"));
    assert!(!tree.search("xyz"));
    assert!(tree.search(""));
}

#[test]
fn test_simple_alphabet() {
    let tree = SuffixTree::new("abc").unwrap();
    for (pattern, expected) in [
        ("abc", true),
        ("bc", true),
        ("c", true),
        ("ab", true),
        ("a", true),
        ("d", false),
        ("abd", false),
    ] {
        assert_eq!(tree.search(pattern), expected, "pattern {:?}", pattern);
    }
}

#[test]
fn test_bananarama() {
    let tree = SuffixTree::new("bananarama").unwrap();
    assert!(tree.search("nana"));
    assert!(tree.search("rama"));
    assert!(tree.search("ban"));
    assert!(!tree.search("apple"));
    assert_eq!(tree.text_str(), Some("bananarama"));
}

#[test]
fn test_aaaa_shape() {
    let tree = SuffixTree::new("aaaa").unwrap();
    assert_eq!(tree.leaf_count(), 5);

    let paths = internal_paths(&tree);
    assert_eq!(paths, vec![b"a".to_vec(), b"aa".to_vec(), b"aaa".to_vec()]);

    let mut offsets: Vec<u32> = (0..tree.node_count() as u32)
        .filter_map(|id| tree.node(id).suffix_start())
        .collect();
    offsets.sort();
    assert_eq!(offsets, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_banana_internal_paths() {
    let tree = SuffixTree::new("banana").unwrap();
    assert_eq!(
        internal_paths(&tree),
        vec![b"a".to_vec(), b"ana".to_vec(), b"na".to_vec()]
    );
}

#[test]
fn test_leaf_count_is_len_plus_one() {
    let texts: Vec<Vec<u8>> = vec![
        b"a".to_vec(),
        b"mississippi".to_vec(),
        b"abcabxabcd".to_vec(),
        b"ab".repeat(500),
        fibonacci_word(987),
        dna(5_000, 11),
    ];

    for text in texts {
        let tree = SuffixTree::new(&text).unwrap();
        assert_eq!(tree.leaf_count(), text.len() + 1);
        tree.validate().unwrap();
    }
}

#[test]
fn test_no_unary_internal_nodes() {
    for text in ["mississippi", "abracadabra", "aabaaabaaaab"] {
        let tree = SuffixTree::new(text).unwrap();
        for id in 1..tree.node_count() as u32 {
            if let Some(children) = tree.node(id).children() {
                assert!(children.len() >= 2, "{:?}: node {} is unary", text, id);
            }
        }
    }
}

#[test]
fn test_every_substring_found() {
    let text = b"the rain in spain stays mainly in the plain";
    let tree = SuffixTree::new(text).unwrap();
    for i in 0..text.len() {
        for j in i..=text.len() {
            assert!(tree.search(&text[i..j]), "{:?}", &text[i..j]);
        }
    }
    assert!(!tree.search("rainy"));
    assert!(!tree.search("plains"));
}

#[test]
fn test_search_agrees_with_naive_on_random_text() {
    let text = dna(20_000, 5);
    let tree = SuffixTree::new(&text).unwrap();
    let probes = dna(4_000, 6);

    for len in [1, 3, 7, 12, 20] {
        for chunk in probes.chunks(len) {
            assert_eq!(tree.search(chunk), naive_contains(&text, chunk));
        }
    }

    // Suffix of the text, like the original runtime check
    assert!(tree.search(&text[text.len() - 10..]));
}

#[test]
fn test_construction_work_grows_linearly() {
    let n = 50_000;
    let small = SuffixTree::new(dna(n, 1)).unwrap();
    let large = SuffixTree::new(dna(2 * n, 2)).unwrap();

    let small_ops = small.build_stats().operations() as f64;
    let large_ops = large.build_stats().operations() as f64;
    let ratio = large_ops / small_ops;
    assert!(
        (1.7..=2.3).contains(&ratio),
        "operations grew by {:.2}x when the text doubled",
        ratio
    );

    for tree in [&small, &large] {
        let stats = tree.build_stats();
        assert!(stats.operations() <= 3 * stats.phases);
        assert!(stats.walk_down_skips <= stats.phases);
    }
}

#[test]
fn test_repetitive_text_stays_linear() {
    for text in [b"a".repeat(20_000), b"abc".repeat(7_000), fibonacci_word(20_000)] {
        let tree = SuffixTree::new(&text).unwrap();
        let stats = tree.build_stats();
        assert!(stats.operations() <= 3 * stats.phases);
        assert!(stats.walk_down_skips <= stats.phases);
        tree.validate().unwrap();
    }
}

#[test]
fn test_render_twice_is_identical() {
    let tree = SuffixTree::new("abracadabra").unwrap();
    let first = tree.render();
    let second = tree.render();
    assert_eq!(first, second);
    assert_eq!(first.lines().count(), tree.node_count());
}

#[test]
fn test_dump_order_matches_render() {
    let tree = SuffixTree::new("mississippi").unwrap();
    let dump = tree.dump();
    let rendered: Vec<String> = tree.render().lines().skip(1).map(String::from).collect();

    assert_eq!(dump.edges.len(), rendered.len());
    for (edge, line) in dump.edges.iter().zip(&rendered) {
        assert!(line.trim_start().starts_with(&edge.label), "{} vs {:?}", line, edge);
        if edge.kind == ChildKind::Internal {
            assert!(line.contains(" link #"));
        }
    }
}

#[test]
fn test_concurrent_readers() {
    let text = dna(10_000, 9);
    let tree = Arc::new(SuffixTree::new(&text).unwrap());
    let text = Arc::new(text);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let tree = Arc::clone(&tree);
            let text = Arc::clone(&text);
            thread::spawn(move || {
                for start in (t * 100..text.len() - 16).step_by(97) {
                    assert!(tree.search(&text[start..start + 16]));
                }
                tree.render().len()
            })
        })
        .collect();

    let lens: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(lens.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_construction_errors() {
    assert!(matches!(
        SuffixTree::new(""),
        Err(SuffixTreeError::EmptyOrInvalidInput(_))
    ));
    assert!(matches!(
        SuffixTree::new(b"abc\x00"),
        Err(SuffixTreeError::EmptyOrInvalidInput(_))
    ));

    let config = TreeConfig {
        max_text_len: 3,
        ..Default::default()
    };
    assert!(matches!(
        SuffixTree::with_config("abcd", config),
        Err(SuffixTreeError::EmptyOrInvalidInput(_))
    ));
}

#[test]
fn test_binary_text() {
    let text: Vec<u8> = (1..=255u8).chain(1..=255u8).collect();
    let tree = SuffixTree::new(&text).unwrap();
    assert_eq!(tree.text(), &text[..]);
    assert!(tree.search([0xfe, 0xff, 0x01, 0x02]));
    assert!(!tree.search([0xff, 0xff]));
    assert_eq!(tree.find_all([0x80]), vec![127, 382]);
    tree.validate().unwrap();
}
