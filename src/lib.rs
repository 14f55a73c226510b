//! # ukkonen-tree - Linear-Time Suffix Trees
//!
//! Builds a suffix tree over a text in O(n) with Ukkonen's online
//! algorithm, then answers substring queries in O(m) for a pattern of
//! length m. The tree is built once and is read-only afterwards, so it can
//! be searched from many threads at once.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`tree`] - Text store, node arena, constructor, search and export
//! - [`error`] - Error types
//! - [`commands`] - Implementations of the `ukt` subcommands
//! - [`output`] - Colored result and tree formatting
//! - [`utils`] - Input loading, progress bars, random text
//!
//! ## Quick Start
//!
//! ```
//! use ukkonen_tree::tree::SuffixTree;
//!
//! let tree = SuffixTree::new("banana").unwrap();
//!
//! assert!(tree.search("ana"));
//! assert!(!tree.search("xyz"));
//! assert_eq!(tree.find_all("ana"), vec![1, 3]);
//! assert_eq!(tree.text(), b"banana");
//!
//! print!("{}", tree.render());
//! ```
//!
//! ## Terminator
//!
//! A NUL byte is appended to every text so that each suffix ends at its own
//! leaf. Input that already contains a NUL byte is rejected.

pub mod commands;
pub mod error;
pub mod output;
pub mod tree;
pub mod utils;

pub use error::{Result, SuffixTreeError};
pub use tree::{SuffixTree, SuffixTreeBuilder, TreeConfig};
