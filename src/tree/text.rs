//! Text store
//!
//! Owns the immutable input plus the appended terminator. Edge labels are
//! `[start, end)` ranges into this buffer, never copies.

use super::types::*;
use crate::error::{Result, SuffixTreeError};

/// Immutable symbol buffer of length `n + 1`
#[derive(Debug, Clone)]
pub struct TextStore {
    /// Indexed symbols (case-folded if configured), terminator last
    symbols: Box<[Symbol]>,
    /// Unfolded input, kept only when folding changed the symbols
    original: Option<Box<[Symbol]>>,
}

impl TextStore {
    /// Validate `raw` and append the terminator
    pub fn build(raw: &[u8], config: &TreeConfig) -> Result<Self> {
        if raw.is_empty() {
            return Err(SuffixTreeError::EmptyOrInvalidInput(
                "text is empty".to_string(),
            ));
        }

        if let Some(pos) = memchr::memchr(TERMINATOR, raw) {
            return Err(SuffixTreeError::EmptyOrInvalidInput(format!(
                "text contains the reserved terminator byte at offset {}",
                pos
            )));
        }

        let limit = config.effective_max_len();
        if raw.len() as u64 > limit {
            return Err(SuffixTreeError::EmptyOrInvalidInput(format!(
                "text length {} exceeds the limit of {} bytes",
                raw.len(),
                limit
            )));
        }

        let mut symbols = Vec::with_capacity(raw.len() + 1);
        let mut original = None;

        if config.case_insensitive {
            symbols.extend(raw.iter().map(|b| b.to_ascii_lowercase()));
            if symbols[..] != *raw {
                original = Some(raw.into());
            }
        } else {
            symbols.extend_from_slice(raw);
        }
        symbols.push(TERMINATOR);

        Ok(Self {
            symbols: symbols.into_boxed_slice(),
            original,
        })
    }

    /// Symbol at `i`, checked against `[0, n + 1)`
    pub fn symbol_at(&self, i: usize) -> Result<Symbol> {
        self.symbols
            .get(i)
            .copied()
            .ok_or(SuffixTreeError::IndexOutOfRange {
                index: i,
                len: self.symbols.len(),
            })
    }

    /// Stored length, terminator included
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Never true for a successfully built store
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All stored symbols, terminator included
    #[inline]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Slice of stored symbols for an edge label
    #[inline]
    pub fn slice(&self, start: TextPosition, end: TextPosition) -> &[Symbol] {
        &self.symbols[start as usize..end as usize]
    }

    /// The input text exactly as given, terminator stripped
    pub fn original_text(&self) -> &[u8] {
        match &self.original {
            Some(original) => original,
            None => &self.symbols[..self.symbols.len() - 1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_appends_terminator() {
        let store = TextStore::build(b"banana", &TreeConfig::default()).unwrap();
        assert_eq!(store.len(), 7);
        assert_eq!(store.symbols(), b"banana\x00");
        assert_eq!(store.original_text(), b"banana");
    }

    #[test]
    fn test_rejects_empty() {
        let err = TextStore::build(b"", &TreeConfig::default()).unwrap_err();
        assert!(matches!(err, SuffixTreeError::EmptyOrInvalidInput(_)));
    }

    #[test]
    fn test_rejects_terminator() {
        let err = TextStore::build(b"ab\x00cd", &TreeConfig::default()).unwrap_err();
        assert!(err.to_string().contains("offset 2"));
    }

    #[test]
    fn test_rejects_oversized() {
        let config = TreeConfig {
            max_text_len: 4,
            ..Default::default()
        };
        assert!(TextStore::build(b"abcd", &config).is_ok());
        assert!(TextStore::build(b"abcde", &config).is_err());
    }

    #[test]
    fn test_symbol_at_bounds() {
        let store = TextStore::build(b"abc", &TreeConfig::default()).unwrap();
        assert_eq!(store.symbol_at(0), Ok(b'a'));
        assert_eq!(store.symbol_at(3), Ok(TERMINATOR));
        assert_eq!(
            store.symbol_at(4),
            Err(SuffixTreeError::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn test_case_insensitive_keeps_original() {
        let config = TreeConfig {
            case_insensitive: true,
            ..Default::default()
        };
        let store = TextStore::build(b"HeLLo", &config).unwrap();
        assert_eq!(&store.symbols()[..5], b"hello");
        assert_eq!(store.original_text(), b"HeLLo");

        // Already lowercase: no second copy
        let store = TextStore::build(b"hello", &config).unwrap();
        assert!(store.original.is_none());
        assert_eq!(store.original_text(), b"hello");
    }
}
