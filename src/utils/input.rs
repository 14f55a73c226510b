//! Loading input text for the command line front end

use anyhow::{Context, Result};
use memmap2::Mmap;
use std::fs::File;
use std::ops::Deref;
use std::path::Path;

/// Text to index, either memory-mapped from a file or owned
pub enum InputText {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl InputText {
    /// Memory-map `path`.
    ///
    /// Empty files are returned as an empty owned buffer since a zero-length
    /// mapping is not portable; building a tree from it then fails with the
    /// usual empty-input error.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let len = file
            .metadata()
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .len();

        if len == 0 {
            return Ok(InputText::Owned(Vec::new()));
        }

        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to map {}", path.display()))?;
        Ok(InputText::Mapped(mmap))
    }

    /// Resolve `--text` / `--file` style arguments; inline text wins
    pub fn from_args(text: Option<&str>, file: Option<&Path>) -> Result<Self> {
        match (text, file) {
            (Some(text), _) => Ok(InputText::Owned(text.as_bytes().to_vec())),
            (None, Some(path)) => Self::open(path),
            (None, None) => anyhow::bail!("No input given: pass --text or --file"),
        }
    }
}

impl Deref for InputText {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            InputText::Mapped(mmap) => mmap,
            InputText::Owned(bytes) => bytes,
        }
    }
}
