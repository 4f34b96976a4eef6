// this_file: crates/fontsub-core/src/charset.rs

//! Character list handling
//!
//! The character list is whatever text the extraction step wrote out. We keep
//! it verbatim apart from trimming the surrounding whitespace, and leave
//! deduplication and validation to the subsetter.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, MissingInputError, Result};

/// The characters a subset font must keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSet {
    text: String,
}

impl CharSet {
    /// Wrap already-loaded text, trimming it the same way as [`CharSet::from_file`]
    pub fn new(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
        }
    }

    /// Read a character list file as UTF-8
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(MissingInputError::CharFile(path.to_path_buf()).into());
            },
            Err(err) => return Err(err.into()),
        };
        let text = String::from_utf8(bytes).map_err(|source| Error::InvalidUtf8 {
            path: path.to_path_buf(),
            source,
        })?;

        let chars = Self::new(&text);
        log::debug!(
            "Read {} characters from {}",
            chars.len(),
            path.display()
        );
        Ok(chars)
    }

    /// Number of Unicode scalar values, duplicates included
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Write the characters to a temporary `.txt` file for the subsetter.
    ///
    /// The file is removed when the returned handle is dropped.
    pub fn write_temp_file(&self) -> io::Result<NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("fontsub-chars-")
            .suffix(".txt")
            .tempfile()?;
        file.write_all(self.text.as_bytes())?;
        file.flush()?;
        log::debug!("Wrote character list to {}", file.path().display());
        Ok(file)
    }
}
