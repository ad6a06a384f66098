use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::AuditError;

/// Names and root-relative paths to leave out of the audit.
///
/// A token matches either an entry's bare name anywhere in the tree
/// (`.DS_Store`) or exactly one root-relative path (`/Archive/tmp`).
/// Matching is byte-exact: no globbing, no case folding, no normalisation.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    tokens: HashSet<OsString>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an ignore file. Failing to open or read it is fatal for the
    /// caller; nothing is partially loaded.
    pub fn load(path: &Path) -> Result<Self, AuditError> {
        let file = File::open(path).map_err(|source| AuditError::IgnoreFile {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(BufReader::new(file)).map_err(|source| AuditError::IgnoreFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse newline-separated tokens. Lines starting with `#` and lines made
    /// only of whitespace are skipped; every other line is kept verbatim
    /// minus its line terminator.
    pub fn from_reader(reader: impl BufRead) -> std::io::Result<Self> {
        let mut set = Self::new();
        for line in reader.lines() {
            let line = line?;
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            set.insert(line);
        }
        Ok(set)
    }

    pub fn insert(&mut self, token: impl Into<OsString>) -> bool {
        self.tokens.insert(token.into())
    }

    pub fn contains(&self, token: &OsStr) -> bool {
        self.tokens.contains(token)
    }

    /// Whether an entry is ignored by its bare name or its root-relative path.
    pub fn is_ignored(&self, name: &OsStr, relative: &Path) -> bool {
        self.contains(name) || self.contains(relative.as_os_str())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<T: Into<OsString>> FromIterator<T> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}
