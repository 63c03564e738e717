//! Index (tracked file manifest)
//!
//! The index file is rewritten in full on every rebuild, so it never holds
//! two entries for the same path. There is no locking: concurrent rebuilds
//! race and the last writer wins.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::{deserialize_entries, serialize_entries};
use crate::errors::{Error, Result};
use std::path::Path;

#[derive(Debug)]
pub struct Index {
    /// Path to the index file (typically `.twig/index`)
    path: Box<Path>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry in stored order
    ///
    /// A missing or unreadable file is reported as `IndexCorrupt`, the same
    /// as a malformed one.
    pub fn load(&self) -> Result<Vec<IndexEntry>> {
        let bytes = std::fs::read(self.path()).map_err(|e| {
            Error::IndexCorrupt(format!("unable to read {}: {e}", self.path.display()))
        })?;

        deserialize_entries(&bytes)
    }

    /// Replace the index file with exactly these entries
    pub fn write(&self, entries: &[IndexEntry]) -> Result<()> {
        let bytes = serialize_entries(entries)?;
        std::fs::write(self.path(), &bytes)?;

        tracing::info!(entries = entries.len(), "index rewritten");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object_id::ObjectId;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::path::PathBuf;

    #[fixture]
    fn index_dir() -> TempDir {
        TempDir::new().expect("Failed to create temp dir")
    }

    fn index(dir: &TempDir) -> Index {
        Index::new(dir.path().join("index").into_boxed_path())
    }

    fn entry(path: &str) -> IndexEntry {
        IndexEntry::new(0o100644, ObjectId::digest(path.as_bytes()), PathBuf::from(path))
    }

    #[rstest]
    fn missing_file_is_reported_as_corrupt(index_dir: TempDir) {
        assert!(matches!(
            index(&index_dir).load(),
            Err(Error::IndexCorrupt(_))
        ));
    }

    #[rstest]
    fn rewrite_replaces_previous_entries(index_dir: TempDir) {
        let index = index(&index_dir);
        index.write(&[entry("/r/a"), entry("/r/b")]).unwrap();
        index.write(&[entry("/r/c")]).unwrap();

        assert_eq!(index.load().unwrap(), vec![entry("/r/c")]);
    }

    #[rstest]
    fn garbage_file_is_corrupt(index_dir: TempDir) {
        let index = index(&index_dir);
        std::fs::write(index.path(), b"not an index at all").unwrap();

        assert!(matches!(index.load(), Err(Error::IndexCorrupt(_))));
    }
}
