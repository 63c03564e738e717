//! HEAD pointer storage
//!
//! HEAD holds the address of the most recent commit. It is read and written
//! as a whole `HeadRecord`: callers read it, decide the next parent and write
//! the new record back. Updates are unconditional; nothing checks that the
//! new commit's parent matches the previous latest.

use crate::artifacts::head::HeadRecord;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use derive_new::new;
use std::path::Path;

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the HEAD file (typically `.twig/HEAD`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> &Path {
        &self.path
    }

    /// Read the HEAD record, empty when no commit has been recorded yet
    pub fn read_head(&self) -> Result<HeadRecord> {
        if !self.path.exists() {
            return Ok(HeadRecord::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::HeadCorrupt(format!("unable to read HEAD: {e}")))?;

        HeadRecord::parse(&content)
    }

    pub fn write_head(&self, record: &HeadRecord) -> Result<()> {
        std::fs::write(&self.path, record.render())?;

        Ok(())
    }

    pub fn read_latest(&self) -> Result<Option<ObjectId>> {
        Ok(self.read_head()?.latest().cloned())
    }

    /// Point HEAD at `commit`, overwriting whatever was there
    pub fn update_latest(&self, commit: ObjectId) -> Result<HeadRecord> {
        let record = HeadRecord::default().advance(commit);
        self.write_head(&record)?;

        tracing::info!(latest = ?record.latest(), "HEAD updated");

        Ok(record)
    }
}
