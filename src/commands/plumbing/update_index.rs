use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::config::IgnorePatterns;
use anyhow::Context;

impl Repository {
    pub fn update_index(&mut self) -> anyhow::Result<()> {
        self.rebuild_index(false)?;

        Ok(())
    }

    /// Replace the index with one entry per discovered file
    ///
    /// Blob addresses are always computed; the blobs themselves are only
    /// written to the database when `store_blobs` is set.
    pub(crate) fn rebuild_index(&self, store_blobs: bool) -> anyhow::Result<Vec<IndexEntry>> {
        let ignore = IgnorePatterns::load(self.path())?;
        let files = self
            .workspace()
            .list_files(&ignore)
            .context("unable to list working directory")?;

        let entries = files
            .into_iter()
            .map(|file| -> anyhow::Result<IndexEntry> {
                let data = self
                    .workspace()
                    .read_file(&file)
                    .with_context(|| format!("unable to read {}", file.display()))?;
                let mode = self.workspace().file_mode(&file)?;

                let blob = Blob::new(data);
                let oid = if store_blobs {
                    self.database().store(&blob)?
                } else {
                    blob.object_id()?
                };

                Ok(IndexEntry::new(mode, oid, file))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        self.index().write(&entries)?;

        Ok(entries)
    }
}
