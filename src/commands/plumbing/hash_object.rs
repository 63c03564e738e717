use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn hash_object(&mut self, file_path: &Path) -> anyhow::Result<ObjectId> {
        let data = self
            .workspace()
            .read_file(file_path)
            .with_context(|| format!("unable to read {}", file_path.display()))?;

        let object_id = self.database().store(&Blob::new(data))?;

        writeln!(self.writer(), "{object_id}")?;

        Ok(object_id)
    }
}
