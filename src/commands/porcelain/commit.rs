use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Commit the current index on top of the latest commit and advance HEAD
    ///
    /// Not atomic: a failure after the commit object is stored leaves HEAD
    /// where it was.
    pub fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        let tree_id = self.build_tree()?;

        let parent = self.refs().read_latest()?;
        let commit_id = self.create_commit(tree_id, parent.clone(), message)?;
        self.refs().update_latest(commit_id.clone())?;

        tracing::info!(commit = %commit_id, parent = ?parent, "commit recorded");
        writeln!(self.writer(), "{commit_id}")?;

        Ok(commit_id)
    }
}
