use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    pub fn commit_tree(
        &mut self,
        tree: &str,
        parent: Option<&str>,
        message: &str,
    ) -> anyhow::Result<ObjectId> {
        let tree = ObjectId::try_parse(tree)?;
        let parent = parent
            .filter(|parent| !parent.is_empty())
            .map(ObjectId::try_parse)
            .transpose()?;

        let commit_id = self.create_commit(tree, parent, message)?;

        writeln!(self.writer(), "{commit_id}")?;

        Ok(commit_id)
    }

    /// Store a commit object without touching HEAD
    pub(crate) fn create_commit(
        &self,
        tree: ObjectId,
        parent: Option<ObjectId>,
        message: &str,
    ) -> anyhow::Result<ObjectId> {
        let commit = Commit::new(tree, parent, message.to_string());

        Ok(self.database().store(&commit)?)
    }
}
