use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn update_ref(&mut self, commit: &str) -> anyhow::Result<()> {
        let commit = ObjectId::try_parse(commit)?;
        self.refs().update_latest(commit)?;

        Ok(())
    }
}
