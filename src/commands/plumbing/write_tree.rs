use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::tree::tree_builder::TreeBuilder;
use std::io::Write;

impl Repository {
    pub fn write_tree(&mut self) -> anyhow::Result<ObjectId> {
        let tree_id = self.build_tree()?;

        writeln!(self.writer(), "{tree_id}")?;

        Ok(tree_id)
    }

    /// Store one tree per tracked directory and return the root tree address
    pub(crate) fn build_tree(&self) -> anyhow::Result<ObjectId> {
        let entries = self.index().load()?;

        let mut builder = TreeBuilder::new(self.path(), &entries)?;
        let tree_id = builder.build(&mut |tree: &Tree| self.database().store(tree))?;

        tracing::info!(root = %tree_id, nodes = builder.node_count(), "tree written");

        Ok(tree_id)
    }
}
