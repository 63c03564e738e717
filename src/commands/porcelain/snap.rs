use crate::areas::repository::Repository;

impl Repository {
    pub fn snap(&mut self) -> anyhow::Result<()> {
        let entries = self.rebuild_index(true)?;

        tracing::info!(files = entries.len(), "working directory snapshotted");

        Ok(())
    }
}
