use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn ls_files(&mut self) -> anyhow::Result<()> {
        let entries = self.index().load()?;

        for entry in entries {
            writeln!(
                self.writer(),
                "{:06o} {}\t{}",
                entry.mode,
                entry.oid,
                entry.path.display()
            )?;
        }

        Ok(())
    }
}
