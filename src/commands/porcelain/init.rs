use crate::areas::repository::Repository;
use crate::errors::Error;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        let store_path = self.store_path();
        if store_path.exists() {
            return Err(Error::AlreadyInitialized(store_path).into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .twig/objects directory")?;

        writeln!(
            self.writer(),
            "Initialized empty twig repository in {}",
            store_path.display()
        )?;

        Ok(())
    }
}
