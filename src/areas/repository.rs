use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::config::{HEAD_FILE, INDEX_FILE, OBJECTS_DIR, STORE_DIR};
use crate::errors::{Error, Result};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Index,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open the repository rooted at `path`, whether or not it is initialized
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let path = path.canonicalize()?;
        let store_path = path.join(STORE_DIR);

        let index = Index::new(store_path.join(INDEX_FILE).into_boxed_path());
        let database = Database::new(store_path.join(OBJECTS_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(store_path.join(HEAD_FILE).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index,
            database,
            workspace,
            refs,
        })
    }

    /// Open the nearest repository at or above `start`
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let root = Self::find_root(start)?;
        tracing::debug!(root = %root.display(), "repository found");

        Self::new(&root, writer)
    }

    /// Walk upward from `start` until a directory containing `.twig` is found
    pub fn find_root(start: &Path) -> Result<PathBuf> {
        let start = start.canonicalize()?;

        start
            .ancestors()
            .find(|dir| dir.join(STORE_DIR).is_dir())
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::StoreNotFound(start.clone()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store_path(&self) -> PathBuf {
        self.path.join(STORE_DIR)
    }

    pub fn writer(&self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
