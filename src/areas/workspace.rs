use crate::config::IgnorePatterns;
use crate::errors::Result;
use bytes::Bytes;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Working directory rooted at the repository root
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every regular file below the root that no ignore pattern matches
    ///
    /// Paths are absolute and come back in walk order: depth-first, siblings
    /// sorted by file name. Symlinks are not followed.
    pub fn list_files(&self, ignore: &IgnorePatterns) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.path).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() || ignore.is_ignored(entry.path()) {
                continue;
            }
            files.push(entry.into_path());
        }

        Ok(files)
    }

    pub fn read_file(&self, file_path: &Path) -> Result<Bytes> {
        let content = std::fs::read(self.path.join(file_path))?;

        Ok(Bytes::from(content))
    }

    /// Raw `st_mode` bits of a file
    pub fn file_mode(&self, file_path: &Path) -> Result<u32> {
        let metadata = std::fs::metadata(self.path.join(file_path))?;

        Ok(metadata.mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn workspace_dir() -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        dir.child("b.txt").write_str("b").unwrap();
        dir.child("a/2.txt").write_str("2").unwrap();
        dir.child("a/1.txt").write_str("1").unwrap();
        dir.child(".twig/objects/ab/cdef").write_str("x").unwrap();
        dir.child("build/out.bin").write_str("o").unwrap();
        dir.child("empty").create_dir_all().unwrap();
        dir
    }

    fn relative(dir: &TempDir, files: Vec<PathBuf>) -> Vec<String> {
        files
            .into_iter()
            .map(|file| {
                file.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    #[rstest]
    fn lists_regular_files_outside_store(workspace_dir: TempDir) {
        let workspace = Workspace::new(workspace_dir.path().into());
        let ignore = IgnorePatterns::parse("").unwrap();

        let files = workspace.list_files(&ignore).unwrap();
        assert_eq!(
            relative(&workspace_dir, files),
            vec!["a/1.txt", "a/2.txt", "b.txt", "build/out.bin"]
        );
    }

    #[rstest]
    fn configured_patterns_exclude_files(workspace_dir: TempDir) {
        let workspace = Workspace::new(workspace_dir.path().into());
        let ignore = IgnorePatterns::parse("/build/\n2\\.txt").unwrap();

        let files = workspace.list_files(&ignore).unwrap();
        assert_eq!(relative(&workspace_dir, files), vec!["a/1.txt", "b.txt"]);
    }

    #[rstest]
    fn reads_bytes_and_mode(workspace_dir: TempDir) {
        let workspace = Workspace::new(workspace_dir.path().into());
        let file = workspace_dir.path().join("b.txt");

        assert_eq!(&workspace.read_file(&file).unwrap()[..], b"b");
        assert_eq!(workspace.file_mode(&file).unwrap() & 0o170000, 0o100000);
    }
}
