#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use rstest::fixture;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

pub const EMPTY_BLOB: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";
pub const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.current_dir(dir).args(args).env("NO_COLOR", "1");
    cmd
}

/// Run a command that must succeed and return its trimmed stdout
pub fn twig_stdout(dir: &Path, args: &[&str]) -> String {
    let output = run_twig_command(dir, args).assert().success().get_output().clone();

    String::from_utf8(output.stdout)
        .expect("stdout is not UTF-8")
        .trim_end()
        .to_string()
}

pub fn write_file(dir: &TempDir, path: &str, content: &str) {
    let file = dir.child(path);
    file.write_str(content).expect("Failed to write file");
    std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o644))
        .expect("Failed to set permissions");
}

pub fn canonical(dir: &TempDir) -> String {
    dir.path()
        .canonicalize()
        .expect("Failed to canonicalize temp dir")
        .display()
        .to_string()
}

#[fixture]
pub fn repository_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    run_twig_command(dir.path(), &["init"]).assert().success();
    dir
}

/// Repository with three files spread over nested directories
#[fixture]
pub fn populated_repository_dir(repository_dir: TempDir) -> TempDir {
    write_file(&repository_dir, "1.txt", "one");
    write_file(&repository_dir, "a/2.txt", "two");
    write_file(&repository_dir, "a/b/3.txt", "three");
    repository_dir
}
