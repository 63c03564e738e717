use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use twig::artifacts::index::index_entry::IndexEntry;
use twig::artifacts::index::serialize_entries;
use twig::artifacts::objects::object_id::ObjectId;

mod common;

use common::{
    EMPTY_BLOB, EMPTY_TREE, populated_repository_dir, repository_dir, run_twig_command,
    twig_stdout,
};

const ROOT_TREE: &str = "dcb9e7622cc0594ef16a2c8af210d4e80518af82";
const A_TREE: &str = "f56d0ea3473da642f9cd0caa2a19916192dbde4a";
const B_TREE: &str = "d864f7793fd2952c217c27d3780442f8943c8663";

#[rstest]
fn write_tree_prints_root_address(populated_repository_dir: TempDir) {
    let dir = populated_repository_dir;
    run_twig_command(dir.path(), &["snap"]).assert().success();

    assert_eq!(twig_stdout(dir.path(), &["write-tree"]), ROOT_TREE);
    assert_eq!(twig_stdout(dir.path(), &["write-tree"]), ROOT_TREE);
}

#[rstest]
fn every_directory_becomes_a_tree(populated_repository_dir: TempDir) {
    let dir = populated_repository_dir;
    run_twig_command(dir.path(), &["snap"]).assert().success();
    run_twig_command(dir.path(), &["write-tree"]).assert().success();

    let root_listing = twig_stdout(dir.path(), &["cat-file", ROOT_TREE]);
    assert_eq!(
        root_listing,
        format!(
            "100644 blob 43dd47ea691c90a5fa7827892c70241913351963\t1.txt\n\
             040000 tree {A_TREE}\ta"
        )
    );

    let a_listing = twig_stdout(dir.path(), &["cat-file", A_TREE]);
    assert!(a_listing.ends_with(&format!("040000 tree {B_TREE}\tb")));

    run_twig_command(dir.path(), &["cat-file", "-t", B_TREE])
        .assert()
        .success()
        .stdout(predicate::eq("tree\n"));
}

#[rstest]
fn changed_content_changes_root_address(populated_repository_dir: TempDir) {
    let dir = populated_repository_dir;
    run_twig_command(dir.path(), &["snap"]).assert().success();
    let before = twig_stdout(dir.path(), &["write-tree"]);

    dir.child("a/b/3.txt").write_str("THREE").unwrap();
    run_twig_command(dir.path(), &["snap"]).assert().success();
    let after = twig_stdout(dir.path(), &["write-tree"]);

    assert_ne!(before, after);
}

#[rstest]
fn empty_index_writes_empty_tree(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["snap"])
        .assert()
        .success();

    assert_eq!(twig_stdout(repository_dir.path(), &["write-tree"]), EMPTY_TREE);
    run_twig_command(repository_dir.path(), &["cat-file", EMPTY_TREE])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[rstest]
fn write_tree_without_index_fails(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["write-tree"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse index"));
}

#[rstest]
fn file_outside_repository_is_unmanaged(repository_dir: TempDir) {
    let outside = TempDir::new().unwrap();
    let entry = IndexEntry::new(
        0o100644,
        ObjectId::try_parse(EMPTY_BLOB).unwrap(),
        outside.path().join("stray.txt"),
    );
    repository_dir
        .child(".twig/index")
        .write_binary(&serialize_entries(&[entry]).unwrap())
        .unwrap();

    run_twig_command(repository_dir.path(), &["write-tree"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unmanaged file"));

    let objects = repository_dir.path().join(".twig/objects");
    assert_eq!(std::fs::read_dir(objects).unwrap().count(), 0);
}
