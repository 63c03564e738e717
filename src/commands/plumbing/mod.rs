//! Plumbing commands
//!
//! - `hash-object`: Store a file as a blob and print its address
//! - `cat-file`: Print a stored object
//! - `ls-files`: List index content
//! - `update-index`: Rebuild the index from the working directory
//! - `write-tree`: Build tree objects from the index
//! - `commit-tree`: Create a commit object for a tree
//! - `update-ref`: Point HEAD at a commit

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_files;
pub mod update_index;
pub mod update_ref;
pub mod write_tree;
