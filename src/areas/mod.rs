//! Core repository components
//!
//! - `database`: Content-addressed object store for blobs, trees and commits
//! - `index`: Binary manifest of tracked files
//! - `refs`: HEAD pointer to the latest commit
//! - `repository`: Root discovery and coordination of the other areas
//! - `workspace`: Working directory file discovery

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
