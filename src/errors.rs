//! Error taxonomy shared by every repository area
//!
//! Low-level components fail fast with one of these kinds. Commands wrap them
//! with `anyhow` context and `main` renders the chain as a single line.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No `.twig` directory was found walking upward from the start directory
    #[error("not a twig repository (or any parent up to /): {}", .0.display())]
    StoreNotFound(PathBuf),

    #[error("repository already exists at {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// Decompression or header parsing failed for a stored object
    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: ObjectId, reason: String },

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    /// Missing and malformed index files are reported the same way
    #[error("failed to parse index: {0}")]
    IndexCorrupt(String),

    #[error("unmanaged file: {}", .0.display())]
    UnmanagedFile(PathBuf),

    #[error("failed to parse HEAD: {0}")]
    HeadCorrupt(String),

    #[error("invalid ignore pattern: {0}")]
    InvalidIgnorePattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
