//! Command implementations
//!
//! - `plumbing`: Low-level operations on objects, the index and HEAD
//! - `porcelain`: User-facing workflows composed from plumbing
//!
//! Every command is an `impl Repository` block writing its output through
//! `Repository::writer`.

pub mod plumbing;
pub mod porcelain;
