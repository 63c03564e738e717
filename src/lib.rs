//! A minimal content-addressed version-control core.
//!
//! Files are stored as compressed, SHA-1 addressed objects; a binary index
//! lists the tracked files; trees and commits thread snapshots into a
//! parent-pointer history behind a single HEAD record.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;
