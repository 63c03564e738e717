//! Tree building
//!
//! Turns the flat list of index entries into one tree object per directory.
//!
//! - `tree_builder`: arena of file and directory nodes plus the post-order
//!   writer that emits tree objects bottom-up

pub mod tree_builder;
