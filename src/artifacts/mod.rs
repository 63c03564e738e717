//! Data structures and algorithms
//!
//! - `head`: HEAD pointer record
//! - `index`: Index file format and padding rules
//! - `objects`: Object types (blob, tree, commit) and addresses
//! - `tree`: Building tree objects from the index

pub mod head;
pub mod index;
pub mod objects;
pub mod tree;
