//! Porcelain commands
//!
//! - `init`: Create a new store in the current directory
//! - `snap`: Store every working file as a blob and rebuild the index
//! - `commit`: Commit the current index and advance HEAD

pub mod commit;
pub mod init;
pub mod snap;
