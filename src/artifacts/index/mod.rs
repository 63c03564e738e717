//! Index file format
//!
//! The index lists every tracked file with its mode, blob address and path,
//! in discovery order.
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version: 1 (4 bytes, big-endian)
//!   - Entry count (4 bytes, big-endian)
//!
//! Entries (variable length):
//!   - Mode (4 bytes, big-endian)
//!   - Blob address (20 raw bytes)
//!   - Path length (2 bytes, big-endian)
//!   - Path bytes
//!   - 1 to 8 NUL padding bytes
//! ```
//!
//! There is no trailing checksum.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::io::Cursor;

pub mod index_entry;
pub mod index_header;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying index files
pub const SIGNATURE: &[u8; 4] = b"DIRC";

/// Index file format version
pub const VERSION: u32 = 1;

/// Block size for entry alignment
pub const ENTRY_BLOCK: usize = 8;

/// Mode, blob address and path length fields
pub const ENTRY_FIXED_SIZE: usize = 4 + 20 + 2;

/// Number of NUL bytes written after an entry whose path is `path_len` bytes
///
/// Always between 1 and 8: an entry that already ends on a block boundary
/// still receives a full block of padding.
pub fn padding_len(path_len: usize) -> usize {
    ENTRY_BLOCK - (ENTRY_FIXED_SIZE + path_len) % ENTRY_BLOCK
}

/// Encode a complete index file
pub fn serialize_entries(entries: &[IndexEntry]) -> Result<Bytes> {
    let entries_count = u32::try_from(entries.len())
        .map_err(|_| Error::IndexCorrupt("too many entries".to_string()))?;

    let mut bytes = IndexHeader::new(*SIGNATURE, VERSION, entries_count)
        .serialize()?
        .to_vec();
    for entry in entries {
        bytes.extend_from_slice(&entry.serialize()?);
    }

    Ok(Bytes::from(bytes))
}

/// Decode a complete index file, validating the header
pub fn deserialize_entries(bytes: &[u8]) -> Result<Vec<IndexEntry>> {
    let mut reader = Cursor::new(bytes);

    let header = IndexHeader::deserialize(&mut reader)
        .map_err(|e| Error::IndexCorrupt(format!("invalid header: {e}")))?;
    if &header.marker != SIGNATURE {
        return Err(Error::IndexCorrupt("invalid signature".to_string()));
    }
    if header.version != VERSION {
        return Err(Error::IndexCorrupt(format!(
            "unsupported version {}",
            header.version
        )));
    }

    (0..header.entries_count)
        .map(|n| {
            IndexEntry::deserialize(&mut reader)
                .map_err(|e| Error::IndexCorrupt(format!("entry {n}: {e}")))
        })
        .collect()
}
