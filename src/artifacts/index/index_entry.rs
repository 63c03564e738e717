//! Index entry representation
//!
//! Each entry records one tracked file: its mode bits, the address of the blob
//! holding its content and its path as discovered.

use crate::artifacts::index::{ENTRY_FIXED_SIZE, padding_len};
use crate::artifacts::objects::object::{Packable, Unpackable, invalid_data};
use crate::artifacts::objects::object_id::ObjectId;
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::ffi::OsStr;
use std::io::{self, BufRead, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// File mode bits as reported by the filesystem
    pub mode: u32,
    /// Address of the blob holding the file content
    pub oid: ObjectId,
    pub path: PathBuf,
}

impl Packable for IndexEntry {
    fn serialize(&self) -> io::Result<Bytes> {
        let path_bytes = self.path.as_os_str().as_bytes();
        if path_bytes.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty path in index entry",
            ));
        }
        let path_len = u16::try_from(path_bytes.len()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path too long for index: {}", self.path.display()),
            )
        })?;
        let padding = padding_len(path_bytes.len());

        let mut entry_bytes = Vec::with_capacity(ENTRY_FIXED_SIZE + path_bytes.len() + padding);
        entry_bytes.write_u32::<NetworkEndian>(self.mode)?;
        self.oid.write_h40_to(&mut entry_bytes)?;
        entry_bytes.write_u16::<NetworkEndian>(path_len)?;
        entry_bytes.write_all(path_bytes)?;
        entry_bytes.resize(entry_bytes.len() + padding, 0);

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(mut reader: impl BufRead) -> io::Result<Self> {
        let mode = reader.read_u32::<NetworkEndian>()?;
        let oid = ObjectId::read_h40_from(&mut reader)?;
        let path_len = reader.read_u16::<NetworkEndian>()? as usize;

        let mut path_bytes = vec![0; path_len];
        reader.read_exact(&mut path_bytes)?;
        if path_bytes.is_empty() {
            return Err(invalid_data("empty path in index entry"));
        }

        let mut padding = vec![0; padding_len(path_len)];
        reader.read_exact(&mut padding)?;

        Ok(IndexEntry {
            mode,
            oid,
            path: PathBuf::from(OsStr::from_bytes(&path_bytes)),
        })
    }
}
