//! Tree object
//!
//! Trees list the children of one directory: each entry carries a mode, a
//! single path segment and the child's address.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode as 6-digit octal> <name>\0<20-byte-sha1>`
//!
//! Entries are kept in the order they were added. Nothing here sorts them, so
//! the same set of children added in a different order yields a different
//! address.

use crate::artifacts::objects::object::{Object, Unpackable, invalid_data};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::os::unix::ffi::{OsStrExt, OsStringExt};

/// Mode bits recorded for subdirectory entries (`040000`, 16384 decimal)
pub const DIRECTORY_MODE: u32 = 0o40000;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: u32,
    /// Raw file name bytes, never re-encoded
    #[new(into)]
    pub name: OsString,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn is_tree(&self) -> bool {
        self.mode & 0o170000 == DIRECTORY_MODE
    }

    fn object_type(&self) -> ObjectType {
        if self.is_tree() {
            ObjectType::Tree
        } else {
            ObjectType::Blob
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn push(&mut self, entry: TreeEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

}

impl FromIterator<TreeEntry> for Tree {
    fn from_iter<I: IntoIterator<Item = TreeEntry>>(iter: I) -> Self {
        Tree {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Unpackable for Tree {
    fn deserialize(mut reader: impl BufRead) -> io::Result<Self> {
        let mut entries = Vec::new();

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break;
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(invalid_data("unexpected EOF in tree entry mode"));
            }
            let mode = std::str::from_utf8(&mode_bytes)
                .ok()
                .and_then(|mode| u32::from_str_radix(mode, 8).ok())
                .ok_or_else(|| invalid_data("invalid tree entry mode"))?;

            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(invalid_data("unexpected EOF in tree entry name"));
            }
            if name_bytes.is_empty() {
                return Err(invalid_data("empty tree entry name"));
            }
            let name = OsString::from_vec(name_bytes.clone());

            let oid = ObjectId::read_h40_from(&mut reader)
                .map_err(|_| invalid_data("unexpected EOF in tree entry object id"))?;

            entries.push(TreeEntry::new(mode, name, oid));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn payload(&self) -> io::Result<Bytes> {
        let mut content_bytes = Vec::new();

        for entry in &self.entries {
            write!(content_bytes, "{:06o} ", entry.mode)?;
            content_bytes.extend_from_slice(entry.name.as_bytes());
            content_bytes.push(0);
            entry.oid.write_h40_to(&mut content_bytes)?;
        }

        Ok(Bytes::from(content_bytes))
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{:06o} {} {}\t{}",
                    entry.mode,
                    entry.object_type(),
                    entry.oid,
                    entry.name.to_string_lossy()
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::blob::Blob;
    use crate::artifacts::objects::object::RawObject;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn blob_oid() -> ObjectId {
        Blob::new(&b"one"[..]).object_id().unwrap()
    }

    #[rstest]
    fn entry_payload_layout(blob_oid: ObjectId) {
        let tree: Tree = [TreeEntry::new(0o100644, "a.txt".to_string(), blob_oid.clone())]
            .into_iter()
            .collect();

        let payload = tree.payload().unwrap();
        assert_eq!(&payload[..13], b"100644 a.txt\0");
        assert_eq!(payload.len(), 13 + 20);

        let mut raw_oid = Vec::new();
        blob_oid.write_h40_to(&mut raw_oid).unwrap();
        assert_eq!(&payload[13..], &raw_oid[..]);
    }

    #[rstest]
    fn directory_mode_is_zero_padded(blob_oid: ObjectId) {
        let tree: Tree = [TreeEntry::new(DIRECTORY_MODE, "src".to_string(), blob_oid)]
            .into_iter()
            .collect();

        assert!(tree.payload().unwrap().starts_with(b"040000 src\0"));
        assert!(tree.entries()[0].is_tree());
    }

    #[rstest]
    fn decodes_what_it_encodes(blob_oid: ObjectId) {
        let tree: Tree = [
            TreeEntry::new(0o100755, "run.sh".to_string(), blob_oid.clone()),
            TreeEntry::new(DIRECTORY_MODE, "lib".to_string(), blob_oid),
        ]
        .into_iter()
        .collect();

        let raw = RawObject::new(ObjectType::Tree, tree.payload().unwrap());
        assert_eq!(raw.decode::<Tree>().unwrap(), tree);
    }

    #[rstest]
    fn entry_order_changes_address(blob_oid: ObjectId) {
        let a = TreeEntry::new(0o100644, "a".to_string(), blob_oid.clone());
        let b = TreeEntry::new(0o100644, "b".to_string(), blob_oid);

        let forward: Tree = [a.clone(), b.clone()].into_iter().collect();
        let backward: Tree = [b, a].into_iter().collect();

        assert_ne!(
            forward.object_id().unwrap(),
            backward.object_id().unwrap()
        );
    }

    #[rstest]
    fn non_utf8_names_are_kept_byte_exact(blob_oid: ObjectId) {
        let acute = OsString::from_vec(b"caf\xe9".to_vec());
        let grave = OsString::from_vec(b"caf\xe8".to_vec());
        let tree: Tree = [
            TreeEntry::new(0o100644, acute.clone(), blob_oid.clone()),
            TreeEntry::new(0o100644, grave.clone(), blob_oid),
        ]
        .into_iter()
        .collect();

        let payload = tree.payload().unwrap();
        assert_eq!(&payload[..12], b"100644 caf\xe9\0");
        assert_eq!(&payload[32..44], b"100644 caf\xe8\0");

        let decoded = RawObject::new(ObjectType::Tree, payload).decode::<Tree>().unwrap();
        assert_eq!(decoded.entries()[0].name, acute);
        assert_eq!(decoded.entries()[1].name, grave);
    }

    #[test]
    fn truncated_object_id_is_rejected() {
        let raw = RawObject::new(ObjectType::Tree, &b"100644 a\0\x01\x02"[..]);
        assert!(raw.decode::<Tree>().is_err());
    }
}
