//! Blob object
//!
//! Blobs store raw file content with no name or permission metadata; those
//! live in the index and in trees.
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::{self, BufRead};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    #[new(into)]
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> io::Result<Self> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Self::new(content))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn payload(&self) -> io::Result<Bytes> {
        Ok(self.content.clone())
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_with_blob_header() {
        let blob = Blob::new(&b"hello"[..]);
        assert_eq!(&blob.serialize().unwrap()[..], b"blob 5\0hello");
    }

    #[test]
    fn matches_git_address_for_same_content() {
        // `printf 'hello\n' | git hash-object --stdin`
        let blob = Blob::new(&b"hello\n"[..]);
        assert_eq!(
            blob.object_id().unwrap().as_ref(),
            "ce013625030ba8dba906f756967f9e9ca394464a"
        );
    }
}
