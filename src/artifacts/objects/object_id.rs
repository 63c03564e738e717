//! Object identifier (SHA-1 address)
//!
//! Object IDs are 40-character hexadecimal strings naming the SHA-1 digest of
//! an object's header-prefixed content.
//!
//! ## Storage
//!
//! Objects are stored in `.twig/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_LENGTH, OBJECT_ID_RAW_LENGTH};
use crate::errors::{Error, Result};
use sha1::{Digest, Sha1};
use std::io;
use std::path::PathBuf;

/// Content address of a stored object
///
/// Always holds exactly 40 lowercase hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Uppercase digits are accepted and normalized to lowercase.
    pub fn try_parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.len() != OBJECT_ID_LENGTH || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidObjectId(id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Hash an arbitrary byte sequence into its address
    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);
        Self::from_raw(&hasher.finalize())
    }

    fn from_raw(raw: &[u8]) -> Self {
        Self(raw.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// Write the object ID in binary format (20 bytes)
    pub fn write_h40_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&self.0[i..i + 2], 16)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Invalid hex digit"))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read an object ID from binary format (20 bytes)
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        let mut raw = [0; OBJECT_ID_RAW_LENGTH];
        reader.read_exact(&mut raw)?;

        Ok(Self::from_raw(&raw))
    }

    /// Convert to the object's path relative to the objects directory
    ///
    /// `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("e69de29bb2d1d6434b8b29ae775ad8c2e48c5391")]
    #[case("E69DE29BB2D1D6434B8B29AE775AD8C2E48C5391")]
    fn parses_full_hex_ids(#[case] raw: &str) {
        let oid = ObjectId::try_parse(raw).unwrap();
        assert_eq!(oid.as_ref(), "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391");
    }

    #[rstest]
    #[case("e69de29")]
    #[case("z69de29bb2d1d6434b8b29ae775ad8c2e48c5391")]
    #[case("")]
    fn rejects_malformed_ids(#[case] raw: &str) {
        assert!(matches!(
            ObjectId::try_parse(raw),
            Err(Error::InvalidObjectId(_))
        ));
    }

    #[test]
    fn binary_form_is_twenty_bytes_and_reads_back() {
        let oid = ObjectId::digest(b"blob 0\0");
        let mut raw = Vec::new();
        oid.write_h40_to(&mut raw).unwrap();
        assert_eq!(raw.len(), 20);

        let read = ObjectId::read_h40_from(&mut raw.as_slice()).unwrap();
        assert_eq!(read, oid);
    }

    #[test]
    fn path_splits_after_two_characters() {
        let oid = ObjectId::try_parse("e69de29bb2d1d6434b8b29ae775ad8c2e48c5391").unwrap();
        assert_eq!(
            oid.to_path(),
            PathBuf::from("e6").join("9de29bb2d1d6434b8b29ae775ad8c2e48c5391")
        );
    }
}
