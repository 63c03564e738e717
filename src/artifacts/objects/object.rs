use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use std::io::{self, BufRead, Write};

pub trait Packable {
    fn serialize(&self) -> io::Result<Bytes>;
}

pub trait Unpackable {
    /// Decode from a reader positioned just past the object header
    fn deserialize(reader: impl BufRead) -> io::Result<Self>
    where
        Self: Sized;
}

pub trait Object {
    fn object_type(&self) -> ObjectType;

    /// Content without the `<kind> <len>\0` header
    fn payload(&self) -> io::Result<Bytes>;

    fn display(&self) -> String;

    /// The exact byte sequence that is hashed and compressed
    fn serialize(&self) -> io::Result<Bytes> {
        let payload = self.payload()?;

        let mut object_bytes = Vec::with_capacity(payload.len() + 16);
        object_bytes.write_all(self.object_type().header(payload.len()).as_bytes())?;
        object_bytes.write_all(&payload)?;

        Ok(Bytes::from(object_bytes))
    }

    fn object_id(&self) -> io::Result<ObjectId> {
        Ok(ObjectId::digest(&self.serialize()?))
    }
}

/// Undecoded object as returned by the object store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
    pub object_type: ObjectType,
    pub payload: Bytes,
}

impl RawObject {
    pub fn new(object_type: ObjectType, payload: impl Into<Bytes>) -> Self {
        RawObject {
            object_type,
            payload: payload.into(),
        }
    }

    /// Decode the payload as a concrete object kind
    pub fn decode<T: Unpackable>(&self) -> io::Result<T> {
        T::deserialize(io::Cursor::new(self.payload.clone()))
    }
}

impl Object for RawObject {
    fn object_type(&self) -> ObjectType {
        self.object_type
    }

    fn payload(&self) -> io::Result<Bytes> {
        Ok(self.payload.clone())
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

pub(crate) fn invalid_data(reason: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, reason.into())
}
