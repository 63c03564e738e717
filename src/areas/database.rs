use crate::artifacts::objects::object::{Object, RawObject, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Content-addressed object store
///
/// Objects live at `<objects>/<aa>/<38 hex>` as zlib-compressed
/// `<kind> <len>\0<payload>` sequences.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Hash, compress and persist a payload of the given kind
    pub fn put(&self, object_type: ObjectType, payload: impl Into<Bytes>) -> Result<ObjectId> {
        self.store(&RawObject::new(object_type, payload))
    }

    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        let object_content = object.serialize()?;
        let object_id = ObjectId::digest(&object_content);
        let object_path = self.path.join(object_id.to_path());

        // identical content always lands on the same path with the same bytes
        if object_path.exists() {
            tracing::debug!(
                oid = %object_id,
                kind = %object.object_type(),
                "object already stored"
            );
            return Ok(object_id);
        }

        let object_dir = object_path.parent().ok_or_else(|| Error::CorruptObject {
            oid: object_id.clone(),
            reason: format!("invalid object path {}", object_path.display()),
        })?;
        std::fs::create_dir_all(object_dir)?;

        self.write_object(&object_path, object_content)?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "object written");

        Ok(object_id)
    }

    /// Read an object back as its kind and payload
    pub fn load(&self, object_id: &ObjectId) -> Result<RawObject> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.is_file() {
            return Err(Error::ObjectNotFound(object_id.clone()));
        }

        let compressed = std::fs::read(&object_path)?;
        let corrupt = |reason: String| Error::CorruptObject {
            oid: object_id.clone(),
            reason,
        };

        let object_content = Self::decompress(&compressed)
            .map_err(|e| corrupt(format!("unable to decompress: {e}")))?;
        let mut object_reader = Cursor::new(object_content);

        let (object_type, size) = ObjectType::parse_header(&mut object_reader).map_err(corrupt)?;
        let header_len = object_reader.position() as usize;
        let payload = object_reader.into_inner().slice(header_len..);

        if payload.len() != size {
            return Err(corrupt(format!(
                "header declares {size} bytes but payload has {}",
                payload.len()
            )));
        }

        Ok(RawObject::new(object_type, payload))
    }

    /// Load an object and decode it as the expected kind
    pub fn parse_object<T: Unpackable>(
        &self,
        object_id: &ObjectId,
        expected: ObjectType,
    ) -> Result<T> {
        let raw = self.load(object_id)?;
        if raw.object_type != expected {
            return Err(Error::CorruptObject {
                oid: object_id.clone(),
                reason: format!("expected {expected} but found {}", raw.object_type),
            });
        }

        raw.decode().map_err(|e| Error::CorruptObject {
            oid: object_id.clone(),
            reason: e.to_string(),
        })
    }

    fn write_object(&self, object_path: &Path, object_content: Bytes) -> Result<()> {
        let temp_object_path = Self::temp_path(object_path);
        let object_content = Self::compress(&object_content)?;

        let written = Self::write_temp(&temp_object_path, &object_content)
            .and_then(|()| std::fs::rename(&temp_object_path, object_path));

        if let Err(error) = written {
            // never leave a half-written temp file in the bucket
            if let Err(cleanup) = std::fs::remove_file(&temp_object_path) {
                tracing::debug!(
                    path = %temp_object_path.display(),
                    %cleanup,
                    "temp object not removed"
                );
            }
            return Err(error.into());
        }

        Ok(())
    }

    fn write_temp(temp_object_path: &Path, object_content: &[u8]) -> std::io::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(temp_object_path)?;
        file.write_all(object_content)
    }

    fn temp_path(object_path: &Path) -> PathBuf {
        object_path.with_file_name(format!("tmp-obj-{}", rand::random::<u32>()))
    }

    fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;
        encoder.finish()
    }

    fn decompress(data: &[u8]) -> std::io::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content.into())
    }
}
