//! Object database
//!
//! Persists encoded objects zlib-compressed under a two-level fan-out,
//! `objects/<first 2 hex chars>/<remaining 38>`, and reads them back by hash.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, hash_of};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, IoContext, Result};
use bytes::Bytes;
use fake::rand;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

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

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).exists()
    }

    /// Store an encoded object and return its hash
    ///
    /// Writing an object that already exists is a no-op.
    pub fn put(&self, encoded_object: &[u8]) -> Result<ObjectId> {
        let object_id = hash_of(encoded_object);
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            tracing::debug!(oid = %object_id, "object already stored, skipping write");
            return Ok(object_id);
        }

        let object_dir = object_path.parent().ok_or_else(|| Error::Io {
            context: format!("invalid object path {}", object_path.display()),
            source: std::io::ErrorKind::InvalidInput.into(),
        })?;
        std::fs::create_dir_all(object_dir)
            .io_context(|| format!("unable to create object directory {}", object_dir.display()))?;

        self.write_object(&object_path, encoded_object)?;
        tracing::debug!(oid = %object_id, bytes = encoded_object.len(), "stored object");

        Ok(object_id)
    }

    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        self.put(&object.serialize())
    }

    /// Load the encoded bytes of an object
    ///
    /// Fails with [`Error::NotFound`] when nothing was stored under the hash and
    /// with [`Error::CorruptObject`] when the file does not decompress.
    pub fn get(&self, object_id: &ObjectId) -> Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());
        tracing::trace!(oid = %object_id, "loading object");

        let compressed = match std::fs::read(&object_path) {
            Ok(compressed) => compressed,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(object_id.clone()));
            }
            Err(source) => {
                return Err(Error::Io {
                    context: format!("unable to read object file {}", object_path.display()),
                    source,
                });
            }
        };

        Self::decompress(&compressed)
            .map_err(|err| Error::corrupt(object_id, format!("unable to decompress: {err}")))
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> Result<ObjectBox> {
        let encoded_object = self.get(object_id)?;

        ObjectBox::decode(&encoded_object).map_err(|err| Error::corrupt(object_id, err.to_string()))
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> Result<Option<Tree>> {
        match self.parse_object(object_id)? {
            ObjectBox::Tree(tree) => Ok(Some(*tree)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> Result<Option<Commit>> {
        match self.parse_object(object_id)? {
            ObjectBox::Commit(commit) => Ok(Some(*commit)),
            _ => Ok(None),
        }
    }

    fn write_object(&self, object_path: &Path, encoded_object: &[u8]) -> Result<()> {
        let temp_object_path = self.temp_path_for(object_path);
        let compressed = Self::compress(encoded_object)
            .io_context(|| "unable to compress object content")?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .io_context(|| format!("unable to open object file {}", temp_object_path.display()))?;

        let written = file
            .write_all(&compressed)
            .io_context(|| format!("unable to write object file {}", temp_object_path.display()))
            .and_then(|()| {
                // rename the temp file to the object file to make it atomic
                std::fs::rename(&temp_object_path, object_path).io_context(|| {
                    format!("unable to rename object file to {}", object_path.display())
                })
            });

        if written.is_err() {
            drop(file);
            if let Err(err) = std::fs::remove_file(&temp_object_path) {
                tracing::warn!(
                    path = %temp_object_path.display(),
                    error = %err,
                    "unable to remove temporary object file"
                );
            }
        }

        written
    }

    fn temp_path_for(&self, object_path: &Path) -> PathBuf {
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
