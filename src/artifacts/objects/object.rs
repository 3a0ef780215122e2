use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;
use std::io::{BufRead, Cursor};
use std::path::PathBuf;

/// Failure to parse canonical object bytes
///
/// Carries no object ID; the object store wraps it into
/// [`crate::Error::CorruptObject`] together with the hash it was reading.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct DecodeError(String);

impl DecodeError {
    pub fn new(reason: impl Into<String>) -> Self {
        DecodeError(reason.into())
    }
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError(err.to_string())
    }
}

pub trait Packable {
    /// Canonical encoding: `"{kind} {length}\0"` followed by the payload
    fn serialize(&self) -> Bytes;
}

pub trait Unpackable {
    /// Parse a payload whose header has already been consumed
    fn deserialize(reader: impl BufRead) -> Result<Self, DecodeError>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    fn object_id(&self) -> ObjectId {
        hash_of(&self.serialize())
    }

    fn object_path(&self) -> PathBuf {
        self.object_id().to_path()
    }
}

/// Content hash of an encoded object, lower-case hex
pub fn hash_of(encoded_object: &[u8]) -> ObjectId {
    ObjectId::hash_of(encoded_object)
}

/// Prefix `payload` with its `"{kind} {length}\0"` header
pub(crate) fn with_header(object_type: ObjectType, payload: &[u8]) -> Bytes {
    let header = object_type.header(payload.len());

    let mut object_bytes = Vec::with_capacity(header.len() + payload.len());
    object_bytes.extend_from_slice(header.as_bytes());
    object_bytes.extend_from_slice(payload);

    Bytes::from(object_bytes)
}

#[derive(Debug)]
pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    /// Parse a full encoded object, validating the declared length
    pub fn decode(encoded_object: &[u8]) -> Result<Self, DecodeError> {
        let (object_type, payload) = split_header(encoded_object)?;
        let reader = Cursor::new(payload);

        Ok(match object_type {
            ObjectType::Blob => ObjectBox::Blob(Box::new(Blob::deserialize(reader)?)),
            ObjectType::Tree => ObjectBox::Tree(Box::new(Tree::deserialize(reader)?)),
            ObjectType::Commit => ObjectBox::Commit(Box::new(Commit::deserialize(reader)?)),
        })
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(_) => ObjectType::Blob,
            ObjectBox::Tree(_) => ObjectType::Tree,
            ObjectBox::Commit(_) => ObjectType::Commit,
        }
    }

    pub fn display(&self) -> String {
        match self {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Tree(tree) => tree.display(),
            ObjectBox::Commit(commit) => commit.display(),
        }
    }
}

/// Split an encoded object into its kind and payload
///
/// Fails when the header is malformed or the declared length does not match
/// the number of payload bytes.
pub fn split_header(encoded_object: &[u8]) -> Result<(ObjectType, &[u8]), DecodeError> {
    let mut reader = Cursor::new(encoded_object);
    let header = ObjectType::parse_object_header(&mut reader)?;

    let payload = &encoded_object[reader.position() as usize..];
    if payload.len() != header.size {
        return Err(DecodeError::new(format!(
            "declared length {} but payload has {} bytes",
            header.size,
            payload.len()
        )));
    }

    Ok((header.object_type, payload))
}

/// Drain the rest of a payload reader
pub(crate) fn read_payload(mut reader: impl BufRead) -> Result<Vec<u8>, DecodeError> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    Ok(content)
}
