//! Blob object
//!
//! Blobs store raw file content. They carry no metadata: names and modes live
//! in the trees that reference them.
//!
//! ## Format
//!
//! `blob <size>\0<content>`

use crate::artifacts::objects::object::{
    DecodeError, Object, Packable, Unpackable, read_payload, with_header,
};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Encode raw file content as a blob object
///
/// Accepts arbitrary bytes, including the empty sequence.
pub fn encode_blob(data: &[u8]) -> Bytes {
    with_header(ObjectType::Blob, data)
}

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

impl Packable for Blob {
    fn serialize(&self) -> Bytes {
        encode_blob(&self.content)
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> Result<Self, DecodeError> {
        Ok(Self::new(read_payload(reader)?))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}
