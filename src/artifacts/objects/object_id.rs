//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lower-case hexadecimal strings representing SHA-1
//! hashes of an object's canonical encoding.
//!
//! ## Storage
//!
//! Objects are stored in `.vcsdir/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_LENGTH, RAW_OBJECT_ID_LENGTH};
use crate::errors::{Error, Result};
use sha1::{Digest, Sha1};
use std::io;
use std::path::PathBuf;

/// Object identifier (SHA-1 hash)
///
/// Always holds a validated, lower-cased 40-character hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Upper-case digits are accepted and normalized to lower case. Anything
    /// other than exactly 40 hex digits is rejected with [`Error::InvalidHash`].
    pub fn try_parse(id: impl AsRef<str>) -> Result<Self> {
        let id = id.as_ref();
        if id.len() != OBJECT_ID_LENGTH || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidHash(id.to_string()));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Hash an encoded object
    ///
    /// Pure function of `encoded`: identical bytes always yield the same ID.
    pub fn hash_of(encoded: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(encoded);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Write the object ID in binary format (20 bytes)
    ///
    /// Used for tree entries, which reference their targets by raw hash bytes
    /// rather than hex text.
    pub fn write_h40_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_raw_bytes())
    }

    /// Read an object ID from binary format (20 bytes)
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        let mut raw = [0u8; RAW_OBJECT_ID_LENGTH];
        reader.read_exact(&mut raw)?;

        Ok(Self::from_raw_bytes(raw))
    }

    pub fn from_raw_bytes(raw: [u8; RAW_OBJECT_ID_LENGTH]) -> Self {
        let hex40 = raw.iter().map(|byte| format!("{byte:02x}")).collect();
        Self(hex40)
    }

    pub fn to_raw_bytes(&self) -> [u8; RAW_OBJECT_ID_LENGTH] {
        let mut raw = [0u8; RAW_OBJECT_ID_LENGTH];
        // the string was validated on construction, every pair is hex
        for (i, byte) in raw.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&self.0[i * 2..i * 2 + 2], 16).unwrap_or_default();
        }
        raw
    }

    /// Convert to the fan-out path used by the object store
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> &str {
        &self.0[..7]
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
