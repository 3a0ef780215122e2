//! Error types for the object store, ref store and commit builder
//!
//! Every failure is surfaced to the immediate caller. Nothing in the library
//! retries on its own, deciding whether a failure is fatal is left to the caller.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Stable classification of [`Error`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotARepository,
    NotFound,
    CorruptObject,
    InvalidHash,
    InvalidRef,
    InvalidPath,
    ConcurrentUpdate,
    Io,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HEAD or a required directory is missing
    #[error("not a repository: {}", path.display())]
    NotARepository { path: PathBuf },
    /// The requested object was never written to the store
    #[error("object {0} not found")]
    NotFound(ObjectId),
    /// Stored bytes failed to decompress or to parse back into an object
    #[error("object {oid} is corrupt: {reason}")]
    CorruptObject { oid: String, reason: String },
    /// A hash string that is not 40 hex characters
    #[error("invalid object hash: {0:?}")]
    InvalidHash(String),
    #[error("invalid ref: {0}")]
    InvalidRef(String),
    #[error("invalid path: {0:?}")]
    InvalidPath(String),
    /// The branch file changed between reading the parent and writing the new tip
    #[error("ref {ref_name} was updated concurrently: expected {}, found {}", display_tip(.expected), display_tip(.actual))]
    ConcurrentUpdate {
        ref_name: String,
        expected: Option<ObjectId>,
        actual: Option<ObjectId>,
    },
    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

fn display_tip(tip: &Option<ObjectId>) -> String {
    match tip {
        Some(oid) => oid.to_string(),
        None => "unborn".to_string(),
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotARepository { .. } => ErrorKind::NotARepository,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::CorruptObject { .. } => ErrorKind::CorruptObject,
            Error::InvalidHash(_) => ErrorKind::InvalidHash,
            Error::InvalidRef(_) => ErrorKind::InvalidRef,
            Error::InvalidPath(_) => ErrorKind::InvalidPath,
            Error::ConcurrentUpdate { .. } => ErrorKind::ConcurrentUpdate,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn corrupt(oid: impl ToString, reason: impl Into<String>) -> Self {
        Error::CorruptObject {
            oid: oid.to_string(),
            reason: reason.into(),
        }
    }
}

/// Attach a description of the attempted operation to an I/O failure
pub(crate) trait IoContext<T> {
    fn io_context<F, S>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context<F, S>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| Error::Io {
            context: context().into(),
            source,
        })
    }
}
