//! A small content-addressed object store and commit-graph builder
//!
//! Objects (blobs, trees, commits) are encoded canonically, identified by the
//! SHA-1 of that encoding and stored zlib-compressed under `.vcsdir/objects`.
//! A branch file under `.vcsdir/refs/heads` tracks the newest commit, and HEAD
//! names the active branch.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use areas::commit_builder::CommitFile;
pub use areas::repository::Repository;
pub use artifacts::core::config::{CommitConfig, EntryOrder, Identity, InitOptions, TreeLayout};
pub use artifacts::objects::object_id::ObjectId;
pub use errors::{Error, ErrorKind, Result};
