//! Object types and their canonical encoding
//!
//! All content is stored as objects identified by the SHA-1 hash of their
//! encoding. There are three types:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata (tree, optional parent, author, committer, message)
//!
//! Every encoding has the form `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;
pub mod tree_builder;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
/// Length of a SHA-1 hash in raw bytes, as stored in tree entries
pub const RAW_OBJECT_ID_LENGTH: usize = 20;
