//! Command implementations behind the `tinybit` binary
//!
//! - `plumbing`: direct object access (hash-object, cat-file, ls-tree)
//! - `porcelain`: repository workflows (init, commit, log)
//!
//! Commands are `impl Repository` blocks that write their output through
//! [`crate::Repository::writer`] and report failures as `anyhow` errors.

pub mod plumbing;
pub mod porcelain;
