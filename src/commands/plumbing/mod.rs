//! Plumbing commands
//!
//! - `hash-object`: compute a blob ID and optionally store the blob
//! - `cat-file`: pretty-print a stored object
//! - `ls-tree`: list the entries of a tree, or of a commit's tree

pub mod cat_file;
pub mod hash_object;
pub mod ls_tree;
