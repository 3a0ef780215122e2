//! Data structures shared by the repository areas
//!
//! - `branch`: Branch names and ref paths
//! - `core`: Configuration handed to the repository
//! - `objects`: Object types (blob, tree, commit) and their encoding

pub mod branch;
pub mod core;
pub mod objects;
