//! Core repository components
//!
//! - `database`: Object database for storing blobs, trees, and commits
//! - `refs`: HEAD and branch tips
//! - `commit_builder`: Turning a set of files into a commit on the current branch
//! - `repository`: Repository handle binding the areas together
//! - `workspace`: Working directory file discovery

pub mod commit_builder;
pub mod database;
pub mod refs;
pub mod repository;
pub mod workspace;
