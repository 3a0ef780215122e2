//! Porcelain commands
//!
//! - `init`: lay out a new repository
//! - `commit`: commit files from the working tree onto the current branch
//! - `log`: show first-parent history from HEAD

pub mod commit;
pub mod init;
pub mod log;
