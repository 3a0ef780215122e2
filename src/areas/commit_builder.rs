//! Turning a set of files into a commit on the current branch
//!
//! Steps, in order:
//! 1. store every file's content as a blob
//! 2. store the tree (or trees, in the nested layout) referencing those blobs
//! 3. resolve the parent from the branch HEAD points to
//! 4. store the commit
//! 5. advance the branch, provided it still holds the parent read in step 3
//!
//! The branch is only touched once every object is stored, so a failure in
//! steps 1-4 leaves it where it was.

use crate::areas::repository::Repository;
use crate::artifacts::core::config::CommitConfig;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::objects::tree_builder::TreeBuilder;
use crate::errors::Result;
use bytes::Bytes;

/// One file handed to [`Repository::commit_files`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFile {
    pub path: String,
    pub mode: FileMode,
    pub content: Bytes,
}

impl CommitFile {
    pub fn new(path: impl Into<String>, mode: FileMode, content: impl Into<Bytes>) -> Self {
        CommitFile {
            path: path.into(),
            mode,
            content: content.into(),
        }
    }
}

/// A `(path, content)` pair is a regular file
impl<P, C> From<(P, C)> for CommitFile
where
    P: Into<String>,
    C: AsRef<[u8]>,
{
    fn from((path, content): (P, C)) -> Self {
        CommitFile::new(path, FileMode::Regular, Bytes::copy_from_slice(content.as_ref()))
    }
}

impl Repository {
    /// Commit `files` onto the branch HEAD points to and return the new commit's ID
    ///
    /// An empty file list produces a commit of the empty tree. When the branch
    /// moved while the commit was being built, [`crate::Error::ConcurrentUpdate`]
    /// is returned; the objects already written stay in the store and the
    /// caller may retry.
    pub fn commit_files<I, F>(&self, files: I, message: &str, config: &CommitConfig) -> Result<ObjectId>
    where
        I: IntoIterator<Item = F>,
        F: Into<CommitFile>,
    {
        self.ensure_initialized()?;

        let mut stored = Vec::new();
        for file in files {
            let file = file.into();
            let oid = self.database().store(&Blob::new(file.content))?;
            tracing::trace!(path = %file.path, oid = %oid, "stored blob");
            stored.push((file.path, EntryMode::from(file.mode), oid));
        }

        let tree_oid = self.write_tree(&stored, config)?;

        let head = self.refs().read_head()?;
        let parent = self.refs().read_ref_commit(&head)?;

        let commit = Commit::new(
            parent.clone(),
            tree_oid,
            config.author.stamp(),
            config.committer.stamp(),
            message.to_string(),
        );
        let commit_id = self.database().store(&commit)?;

        self.refs()
            .write_ref_commit(&head, parent.as_ref(), &commit_id)?;

        tracing::info!(
            branch = %head.branch_name(),
            oid = %commit_id,
            root = parent.is_none(),
            files = stored.len(),
            "created commit"
        );
        Ok(commit_id)
    }

    fn write_tree(&self, files: &[(String, EntryMode, ObjectId)], config: &CommitConfig) -> Result<ObjectId> {
        let builder = TreeBuilder::build(
            config.tree_layout,
            files
                .iter()
                .map(|(path, mode, oid)| (path.as_str(), *mode, oid.clone())),
        )?;

        let mut store_tree = |tree: &Tree| self.database().store(tree);
        builder.write(config.entry_order, &mut store_tree)
    }
}
