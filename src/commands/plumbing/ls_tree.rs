use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;

impl Repository {
    /// List a tree's entries; a commit (or HEAD) lists the tree it points to
    pub fn ls_tree(&self, object_sha: &str, recursive: bool) -> anyhow::Result<()> {
        let oid = if object_sha == HEAD_REF_NAME {
            self.refs()
                .read_head_commit()?
                .context("HEAD does not point to a commit yet")?
        } else {
            ObjectId::try_parse(object_sha)?
        };

        let tree_oid = match self.database().parse_object(&oid)? {
            ObjectBox::Commit(commit) => commit.tree_oid().clone(),
            ObjectBox::Tree(_) => oid,
            ObjectBox::Blob(_) => anyhow::bail!("{} is not a tree object", oid),
        };

        self.list_tree(&tree_oid, None, recursive)
    }

    fn list_tree(&self, oid: &ObjectId, prefix: Option<&str>, recursive: bool) -> anyhow::Result<()> {
        let tree = self
            .database()
            .parse_object_as_tree(oid)?
            .with_context(|| format!("{} is not a tree object", oid))?;

        for entry in tree.into_entries() {
            let path = match prefix {
                Some(prefix) => format!("{prefix}/{}", entry.name),
                None => entry.name.clone(),
            };

            if recursive && entry.mode.is_tree() {
                self.list_tree(&entry.oid, Some(&path), recursive)?;
            } else {
                writeln!(
                    self.writer(),
                    "{:0>6} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.object_type(),
                    entry.oid,
                    path
                )?;
            }
        }

        Ok(())
    }
}
