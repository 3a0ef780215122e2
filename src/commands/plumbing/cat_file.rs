use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn cat_file(&self, object_id: &str) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(object_id)?;

        match self.database().parse_object(&oid)? {
            // blob content goes out byte for byte
            ObjectBox::Blob(blob) => self.writer().write_all(blob.content())?,
            ObjectBox::Tree(tree) if tree.entries().is_empty() => {}
            ObjectBox::Tree(tree) => writeln!(self.writer(), "{}", tree.display())?,
            ObjectBox::Commit(commit) => write!(self.writer(), "{}", commit.display())?,
        }

        Ok(())
    }
}
