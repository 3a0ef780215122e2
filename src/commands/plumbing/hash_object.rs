use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use std::path::Path;

impl Repository {
    pub fn hash_object(&self, object_path: &Path, write: bool) -> anyhow::Result<()> {
        let object_data = self.workspace().read_file(object_path)?;
        let object = Blob::new(object_data);

        let object_id = object.object_id();
        writeln!(self.writer(), "{}", object_id)?;

        if !write {
            return Ok(());
        }

        self.ensure_initialized()?;
        self.database().store(&object)?;

        Ok(())
    }
}
