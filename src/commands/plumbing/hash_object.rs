use crate::areas::database::Database;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn hash_object(&mut self, object_path: &str, write: bool) -> anyhow::Result<()> {
        let content = self
            .workspace()
            .read_file(object_path.as_ref())
            .with_context(|| format!("could not open '{object_path}' for reading"))?;

        // write (if write is true) as compressed object file
        let object_id = if write {
            self.database().put(ObjectType::Blob, content)?
        } else {
            Database::compute_id(ObjectType::Blob, &content)
        };

        writeln!(self.writer(), "{object_id}")?;

        Ok(())
    }
}
