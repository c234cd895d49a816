use crate::areas::repository::Repository;
use crate::artifacts::database::error::StoreError;
use crate::artifacts::objects::object::RawObject;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use std::io::{Cursor, Write};

impl Repository {
    pub fn cat_file(&mut self, object_id: &str) -> anyhow::Result<()> {
        let (object_type, content) = self.load_object(object_id)?.into_parts();

        match object_type {
            ObjectType::Tree => {
                let tree = Tree::deserialize(Cursor::new(content))?;
                for entry in tree.entries() {
                    writeln!(self.writer(), "{}", entry.display())?;
                }
            }
            _ => self.writer().write_all(&content)?,
        }

        Ok(())
    }

    /// Resolve a user supplied object name to a stored object
    pub(crate) fn load_object(&self, object_id: &str) -> anyhow::Result<RawObject> {
        let invalid_name = || anyhow::anyhow!("Not a valid object name {object_id}");

        let oid = ObjectId::try_parse(object_id).map_err(|_| invalid_name())?;
        match self.database().get(&oid) {
            Ok(object) => Ok(object),
            Err(StoreError::ObjectNotFound(_)) => Err(invalid_name()),
            Err(e) => Err(e.into()),
        }
    }
}
