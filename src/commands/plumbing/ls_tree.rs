use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use std::io::{Cursor, Write};

impl Repository {
    pub fn ls_tree(&mut self, object_id: &str, name_only: bool) -> anyhow::Result<()> {
        let (object_type, content) = self.load_object(object_id)?.into_parts();
        if object_type != ObjectType::Tree {
            anyhow::bail!("{object_id} is a {object_type}, not a tree object");
        }

        let tree = Tree::deserialize(Cursor::new(content))?;
        for entry in tree.entries() {
            if name_only {
                writeln!(self.writer(), "{}", entry.name)?;
            } else {
                writeln!(self.writer(), "{}", entry.display())?;
            }
        }

        Ok(())
    }
}
