use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn commit_tree(
        &mut self,
        tree: &str,
        parents: &[String],
        message: &str,
    ) -> anyhow::Result<()> {
        let (object_type, _) = self.load_object(tree)?.into_parts();
        if object_type != ObjectType::Tree {
            anyhow::bail!("{tree} is a {object_type}, not a tree object");
        }
        let tree_oid = ObjectId::try_parse(tree)?;

        let parents = parents
            .iter()
            .map(|parent| -> anyhow::Result<ObjectId> {
                self.load_object(parent)?;
                Ok(ObjectId::try_parse(parent.as_str())?)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let author = Author::load_from_env().context("unable to determine commit identity")?;
        let commit = Commit::new(parents, tree_oid, author, message.trim_end().to_string());
        let commit_id = self.database().store(&commit)?;

        writeln!(self.writer(), "{commit_id}")?;

        Ok(())
    }
}
