use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn write_tree(&mut self) -> anyhow::Result<()> {
        let tree_id = self
            .workspace()
            .write_tree(self.database())?
            .ok_or_else(|| anyhow::anyhow!("nothing to snapshot"))?;

        writeln!(self.writer(), "{tree_id}")?;

        Ok(())
    }
}
