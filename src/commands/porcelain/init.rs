use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "main";

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        self.create_layout()?;

        writeln!(
            self.writer(),
            "Initialized git directory at {}",
            self.path().display()
        )?;

        Ok(())
    }

    /// Create the metadata directories and, unless present, a symbolic HEAD
    pub(crate) fn create_layout(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .git/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .git/refs/heads directory")?;

        if self.refs().read_head()?.is_none() {
            self.refs()
                .set_head_symbolic(DEFAULT_BRANCH)
                .context("Failed to create initial HEAD reference")?;
        }

        Ok(())
    }
}
