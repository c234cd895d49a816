//! Git references
//!
//! References are text files under `.git`: either a 40-character object ID
//! or `ref: <path>` pointing at another reference.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Component, Path};

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

const SYMREF_PREFIX: &str = "ref: ";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.git`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    /// Point HEAD at a branch, e.g. `ref: refs/heads/main`
    pub fn set_head_symbolic(&self, branch: &str) -> anyhow::Result<()> {
        self.update_ref_file(
            self.head_path(),
            format!("{SYMREF_PREFIX}refs/heads/{branch}\n"),
        )
    }

    /// Detach HEAD at `oid`
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), format!("{oid}\n"))
    }

    /// Raw content of HEAD, without the trailing newline
    pub fn read_head(&self) -> anyhow::Result<Option<String>> {
        let head_path = self.head_path();
        if !head_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read ref file at {:?}", head_path))?;

        Ok(Some(content.trim_end().to_string()))
    }

    /// Write `oid` to the ref named `name`, relative to the metadata directory
    ///
    /// `name` is a full ref name such as `refs/heads/main` or `refs/tags/v1`.
    pub fn write_ref(&self, name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        let relative = Path::new(name);
        let is_safe = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if name.is_empty() || !is_safe {
            anyhow::bail!("invalid ref name {name:?}");
        }

        self.update_ref_file(self.path.join(relative).into_boxed_path(), format!("{oid}\n"))
    }

    pub fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        tracing::debug!(path = %path.display(), "updated ref");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    const OID: &str = "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0";

    #[fixture]
    fn refs() -> (TempDir, Refs) {
        let dir = TempDir::new().unwrap();
        let refs = Refs::new(dir.path().join(".git").into_boxed_path());
        (dir, refs)
    }

    #[rstest]
    fn head_can_be_symbolic_or_detached(refs: (TempDir, Refs)) {
        let (_dir, refs) = refs;
        assert_eq!(refs.read_head().unwrap(), None);

        refs.set_head_symbolic("main").unwrap();
        assert_eq!(refs.read_head().unwrap().as_deref(), Some("ref: refs/heads/main"));

        refs.update_head(&ObjectId::try_parse(OID).unwrap()).unwrap();
        assert_eq!(refs.read_head().unwrap().as_deref(), Some(OID));
    }

    #[rstest]
    fn nested_refs_create_their_directories(refs: (TempDir, Refs)) {
        let (dir, refs) = refs;

        refs.write_ref("refs/heads/feature/x", &ObjectId::try_parse(OID).unwrap())
            .unwrap();

        let content =
            std::fs::read_to_string(dir.path().join(".git/refs/heads/feature/x")).unwrap();
        assert_eq!(content, format!("{OID}\n"));
    }

    #[rstest]
    #[case("")]
    #[case("../escape")]
    #[case("/etc/passwd")]
    #[case("refs/heads/../../../outside")]
    fn unsafe_ref_names_are_rejected(refs: (TempDir, Refs), #[case] name: &str) {
        let (_dir, refs) = refs;
        assert!(refs.write_ref(name, &ObjectId::try_parse(OID).unwrap()).is_err());
    }
}
