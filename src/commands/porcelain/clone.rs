use crate::areas::repository::Repository;
use crate::artifacts::pack::decoder::PackDecoder;
use crate::artifacts::transport::Transport;
use crate::artifacts::transport::error::TransportError;
use anyhow::Context;
use std::io::Write;

const REFS_PREFIX: &str = "refs/";

impl Repository {
    /// Fetch the first advertised ref of a remote into this repository
    ///
    /// Only the first ref's history is requested. Every advertised `refs/...`
    /// name is still written, and HEAD is detached at the first ref's ID.
    pub async fn clone_repository(&mut self, transport: &impl Transport) -> anyhow::Result<()> {
        self.create_layout()?;

        let advertisement = transport
            .discover_refs()
            .await
            .context("failed to discover remote refs")?;
        let (first_ref, want) = advertisement
            .first()
            .ok_or(TransportError::RefsNotFound)?;
        tracing::info!(first_ref, %want, refs = advertisement.len(), "requesting pack");

        let pack = transport
            .fetch_pack(want)
            .await
            .with_context(|| format!("failed to fetch pack for {first_ref}"))?;

        let object_ids = PackDecoder::new(self.database())
            .decode(&pack)
            .context("failed to unpack objects")?;

        for (name, oid) in advertisement
            .iter()
            .filter(|(name, _)| name.starts_with(REFS_PREFIX))
        {
            self.refs().write_ref(name, oid)?;
        }
        self.refs().update_head(want)?;

        tracing::info!(objects = object_ids.len(), "clone finished");
        writeln!(self.writer(), "Cloning complete.")?;

        Ok(())
    }
}
