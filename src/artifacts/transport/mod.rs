//! Fetching refs and packs from a remote
//!
//! The decoder only ever sees a complete pack buffer. Everything needed to get
//! one lives here: the ref advertisement, the pkt-line framing of the smart
//! protocol, and the HTTP exchange itself.

pub mod advertisement;
pub mod error;
pub mod http;
pub mod pkt_line;

use crate::artifacts::objects::object_id::ObjectId;
use advertisement::RefAdvertisement;
use bytes::Bytes;
use error::TransportResult;

/// A source of refs and packs
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// List the refs the remote advertises, in advertisement order
    async fn discover_refs(&self) -> TransportResult<RefAdvertisement>;

    /// Fetch a pack holding `want` and its history, framing stripped
    async fn fetch_pack(&self, want: &ObjectId) -> TransportResult<Bytes>;
}
