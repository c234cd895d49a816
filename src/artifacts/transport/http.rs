use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::pack::PACK_SIGNATURE;
use crate::artifacts::transport::Transport;
use crate::artifacts::transport::advertisement::RefAdvertisement;
use crate::artifacts::transport::error::{TransportError, TransportResult};
use crate::artifacts::transport::pkt_line::{self, FLUSH_PKT, PktLine, PktLineReader};
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;

const UPLOAD_PACK_SERVICE: &str = "git-upload-pack";
const REQUEST_CONTENT_TYPE: &str = "application/x-git-upload-pack-request";
const RESULT_CONTENT_TYPE: &str = "application/x-git-upload-pack-result";
const USER_AGENT: &str = concat!("pit/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Smart HTTP transport against a single remote repository
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: &str) -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(HttpTransport {
            client,
            url: url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for HttpTransport {
    async fn discover_refs(&self) -> TransportResult<RefAdvertisement> {
        let url = format!("{}/info/refs?service={UPLOAD_PACK_SERVICE}", self.url);
        tracing::info!(%url, "discovering refs");

        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let advertisement = RefAdvertisement::from_pkt_lines(&body)?;
        tracing::info!(refs = advertisement.len(), "discovered refs");

        Ok(advertisement)
    }

    async fn fetch_pack(&self, want: &ObjectId) -> TransportResult<Bytes> {
        let url = format!("{}/{UPLOAD_PACK_SERVICE}", self.url);
        tracing::info!(%url, %want, "fetching pack");

        let body = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, REQUEST_CONTENT_TYPE)
            .header(ACCEPT, RESULT_CONTENT_TYPE)
            .body(upload_pack_request(want))
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let pack = strip_pack_preamble(body)?;
        tracing::info!(bytes = pack.len(), "received pack");

        Ok(pack)
    }
}

/// Body of an upload-pack request asking for `want` with no local history
pub fn upload_pack_request(want: &ObjectId) -> Vec<u8> {
    let mut body = pkt_line::encode(format!("want {want}\n").as_bytes());
    body.extend_from_slice(FLUSH_PKT);
    body.extend(pkt_line::encode(b"done\n"));
    body
}

/// Skip the pkt-lines (`NAK`, acknowledgements) that precede the raw pack
pub fn strip_pack_preamble(response: Bytes) -> TransportResult<Bytes> {
    let mut reader = PktLineReader::new(&response);

    loop {
        if reader.remaining().starts_with(PACK_SIGNATURE) {
            return Ok(response.slice(reader.position()..));
        }

        match reader.next_line()? {
            Some(PktLine::Data(data)) if data.starts_with(b"ERR ") => {
                let message = String::from_utf8_lossy(&data[4..]);
                return Err(TransportError::Protocol(format!(
                    "remote error: {}",
                    message.trim_end()
                )));
            }
            Some(_) => continue,
            None => {
                return Err(TransportError::Protocol(
                    "response does not contain a pack".into(),
                ));
            }
        }
    }
}
