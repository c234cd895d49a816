//! pkt-line framing
//!
//! Each line is prefixed by its total length (prefix included) as four hex
//! digits. `0000` is a flush packet and `0001` a delimiter; neither carries data.

use crate::artifacts::transport::error::{TransportError, TransportResult};

pub const FLUSH_PKT: &[u8; 4] = b"0000";

const LENGTH_PREFIX: usize = 4;
const MAX_PKT_LENGTH: usize = 65520;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PktLine<'a> {
    Flush,
    Delimiter,
    Data(&'a [u8]),
}

/// Frame `data` as a single pkt-line
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut line = format!("{:04x}", data.len() + LENGTH_PREFIX).into_bytes();
    line.extend_from_slice(data);
    line
}

#[derive(Debug)]
pub struct PktLineReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> PktLineReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        PktLineReader {
            buffer,
            position: 0,
        }
    }

    /// Bytes not consumed yet
    pub fn remaining(&self) -> &'a [u8] {
        &self.buffer[self.position..]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Read the next line, or `None` once the buffer is exhausted
    pub fn next_line(&mut self) -> TransportResult<Option<PktLine<'a>>> {
        let remaining = self.remaining();
        if remaining.is_empty() {
            return Ok(None);
        }

        let prefix = remaining.get(..LENGTH_PREFIX).ok_or_else(|| {
            TransportError::Protocol(format!("truncated pkt-line length {remaining:?}"))
        })?;
        let length = std::str::from_utf8(prefix)
            .ok()
            .and_then(|prefix| usize::from_str_radix(prefix, 16).ok())
            .ok_or_else(|| TransportError::Protocol(format!("invalid pkt-line length {prefix:?}")))?;

        let line = match length {
            0 => PktLine::Flush,
            1 | 2 => PktLine::Delimiter,
            3 => {
                return Err(TransportError::Protocol("pkt-line length 3 is reserved".into()));
            }
            length if length > MAX_PKT_LENGTH => {
                return Err(TransportError::Protocol(format!(
                    "pkt-line length {length} exceeds {MAX_PKT_LENGTH}"
                )));
            }
            length => {
                let data = remaining.get(LENGTH_PREFIX..length).ok_or_else(|| {
                    TransportError::Protocol(format!(
                        "pkt-line announces {length} bytes but only {} remain",
                        remaining.len()
                    ))
                })?;
                PktLine::Data(data)
            }
        };

        self.position += match line {
            PktLine::Data(data) => LENGTH_PREFIX + data.len(),
            _ => LENGTH_PREFIX,
        };

        Ok(Some(line))
    }
}
