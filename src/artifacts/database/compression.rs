//! zlib helpers shared by the loose object store and the pack decoder

use flate2::{Decompress, FlushDecompress, Status};
use std::io::{Error, ErrorKind, Read, Write};

pub fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

pub fn decompress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = flate2::read::ZlibDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;

    Ok(decompressed)
}

/// Output of inflating one zlib stream out of a larger buffer
#[derive(Debug)]
pub struct InflatedStream {
    pub data: Vec<u8>,
    /// Compressed bytes the stream occupied, trailer included
    pub consumed: usize,
}

/// Growth step for the inflate output buffer
const INFLATE_CHUNK: usize = 32 * 1024;

/// Inflate the single zlib stream at the start of `input`
///
/// Bytes after the end of the stream are left untouched and reported through
/// `consumed`, so callers can locate whatever follows the stream. Running out of
/// input before the stream's end marker is an `UnexpectedEof` error.
pub fn inflate_stream(input: &[u8]) -> std::io::Result<InflatedStream> {
    let mut inflater = Decompress::new(true);
    let mut data = Vec::with_capacity(input.len().saturating_mul(2).min(INFLATE_CHUNK));

    loop {
        if data.len() == data.capacity() {
            data.reserve(INFLATE_CHUNK);
        }

        let (in_before, out_before) = (inflater.total_in(), inflater.total_out());
        let offset = to_usize(in_before)?;
        let status = inflater
            .decompress_vec(&input[offset..], &mut data, FlushDecompress::None)
            .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;

        if status == Status::StreamEnd {
            break;
        }
        // room to write and nothing moved: the stream needs input we do not have
        if inflater.total_in() == in_before && inflater.total_out() == out_before {
            return Err(Error::new(
                ErrorKind::UnexpectedEof,
                "zlib stream ended before its end marker",
            ));
        }
    }

    Ok(InflatedStream {
        data,
        consumed: to_usize(inflater.total_in())?,
    })
}

fn to_usize(count: u64) -> std::io::Result<usize> {
    usize::try_from(count).map_err(|e| Error::new(ErrorKind::InvalidData, e))
}
