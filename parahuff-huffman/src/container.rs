//! Container file format.
//!
//! ```text
//! bytes 0..3:     N, original length, u32 LE
//! bytes 4..1027:  frequency table, 256 x u32 LE
//! bytes 1028..:   packed payload, ceil(total_bits / 8) bytes
//! ```
//!
//! No magic number, version, or checksum (an explicit
//! non-goal); a truncated file is detected implicitly by the
//! decompressor running out of payload before emitting `N` bytes.

use parahuff_core::error::{ParaHuffError, Result};

/// Byte offset where the frequency table begins.
const HISTOGRAM_OFFSET: usize = 4;
/// Byte length of the frequency table (256 u32 entries).
const HISTOGRAM_BYTES: usize = 256 * 4;
/// Byte offset where the packed payload begins.
pub const PAYLOAD_OFFSET: usize = HISTOGRAM_OFFSET + HISTOGRAM_BYTES;

/// Serialize `n`, `histogram`, and the already-packed `payload` into
/// the container byte layout.
pub fn write(n: u32, histogram: &[u32; 256], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(PAYLOAD_OFFSET + payload.len());
    out.extend_from_slice(&n.to_le_bytes());
    for &count in histogram {
        out.extend_from_slice(&count.to_le_bytes());
    }
    out.extend_from_slice(payload);
    out
}

/// A parsed container: original length, frequency table, and a view
/// into the packed payload bytes.
pub struct Container<'a> {
    /// Original, uncompressed length in bytes.
    pub n: u32,
    /// Per-byte frequency table used to rebuild the Huffman tree.
    pub histogram: [u32; 256],
    /// Packed payload bytes.
    pub payload: &'a [u8],
}

/// Parse `data` as a container. Validates only size — the tree is
/// reconstructed from frequencies, never stored itself — so a
/// short-but-structurally-valid payload is not an error here;
/// truncation is a decode-time property, reported by [`crate::decode`].
pub fn read(data: &[u8]) -> Result<Container<'_>> {
    if data.len() < PAYLOAD_OFFSET {
        return Err(ParaHuffError::corrupt_container(format!(
            "container too short: {} bytes, need at least {PAYLOAD_OFFSET} for the header",
            data.len()
        )));
    }
    let n = u32::from_le_bytes(data[0..4].try_into().unwrap());
    let mut histogram = [0u32; 256];
    for (i, slot) in histogram.iter_mut().enumerate() {
        let off = HISTOGRAM_OFFSET + i * 4;
        *slot = u32::from_le_bytes(data[off..off + 4].try_into().unwrap());
    }
    let payload = &data[PAYLOAD_OFFSET..];
    Ok(Container { n, histogram, payload })
}
