//! Decompressor.
//!
//! Rebuilds the identical tree from the container's frequency table
//! (the tree builder's determinism is what makes this safe: encoder
//! and decoder scan the same histogram the same way), then walks the tree
//! bit by bit from the root, MSB-first, emitting a byte at each leaf
//! and restarting at the root, until exactly `N` bytes have been
//! produced.

use parahuff_core::bitstream::BitReader;
use parahuff_core::error::Result;

use crate::tree::{self, Node};

/// Emitted when the payload runs out before `N` bytes have been
/// decoded: reported as a truncation warning, with the partial output
/// still written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationWarning {
    /// Bytes actually decoded before the payload was exhausted.
    pub decoded: u32,
    /// Bytes the container's length field promised.
    pub expected: u32,
}

/// Decode `payload` against `histogram`/`n`, returning the reconstructed
/// bytes and, if the payload ran out early, a [`TruncationWarning`]
/// rather than a hard error — partial output still reaches the caller.
pub fn decode(n: u32, histogram: &[u32; 256], payload: &[u8]) -> Result<(Vec<u8>, Option<TruncationWarning>)> {
    let n = n as usize;
    if n == 0 {
        return Ok((Vec::new(), None));
    }

    let (pool, root) = tree::build(histogram);

    if pool.len() == 1 {
        let byte = pool[0].byte;
        return Ok((vec![byte; n], None));
    }

    let mut out = Vec::with_capacity(n);
    let mut reader = BitReader::new(payload);
    let mut cursor = root;

    while out.len() < n {
        let Some(bit) = reader.read_bit() else {
            let warning = TruncationWarning {
                decoded: out.len() as u32,
                expected: n as u32,
            };
            return Ok((out, Some(warning)));
        };
        let node: &Node = &pool[cursor as usize];
        cursor = if bit == 0 { node.left } else { node.right };
        let next = &pool[cursor as usize];
        if next.is_leaf() {
            out.push(next.byte);
            cursor = root;
        }
    }

    Ok((out, None))
}
