//! # ParaHuff Huffman
//!
//! Static canonical Huffman compression with a parallel, host-driven
//! encode-and-pack core: frequency scanner, deterministic tree builder,
//! code-book layout, cumulative offset planner, the four encode/pack
//! kernel scenarios, the segment stitcher, the container format, and
//! the decompressor.
//!
//! The device itself — CUDA-style kernels in a hardware implementation — is
//! replaced by [`rayon`]-driven host parallelism over the same
//! scatter-then-pack two-phase shape (see [`kernels`]); [`parahuff_device`]
//! plays the role of the device-runtime memory-info query that drives
//! the scenario dispatcher.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codebook;
pub mod container;
pub mod decode;
pub mod histogram;
pub mod kernels;
pub mod planner;
pub mod scenario;
pub mod stitcher;
pub mod tree;

pub use codebook::CodeBook;
pub use decode::TruncationWarning;
pub use planner::{OffsetPlan, Scenario};
pub use scenario::Dispatch;

use parahuff_core::error::{ParaHuffError, Result};
use parahuff_device::DeviceQuery;

/// Fixed, non-scratch device-memory footprint of one compression call:
/// the input buffer, the `4(N+1)`-byte offset array, and the code-book.
/// Used as the `fixed_bytes` argument to [`parahuff_device::memory_budget`]
/// / [`scenario::dispatch`].
pub fn fixed_device_bytes(n: usize) -> u64 {
    let input_bytes = n as u64;
    let offset_bytes = 4 * (n as u64 + 1);
    let codebook_bytes = (256 * codebook::FAST_BITS) as u64 + 256 * 8; // fast region + tail pointers, order of magnitude
    input_bytes + offset_bytes + codebook_bytes
}

/// Compress `input` end to end: histogram, tree, code-book, scenario
/// dispatch, offset plan, parallel encode/pack kernels, stitch, and
/// container write. Returns the complete container bytes.
///
/// Rejects an empty `input` with [`ParaHuffError::InvalidArgument`]; a
/// zero-byte buffer has no bytes to build a tree from.
pub fn compress(input: &[u8], device: &impl DeviceQuery) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Err(ParaHuffError::invalid_argument("input must be non-empty"));
    }

    let hist = histogram::compute(input);
    let (pool, root) = tree::build(&hist);
    let book = CodeBook::build(&pool, root);

    let total_bits = scenario::total_bits(&hist, &book);
    let fixed = fixed_device_bytes(input.len());
    let dispatch = scenario::dispatch(total_bits, device, fixed)?;

    let plan = planner::plan(input, &book, dispatch.scenario, dispatch.memory_budget_bits);
    let segs = kernels::segments(&plan);
    let packed: Vec<(Vec<u8>, bool)> = segs
        .iter()
        .map(|seg| kernels::encode_pack_segment(input, &book, &plan, seg))
        .collect();
    let payload = stitcher::stitch(&packed);

    Ok(container::write(input.len() as u32, &hist, &payload))
}

/// Decompress a container produced by [`compress`]. Returns the
/// reconstructed bytes and, when the payload was too short to emit all
/// `N` bytes, a [`TruncationWarning`] alongside the partial output —
/// truncation is reported, but the decoded bytes are still returned,
/// not discarded.
pub fn decompress(container_bytes: &[u8]) -> Result<(Vec<u8>, Option<TruncationWarning>)> {
    let parsed = container::read(container_bytes)?;
    decode::decode(parsed.n, &parsed.histogram, parsed.payload)
}
