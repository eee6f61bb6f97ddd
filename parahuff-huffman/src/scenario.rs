//! Scenario dispatch.
//!
//! Before planning offsets, we must know how many kernel runs `K` the
//! input will need and whether a 32-bit bit-offset overflow restart `O`
//! is possible at all — both depend on the device's free memory and the
//! input's total encoded bit length, not on any per-byte decision, so
//! they are resolved once, up front, against a histogram-derived total.

use parahuff_core::Result;
use parahuff_device::{DeviceQuery, memory_budget};

use crate::codebook::CodeBook;
use crate::planner::Scenario;

/// Margin used by the dispatcher's one-off `O`-flag test, separate from
/// the offset planner's own per-byte restart margin
/// ([`crate::planner::OVERFLOW_SAFETY_MARGIN`], fixed at 10240 by
/// §4.4(b)). This margin only has to cover the longest a single code
/// can ever be (255 bits), since it is guarding the coarse "is a 32-bit
/// counter even capable of holding this many bits" question, not the
/// per-byte restart decision the planner makes while walking the input.
const DISPATCH_OVERFLOW_MARGIN: u64 = 255;

/// Outcome of scenario dispatch: which planner/kernel code path to run,
/// and (for the chunking scenarios) the per-run memory budget in bits.
#[derive(Debug, Clone, Copy)]
pub struct Dispatch {
    /// The scenario the planner and kernels should run under.
    pub scenario: Scenario,
    /// Device-memory budget per kernel run, in bits. `None` unless
    /// chunking is required.
    pub memory_budget_bits: Option<u64>,
}

/// Sum of `count[b] * len[b]` over all 256 byte values, rounded up to
/// the next multiple of 8: the total number of payload bits the
/// codebook implies for this input, in the same byte-aligned form the
/// scenario dispatcher's `K`/`O` tests consume.
pub fn total_bits(histogram: &[u32; 256], codebook: &CodeBook) -> u64 {
    let raw: u64 = (0usize..256)
        .map(|b| histogram[b] as u64 * codebook.len[b] as u64)
        .sum();
    raw.div_ceil(8) * 8
}

/// Decide the scenario for compressing an input whose codebook implies
/// `total_bits` payload bits (already rounded up to 8, per
/// [`total_bits`]), consulting `device` for the available memory
/// budget. `fixed_bytes` is the device-memory already reserved for the
/// codebook and other fixed-size kernel state (`M = free - fixed -
/// 10MiB`).
///
/// `K = ceil(total_bits / M)` and `O = 1` iff `M + 255 > u32::MAX` or
/// `total_bits + 255 > u32::MAX`, per [`DISPATCH_OVERFLOW_MARGIN`].
pub fn dispatch(total_bits: u64, device: &impl DeviceQuery, fixed_bytes: u64) -> Result<Dispatch> {
    // One scratch byte per payload bit: a byte budget and a bit budget
    // are numerically the same quantity, so no x8 conversion applies.
    let m_bits = memory_budget(device, fixed_bytes)?;

    let overflow = m_bits + DISPATCH_OVERFLOW_MARGIN > u32::MAX as u64
        || total_bits + DISPATCH_OVERFLOW_MARGIN > u32::MAX as u64;

    let k = total_bits.div_ceil(m_bits.max(1)).max(1);
    let scenario = Scenario::select(k.min(u32::MAX as u64) as u32, overflow);
    let memory_budget_bits = if k > 1 { Some(m_bits) } else { None };

    Ok(Dispatch {
        scenario,
        memory_budget_bits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{histogram, tree};
    use parahuff_device::FixedDevice;

    fn book_for(data: &[u8]) -> CodeBook {
        let hist = histogram::compute(data);
        let (pool, root) = tree::build(&hist);
        CodeBook::build(&pool, root)
    }

    #[test]
    fn test_small_input_dispatches_simple() {
        let data = b"abracadabra";
        let hist = histogram::compute(data);
        let book = book_for(data);
        let device = FixedDevice::new(512 * 1024 * 1024, 1024 * 1024 * 1024);
        let d = dispatch(total_bits(&hist, &book), &device, 0).unwrap();
        assert_eq!(d.scenario, Scenario::Simple);
        assert!(d.memory_budget_bits.is_none());
    }

    #[test]
    fn test_tight_budget_forces_chunking() {
        // A single repeated byte gets the single-leaf 1-bit-per-byte
        // code, so total_bits == data.len(). The smallest budget that
        // can ever be granted is `MIN_REQUIRED_BYTES - SAFETY_MARGIN_BYTES`
        // (free memory pinned at exactly the minimum); use an input a
        // little larger than that many bits to force K > 1.
        let data = vec![b'x'; 42_000_000];
        let hist = histogram::compute(&data);
        let book = book_for(&data);
        let device = FixedDevice::new(50 * 1024 * 1024, 1024 * 1024 * 1024);
        let d = dispatch(total_bits(&hist, &book), &device, 0).unwrap();
        assert_eq!(d.scenario, Scenario::ChunkingOnly);
        assert!(d.memory_budget_bits.is_some());
    }

    #[test]
    fn test_insufficient_memory_propagates_error() {
        let data = b"abracadabra";
        let hist = histogram::compute(data);
        let book = book_for(data);
        let device = FixedDevice::new(1_000, 1024 * 1024 * 1024);
        let result = dispatch(total_bits(&hist, &book), &device, 0);
        assert!(result.is_err());
    }
}
