//! Cumulative bit-offset planning.
//!
//! Computes, for every input byte, the bit position at which its code
//! begins, while tracking two independent boundary systems: a
//! device-memory chunk budget and 32-bit bit-offset overflow. One
//! parametric function dispatched on [`Scenario`] covers all four
//! combinations, rather than four near-duplicate functions.
//!
//! Both boundary kinds restart the *same* running bit-offset counter
//! (`off`): a chunk boundary means a new kernel run needs a fresh,
//! zero-based scratch buffer just as much as an overflow restart does.
//! `kernels::segments` relies on this to treat the two boundary kinds
//! uniformly when it flattens them into physical kernel-run segments.

use crate::codebook::CodeBook;

/// Safety margin `S` below `u32::MAX` at which the bit-offset counter
/// is considered about to wrap and must be restarted, fixed per the
/// per-byte wrap-detection rule. Distinct from the scenario dispatcher's
/// own, smaller margin (see `scenario::DISPATCH_OVERFLOW_MARGIN`), which
/// bounds the one-off decision of whether `O` is possible at all rather
/// than the per-byte restart check this constant drives.
pub const OVERFLOW_SAFETY_MARGIN: u32 = 10240;

/// Which of the four `(K, O)` combinations the offset planner and the
/// encoder/packer kernels are operating under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// `K=1, O=0`: one kernel run, no overflow restarts.
    Simple,
    /// `K=1, O=1`: one kernel run, one or more overflow restarts.
    OverflowOnly,
    /// `K>1, O=0`: multiple kernel runs (device-memory chunking), no overflow.
    ChunkingOnly,
    /// `K>1, O=1`: multiple kernel runs, and overflow restarts can occur within them.
    Both,
}

impl Scenario {
    /// Select the scenario for `(k, overflow)`, where `k` is the number
    /// of kernel runs the scenario dispatcher computed.
    pub fn select(k: u32, overflow: bool) -> Self {
        match (k > 1, overflow) {
            (false, false) => Scenario::Simple,
            (false, true) => Scenario::OverflowOnly,
            (true, false) => Scenario::ChunkingOnly,
            (true, true) => Scenario::Both,
        }
    }
}

/// The cumulative bit-offset plan for one compression call.
#[derive(Debug, Clone)]
pub struct OffsetPlan {
    /// Running bit position before each input byte's code; length `N+1`.
    pub off: Vec<u32>,
    /// Input indices at which the 32-bit counter was restarted.
    pub overflow_idx: Vec<u32>,
    /// Mid-byte flag per overflow restart (`1` if the restart fell mid-byte).
    pub overflow_pad: Vec<u8>,
    /// `(start, end_exclusive)` pairs for each of the `K` kernel runs.
    pub chunk_idx: Vec<u32>,
    /// Mid-byte flag per chunk boundary; `chunk_pad[0]` is always 0.
    pub chunk_pad: Vec<u8>,
}

impl OffsetPlan {
    /// Number of kernel runs (chunks) this plan calls for.
    pub fn kernel_runs(&self) -> usize {
        self.chunk_idx.len() / 2
    }
}

fn round_up_to_8(value: u32) -> u32 {
    (((value as u64) + 7) / 8 * 8) as u32
}

/// Compute the offset plan for `input` under `scenario`.
///
/// `memory_budget_bits` is the per-kernel-run device-memory budget `M`,
/// in bits (the scratch buffer is one byte per bit, so a byte budget
/// and a bit budget are numerically the same quantity); required for
/// [`Scenario::ChunkingOnly`] and [`Scenario::Both`], ignored otherwise.
pub fn plan(
    input: &[u8],
    codebook: &CodeBook,
    scenario: Scenario,
    memory_budget_bits: Option<u64>,
) -> OffsetPlan {
    plan_with_margin(input, codebook, scenario, memory_budget_bits, OVERFLOW_SAFETY_MARGIN)
}

/// Same as [`plan`], but with the overflow safety margin `S` exposed —
/// used by tests to force an overflow restart on a small input without
/// approaching the real multi-billion-bit threshold.
pub(crate) fn plan_with_margin(
    input: &[u8],
    codebook: &CodeBook,
    scenario: Scenario,
    memory_budget_bits: Option<u64>,
    margin: u32,
) -> OffsetPlan {
    let n = input.len();
    let mut off = vec![0u32; n + 1];
    let mut overflow_idx = Vec::new();
    let mut overflow_pad = Vec::new();
    let mut chunk_idx = vec![0u32];
    let mut chunk_pad = vec![0u8];

    let code_len = |b: u8| codebook.len[b as usize] as u32;
    let would_wrap = |cur: u32, len_i: u32, margin: u32| match cur.checked_add(len_i) {
        None => true,
        Some(v) => v > u32::MAX - margin,
    };

    match scenario {
        Scenario::Simple => {
            let mut cur = 0u32;
            for (i, &byte) in input.iter().enumerate() {
                cur += code_len(byte);
                off[i + 1] = cur;
            }
        }
        Scenario::OverflowOnly => {
            let mut cur = 0u32;
            for (i, &byte) in input.iter().enumerate() {
                let len_i = code_len(byte);
                if would_wrap(cur, len_i, margin) {
                    overflow_idx.push(i as u32);
                    if cur % 8 != 0 {
                        overflow_pad.push(1);
                        let next = (cur % 8) + len_i;
                        off[i] = round_up_to_8(cur);
                        cur = next;
                    } else {
                        overflow_pad.push(0);
                        cur = len_i;
                    }
                } else {
                    cur += len_i;
                }
                off[i + 1] = cur;
            }
        }
        Scenario::ChunkingOnly => {
            let m = memory_budget_bits.expect("chunking scenarios require a memory budget");
            let mut cur = 0u32;
            for (i, &byte) in input.iter().enumerate() {
                let len_i = code_len(byte);
                if (cur as u64) + (len_i as u64) > m {
                    chunk_idx.push(i as u32);
                    if cur % 8 != 0 {
                        chunk_pad.push(1);
                        let next = (cur % 8) + len_i;
                        off[i] = round_up_to_8(cur);
                        cur = next;
                    } else {
                        chunk_pad.push(0);
                        cur = len_i;
                    }
                    chunk_idx.push(i as u32 + 1);
                } else {
                    cur += len_i;
                }
                off[i + 1] = cur;
            }
        }
        Scenario::Both => {
            // Memory-chunk budget is tracked against `chunk_accum`, the
            // true cumulative bit count since the start of the current
            // chunk; unlike `cur` (which is `off`'s shared counter), it
            // is *not* reset by an overflow restart, only by a chunk
            // boundary — the memory trigger must track the absolute bit
            // offset since the last overflow restart, not the counter
            // an overflow can reset out from under it.
            let m = memory_budget_bits.expect("chunking scenarios require a memory budget");
            let mut cur = 0u32;
            let mut chunk_accum: u64 = 0;
            for (i, &byte) in input.iter().enumerate() {
                let len_i = code_len(byte);
                if chunk_accum + len_i as u64 > m {
                    chunk_idx.push(i as u32);
                    if cur % 8 != 0 {
                        chunk_pad.push(1);
                        let next = (cur % 8) + len_i;
                        off[i] = round_up_to_8(cur);
                        cur = next;
                    } else {
                        chunk_pad.push(0);
                        cur = len_i;
                    }
                    chunk_idx.push(i as u32 + 1);
                    chunk_accum = cur as u64;
                } else if would_wrap(cur, len_i, margin) {
                    overflow_idx.push(i as u32);
                    if cur % 8 != 0 {
                        overflow_pad.push(1);
                        let next = (cur % 8) + len_i;
                        off[i] = round_up_to_8(cur);
                        cur = next;
                    } else {
                        overflow_pad.push(0);
                        cur = len_i;
                    }
                    chunk_accum += len_i as u64;
                } else {
                    cur += len_i;
                    chunk_accum += len_i as u64;
                }
                off[i + 1] = cur;
            }
        }
    }

    // Final step (all scenarios): pad off[N] to a multiple of 8 and
    // close the last chunk at N.
    off[n] = round_up_to_8(off[n]);
    chunk_idx.push(n as u32);

    OffsetPlan {
        off,
        overflow_idx,
        overflow_pad,
        chunk_idx,
        chunk_pad,
    }
}
