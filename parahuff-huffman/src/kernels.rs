//! Encode/pack "device kernels".
//!
//! A hardware implementation would dispatch one of four CUDA
//! kernel-launch combinations depending on `(K, O)` and write each
//! thread's bits into a device-memory scratch buffer addressed one
//! byte per bit. The host-parallel stand-in here keeps the same
//! two-phase scatter/pack shape: heavy, embarrassingly parallel
//! computation over independent ranges via `rayon`, with the bit-exact
//! stitching done sequentially afterward (see [`crate::stitcher`]).
//!
//! `Scratch` plays the role of the CUDA scratch buffer: one
//! `u8` slot per payload bit (`0` or `1`), written by up to
//! [`WORKERS`] logical workers per kernel run, each touching a
//! disjoint, non-overlapping slice determined by the offset plan.

use rayon::prelude::*;
use std::cell::UnsafeCell;

use crate::codebook::CodeBook;
use crate::planner::OffsetPlan;

/// Logical worker count per kernel run, mirroring the original
/// program's fixed CUDA block/grid-derived thread count. Purely a
/// chunking granularity for `rayon`'s work-stealing, not a hard limit
/// on a segment's byte range.
pub const WORKERS: usize = 1024;

/// One physical kernel-run segment: the half-open range of input
/// indices it covers and the single carry bit-value (if any) inherited
/// from the previous segment's final, shared byte.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    /// Half-open `[start, end)` range of input indices this segment encodes.
    pub range: (usize, usize),
    /// If `Some(byte)`, this segment's output begins mid-byte and must
    /// OR-merge its first few bits into `byte` rather than overwrite it.
    pub carry: Option<u8>,
}

/// A bit-granular scratch buffer: one `u8` (0/1) slot per payload bit.
///
/// `rayon` workers write disjoint index ranges (guaranteed by the
/// offset plan's monotonic `off[]`), so concurrent `&Scratch` access
/// through `UnsafeCell` never races even though `Scratch` is not
/// `Sync` by default.
pub struct Scratch {
    bits: Vec<UnsafeCell<u8>>,
}

// SAFETY: callers only ever write to index ranges that the offset plan
// guarantees are disjoint across workers (each byte's code occupies
// `off[i]..off[i+1]`, and those ranges partition the scratch buffer
// without overlap); no two workers ever touch the same `UnsafeCell`.
unsafe impl Sync for Scratch {}

impl Scratch {
    /// Allocate a zeroed scratch buffer of `len_bits` bit-slots.
    pub fn new(len_bits: usize) -> Self {
        Self {
            bits: (0..len_bits).map(|_| UnsafeCell::new(0u8)).collect(),
        }
    }

    /// Number of bit-slots.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if the scratch buffer holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Write `value` (0 or 1) at absolute bit position `pos`.
    ///
    /// # Safety
    /// The caller must guarantee no other thread writes `pos`
    /// concurrently.
    unsafe fn write_bit(&self, pos: usize, value: u8) {
        // SAFETY: disjoint-range invariant upheld by the offset plan;
        // see the `unsafe impl Sync` comment above.
        unsafe {
            *self.bits[pos].get() = value;
        }
    }

    /// Read the bit-slot at `pos`.
    pub fn read_bit(&self, pos: usize) -> u8 {
        // SAFETY: reads are only issued after all writers for this
        // segment have completed (pack phase runs after scatter phase).
        unsafe { *self.bits[pos].get() }
    }
}

/// Flatten a plan's chunk and overflow boundaries into an ordered list
/// of physical kernel-run [`Segment`]s.
///
/// Both boundary kinds reset the same shared `off[]` counter (see
/// `planner`'s module doc), so a segment's local length is always
/// `off[range.end]` — whether `range.end` is another boundary (whose
/// `off` entry was overwritten to the *new* segment's padded running
/// length) or `N` (whose `off[N]` is the final padded total).
///
/// `plan.chunk_idx` stores `K` `(start, end_exclusive)` pairs with a
/// one-index gap between a chunk's closing entry and the next chunk's
/// opening entry (`[0, e0, e0+1, e1, ...]`) — a bookkeeping artifact of
/// how the planner records the boundary; the byte at `e0` is the one
/// whose code triggered the restart, and (mirroring the single-index
/// convention `overflow_idx` already uses) it belongs wholly to the
/// *next* segment, not a gap to special-case. Only the closing entry of
/// each non-final chunk (the odd-positioned entries, paired with
/// `chunk_pad[j+1]`) is therefore a real trigger; the `e0+1` entries
/// that follow are redundant under this convention and are not used.
pub fn segments(plan: &OffsetPlan) -> Vec<Segment> {
    let n = plan.off.len() - 1;
    let mut triggers: Vec<(usize, u8)> = Vec::new();

    for (k, &idx) in plan.overflow_idx.iter().enumerate() {
        triggers.push((idx as usize, plan.overflow_pad[k]));
    }
    let num_chunks = plan.chunk_idx.len() / 2;
    for j in 0..num_chunks.saturating_sub(1) {
        let boundary = plan.chunk_idx[2 * j + 1];
        triggers.push((boundary as usize, plan.chunk_pad[j + 1]));
    }
    triggers.sort_unstable_by_key(|&(idx, _)| idx);
    triggers.dedup_by_key(|&mut (idx, _)| idx);

    // Boundaries split input indices [0, n) into len(triggers)+1 pieces.
    // A segment carries (needs an OR-merge stitch) iff it *starts* at a
    // trigger whose pad flag is 1 — the trigger's own pad flag records
    // whether the restart fell mid-byte, and that is exactly the
    // segment beginning there that needs the merge. The true carried
    // bits live in the previous segment's final packed byte; `Some(1)`
    // here is only a marker the stitcher checks, not a bit value.
    let mut segs = Vec::with_capacity(triggers.len() + 1);
    let mut start = 0usize;
    let mut starts_mid_byte = false;
    for &(idx, pad) in &triggers {
        segs.push(Segment {
            range: (start, idx),
            carry: if starts_mid_byte { Some(1) } else { None },
        });
        start = idx;
        starts_mid_byte = pad == 1;
    }
    segs.push(Segment {
        range: (start, n),
        carry: if starts_mid_byte { Some(1) } else { None },
    });
    segs
}

/// Phase 1 ("scatter"): for every input byte in `segment.range`, write
/// its code bits into `scratch` at the positions the offset plan
/// computed, in parallel across workers.
///
/// `plan.off[i]` is each byte's *natural* local bit position within
/// this segment — except at `i == start`: when a restart lands there,
/// `plan.off[start]` was overwritten (by the planner) with the
/// *previous* segment's padded closing length, not this segment's
/// origin, so the first byte's position is instead derived from
/// `plan.off[start + 1]` (this segment's running counter right after
/// that byte was placed), minus the byte's own code length — which
/// correctly yields 0 when the restart fell on a byte boundary, or the
/// carried bit count when it fell mid-byte.
pub fn scatter(input: &[u8], codebook: &CodeBook, plan: &OffsetPlan, segment: &Segment, scratch: &Scratch) {
    let (start, end) = segment.range;
    (start..end).into_par_iter().for_each(|i| {
        let byte = input[i];
        let len = codebook.len[byte as usize] as usize;
        let local_start = if i == start {
            (plan.off[i + 1] - len as u32) as usize
        } else {
            plan.off[i] as usize
        };
        for b in 0..len {
            let bit = if b < crate::codebook::FAST_BITS {
                codebook.code_fast[byte as usize][b]
            } else {
                codebook.code_tail[byte as usize]
                    .as_ref()
                    .expect("len > FAST_BITS implies a tail entry")[b]
            };
            // SAFETY: `local_start + b` is unique to this `i` across
            // the whole parallel iteration (offset plan monotonicity).
            unsafe { scratch.write_bit(local_start + b, bit) };
        }
    });
}

/// Phase 2 ("pack"): condense a segment's bit-granular scratch region
/// into dense output bytes, in parallel across byte-aligned output
/// positions. Returns the packed bytes for this segment (the first
/// byte may be partially filled if `segment.carry` is `Some`, in which
/// case [`crate::stitcher`] OR-merges it into the previous segment's
/// final byte rather than appending it as a new one).
pub fn pack(scratch: &Scratch) -> Vec<u8> {
    let total_bits = scratch.len();
    let total_bytes = total_bits.div_ceil(8);
    (0..total_bytes)
        .into_par_iter()
        .map(|byte_idx| {
            let mut out = 0u8;
            for bit in 0..8 {
                let pos = byte_idx * 8 + bit;
                if pos < total_bits {
                    out |= scratch.read_bit(pos) << (7 - bit);
                }
            }
            out
        })
        .collect()
}

/// Run the scatter and pack phases for one segment, returning its
/// packed bytes alongside whether the segment started mid-byte.
///
/// A segment's total bit length is simply `plan.off[end]`: whether
/// `end` is another restart boundary (whose `off` entry the planner
/// overwrote with *this* segment's own padded closing length) or `N`
/// (whose `off[N]` received the same final padding), `off[end]` is
/// always expressed in this segment's own zero-based coordinate space.
pub fn encode_pack_segment(
    input: &[u8],
    codebook: &CodeBook,
    plan: &OffsetPlan,
    segment: &Segment,
) -> (Vec<u8>, bool) {
    let (start, end) = segment.range;
    let local_bits = plan.off[end] as usize;
    let scratch = Scratch::new(local_bits.max(1));
    if end > start {
        scatter(input, codebook, plan, segment, &scratch);
    }
    (pack(&scratch), segment.carry.is_some())
}
