//! Segment stitching.
//!
//! Each [`crate::kernels::Segment`] packs independently into its own
//! byte-aligned `Vec<u8>`. Segments that began mid-byte (`carry ==
//! Some(_)`) share their first physical byte with the previous
//! segment's last physical byte: the old segment's trailing valid bits
//! sit in that byte's high bit positions, the new segment's leading
//! bits sit in the low positions (both packed MSB-first from each
//! segment's own zero bit-offset), and the two never overlap — so the
//! merge is a plain bitwise OR.

/// Concatenate a sequence of `(packed_bytes, starts_mid_byte)` segment
/// outputs into one contiguous payload.
pub fn stitch(segments: &[(Vec<u8>, bool)]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    for (bytes, starts_mid_byte) in segments {
        if *starts_mid_byte {
            match (out.last_mut(), bytes.first()) {
                (Some(last), Some(&first)) => {
                    *last |= first;
                    out.extend_from_slice(&bytes[1..]);
                }
                _ => out.extend_from_slice(bytes),
            }
        } else {
            out.extend_from_slice(bytes);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_concatenation_no_merge() {
        let segs = vec![(vec![0xFFu8], false), (vec![0x00u8], false)];
        assert_eq!(stitch(&segs), vec![0xFF, 0x00]);
    }

    #[test]
    fn test_mid_byte_merge_or_combines_disjoint_halves() {
        // Previous segment's final byte has its high nibble set;
        // new segment's first byte has its low nibble set (disjoint).
        let segs = vec![(vec![0xF0u8], false), (vec![0x0Fu8, 0xAAu8], true)];
        let out = stitch(&segs);
        assert_eq!(out, vec![0xFF, 0xAA]);
    }

    #[test]
    fn test_single_segment_passthrough() {
        let segs = vec![(vec![0x12, 0x34], false)];
        assert_eq!(stitch(&segs), vec![0x12, 0x34]);
    }
}
