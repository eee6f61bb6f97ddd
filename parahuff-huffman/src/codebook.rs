//! Code-book generator and layout.
//!
//! Splits each byte's code into a fast region (the first [`FAST_BITS`]
//! bits, held in a broadcast-sized array) and an optional tail region
//! for codes that run longer, set only when [`CodeBook::tail_needed`].

use crate::tree::{NONE, Node};

/// Number of leading code bits held in the always-present fast region.
pub const FAST_BITS: usize = 191;

/// Per-byte variable-length Huffman code-book.
pub struct CodeBook {
    /// Bit length of byte `b`'s code; 0 if `b` never appears.
    pub len: [u8; 256],
    /// First `FAST_BITS` bits of each byte's code, one byte (0/1) per
    /// bit. Boxed to avoid putting a 256 * 191 byte value on the stack.
    pub code_fast: Box<[[u8; FAST_BITS]; 256]>,
    /// Full bit sequence for bytes whose code exceeds `FAST_BITS`,
    /// indexed by byte value; `None` unless that byte's code is long.
    pub code_tail: Vec<Option<Vec<u8>>>,
    /// Set if any code exceeds `FAST_BITS` bits.
    pub tail_needed: bool,
}

impl CodeBook {
    /// Build the code-book via depth-first traversal of the tree arena
    /// from `root`, using an explicit stack rather than recursion (tree
    /// depth is bounded by `2L-1 <= 511` so recursion would be safe,
    /// but an explicit stack avoids relying on that bound holding).
    pub fn build(pool: &[Node], root: u32) -> Self {
        let len = [0u8; 256];
        let code_fast = Box::new([[0u8; FAST_BITS]; 256]);
        let code_tail: Vec<Option<Vec<u8>>> = vec![None; 256];

        let mut book = Self {
            len,
            code_fast,
            code_tail,
            tail_needed: false,
        };

        if pool.is_empty() {
            return book;
        }

        if pool.len() == 1 {
            // Single-leaf convention: len = 1, code = {0}.
            let byte = pool[0].byte;
            book.len[byte as usize] = 1;
            book.code_fast[byte as usize][0] = 0;
            return book;
        }

        let mut stack: Vec<(u32, Vec<u8>)> = vec![(root, Vec::new())];
        while let Some((idx, bits)) = stack.pop() {
            let node = &pool[idx as usize];
            if node.is_leaf() {
                book.assign(node.byte, &bits);
            } else {
                if node.right != NONE {
                    let mut rb = bits.clone();
                    rb.push(1);
                    stack.push((node.right, rb));
                }
                if node.left != NONE {
                    let mut lb = bits;
                    lb.push(0);
                    stack.push((node.left, lb));
                }
            }
        }

        book
    }

    fn assign(&mut self, byte: u8, bits: &[u8]) {
        let depth = bits.len();
        self.len[byte as usize] = depth as u8;
        if depth <= FAST_BITS {
            self.code_fast[byte as usize][..depth].copy_from_slice(bits);
        } else {
            self.code_fast[byte as usize].copy_from_slice(&bits[..FAST_BITS]);
            self.code_tail[byte as usize] = Some(bits.to_vec());
            self.tail_needed = true;
        }
    }

    /// The full code for `byte` as a bit sequence (0/1 values), for
    /// tests and small hand-built fixtures. Not used on the hot path.
    pub fn full_code(&self, byte: u8) -> Vec<u8> {
        let len = self.len[byte as usize] as usize;
        if len <= FAST_BITS {
            self.code_fast[byte as usize][..len].to_vec()
        } else {
            self.code_tail[byte as usize]
                .clone()
                .expect("len > FAST_BITS implies a tail entry")
        }
    }
}
