//! Arithmetic on single cipher blocks: doubling in GF(2^128)
//! and byte-wise XOR.

use crate::error::{EmeError, Result};
use crate::BLOCK_SIZE;

/// Alias for a block-sized byte array
pub type Block = [u8; BLOCK_SIZE];

/// Feedback constant for x^128 + x^7 + x^2 + x + 1
const GF_128_FDBK: u8 = 0x87;

/// Multiplies `block` by 2 in GF(2^128).
///
/// Byte 0 holds the lowest-order bits, so the carry runs
/// from byte 0 up to byte 15 and the bit shifted out of
/// byte 15 is folded back into byte 0.
pub fn double_in_place(block: &mut Block) {
    let mut cin = 0;
    for byte in block.iter_mut() {
        let cout = *byte >> 7;
        *byte = (*byte << 1) | cin;
        cin = cout;
    }
    if cin > 0 {
        block[0] ^= GF_128_FDBK;
    }
}

/// Returns `2 * block` in GF(2^128).
pub fn double(block: &Block) -> Block {
    let mut out = *block;
    double_in_place(&mut out);
    out
}

/// XORs `src` into `dst`.
///
/// Both buffers must have the same length. A mismatch means
/// the caller sliced something wrong.
pub fn xor_into(dst: &mut [u8], src: &[u8]) -> Result<()> {
    if dst.len() != src.len() {
        return Err(EmeError::LengthMismatch {
            left: dst.len(),
            right: src.len(),
        });
    }
    for (dst, &src) in dst.iter_mut().zip(src.iter()) {
        *dst ^= src;
    }
    Ok(())
}
