//! The underlying block cipher and the direction it runs in.

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, BlockSizeUser};

use crate::block::Block;
use crate::error::{EmeError, Result};
use crate::BLOCK_SIZE;

/// A keyed block cipher EME can be built on.
///
/// Any RustCrypto cipher (`aes::Aes128`, `aes::Aes256`, ...)
/// implements this through the blanket impl below. Only ciphers
/// whose `block_size` is 16 are accepted by the transform.
pub trait BlockCipher {
    /// Size of a single cipher block in bytes
    fn block_size(&self) -> usize;
    /// Encrypts `block` in place
    fn forward(&self, block: &mut Block);
    /// Decrypts `block` in place
    fn inverse(&self, block: &mut Block);
}

/// # Panics
///
/// `forward` and `inverse` panic if the cipher's block size is not 16.
/// The transform checks `block_size` before calling either.
impl<C: BlockEncrypt + BlockDecrypt> BlockCipher for C {
    fn block_size(&self) -> usize {
        <C as BlockSizeUser>::block_size()
    }

    fn forward(&self, block: &mut Block) {
        self.encrypt_block(GenericArray::from_mut_slice(block.as_mut_slice()));
    }

    fn inverse(&self, block: &mut Block) {
        self.decrypt_block(GenericArray::from_mut_slice(block.as_mut_slice()));
    }
}

/// Rejects ciphers whose blocks are not 16 bytes.
pub(crate) fn check_block_size<C: BlockCipher + ?Sized>(cipher: &C) -> Result<()> {
    let size = cipher.block_size();
    if size != BLOCK_SIZE {
        return Err(EmeError::InvalidBlockSize { size });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    /// Runs the cipher over `block` in this direction.
    pub fn apply<C: BlockCipher + ?Sized>(self, cipher: &C, block: &mut Block) {
        match self {
            Direction::Encrypt => cipher.forward(block),
            Direction::Decrypt => cipher.inverse(block),
        }
    }
}
