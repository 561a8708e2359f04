//! The EME transform, described by Halevi and Rogaway in
//! "A Parallelizable Enciphering Mode" (2003).
//!
//! A message of `m` 16-byte blocks is whitened with the L-table,
//! enciphered block by block, mixed through a single value derived
//! from every block and the tweak, enciphered again and whitened
//! again. The mixing layer is linear, so decryption is the same
//! procedure with the block cipher run backwards.

use std::fmt;

use tracing::{debug, trace};

use crate::block::{double_in_place, xor_into, Block};
use crate::cipher::{check_block_size, BlockCipher, Direction};
use crate::error::{EmeError, Result};
use crate::ltable::{LTable, LTableCache};
use crate::{BLOCK_SIZE, MAX_BLOCKS};

/// Checks every precondition of [`transform`], returning the tweak
/// as a block and the number of blocks in `data`.
fn validate<C: BlockCipher + ?Sized>(
    cipher: &C,
    tweak: &[u8],
    data: &[u8],
) -> Result<(Block, usize)> {
    check_block_size(cipher)?;
    let tweak: Block = tweak
        .try_into()
        .map_err(|_| EmeError::InvalidTweakLength { len: tweak.len() })?;
    if data.len() % BLOCK_SIZE != 0 {
        return Err(EmeError::InvalidDataLength { len: data.len() });
    }
    let count = data.len() / BLOCK_SIZE;
    if count == 0 || count > MAX_BLOCKS {
        return Err(EmeError::InvalidBlockCount { count });
    }
    Ok((tweak, count))
}

/// EME-encrypts or EME-decrypts `data` under `tweak`, depending on `direction`.
///
/// `data` must hold 1 to 128 whole blocks and `tweak` exactly one block.
/// All checks happen before the cipher is touched; on error nothing is
/// computed. The result is a new buffer of the same length as `data`.
///
/// If `cache` is enabled its table is used as is, so it must have been
/// precomputed with the same key as `cipher`.
pub fn transform<C: BlockCipher + ?Sized>(
    cipher: &C,
    tweak: &[u8],
    data: &[u8],
    direction: Direction,
    cache: Option<&LTableCache>,
) -> Result<Vec<u8>> {
    let (tweak, count) = validate(cipher, tweak, data)?;
    trace!("EME {:?} of {} blocks", direction, count);

    let generated;
    let masks = match cache.and_then(|cache| cache.table(count)) {
        Some(masks) => {
            trace!("Using cached L-table");
            masks
        }
        None => {
            generated = LTable::tabulate(cipher, count);
            generated.masks()
        }
    };

    // `out` is the scratch area for all three passes: it holds PPP
    // after the first, CCC after the mix and the result after the last.
    let mut out = vec![0; data.len()];

    // PPP[j] = E(P[j] ^ L[j])
    for ((dst, src), mask) in out
        .chunks_exact_mut(BLOCK_SIZE)
        .zip(data.chunks_exact(BLOCK_SIZE))
        .zip(masks)
    {
        let mut pp = *mask;
        xor_into(&mut pp, src)?;
        direction.apply(cipher, &mut pp);
        dst.copy_from_slice(&pp);
    }

    // MP = T ^ PPP[0] ^ ... ^ PPP[m-1]
    let mut mp = tweak;
    for ppp in out.chunks_exact(BLOCK_SIZE) {
        xor_into(&mut mp, ppp)?;
    }

    let mut mc = mp;
    direction.apply(cipher, &mut mc);

    // CCC[j] = PPP[j] ^ 2^j * (MP ^ MC), for j >= 1
    let mut m = mp;
    xor_into(&mut m, &mc)?;
    for ppp in out.chunks_exact_mut(BLOCK_SIZE).skip(1) {
        double_in_place(&mut m);
        xor_into(ppp, &m)?;
    }

    // CCC[0] = MC ^ T ^ CCC[1] ^ ... ^ CCC[m-1]
    let mut ccc0 = mc;
    xor_into(&mut ccc0, &tweak)?;
    for ccc in out.chunks_exact(BLOCK_SIZE).skip(1) {
        xor_into(&mut ccc0, ccc)?;
    }
    out[..BLOCK_SIZE].copy_from_slice(&ccc0);

    // C[j] = E(CCC[j]) ^ L[j]
    for (dst, mask) in out.chunks_exact_mut(BLOCK_SIZE).zip(masks) {
        let mut cc = [0; BLOCK_SIZE];
        cc.copy_from_slice(dst);
        direction.apply(cipher, &mut cc);
        xor_into(&mut cc, mask)?;
        dst.copy_from_slice(&cc);
    }

    Ok(out)
}

pub fn encrypt<C: BlockCipher + ?Sized>(
    cipher: &C,
    tweak: &[u8],
    plaintext: &[u8],
    cache: Option<&LTableCache>,
) -> Result<Vec<u8>> {
    transform(cipher, tweak, plaintext, Direction::Encrypt, cache)
}

pub fn decrypt<C: BlockCipher + ?Sized>(
    cipher: &C,
    tweak: &[u8],
    ciphertext: &[u8],
    cache: Option<&LTableCache>,
) -> Result<Vec<u8>> {
    transform(cipher, tweak, ciphertext, Direction::Decrypt, cache)
}

/// An EME instance bound to one cipher key.
///
/// The instance owns both the cipher and its L-table cache, and
/// [`Eme::rekey`] refreshes the cache together with the key, so
/// the cache can never fall out of sync with the cipher.
/// `&Eme` can be shared freely between threads.
pub struct Eme<C> {
    cipher: C,
    cache: LTableCache,
}

impl<C> fmt::Debug for Eme<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Eme")
            .field("cached", &self.cache.is_enabled())
            .finish_non_exhaustive()
    }
}

impl<C: BlockCipher> Eme<C> {
    /// Wraps `cipher` and precomputes its L-table.
    pub fn new(cipher: C) -> Result<Self> {
        check_block_size(&cipher)?;
        let mut cache = LTableCache::new();
        cache.precompute(&cipher);
        debug!("Created EME instance with cached L-table");
        Ok(Self { cipher, cache })
    }

    /// Wraps `cipher` without a cache; every call derives its own L-table.
    pub fn uncached(cipher: C) -> Result<Self> {
        check_block_size(&cipher)?;
        debug!("Created EME instance without L-table cache");
        Ok(Self {
            cipher,
            cache: LTableCache::new(),
        })
    }

    /// Replaces the key. The cache, if enabled, is rebuilt for the new key.
    pub fn rekey(&mut self, cipher: C) -> Result<()> {
        check_block_size(&cipher)?;
        self.cipher = cipher;
        if self.cache.is_enabled() {
            self.cache.precompute(&self.cipher);
        }
        debug!("Rekeyed EME instance");
        Ok(())
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    pub fn cache(&self) -> &LTableCache {
        &self.cache
    }

    pub fn transform(&self, tweak: &[u8], data: &[u8], direction: Direction) -> Result<Vec<u8>> {
        transform(&self.cipher, tweak, data, direction, Some(&self.cache))
    }

    pub fn encrypt(&self, tweak: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        self.transform(tweak, plaintext, Direction::Encrypt)
    }

    pub fn decrypt(&self, tweak: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.transform(tweak, ciphertext, Direction::Decrypt)
    }
}
