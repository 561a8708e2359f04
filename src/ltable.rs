//! Per-position masks ("L-table") and a cache for them.
//!
//! `L[0] = 2 * E(K; 0)` and `L[i] = 2 * L[i - 1]`. The table
//! depends on the cipher key only, so it can be computed once
//! per key and shared between calls.

use std::fmt;

use tracing::debug;

use crate::block::{double_in_place, Block};
use crate::cipher::{check_block_size, BlockCipher};
use crate::error::{EmeError, Result};
use crate::{BLOCK_SIZE, MAX_BLOCKS};

#[derive(Clone, PartialEq, Eq)]
pub struct LTable {
    masks: Vec<Block>,
}

// The masks are key material; keep them out of logs.
impl fmt::Debug for LTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LTable")
            .field("len", &self.masks.len())
            .finish_non_exhaustive()
    }
}

impl LTable {
    /// Computes the masks for messages of up to `block_count` blocks.
    pub fn generate<C: BlockCipher + ?Sized>(cipher: &C, block_count: usize) -> Result<Self> {
        check_block_size(cipher)?;
        if block_count == 0 || block_count > MAX_BLOCKS {
            return Err(EmeError::InvalidBlockCount {
                count: block_count,
            });
        }
        Ok(Self::tabulate(cipher, block_count))
    }

    /// Like `generate`, without checking `block_count`.
    pub(crate) fn tabulate<C: BlockCipher + ?Sized>(cipher: &C, block_count: usize) -> Self {
        let mut li = [0; BLOCK_SIZE];
        cipher.forward(&mut li);
        let masks = (0..block_count)
            .map(|_| {
                double_in_place(&mut li);
                li
            })
            .collect();
        Self { masks }
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.masks.get(index)
    }

    pub fn masks(&self) -> &[Block] {
        &self.masks
    }

    /// The first `block_count` masks, if the table is long enough
    pub fn prefix(&self, block_count: usize) -> Option<&[Block]> {
        self.masks.get(..block_count)
    }
}

/// Holds the full-length L-table for one cipher key.
///
/// The cache does not know which key it was built from. Call
/// [`LTableCache::precompute`] again (or [`LTableCache::clear`])
/// whenever the key changes, otherwise every transform that reads
/// from it silently produces garbage. [`LTableCache::verify`] can
/// be used to check a cache against a cipher.
///
/// Mutating the cache needs `&mut self`, so it cannot race with
/// transforms reading it through a shared reference.
#[derive(Debug, Clone, Default)]
pub struct LTableCache {
    table: Option<LTable>,
}

impl LTableCache {
    /// Creates a disabled cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the table for the maximum message length and enables the cache.
    ///
    /// # Panics
    ///
    /// Panics if `cipher`'s block size is not 16. [`crate::Eme`] checks
    /// the block size before it precomputes.
    pub fn precompute<C: BlockCipher + ?Sized>(&mut self, cipher: &C) {
        assert!(
            cipher.block_size() == BLOCK_SIZE,
            "L-table needs a cipher with a block size of 16"
        );
        debug!("Precomputing L-table for {} blocks", MAX_BLOCKS);
        self.table = Some(LTable::tabulate(cipher, MAX_BLOCKS));
    }

    /// Disables the cache; transforms go back to computing the table per call.
    pub fn clear(&mut self) {
        debug!("Clearing L-table cache");
        self.table = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.table.is_some()
    }

    /// Cached masks for a message of `block_count` blocks.
    /// `None` if the cache is disabled.
    pub fn table(&self, block_count: usize) -> Option<&[Block]> {
        self.table.as_ref()?.prefix(block_count)
    }

    /// Checks that the cached table belongs to `cipher`'s key.
    ///
    /// A disabled cache is never read, so any 16-byte cipher passes.
    pub fn verify<C: BlockCipher + ?Sized>(&self, cipher: &C) -> Result<()> {
        check_block_size(cipher)?;
        let Some(first) = self.table.as_ref().and_then(|table| table.get(0)) else {
            return Ok(());
        };
        let expected = LTable::tabulate(cipher, 1);
        if expected.get(0) == Some(first) {
            Ok(())
        } else {
            Err(EmeError::StaleCache)
        }
    }
}
