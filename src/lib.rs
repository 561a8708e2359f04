//! EME (ECB-Mix-ECB), the wide-block encryption mode by Halevi and Rogaway.
//!
//! EME turns a 16-byte block cipher such as AES into a tweakable,
//! length-preserving permutation over 16 to 2048 bytes. Changing
//! any bit of the input or of the tweak changes the whole output,
//! which makes it suitable for encrypting a disk sector or file
//! name as one unit.
//!
//! ```
//! use aes::cipher::{generic_array::GenericArray, KeyInit};
//! use aes::Aes256;
//! use eme::Eme;
//!
//! let eme = Eme::new(Aes256::new(&GenericArray::from([0x42; 32])))?;
//! let tweak = [0; 16];
//! let sector = [7; 512];
//!
//! let ciphertext = eme.encrypt(&tweak, &sector)?;
//! assert_eq!(ciphertext.len(), sector.len());
//! assert_eq!(eme.decrypt(&tweak, &ciphertext)?, sector);
//! # Ok::<(), eme::EmeError>(())
//! ```
//!
//! There is no padding and no authentication: inputs must already be
//! block aligned, and tampering is not detected.

pub mod block;
pub mod cipher;
pub mod error;
pub mod ltable;
pub mod mode;

pub use crate::cipher::{BlockCipher, Direction};
pub use crate::error::{EmeError, Result};
pub use crate::ltable::{LTable, LTableCache};
pub use crate::mode::{decrypt, encrypt, transform, Eme};

/// Always 128 bits; no other block size is supported
pub const BLOCK_SIZE: usize = 16;

/// Longest message EME handles, in blocks
pub const MAX_BLOCKS: usize = 128;

/// Longest message EME handles, in bytes
pub const MAX_DATA_LEN: usize = BLOCK_SIZE * MAX_BLOCKS;
