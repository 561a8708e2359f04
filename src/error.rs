use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EmeError {
    #[error("The cipher's block size is {size}, but EME requires 16")]
    InvalidBlockSize { size: usize },
    #[error("The tweak must be 16 bytes long, is {len}")]
    InvalidTweakLength { len: usize },
    #[error("Data length {len} is not a multiple of 16")]
    InvalidDataLength { len: usize },
    #[error("EME operates on 1-128 cipher blocks, got {count}")]
    InvalidBlockCount { count: usize },
    #[error("XOR operands differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
    #[error("The cached L-table was not derived from this cipher's key")]
    StaleCache,
}

pub type Result<T> = std::result::Result<T, EmeError>;
