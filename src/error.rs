//! Errors reported by the transforms and codecs.
//!
//! Everything here is reachable from untrusted input (sizes, indices, headers). Conditions that
//! can only arise from a bug in the suffix tree are `debug_assert!`ed instead.

use crate::bwt_algorithms::{MAX_BLOCK_SIZE, MIN_BLOCK_SIZE};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("block of {0} bytes is outside the allowed range ({} to {} bytes)", MIN_BLOCK_SIZE, MAX_BLOCK_SIZE)]
    BlockSize(usize),
    #[error("BWT record of {0} bytes is too small")]
    RecordTooSmall(usize),
    #[error("BWT record of {0} bytes is too big")]
    RecordTooBig(usize),
    #[error("invalid primary index {index} for {slots} slots")]
    InvalidPrimaryIndex { index: u32, slots: usize },
    #[error("invalid sentinel index {index} for {slots} slots")]
    InvalidSentinelIndex { index: u32, slots: usize },
    #[error("sentinel slot {0} does not contain the filler byte")]
    MissingFiller(u32),
    #[error("BWT record is corrupt: reconstruction did not end on the filler byte")]
    CorruptRecord,
    #[error("input of {0} bytes is too big to zero-length encode")]
    ZleInputTooBig(usize),
    #[error("zero run length overflowed its counter")]
    ZleRunOverflow,
    #[error("zero-length decoding produced too many bytes")]
    ZleTooManyBytes,
    #[error("escape byte 0xFF was followed by nothing")]
    ZleUnterminatedEscape,
    #[error("escape byte 0xFF was followed by invalid byte {0:#04x}")]
    ZleInvalidEscape(u8),
    #[error("Huffman stream of {0} bytes is too short to hold the code length table")]
    HuffmanHeaderTruncated(usize),
    #[error("Huffman code length table does not describe a complete prefix code")]
    InvalidCodeLengths,
    #[error("arithmetic decoding ran past {0} bytes without reaching the end marker")]
    ArithTooManyBytes(usize),
    #[error("not a bwz stream")]
    BadMagic,
    #[error("unknown entropy backend {0:#04x}")]
    UnknownBackend(u8),
    #[error("invalid block size level {0:#04x}")]
    InvalidBlockLevel(u8),
    #[error("block {0} is truncated")]
    TruncatedBlock(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
