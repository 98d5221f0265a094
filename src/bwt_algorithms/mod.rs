//! The bwt_algorithms module holds the Burrows-Wheeler Transform and its inverse.
//!
//! The forward transform builds a suffix tree over the block (plus an implicit sentinel that
//! sorts after every byte) and reads the transform straight off a depth first walk of its
//! leaves. No comparison sorting is involved, so highly repetitive data costs no more than text.
//!
//! The inverse transform is the usual LF-mapping walk over the record.
//!
use crate::error::{Error, Result};

pub mod arena;
pub mod bwt;
pub mod suffix_tree;

/// Smallest block the transform accepts.
pub const MIN_BLOCK_SIZE: usize = 1;
/// Largest block the transform accepts (512 MiB).
pub const MAX_BLOCK_SIZE: usize = 512 * 1024 * 1024;
/// Bytes a BWT record adds to its block: two u32 indices plus the filler slot.
pub const RECORD_OVERHEAD: usize = 9;
/// Byte stored in the slot that stands for the sentinel.
pub const FILLER: u8 = 0;

/// Checks that a block of `len` bytes can be transformed.
pub fn check_block_len(len: usize) -> Result<()> {
    if (MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE).contains(&len) {
        Ok(())
    } else {
        Err(Error::BlockSize(len))
    }
}
