//! The bwz stream container.
//!
//! | bytes | content                                        |
//! |-------|------------------------------------------------|
//! | 3     | magic, `BWZ`                                   |
//! | 1     | backend, `h` (Huffman) or `a` (arithmetic)     |
//! | 1     | block size level, `1` to `9` (times 100 000)   |
//!
//! followed by zero or more blocks, each a big-endian u32 payload length and the payload.

use log::{debug, info};

use super::compress_block::{compress_block, decompress_block};
use crate::error::{Error, Result};
use crate::tools::cli::Backend;

pub const MAGIC: &[u8; 3] = b"BWZ";
pub const HEADER_LEN: usize = 5;
/// Block size per level.
pub const LEVEL_BYTES: usize = 100_000;

/// Library-side settings for [`compress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    pub backend: Backend,
    /// 1..9, block size in units of 100 000 bytes
    pub block_level: u8,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            backend: Backend::Arith,
            block_level: 9,
        }
    }
}

/// Compress `data` into a bwz stream.
pub fn compress(data: &[u8], opts: &CompressOptions) -> Result<Vec<u8>> {
    if !(1..=9).contains(&opts.block_level) {
        return Err(Error::InvalidBlockLevel(opts.block_level));
    }
    let block_size = opts.block_level as usize * LEVEL_BYTES;

    let mut out = Vec::with_capacity(HEADER_LEN + data.len() / 2);
    out.extend_from_slice(MAGIC);
    out.push(opts.backend.tag());
    out.push(b'0' + opts.block_level);

    for (seq, block) in data.chunks(block_size).enumerate() {
        info!("Starting block {}", seq + 1);
        let payload = compress_block(block, opts.backend)?;
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(&payload);
    }

    debug!("Compressed {} bytes into {}", data.len(), out.len());
    Ok(out)
}

/// Decompress a bwz stream.
pub fn decompress(stream: &[u8]) -> Result<Vec<u8>> {
    if stream.len() < HEADER_LEN || &stream[..3] != MAGIC {
        return Err(Error::BadMagic);
    }
    let backend = Backend::from_tag(stream[3]).ok_or(Error::UnknownBackend(stream[3]))?;
    let level = stream[4];
    if !(b'1'..=b'9').contains(&level) {
        return Err(Error::InvalidBlockLevel(level));
    }
    debug!(
        "Stream uses {} coding and {}k blocks",
        backend,
        (level - b'0') as usize * LEVEL_BYTES / 1000
    );

    let mut out = Vec::with_capacity(stream.len() * 3);
    let mut rest = &stream[HEADER_LEN..];
    let mut seq = 0;

    while !rest.is_empty() {
        seq += 1;
        if rest.len() < 4 {
            return Err(Error::TruncatedBlock(seq));
        }
        let len = u32::from_be_bytes([rest[0], rest[1], rest[2], rest[3]]) as usize;
        rest = &rest[4..];
        if rest.len() < len {
            return Err(Error::TruncatedBlock(seq));
        }
        let (payload, tail) = rest.split_at(len);

        info!("Decoding block {}", seq);
        out.extend_from_slice(&decompress_block(payload, backend)?);
        rest = tail;
    }

    Ok(out)
}
