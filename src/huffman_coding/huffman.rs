//! Canonical Huffman coding of whole blocks.
//!
//! A compressed stream is 256 bytes of code lengths (one per byte value) followed by the packed
//! codes, MSB-first, with the last byte zero padded. Codes are assigned canonically from the
//! lengths, so the lengths are all a decoder needs.
//!
//! This file holds the straightforward bit-at-a-time coder. The table driven coder in
//! huffman_automaton produces identical output and is what [`huff`] and [`puff`] use.

use log::{debug, trace};

use super::huffman_automaton::{huff_auto, puff_auto};
use super::huffman_code_from_weights::code_lengths_from_weights;
use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitreader::BitReader;
use crate::error::{Error, Result};
use crate::tools::freq_count::freqs;

/// Size of the code length table at the front of every stream.
pub const HEADER_LEN: usize = 256;
/// Below this many compressed bytes, bit-at-a-time decoding beats building the automaton.
pub const AUTOMATON_THRESHOLD: usize = 6144;

/// Assign canonical codes: longest codes first, counting up, halving the counter at each
/// shorter length. Every code value fits in 8 bits; codes longer than 8 bits are implicitly
/// prefixed with zeros.
pub fn make_codes(lengths: &[u8; 256]) -> [u8; 256] {
    let mut codes = [0_u8; 256];
    let mut start = 0_u8;
    for len in (1..=255_u8).rev() {
        for (sym, &l) in lengths.iter().enumerate() {
            if l == len {
                codes[sym] = start;
                start = start.wrapping_add(1);
            }
        }
        start >>= 1;
    }
    codes
}

/// Check that the lengths describe a complete prefix code over all 256 symbols.
pub fn validate_code_lengths(lengths: &[u8; 256]) -> Result<()> {
    let mut counts = [0_u32; 256];
    for &l in lengths.iter() {
        if l == 0 {
            return Err(Error::InvalidCodeLengths);
        }
        counts[l as usize] += 1;
    }

    // Pair up nodes level by level, from the deepest up to the root.
    let mut total = 0_u32;
    for len in (1..=255).rev() {
        total += counts[len];
        if total % 2 != 0 {
            return Err(Error::InvalidCodeLengths);
        }
        total /= 2;
    }
    if total != 1 {
        return Err(Error::InvalidCodeLengths);
    }
    Ok(())
}

/// Split a stream into validated (lengths, codes) and the payload.
pub fn read_header(data: &[u8]) -> Result<([u8; 256], [u8; 256], &[u8])> {
    if data.len() < HEADER_LEN {
        return Err(Error::HuffmanHeaderTruncated(data.len()));
    }
    let (header, payload) = data.split_at(HEADER_LEN);
    let mut lengths = [0_u8; 256];
    lengths.copy_from_slice(header);
    validate_code_lengths(&lengths)?;
    Ok((lengths, make_codes(&lengths), payload))
}

/// Code lengths and codes for `data`, plus the number of payload bits they produce.
pub fn build_codes(data: &[u8]) -> ([u8; 256], [u8; 256], u64) {
    let freqs = freqs(data);
    let lengths = code_lengths_from_weights(&freqs);
    let codes = make_codes(&lengths);
    let bits: u64 = freqs
        .iter()
        .zip(lengths.iter())
        .map(|(&f, &l)| f as u64 * l as u64)
        .sum();
    (lengths, codes, bits)
}

/// Maps (length, code) to a symbol. 128 KB, but lookups are a single index.
pub struct ByteDecoder {
    table: Vec<u16>,
}

impl ByteDecoder {
    const INVALID: u16 = 256;

    pub fn new(lengths: &[u8; 256], codes: &[u8; 256]) -> Self {
        let mut table = vec![Self::INVALID; 256 * 256];
        for sym in 0..256 {
            table[lengths[sym] as usize * 256 + codes[sym] as usize] = sym as u16;
        }
        Self { table }
    }

    #[inline(always)]
    pub fn lookup(&self, length: u8, code: u8) -> Option<u8> {
        let sym = self.table[length as usize * 256 + code as usize];
        if sym == Self::INVALID {
            None
        } else {
            Some(sym as u8)
        }
    }
}

/// Huffman encode `data` one code bit at a time.
pub fn huff_bits(data: &[u8]) -> Vec<u8> {
    let (lengths, codes, bits) = build_codes(data);
    let mut bp = BitPacker::new(HEADER_LEN + (bits as usize + 7) / 8);
    for &len in lengths.iter() {
        bp.out_bits(8, len as u32);
    }

    for &byte in data {
        let len = lengths[byte as usize];
        let code = codes[byte as usize] as u32;
        if len > 8 {
            bp.out_zeros(len as usize - 8);
            bp.out_bits(8, code);
        } else {
            bp.out_bits(len, code);
        }
    }
    trace!("Huffman bit encoder finished at {}", bp.loc());
    bp.finish()
}

/// Decode one bit at a time, matching the most recently seen bits against the code table.
pub fn puff_bits(data: &[u8]) -> Result<Vec<u8>> {
    let (lengths, codes, payload) = read_header(data)?;
    let decoder = ByteDecoder::new(&lengths, &codes);

    let mut out = Vec::with_capacity(payload.len() * 2);
    let mut br = BitReader::new(payload);
    trace!("Huffman bit decoder reading {} bits", br.remaining());
    // Most recently seen 8 bits, and how many bits we have seen since the last symbol
    let mut mrs8b = 0_u8;
    let mut nbs = 0_u8;

    while let Some(bit) = br.bit() {
        mrs8b = (mrs8b << 1) | bit as u8;
        nbs += 1;
        if let Some(sym) = decoder.lookup(nbs, mrs8b) {
            out.push(sym);
            mrs8b = 0;
            nbs = 0;
        }
    }
    // Whatever is left over is the zero padding of the final byte
    trace!(
        "Huffman bit decoder finished at {} with {} padding bits",
        br.loc(),
        nbs
    );
    Ok(out)
}

/// Huffman compress `data`. Always produces at least the 256 byte header.
pub fn huff(data: &[u8]) -> Vec<u8> {
    let out = huff_auto(data);
    debug!("Huffman coded {} bytes into {}", data.len(), out.len());
    out
}

/// Inverse of [`huff`].
pub fn puff(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < AUTOMATON_THRESHOLD {
        puff_bits(data)
    } else {
        puff_auto(data)
    }
}
