use log::debug;

use super::model::{Model, NUM_SYMBOLS, SENTINEL};
use super::{CODE_VALUE_BITS, FIRST_QTR, HALF, THIRD_QTR, TOP_VALUE};
use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitreader::BitReader;
use crate::bwt_algorithms::{MAX_BLOCK_SIZE, RECORD_OVERHEAD};
use crate::error::{Error, Result};

/// Decoding gives up past this many bytes. ZLE can at most double a BWT record.
pub const MAX_DECODED: usize = 2 * (RECORD_OVERHEAD + MAX_BLOCK_SIZE);

struct Encoder {
    low: u32,
    high: u32,
    /// Opposite bits owed once the next bit is known.
    follow_bits: u32,
    out: BitPacker,
    model: Model,
}

impl Encoder {
    fn new(size: usize) -> Self {
        Self {
            low: 0,
            high: TOP_VALUE,
            follow_bits: 0,
            out: BitPacker::new(size),
            model: Model::new(),
        }
    }

    fn encode(&mut self, sym: usize) {
        let range = self.high - self.low + 1;
        let total = self.model.total();
        self.high = self.low + range * self.model.cum(sym) / total - 1;
        self.low += range * self.model.cum(sym + 1) / total;

        loop {
            if self.high < HALF {
                self.bit_plus_follow(false);
            } else if self.low >= HALF {
                self.bit_plus_follow(true);
                self.low -= HALF;
                self.high -= HALF;
            } else if self.low >= FIRST_QTR && self.high < THIRD_QTR {
                self.follow_bits += 1;
                self.low -= FIRST_QTR;
                self.high -= FIRST_QTR;
            } else {
                break;
            }
            self.low *= 2;
            self.high = 2 * self.high + 1;
        }

        self.model.update(sym);
    }

    fn bit_plus_follow(&mut self, bit: bool) {
        self.out.out_bit(bit);
        while self.follow_bits > 0 {
            self.out.out_bit(!bit);
            self.follow_bits -= 1;
        }
    }

    /// One more bit picks a quarter inside the final interval.
    fn finish(mut self) -> Vec<u8> {
        self.follow_bits += 1;
        let bit = self.low >= FIRST_QTR;
        self.bit_plus_follow(bit);
        self.out.finish()
    }
}

struct Decoder<'a> {
    input: BitReader<'a>,
    value: u32,
    low: u32,
    high: u32,
    model: Model,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8]) -> Self {
        let mut d = Self {
            input: BitReader::new(data),
            value: 0,
            low: 0,
            high: TOP_VALUE,
            model: Model::new(),
        };
        for _ in 0..CODE_VALUE_BITS {
            d.value = (d.value << 1) | d.input_bit();
        }
        d
    }

    /// Past the end of the input every bit reads as 0.
    #[inline(always)]
    fn input_bit(&mut self) -> u32 {
        self.input.bit().unwrap_or(0) as u32
    }

    fn decode(&mut self) -> usize {
        let range = self.high - self.low + 1;
        let total = self.model.total();
        let cum = ((self.value - self.low + 1) * total - 1) / range;

        let mut sym = 0;
        while self.model.cum(sym + 1) > cum {
            sym += 1;
        }
        debug_assert!(sym < NUM_SYMBOLS);

        self.high = self.low + range * self.model.cum(sym) / total - 1;
        self.low += range * self.model.cum(sym + 1) / total;

        loop {
            if self.high < HALF {
                // nothing to subtract
            } else if self.low >= HALF {
                self.value -= HALF;
                self.low -= HALF;
                self.high -= HALF;
            } else if self.low >= FIRST_QTR && self.high < THIRD_QTR {
                self.value -= FIRST_QTR;
                self.low -= FIRST_QTR;
                self.high -= FIRST_QTR;
            } else {
                break;
            }
            self.low *= 2;
            self.high = 2 * self.high + 1;
            self.value = 2 * self.value + self.input_bit();
        }

        self.model.update(sym);
        sym
    }
}

/// Arithmetic encode `data`, followed by the end marker.
pub fn arith(data: &[u8]) -> Vec<u8> {
    let mut encoder = Encoder::new(data.len() / 2 + 16);
    for &byte in data {
        encoder.encode(byte as usize);
    }
    encoder.encode(SENTINEL as usize);
    let out = encoder.finish();
    debug!("Arithmetic coded {} bytes into {}", data.len(), out.len());
    out
}

/// Inverse of [`arith`]. Decodes until the end marker.
pub fn unarith(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = Decoder::new(data);
    let mut out = Vec::with_capacity(data.len() * 2);
    loop {
        let sym = decoder.decode();
        if sym == SENTINEL as usize {
            return Ok(out);
        }
        if out.len() == MAX_DECODED {
            return Err(Error::ArithTooManyBytes(MAX_DECODED));
        }
        out.push(sym as u8);
    }
}
