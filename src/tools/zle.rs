//! Zero-length encoding: a bijective base-2 run-length code for the zero runs MTF-2 produces.
//!
//! A run of n zeros is written as the binary digits of n + 1, least significant first, with the
//! leading 1 dropped, one digit per byte (0x00 or 0x01). Every other byte is shifted up by one,
//! with 0xFE and 0xFF escaped as `FF 00` and `FF 01`.

use crate::bwt_algorithms::{MAX_BLOCK_SIZE, RECORD_OVERHEAD};
use crate::error::{Error, Result};

const MAX_OUTPUT: usize = RECORD_OVERHEAD + MAX_BLOCK_SIZE;
const ESCAPE: u8 = 0xFF;

/// Zero-length encode `data`.
pub fn zle(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() > MAX_OUTPUT {
        return Err(Error::ZleInputTooBig(data.len()));
    }

    let mut out = Vec::with_capacity(data.len());
    let mut run = 0_u32;

    for &byte in data {
        if byte == 0 {
            run += 1;
            continue;
        }
        encode_zero_run(run, &mut out);
        run = 0;
        match byte {
            0xFE => out.extend_from_slice(&[ESCAPE, 0x00]),
            0xFF => out.extend_from_slice(&[ESCAPE, 0x01]),
            b => out.push(b + 1),
        }
    }
    encode_zero_run(run, &mut out);

    Ok(out)
}

fn encode_zero_run(run: u32, out: &mut Vec<u8>) {
    if run == 0 {
        return;
    }
    let mut n = run + 1;
    while n != 1 {
        out.push((n & 1) as u8);
        n >>= 1;
    }
}

/// Run length being collected from 0x00/0x01 digits.
struct ZeroRun {
    len: u32,
    next_bit: u32,
}

impl ZeroRun {
    fn new() -> Self {
        Self { len: 0, next_bit: 1 }
    }

    fn push_digit(&mut self, digit: u8) -> Result<()> {
        if digit == 1 {
            self.len |= self.next_bit;
        }
        self.next_bit <<= 1;
        if self.next_bit == 0 {
            return Err(Error::ZleRunOverflow);
        }
        Ok(())
    }

    /// Write out the pending zeros, if any.
    fn flush(&mut self, out: &mut Vec<u8>) -> Result<()> {
        if self.next_bit == 1 {
            return Ok(());
        }
        let total = out.len() + (self.len | self.next_bit) as usize - 1;
        if total > MAX_OUTPUT {
            return Err(Error::ZleTooManyBytes);
        }
        out.resize(total, 0);
        *self = Self::new();
        Ok(())
    }
}

fn push_byte(out: &mut Vec<u8>, byte: u8) -> Result<()> {
    if out.len() == MAX_OUTPUT {
        return Err(Error::ZleTooManyBytes);
    }
    out.push(byte);
    Ok(())
}

/// Inverse of [`zle`].
pub fn unzle(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len());
    let mut run = ZeroRun::new();
    let mut bytes = data.iter();

    while let Some(&byte) = bytes.next() {
        match byte {
            0x00 | 0x01 => run.push_digit(byte)?,
            ESCAPE => {
                run.flush(&mut out)?;
                match bytes.next() {
                    Some(0x00) => push_byte(&mut out, 0xFE)?,
                    Some(0x01) => push_byte(&mut out, 0xFF)?,
                    Some(&b) => return Err(Error::ZleInvalidEscape(b)),
                    None => return Err(Error::ZleUnterminatedEscape),
                }
            }
            b => {
                run.flush(&mut out)?;
                push_byte(&mut out, b - 1)?;
            }
        }
    }
    run.flush(&mut out)?;

    Ok(out)
}
