//! Table driven Huffman coding. Output is byte for byte the same as the bit-level coder.
//!
//! The encoder keeps up to 7 pending bits and looks up, for every (input byte, pending bit count)
//! pair, how many whole bytes to emit and what is left over. The decoder walks the code tree a
//! whole compressed byte at a time: for every (internal node, input byte) pair it knows which
//! symbols come out and which internal node it lands on.

use log::trace;

use super::huffman::{build_codes, read_header, ByteDecoder, HEADER_LEN};
use crate::error::Result;

#[derive(Clone, Copy, Default)]
struct HuffEntry {
    /// Bytes to output, 0 to 32.
    numemit: u8,
    /// Pending bits afterwards, 0 to 7.
    new_numbits: u8,
    /// High byte of the shifted code.
    firstpart: u8,
    /// Low byte of the shifted code.
    secondpart: u8,
}

/// Encoder state machine.
///
/// numemit 0: emit nothing, then bits |= secondpart.
/// numemit 1: emit bits | firstpart, then bits = secondpart.
/// numemit 2+: emit bits, numemit - 2 zeros, firstpart, then bits = secondpart.
pub struct HuffAutomaton {
    /// Indexed by byte * 8 + numbits.
    table: Vec<HuffEntry>,
    /// Left aligned compressed bits not yet output.
    bits: u8,
    numbits: u8,
}

impl HuffAutomaton {
    pub fn new(lengths: &[u8; 256], codes: &[u8; 256]) -> Self {
        let mut table = vec![HuffEntry::default(); 256 * 8];
        for byte in 0..256 {
            let length = lengths[byte] as u16;
            let code = codes[byte] as u16;
            for numbits in 0..8_u16 {
                let total = numbits + length;
                let new_numbits = (total % 8) as u8;
                // Empty bits at the right of the pending byte afterwards, 1 to 8.
                let empty = 8 - new_numbits;
                let shifted = code << empty;
                table[byte * 8 + numbits as usize] = HuffEntry {
                    numemit: (total / 8) as u8,
                    new_numbits,
                    firstpart: (shifted >> 8) as u8,
                    secondpart: (shifted & 0xff) as u8,
                };
            }
        }
        Self {
            table,
            bits: 0,
            numbits: 0,
        }
    }

    /// Encode `data` onto the end of `dest`, flushing the final partial byte.
    pub fn run(&mut self, data: &[u8], dest: &mut Vec<u8>) {
        for &byte in data {
            let e = self.table[byte as usize * 8 + self.numbits as usize];
            self.numbits = e.new_numbits;
            match e.numemit {
                0 => self.bits |= e.secondpart,
                1 => {
                    dest.push(self.bits | e.firstpart);
                    self.bits = e.secondpart;
                }
                n => {
                    dest.push(self.bits);
                    dest.resize(dest.len() + n as usize - 2, 0);
                    dest.push(e.firstpart);
                    self.bits = e.secondpart;
                }
            }
        }
        if self.numbits != 0 {
            dest.push(self.bits);
            self.bits = 0;
            self.numbits = 0;
        }
    }
}

/// Huffman encode `data` with the encoder automaton.
pub fn huff_auto(data: &[u8]) -> Vec<u8> {
    let (lengths, codes, bits) = build_codes(data);
    let mut out = Vec::with_capacity(HEADER_LEN + ((bits + 7) / 8) as usize);
    out.extend_from_slice(&lengths);
    HuffAutomaton::new(&lengths, &codes).run(data, &mut out);
    out
}

const ID_EMIT_NO_SYMBOLS: u8 = 254;
const ID_EMIT_ONE_SYMBOL: u8 = 255;
/// Leaf indices are the byte values; internal nodes follow, the root first.
const FIRST_INTERNAL: u16 = 256;

#[derive(Clone, Copy)]
struct PuffEntry {
    /// ID_EMIT_NO_SYMBOLS, ID_EMIT_ONE_SYMBOL, or an aux table id when more follow.
    aux_id: u8,
    first_symbol: u8,
    dest_node: u8,
}

/// Decoder state machine.
///
/// After the first symbol in a byte is emitted we are back at the root, so what else that byte
/// emits depends only on its remaining 1 to 7 bits. Those bit strings (0, 1, 00, 01, 10, ...) get
/// ids 0 to 253 and index the aux tables.
pub struct PuffAutomaton {
    /// Indexed by internal node * 256 + byte.
    main: Vec<PuffEntry>,
    aux_numemit: [u8; 254],
    aux_table: [[u8; 7]; 254],
    curr_node: u8,
}

/// Rebuild the code tree from the decoder table. Returns the children of each internal node,
/// root first, using leaf = byte value and internal = FIRST_INTERNAL + index.
fn regen_tree(decoder: &ByteDecoder) -> Vec<[u16; 2]> {
    let mut internal = Vec::with_capacity(255);
    regen_tree_helper(&mut internal, decoder, 0, 0);
    internal
}

fn regen_tree_helper(
    internal: &mut Vec<[u16; 2]>,
    decoder: &ByteDecoder,
    length: u8,
    code: u8,
) -> u16 {
    let me = internal.len();
    internal.push([0, 0]);

    let length = length + 1;
    let code = code << 1;
    for bit in 0..2_u8 {
        let child = match decoder.lookup(length, code | bit) {
            Some(sym) => sym as u16,
            None => regen_tree_helper(internal, decoder, length, code | bit),
        };
        internal[me][bit as usize] = child;
    }
    FIRST_INTERNAL + me as u16
}

/// Id of the low `numbits` bits of `byte`.
#[inline(always)]
fn bit_string_id(numbits: u32, byte: usize) -> usize {
    (1 << numbits) - 2 + (byte & ((1 << numbits) - 1))
}

impl PuffAutomaton {
    pub fn new(lengths: &[u8; 256], codes: &[u8; 256]) -> Self {
        let tree = regen_tree(&ByteDecoder::new(lengths, codes));
        debug_assert_eq!(tree.len(), 255);
        let child = |node: usize, bit: usize| tree[node][bit];

        let mut aux_numemit = [0_u8; 254];
        let mut aux_table = [[0_u8; 7]; 254];
        let mut aux_dest = [0_u8; 254];

        for numbits in 1..=7_u32 {
            for masked in 0..(1_usize << numbits) {
                let id = bit_string_id(numbits, masked);
                let mut p = 0;
                for k in (0..numbits).rev() {
                    let next = child(p, masked >> k & 1);
                    if next < FIRST_INTERNAL {
                        aux_table[id][aux_numemit[id] as usize] = next as u8;
                        aux_numemit[id] += 1;
                        p = 0;
                    } else {
                        p = (next - FIRST_INTERNAL) as usize;
                    }
                }
                aux_dest[id] = p as u8;
            }
        }

        let mut main = vec![
            PuffEntry {
                aux_id: ID_EMIT_NO_SYMBOLS,
                first_symbol: 0,
                dest_node: 0,
            };
            255 * 256
        ];

        for node in 0..255 {
            for byte in 0..256 {
                let ent = &mut main[node * 256 + byte];
                let mut p = node;
                for k in (0..8_u32).rev() {
                    let next = child(p, byte >> k & 1);
                    if next >= FIRST_INTERNAL {
                        p = (next - FIRST_INTERNAL) as usize;
                        continue;
                    }
                    ent.aux_id = ID_EMIT_ONE_SYMBOL;
                    ent.first_symbol = next as u8;
                    if k == 0 {
                        p = 0;
                    } else {
                        let id = bit_string_id(k, byte);
                        p = aux_dest[id] as usize;
                        if aux_numemit[id] > 0 {
                            ent.aux_id = id as u8;
                        }
                    }
                    break;
                }
                ent.dest_node = p as u8;
            }
        }

        Self {
            main,
            aux_numemit,
            aux_table,
            curr_node: 0,
        }
    }

    /// Decode `data`, appending symbols to `dest`. Trailing padding never completes a code.
    pub fn run(&mut self, data: &[u8], dest: &mut Vec<u8>) {
        for &byte in data {
            let e = self.main[self.curr_node as usize * 256 + byte as usize];
            self.curr_node = e.dest_node;
            match e.aux_id {
                ID_EMIT_NO_SYMBOLS => {}
                ID_EMIT_ONE_SYMBOL => dest.push(e.first_symbol),
                id => {
                    dest.push(e.first_symbol);
                    let id = id as usize;
                    dest.extend_from_slice(&self.aux_table[id][..self.aux_numemit[id] as usize]);
                }
            }
        }
    }
}

/// Decode a [`huff_auto`] stream with the decoder automaton.
pub fn puff_auto(data: &[u8]) -> Result<Vec<u8>> {
    let (lengths, codes, payload) = read_header(data)?;
    let mut out = Vec::with_capacity(data.len() * 2);
    PuffAutomaton::new(&lengths, &codes).run(payload, &mut out);
    trace!("Huffman automaton decoded {} bytes into {}", payload.len(), out.len());
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::{huff_auto, puff_auto, regen_tree, HuffAutomaton, FIRST_INTERNAL};
    use crate::huffman_coding::huffman::{make_codes, ByteDecoder};

    #[test]
    fn regen_tree_uniform_test() {
        let lengths = [8_u8; 256];
        let codes = make_codes(&lengths);
        let tree = regen_tree(&ByteDecoder::new(&lengths, &codes));
        assert_eq!(tree.len(), 255);
        // Walking 0b0000_0011 from the root reaches leaf 3.
        let mut node = 0;
        let mut leaf = 0;
        for k in (0..8).rev() {
            let next = tree[node][(3 >> k) & 1];
            if next < FIRST_INTERNAL {
                leaf = next;
            } else {
                node = (next - FIRST_INTERNAL) as usize;
            }
        }
        assert_eq!(leaf, 3);
    }

    #[test]
    fn encoder_pads_final_byte_test() {
        // Symbol k has a (k + 1)-bit code, so 0 is "1" and 1 is "01".
        let mut lengths = [255_u8; 256];
        for (sym, l) in lengths.iter_mut().enumerate().take(255) {
            *l = sym as u8 + 1;
        }
        let codes = make_codes(&lengths);

        let mut out = vec![];
        HuffAutomaton::new(&lengths, &codes).run(&[0, 0, 0], &mut out);
        assert_eq!(out, vec![0b1110_0000]);

        let mut out = vec![];
        HuffAutomaton::new(&lengths, &codes).run(&[0, 1, 0, 0, 0, 0, 1], &mut out);
        assert_eq!(out, vec![0b1011_1110, 0b1000_0000]);
    }

    #[test]
    fn round_trip_test() {
        let orig = b"she sells sea shells by the sea shore".repeat(300);
        let compressed = huff_auto(&orig);
        assert!(compressed.len() < orig.len());
        assert_eq!(puff_auto(&compressed).unwrap(), orig);
    }
}
