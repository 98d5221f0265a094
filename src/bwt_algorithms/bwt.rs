//! Forward and inverse BWT over whole blocks.
//!
//! A BWT record is laid out as:
//!
//! | bytes     | content                                   |
//! |-----------|-------------------------------------------|
//! | `[0..4)`  | primary index, big-endian u32             |
//! | `[4..8)`  | sentinel index, big-endian u32            |
//! | `[8..)`   | N + 1 slots, the sentinel slot holds 0x00 |
//!
//! Both indices count slots, not record bytes.

use std::cmp::Ordering;

use log::{debug, trace};

use super::suffix_tree::{SuffixTree, SENTINEL, SIGMA};
use super::{check_block_len, FILLER, MAX_BLOCK_SIZE, MIN_BLOCK_SIZE, RECORD_OVERHEAD};
use crate::error::{Error, Result};

/// Burrows-Wheeler transform of `block`, returned as a record of `block.len() + 9` bytes.
pub fn bwt(block: &[u8]) -> Result<Vec<u8>> {
    check_block_len(block.len())?;
    let n = block.len();

    let tree = SuffixTree::new(block);
    debug!(
        "Suffix tree for {} bytes has {} leaves and {} internal nodes",
        n,
        tree.leaf_count(),
        tree.internal_count()
    );

    let mut record = vec![0_u8; n + RECORD_OVERHEAD];
    let (header, slots) = record.split_at_mut(8);
    let mut pos = 0_usize;
    let mut primary = 0_u32;
    let mut sentinel = 0_u32;

    // A leaf at path length len is the suffix starting at N + 1 - len. Its slot gets the byte
    // just before that suffix.
    tree.dfs(|len| {
        let len = len as usize;
        match len.cmp(&n) {
            Ordering::Less => slots[pos] = block[n - len],
            Ordering::Equal => {
                primary = pos as u32;
                slots[pos] = block[0];
            }
            Ordering::Greater => {
                sentinel = pos as u32;
                slots[pos] = FILLER;
            }
        }
        pos += 1;
    });
    debug_assert_eq!(pos, n + 1);

    header[0..4].copy_from_slice(&primary.to_be_bytes());
    header[4..8].copy_from_slice(&sentinel.to_be_bytes());
    trace!("BWT primary index {}, sentinel index {}", primary, sentinel);

    Ok(record)
}

/// Inverse of [`bwt`]. Validates the record before walking it.
pub fn unbwt(record: &[u8]) -> Result<Vec<u8>> {
    if record.len() < RECORD_OVERHEAD + MIN_BLOCK_SIZE {
        return Err(Error::RecordTooSmall(record.len()));
    }
    if record.len() > RECORD_OVERHEAD + MAX_BLOCK_SIZE {
        return Err(Error::RecordTooBig(record.len()));
    }

    let primary = u32::from_be_bytes([record[0], record[1], record[2], record[3]]);
    let sentinel = u32::from_be_bytes([record[4], record[5], record[6], record[7]]);
    let slots = &record[8..];
    let n = slots.len();

    if primary as usize >= n {
        return Err(Error::InvalidPrimaryIndex {
            index: primary,
            slots: n,
        });
    }
    if sentinel as usize >= n {
        return Err(Error::InvalidSentinelIndex {
            index: sentinel,
            slots: n,
        });
    }
    if slots[sentinel as usize] != FILLER {
        return Err(Error::MissingFiller(sentinel));
    }

    let sentinel = sentinel as usize;
    let symbol = |i: usize| -> usize {
        if i == sentinel {
            SENTINEL as usize
        } else {
            slots[i] as usize
        }
    };

    let mut freqs = [0_u32; SIGMA as usize];
    for i in 0..n {
        freqs[symbol(i)] += 1;
    }

    // mapping[s] is the first row of the sorted column that starts with s
    let mut mapping = [0_u32; SIGMA as usize];
    for s in 1..SIGMA as usize {
        mapping[s] = mapping[s - 1] + freqs[s - 1];
    }

    let mut links = vec![0_u32; n];
    for (i, link) in links.iter_mut().enumerate() {
        let s = symbol(i);
        *link = mapping[s];
        mapping[s] += 1;
    }

    let mut out = vec![0_u8; n];
    let mut index = primary as usize;
    for byte in out.iter_mut().rev() {
        index = links[index] as usize;
        *byte = slots[index];
    }

    if out.last() != Some(&FILLER) {
        return Err(Error::CorruptRecord);
    }
    out.pop();
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::{bwt, unbwt};
    use crate::bwt_algorithms::MAX_BLOCK_SIZE;
    use crate::error::Error;

    fn pseudo_random(len: usize, alphabet: u32, mut seed: u32) -> Vec<u8> {
        (0..len)
            .map(|_| {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                ((seed >> 16) % alphabet) as u8
            })
            .collect()
    }

    #[test]
    fn single_byte_test() {
        assert_eq!(bwt(&[88]).unwrap(), vec![0, 0, 0, 1, 0, 0, 0, 0, 0, 88]);
        assert_eq!(unbwt(&[0, 0, 0, 1, 0, 0, 0, 0, 0, 88]).unwrap(), vec![88]);
    }

    #[test]
    fn mississippi_test() {
        let record = bwt(b"MISSISSIPPI").unwrap();
        assert_eq!(
            record,
            vec![0, 0, 0, 2, 0, 0, 0, 4, b'S', b'S', b'M', b'P', 0, b'P', b'I', b'S', b'S', b'I', b'I', b'I']
        );
        assert_eq!(unbwt(&record).unwrap(), b"MISSISSIPPI");
    }

    #[test]
    fn long_run_test() {
        let block = vec![77_u8; 3 * 1024 * 1024];
        let record = bwt(&block).unwrap();
        assert_eq!(&record[..9], &[0, 0, 0, 1, 0, 0, 0, 0, 0]);
        assert!(record[9..].iter().all(|&b| b == 77));
        assert_eq!(unbwt(&record).unwrap(), block);
    }

    #[test]
    fn round_trip_test() {
        for (len, alphabet, seed) in [(2, 2, 1), (100, 2, 9), (4096, 4, 3), (70_000, 256, 5)] {
            let block = pseudo_random(len, alphabet, seed);
            let record = bwt(&block).unwrap();
            assert_eq!(record.len(), block.len() + 9);
            assert_eq!(unbwt(&record).unwrap(), block);
        }
        let text = "It is a truth universally acknowledged, that a single man in possession of a good fortune, must be in want of a wife.".repeat(40);
        assert_eq!(unbwt(&bwt(text.as_bytes()).unwrap()).unwrap(), text.as_bytes());
    }

    #[test]
    fn empty_block_test() {
        assert_eq!(bwt(&[]), Err(Error::BlockSize(0)));
    }

    #[test]
    fn bad_record_test() {
        assert_eq!(unbwt(&[0; 9]), Err(Error::RecordTooSmall(9)));
        assert_eq!(
            unbwt(&[0, 0, 0, 2, 0, 0, 0, 0, 0, 88]),
            Err(Error::InvalidPrimaryIndex { index: 2, slots: 2 })
        );
        assert_eq!(
            unbwt(&[0, 0, 0, 1, 0, 0, 1, 0, 0, 88]),
            Err(Error::InvalidSentinelIndex { index: 256, slots: 2 })
        );
        assert_eq!(
            unbwt(&[0, 0, 0, 1, 0, 0, 0, 1, 0, 88]),
            Err(Error::MissingFiller(1))
        );
    }

    #[test]
    fn corrupt_record_test() {
        // Primary points at the sentinel slot, so the walk ends on 'X' instead of the filler.
        assert_eq!(
            unbwt(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 88]),
            Err(Error::CorruptRecord)
        );
    }

    #[test]
    fn oversized_block_test() {
        assert_eq!(
            bwt(&vec![0; MAX_BLOCK_SIZE + 1]),
            Err(Error::BlockSize(MAX_BLOCK_SIZE + 1))
        );
    }

    #[test]
    #[ignore]
    fn max_block_test() {
        let block = pseudo_random(MAX_BLOCK_SIZE, 4, 17);
        let record = bwt(&block).unwrap();
        assert_eq!(unbwt(&record).unwrap(), block);
    }
}
