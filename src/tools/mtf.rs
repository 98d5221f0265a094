//! Move-To-Front-2: a move-to-front variant that is slower to promote newcomers.
//!
//! A symbol found at position 1 only moves to the front if the previous symbol was not already at
//! the front. A symbol found further back moves to position 1, not 0. Runs interrupted by a single
//! stray byte therefore keep their zero ranks.

/// Shared list state for both directions.
struct Mtf2 {
    list: [u8; 256],
    last_pos_zero: bool,
}

impl Mtf2 {
    fn new() -> Self {
        let mut list = [0_u8; 256];
        for (i, b) in list.iter_mut().enumerate() {
            *b = i as u8;
        }
        Self {
            list,
            last_pos_zero: true,
        }
    }

    /// Current rank of `byte`. The list is always a permutation, so this terminates.
    #[inline(always)]
    fn position(&self, byte: u8) -> usize {
        let mut pos = 0;
        while self.list[pos] != byte {
            pos += 1;
        }
        pos
    }

    /// Move `byte`, currently at `pos`, to its new rank.
    #[inline(always)]
    fn update(&mut self, byte: u8, pos: usize) {
        match pos {
            0 => self.last_pos_zero = true,
            1 => {
                if !self.last_pos_zero {
                    self.list[1] = self.list[0];
                    self.list[0] = byte;
                }
                self.last_pos_zero = false;
            }
            _ => {
                self.list.copy_within(1..pos, 2);
                self.list[1] = byte;
                self.last_pos_zero = false;
            }
        }
    }
}

/// Replace every byte in `data` by its MTF-2 rank.
pub fn mtf2(data: &mut [u8]) {
    let mut state = Mtf2::new();
    for b in data.iter_mut() {
        let byte = *b;
        let pos = state.position(byte);
        *b = pos as u8;
        state.update(byte, pos);
    }
}

/// Inverse of [`mtf2`].
pub fn unmtf2(data: &mut [u8]) {
    let mut state = Mtf2::new();
    for b in data.iter_mut() {
        let pos = *b as usize;
        let byte = state.list[pos];
        *b = byte;
        state.update(byte, pos);
    }
}

#[cfg(test)]
mod test {
    use super::{mtf2, unmtf2};

    #[test]
    fn mtf2_vector_test() {
        let input = [
            13, 10, 14, 0, 10, 5, 6, 1, 9, 10, 1, 3, 9, 1, 1, 6, 4, 2, 7, 0, 8, 1, 1, 8, 8, 8,
        ];
        let expected = [
            13, 11, 14, 0, 2, 8, 9, 6, 12, 5, 3, 9, 4, 3, 1, 5, 10, 10, 11, 5, 12, 0, 0, 1, 1, 0,
        ];
        let mut data = input;
        mtf2(&mut data);
        assert_eq!(data, expected);
        unmtf2(&mut data);
        assert_eq!(data, input);
    }

    #[test]
    fn first_symbol_rank_one_does_not_swap_test() {
        // 1 sits at rank 1 and nothing has been seen yet, so it stays put the first time and
        // only reaches the front on the second hit.
        let mut data = [1, 1, 1];
        mtf2(&mut data);
        assert_eq!(data, [1, 1, 0]);
    }

    #[test]
    fn empty_test() {
        let mut data: [u8; 0] = [];
        mtf2(&mut data);
        unmtf2(&mut data);
    }

    #[test]
    fn all_bytes_round_trip_test() {
        let input: Vec<u8> = (0..4096_u32).map(|i| (i * 97 % 256) as u8 ^ (i / 256) as u8).collect();
        let mut data = input.clone();
        mtf2(&mut data);
        unmtf2(&mut data);
        assert_eq!(data, input);
    }
}
