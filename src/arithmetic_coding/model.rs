//! Adaptive frequency model.
//!
//! The total frequency never exceeds MAX_FREQUENCY. A larger increment adapts faster; a larger
//! ceiling remembers more precisely.

/// Ceiling for the total of all frequencies.
pub const MAX_FREQUENCY: u32 = 32767;
/// Added to a symbol's frequency each time it is coded.
pub const INCREMENT_VALUE: u32 = 64;
/// Marks the end of the stream. Sorts after every byte.
pub const SENTINEL: u16 = 256;
pub const NUM_SYMBOLS: usize = 257;

pub struct Model {
    freq: [u32; NUM_SYMBOLS],
    /// cfreq[i] is the total frequency of symbols i and up, so cfreq[0] is the grand total and
    /// cfreq[NUM_SYMBOLS] is 0.
    cfreq: [u32; NUM_SYMBOLS + 1],
}

impl Model {
    pub fn new() -> Self {
        let mut cfreq = [0_u32; NUM_SYMBOLS + 1];
        for (i, c) in cfreq.iter_mut().enumerate() {
            *c = (NUM_SYMBOLS - i) as u32;
        }
        Self {
            freq: [1; NUM_SYMBOLS],
            cfreq,
        }
    }

    /// Cumulative frequency of symbols `sym` and up.
    #[inline(always)]
    pub fn cum(&self, sym: usize) -> u32 {
        self.cfreq[sym]
    }

    #[inline(always)]
    pub fn total(&self) -> u32 {
        self.cfreq[0]
    }

    /// Count one more `sym`, halving everything first if the total would pass the ceiling.
    pub fn update(&mut self, sym: usize) {
        if self.cfreq[0] + INCREMENT_VALUE > MAX_FREQUENCY {
            let mut cum = 0;
            self.cfreq[NUM_SYMBOLS] = 0;
            for i in (0..NUM_SYMBOLS).rev() {
                self.freq[i] = (self.freq[i] + 1) / 2;
                cum += self.freq[i];
                self.cfreq[i] = cum;
            }
        }

        self.freq[sym] += INCREMENT_VALUE;
        for c in self.cfreq[..=sym].iter_mut() {
            *c += INCREMENT_VALUE;
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::{Model, INCREMENT_VALUE, MAX_FREQUENCY, NUM_SYMBOLS};

    #[test]
    fn initial_model_test() {
        let m = Model::new();
        assert_eq!(m.total(), NUM_SYMBOLS as u32);
        assert_eq!(m.cum(256), 1);
        assert_eq!(m.cum(NUM_SYMBOLS), 0);
    }

    #[test]
    fn update_test() {
        let mut m = Model::new();
        m.update(10);
        assert_eq!(m.total(), NUM_SYMBOLS as u32 + INCREMENT_VALUE);
        assert_eq!(m.cum(10) - m.cum(11), 1 + INCREMENT_VALUE);
        assert_eq!(m.cum(11), NUM_SYMBOLS as u32 - 11);
    }

    #[test]
    fn rescale_keeps_total_under_ceiling_test() {
        let mut m = Model::new();
        for i in 0..100_000 {
            m.update(i % 7);
            assert!(m.total() <= MAX_FREQUENCY);
            // Every symbol keeps a nonzero slice.
            assert!((0..NUM_SYMBOLS).all(|s| m.cum(s) > m.cum(s + 1)));
        }
    }
}
