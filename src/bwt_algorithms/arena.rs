//! Allocators for suffix tree edges.
//!
//! Edges are addressed by `u32` slots rather than references, so neither arena ever has to hand
//! out a pointer that a later allocation could invalidate.

/// Growable arena made of fixed-size chunks. Existing chunks are never moved or resized, so
/// growth costs one chunk allocation and never copies previously made items.
pub struct FlexArena<T> {
    chunk_len: usize,
    chunks: Vec<Vec<T>>,
    len: usize,
}

impl<T> FlexArena<T> {
    /// Sizes chunks for a block of `n` bytes. There are at most roughly `n` internal edges, so
    /// n / 200 per chunk wastes at most about 0.5% of that, with a floor to keep the chunk list short.
    pub fn new(n: usize) -> Self {
        Self {
            chunk_len: (n / 200).max(1000),
            chunks: Vec::new(),
            len: 0,
        }
    }

    /// Store `item`, returning its slot.
    pub fn make(&mut self, item: T) -> u32 {
        if self.len == self.chunks.len() * self.chunk_len {
            self.chunks.push(Vec::with_capacity(self.chunk_len));
        }
        let slot = self.len;
        // The last chunk has room, see above.
        if let Some(chunk) = self.chunks.last_mut() {
            chunk.push(item);
        }
        self.len += 1;
        slot as u32
    }

    pub fn get(&self, slot: u32) -> &T {
        let slot = slot as usize;
        &self.chunks[slot / self.chunk_len][slot % self.chunk_len]
    }

    pub fn get_mut(&mut self, slot: u32) -> &mut T {
        let slot = slot as usize;
        &mut self.chunks[slot / self.chunk_len][slot % self.chunk_len]
    }

    pub fn len(&self) -> usize {
        self.len
    }
}

/// Arena allocated once, up front, for a known number of items. Making more than that is a bug.
pub struct FixedArena<T> {
    items: Vec<T>,
}

impl<T> FixedArena<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Store `item`, returning its slot.
    pub fn make(&mut self, item: T) -> u32 {
        debug_assert!(
            self.items.len() < self.items.capacity(),
            "FixedArena is out of space"
        );
        self.items.push(item);
        (self.items.len() - 1) as u32
    }

    pub fn get(&self, slot: u32) -> &T {
        &self.items[slot as usize]
    }

    pub fn get_mut(&mut self, slot: u32) -> &mut T {
        &mut self.items[slot as usize]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod test {
    use super::{FixedArena, FlexArena};

    #[test]
    fn flex_arena_spans_chunks_test() {
        let mut arena = FlexArena::new(10);
        for i in 0..2500_u32 {
            assert_eq!(arena.make(i * 3), i);
        }
        assert_eq!(arena.len(), 2500);
        assert_eq!(arena.chunks.len(), 3);
        assert_eq!(*arena.get(0), 0);
        assert_eq!(*arena.get(1000), 3000);
        assert_eq!(*arena.get(2499), 7497);
        *arena.get_mut(1999) = 7;
        assert_eq!(*arena.get(1999), 7);
    }

    #[test]
    fn fixed_arena_test() {
        let mut arena = FixedArena::new(3);
        assert_eq!(arena.make('a'), 0);
        assert_eq!(arena.make('b'), 1);
        assert_eq!(arena.make('c'), 2);
        *arena.get_mut(1) = 'z';
        assert_eq!(*arena.get(1), 'z');
        assert_eq!(arena.len(), 3);
    }
}
