//! This helper function is part of the huffman encoding system.
//!
//! It turns byte frequencies into code lengths. Every one of the 256 byte values gets a leaf,
//! even when its frequency is zero, so the decoder can rebuild the tree from the lengths alone
//! and the longest code is always at least 8 bits.
//!
//! Lengths are not limited; with 256 leaves no path can be longer than 255.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

#[derive(Debug)]
pub struct Node {
    pub weight: u64,
    /// Creation order. Leaves use their byte value, merged nodes count up from 256.
    pub seq: u32,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new node
    pub fn new(weight: u64, seq: u32, node_data: NodeData) -> Node {
        Node {
            weight,
            seq,
            node_data,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    /// Reversed, so the max-heap pops the lightest node first, then the oldest.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Build a Huffman tree over all 256 byte values and return each byte's code length.
pub fn code_lengths_from_weights(freqs: &[u32]) -> [u8; 256] {
    debug_assert_eq!(freqs.len(), 256);

    let mut heap: BinaryHeap<Node> = freqs
        .iter()
        .enumerate()
        .map(|(sym, &f)| Node::new(f as u64, sym as u32, NodeData::Leaf(sym as u8)))
        .collect();

    let mut seq = 256;
    // Pare the forest down to one single node with child nodes.
    while heap.len() > 1 {
        if let (Some(first), Some(second)) = (heap.pop(), heap.pop()) {
            heap.push(Node::new(
                first.weight + second.weight,
                seq,
                NodeData::Kids(Box::new(first), Box::new(second)),
            ));
            seq += 1;
        }
    }

    let mut lengths = [0_u8; 256];
    if let Some(root) = heap.pop() {
        return_leaves(&root, 0, &mut lengths);
    }
    lengths
}

/// Recursively walk the tree and record how far (deep) from the root node each leaf is.
/// Depth is the same as the code length.
fn return_leaves(node: &Node, depth: u8, lengths: &mut [u8; 256]) {
    match &node.node_data {
        NodeData::Kids(left_child, right_child) => {
            return_leaves(left_child, depth + 1, lengths);
            return_leaves(right_child, depth + 1, lengths);
        }
        NodeData::Leaf(sym) => {
            lengths[*sym as usize] = depth;
        }
    };
}

#[cfg(test)]
mod test {
    use super::code_lengths_from_weights;

    fn kraft_is_one(lengths: &[u8; 256]) -> bool {
        // Sum of 2^(255 - len) must equal 2^255; count per level instead.
        let mut total = 0_u64;
        for len in (1..=255_u8).rev() {
            total += lengths.iter().filter(|&&l| l == len).count() as u64;
            if total % 2 != 0 {
                return false;
            }
            total /= 2;
        }
        total == 1
    }

    #[test]
    fn uniform_weights_test() {
        let lengths = code_lengths_from_weights(&[1; 256]);
        assert!(lengths.iter().all(|&l| l == 8));
    }

    #[test]
    fn all_zero_weights_test() {
        let lengths = code_lengths_from_weights(&[0; 256]);
        assert!(lengths.iter().all(|&l| l >= 1));
        assert!(kraft_is_one(&lengths));
    }

    #[test]
    fn single_symbol_test() {
        let mut freqs = [0_u32; 256];
        freqs[137] = 1_234_567;
        let lengths = code_lengths_from_weights(&freqs);
        assert_eq!(lengths[137], 1);
        assert!(kraft_is_one(&lengths));
    }

    #[test]
    fn skewed_weights_test() {
        let freqs: Vec<u32> = (0..256).map(|i| if i < 32 { 1 << (i / 2) } else { 0 }).collect();
        let lengths = code_lengths_from_weights(&freqs);
        assert!(kraft_is_one(&lengths));
        // Heavier symbols never get longer codes than lighter ones.
        for i in 1..32 {
            if freqs[i] > freqs[i - 1] {
                assert!(lengths[i] <= lengths[i - 1]);
            }
        }
    }
}
