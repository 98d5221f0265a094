//! Online suffix tree construction (Ukkonen) over a block plus a sentinel.
//!
//! Below the root sits an auxiliary "bottom" node with one synthetic edge per symbol. Every
//! extension step is therefore the same operation, and the first few characters need no special
//! handling. Edges live in three arenas:
//! - synthetic edges (exactly 257, hanging from bottom, never split),
//! - leaf edges (exactly N + 1, allocated up front, never split),
//! - hybrid edges, which carry their own right boundary and own the internal node they lead to.
//!
//! Edge boundaries are INCLUSIVE indices into the wrapped text. A leaf edge's right boundary is
//! always the sentinel position.

use super::arena::{FixedArena, FlexArena};

/// The sentinel sorts after every byte.
pub const SENTINEL: u16 = 256;
/// Alphabet size: 256 byte values plus the sentinel.
pub const SIGMA: u16 = 257;

/// Read-only view of the block: the sentinel sits at `infinity`, and each negative index -j
/// stands for the single symbol j - 1.
struct WrappedText<'a> {
    block: &'a [u8],
    infinity: i32,
}

impl<'a> WrappedText<'a> {
    #[inline(always)]
    fn at(&self, i: i32) -> u16 {
        if i == self.infinity {
            SENTINEL
        } else if i < 0 {
            (-i - 1) as u16
        } else {
            self.block[i as usize] as u16
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EdgeId {
    Synthetic(u32),
    Leaf(u32),
    Hybrid(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeId {
    Root,
    Bottom,
    /// The node owned by the hybrid edge in the same slot.
    Inner(u32),
}

/// Edges hanging off a node form a singly linked list, sorted by first symbol.
struct Edge {
    next: Option<EdgeId>,
    left: i32,
}

#[derive(Default)]
struct Node {
    head: Option<EdgeId>,
    link: Option<NodeId>,
}

struct Hybrid {
    edge: Edge,
    right: i32,
    node: Node,
}

pub struct SuffixTree<'a> {
    text: WrappedText<'a>,
    hybrids: FlexArena<Hybrid>,
    leaves: FixedArena<Edge>,
    synthetics: FixedArena<Edge>,
    root: Node,
    bottom: Node,
}

impl<'a> SuffixTree<'a> {
    /// Build the tree for `block`. The caller has already checked the block size.
    pub fn new(block: &'a [u8]) -> Self {
        let n = block.len();
        let mut tree = Self {
            text: WrappedText {
                block,
                infinity: n as i32,
            },
            hybrids: FlexArena::new(n),
            leaves: FixedArena::new(n + 1),
            synthetics: FixedArena::new(SIGMA as usize),
            root: Node {
                head: None,
                link: Some(NodeId::Bottom),
            },
            bottom: Node::default(),
        };

        // Build bottom's edge list from the end so that it comes out sorted.
        for j in (1..=SIGMA as i32).rev() {
            let next = tree.bottom.head;
            let slot = tree.synthetics.make(Edge { next, left: -j });
            tree.bottom.head = Some(EdgeId::Synthetic(slot));
        }

        let (mut s, mut k) = (NodeId::Root, 0);
        for i in 0..=tree.text.infinity {
            (s, k) = tree.update(s, k, i);
            (s, k) = tree.canonize(s, k, i);
        }

        debug_assert_eq!(tree.leaves.len(), n + 1);
        tree
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn internal_count(&self) -> usize {
        self.hybrids.len()
    }

    /// Depth first walk from the root, visiting edges in increasing symbol order. For every leaf,
    /// `f` receives the length of the path from the root, sentinel included. A suffix starting at
    /// offset s therefore reports N + 1 - s.
    pub fn dfs<F: FnMut(u32)>(&self, mut f: F) {
        let mut stack: Vec<(Option<EdgeId>, i32)> = vec![(self.root.head, 0)];

        while let Some(top) = stack.last_mut() {
            match top.0 {
                Some(e) => {
                    top.0 = self.edge(e).next;
                    let len = top.1 + self.right(e) - self.edge(e).left + 1;
                    match self.child(e) {
                        Some(child) => stack.push((self.node(child).head, len)),
                        None => f(len as u32),
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    fn edge(&self, e: EdgeId) -> &Edge {
        match e {
            EdgeId::Synthetic(slot) => self.synthetics.get(slot),
            EdgeId::Leaf(slot) => self.leaves.get(slot),
            EdgeId::Hybrid(slot) => &self.hybrids.get(slot).edge,
        }
    }

    fn edge_mut(&mut self, e: EdgeId) -> &mut Edge {
        match e {
            EdgeId::Synthetic(slot) => self.synthetics.get_mut(slot),
            EdgeId::Leaf(slot) => self.leaves.get_mut(slot),
            EdgeId::Hybrid(slot) => &mut self.hybrids.get_mut(slot).edge,
        }
    }

    fn node(&self, s: NodeId) -> &Node {
        match s {
            NodeId::Root => &self.root,
            NodeId::Bottom => &self.bottom,
            NodeId::Inner(slot) => &self.hybrids.get(slot).node,
        }
    }

    fn node_mut(&mut self, s: NodeId) -> &mut Node {
        match s {
            NodeId::Root => &mut self.root,
            NodeId::Bottom => &mut self.bottom,
            NodeId::Inner(slot) => &mut self.hybrids.get_mut(slot).node,
        }
    }

    fn right(&self, e: EdgeId) -> i32 {
        match e {
            EdgeId::Synthetic(slot) => self.synthetics.get(slot).left,
            EdgeId::Leaf(_) => self.text.infinity,
            EdgeId::Hybrid(slot) => self.hybrids.get(slot).right,
        }
    }

    /// Leaves have no node. Synthetic edges lead back up to the root.
    fn child(&self, e: EdgeId) -> Option<NodeId> {
        match e {
            EdgeId::Synthetic(_) => Some(NodeId::Root),
            EdgeId::Leaf(_) => None,
            EdgeId::Hybrid(slot) => Some(NodeId::Inner(slot)),
        }
    }

    /// The root's suffix link is bottom. Bottom's link is never followed.
    fn suffix_link(&self, s: NodeId) -> NodeId {
        let link = self.node(s).link;
        debug_assert!(link.is_some(), "suffix link missing on {:?}", s);
        link.unwrap_or(NodeId::Bottom)
    }

    /// Returns (previous edge, matching edge) for the edge out of `s` starting with `a`.
    fn find(&self, s: NodeId, a: u16) -> (Option<EdgeId>, Option<EdgeId>) {
        let mut old = None;
        let mut p = self.node(s).head;

        while let Some(e) = p {
            let x = self.text.at(self.edge(e).left);
            if x < a {
                old = p;
                p = self.edge(e).next;
            } else if x == a {
                return (old, Some(e));
            } else {
                break;
            }
        }
        (old, None)
    }

    /// Walk the active point (s, k) down while the rest of text[k..=p] covers whole edges.
    fn canonize(&self, mut s: NodeId, mut k: i32, p: i32) -> (NodeId, i32) {
        while k <= p {
            let Some(e) = self.find(s, self.text.at(k)).1 else {
                debug_assert!(false, "canonize: no edge out of {:?}", s);
                break;
            };
            let span = self.right(e) - self.edge(e).left;
            if span > p - k {
                break;
            }
            match self.child(e) {
                Some(child) => {
                    k += span + 1;
                    s = child;
                }
                None => break,
            }
        }
        (s, k)
    }

    /// Is there already a way to extend text[k..=p] below `s` with `t`? If not and the active
    /// point is mid-edge, split that edge and return the new internal node.
    fn test_and_split(&mut self, s: NodeId, k: i32, p: i32, t: u16) -> (bool, NodeId) {
        if k > p {
            return (self.find(s, t).1.is_some(), s);
        }

        let (old, found) = self.find(s, self.text.at(k));
        let Some(e) = found else {
            debug_assert!(false, "test_and_split: no edge out of {:?}", s);
            return (true, s);
        };

        let kprime = self.edge(e).left;
        debug_assert_eq!(self.text.at(kprime), self.text.at(k));
        let split = kprime + p - k;

        if t == self.text.at(split + 1) {
            return (true, s);
        }

        // The new edge takes e's place in the list, and e moves below the new node.
        let next = self.edge(e).next;
        let slot = self.hybrids.make(Hybrid {
            edge: Edge { next, left: kprime },
            right: split,
            node: Node {
                head: Some(e),
                link: None,
            },
        });
        let nu = EdgeId::Hybrid(slot);
        match old {
            Some(o) => self.edge_mut(o).next = Some(nu),
            None => self.node_mut(s).head = Some(nu),
        }

        let tail = self.edge_mut(e);
        tail.next = None;
        tail.left = split + 1;

        (false, NodeId::Inner(slot))
    }

    /// Insert a leaf edge starting at text position `i` into r's sorted edge list.
    fn push_leaf(&mut self, r: NodeId, i: i32) {
        debug_assert!(i >= 0);
        let a = self.text.at(i);
        let mut old = None;
        let mut p = self.node(r).head;

        while let Some(e) = p {
            let x = self.text.at(self.edge(e).left);
            if x < a {
                old = p;
                p = self.edge(e).next;
            } else {
                debug_assert_ne!(x, a, "push_leaf: edge for symbol already exists");
                break;
            }
        }

        let leaf = EdgeId::Leaf(self.leaves.make(Edge { next: p, left: i }));
        match old {
            Some(o) => self.edge_mut(o).next = Some(leaf),
            None => self.node_mut(r).head = Some(leaf),
        }
    }

    /// Add text[i] to every suffix of the tree, starting from active point (s, k).
    fn update(&mut self, mut s: NodeId, mut k: i32, i: i32) -> (NodeId, i32) {
        let t = self.text.at(i);
        let mut oldr = NodeId::Root;

        let (mut endpoint, mut r) = self.test_and_split(s, k, i - 1, t);

        while !endpoint {
            self.push_leaf(r, i);

            if oldr != NodeId::Root {
                self.node_mut(oldr).link = Some(r);
            }
            oldr = r;

            let link = self.suffix_link(s);
            (s, k) = self.canonize(link, k, i - 1);
            (endpoint, r) = self.test_and_split(s, k, i - 1, t);
        }

        if oldr != NodeId::Root {
            self.node_mut(oldr).link = Some(s);
        }

        (s, k)
    }
}

#[cfg(test)]
mod test {
    use super::SuffixTree;
    use std::cmp::Ordering;

    /// Suffix start offsets in sorted order, with the sentinel sorting after every byte.
    fn naive_order(block: &[u8]) -> Vec<usize> {
        let mut starts: Vec<usize> = (0..=block.len()).collect();
        starts.sort_by(|&a, &b| {
            let (x, y) = (&block[a..], &block[b..]);
            let common = x.len().min(y.len());
            match x[..common].cmp(&y[..common]) {
                // The shorter suffix hits the sentinel first, so it sorts last.
                Ordering::Equal => y.len().cmp(&x.len()),
                other => other,
            }
        });
        starts
    }

    fn leaf_lengths(block: &[u8]) -> Vec<u32> {
        let tree = SuffixTree::new(block);
        let mut lengths = vec![];
        tree.dfs(|len| lengths.push(len));
        lengths
    }

    fn pseudo_random(len: usize, alphabet: u8, mut seed: u32) -> Vec<u8> {
        (0..len)
            .map(|_| {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                ((seed >> 16) % alphabet as u32) as u8
            })
            .collect()
    }

    #[test]
    fn abab_test() {
        assert_eq!(leaf_lengths(b"abab"), vec![5, 3, 4, 2, 1]);
    }

    #[test]
    fn leaf_and_node_counts_test() {
        let block = b"MISSISSIPPI";
        let tree = SuffixTree::new(block);
        assert_eq!(tree.leaf_count(), block.len() + 1);
        assert!(tree.internal_count() <= block.len() + 1);
    }

    #[test]
    fn matches_naive_suffix_sort_test() {
        for (len, alphabet, seed) in [(1, 2, 1), (17, 2, 7), (300, 3, 11), (1000, 4, 5), (2000, 255, 3)] {
            let block = pseudo_random(len, alphabet, seed);
            let expected: Vec<u32> = naive_order(&block)
                .iter()
                .map(|&s| (block.len() + 1 - s) as u32)
                .collect();
            assert_eq!(leaf_lengths(&block), expected, "len {} alphabet {}", len, alphabet);
        }
    }

    #[test]
    fn single_symbol_run_test() {
        let block = vec![7_u8; 5000];
        let lengths = leaf_lengths(&block);
        // Longer runs of the same byte sort first, the bare sentinel last.
        let expected: Vec<u32> = (1..=5001).rev().collect();
        assert_eq!(lengths, expected);
    }

    #[test]
    fn extreme_symbols_test() {
        let block = [255_u8, 0, 255, 0, 0, 255];
        let expected: Vec<u32> = naive_order(&block)
            .iter()
            .map(|&s| (block.len() + 1 - s) as u32)
            .collect();
        assert_eq!(leaf_lengths(&block), expected);
    }
}
