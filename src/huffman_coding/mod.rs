//! The huffman_coding module is one of the two entropy coders that finish off a block.
//!
//! Each block gets its own canonical Huffman code over all 256 byte values, stored as a 256 byte
//! table of code lengths in front of the packed codes.
//!
//! There are two interchangeable implementations of both directions:
//! - huffman: pushes one code bit at a time through the BitPacker / BitReader.
//! - huffman_automaton: precomputed state tables that handle one whole byte per step.
//!
//! Both produce byte-identical streams. Encoding always uses the automaton; decoding uses the bit
//! decoder for small streams, where building the automaton would cost more than it saves.
//!
pub mod huffman;
pub mod huffman_automaton;
pub mod huffman_code_from_weights;
