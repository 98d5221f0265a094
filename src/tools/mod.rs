//! The tools module provides the byte-level transforms and helpers that sit between the BWT and
//! the entropy coders.
//!
//! The tools are:
//! - cli: Command line interface for bwz.
//! - freq_count: Byte frequency count, used to build Huffman code lengths.
//! - mtf: Move-To-Front-2 transform and its inverse.
//! - zle: Zero-length encoding of zero runs and its inverse.
//!
pub mod cli;
pub mod freq_count;
pub mod mtf;
pub mod zle;
