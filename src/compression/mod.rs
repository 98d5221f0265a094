//! The compression module chains the transforms into a complete compressor.
//!
//! Compression splits the input into blocks and runs each one through:
//! - Burrows-Wheeler Transform: a suffix tree sorts the block so that similar contexts group together.
//! - Move-To-Front-2: turns those groups into runs of small numbers, mostly zeros.
//! - Zero-Length Encoding: packs the zero runs.
//! - Entropy coding: canonical Huffman or adaptive arithmetic coding, chosen per stream.
//!
//! Decompression is the inverse of each step in reverse order. Blocks are handled one at a time.
//!
pub mod compress;
pub mod compress_block;
