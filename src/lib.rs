//! bwz, a block-sorting compressor built from composable transforms.
//!
//! Version 0.1.0
//!
//! Each block goes through a suffix tree Burrows-Wheeler transform, a move-to-front-2 pass, a
//! zero-length encoding of the resulting zero runs, and finally one of two entropy coders:
//! canonical Huffman or adaptive arithmetic coding.
//!
//! Every stage is a plain function over in-memory buffers, so the stages can also be used on
//! their own:
//!
//! ```
//! let record = bwz::bwt(b"MISSISSIPPI").unwrap();
//! assert_eq!(bwz::unbwt(&record).unwrap(), b"MISSISSIPPI");
//! ```
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> bwz -z test.txt`
//!
//! This will compress the file and create the file test.txt.bwz.
//! The original file will be deleted.
//!
pub mod arithmetic_coding;
pub mod bitstream;
pub mod bwt_algorithms;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use arithmetic_coding::arith::{arith, unarith};
pub use bwt_algorithms::bwt::{bwt, unbwt};
pub use compression::compress::{compress, decompress, CompressOptions};
pub use error::{Error, Result};
pub use huffman_coding::huffman::{huff, puff};
pub use tools::cli::Backend;
pub use tools::mtf::{mtf2, unmtf2};
pub use tools::zle::{unzle, zle};
