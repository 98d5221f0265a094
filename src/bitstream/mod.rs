//! The bitstream module packs and unpacks the MSB-first bit streams used by the entropy coders.
//!
//! Both coders work on whole in-memory blocks, so the packer writes into a Vec and the reader
//! walks a borrowed slice. Neither is intended as a general purpose bit I/O layer.
//!
pub mod bitpacker;
pub mod bitreader;
