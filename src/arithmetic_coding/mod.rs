//! The arithmetic_coding module is the second entropy coder: an adaptive order-0 arithmetic coder
//! in the style of Witten, Neal and Cleary (CACM, 1987).
//!
//! The alphabet is the 256 byte values plus an end marker, which the encoder appends and the
//! decoder stops on. Streams carry no length prefix.
//!
//! - model: adaptive frequency tables shared by both directions.
//! - arith: the encoder and decoder.
//!
pub mod arith;
pub mod model;

/// Bits of precision in the coding interval.
pub const CODE_VALUE_BITS: u32 = 17;
pub const TOP_VALUE: u32 = (1 << CODE_VALUE_BITS) - 1;
pub const FIRST_QTR: u32 = TOP_VALUE / 4 + 1;
pub const HALF: u32 = 2 * FIRST_QTR;
pub const THIRD_QTR: u32 = 3 * FIRST_QTR;
