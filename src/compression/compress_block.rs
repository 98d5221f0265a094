use log::{debug, trace};

use crate::arithmetic_coding::arith::{arith, unarith};
use crate::bwt_algorithms::bwt::{bwt, unbwt};
use crate::error::Result;
use crate::huffman_coding::huffman::{huff, puff};
use crate::tools::cli::Backend;
use crate::tools::mtf::{mtf2, unmtf2};
use crate::tools::zle::{unzle, zle};

/// Called by compress, this runs one block through BWT, MTF-2, ZLE and the chosen backend.
pub fn compress_block(block: &[u8], backend: Backend) -> Result<Vec<u8>> {
    let mut record = bwt(block)?;
    trace!("BWT record is {} bytes", record.len());

    mtf2(&mut record);
    let packed = zle(&record)?;

    let out = match backend {
        Backend::Huffman => huff(&packed),
        Backend::Arith => arith(&packed),
    };

    debug!(
        "{} bytes in block, {} after MTF-2 & ZLE, {} after {} coding",
        block.len(),
        packed.len(),
        out.len(),
        backend
    );
    Ok(out)
}

/// Called by decompress, this undoes compress_block.
pub fn decompress_block(payload: &[u8], backend: Backend) -> Result<Vec<u8>> {
    let packed = match backend {
        Backend::Huffman => puff(payload)?,
        Backend::Arith => unarith(payload)?,
    };
    trace!("{} coded bytes decoded to {}", payload.len(), packed.len());

    let mut record = unzle(&packed)?;
    unmtf2(&mut record);
    unbwt(&record)
}
