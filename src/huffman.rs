//! Static Huffman coding over `char` symbols.

mod code_table;
mod frequency;
mod tree;

use bitvec::prelude::*;
use tracing::debug;

pub use self::code_table::{Code, CodeTable};
pub use self::frequency::FrequencyTable;
pub use self::tree::{HuffmanNode, HuffmanTree};
use crate::errors::{Error, Result};

/// An ordered sequence of bits, most significant first within each byte.
pub type BitSequence = BitVec<u8, Msb0>;

/// Concatenate the code of every symbol of `text`, in order.
pub fn encode(text: &str, table: &CodeTable) -> Result<BitSequence> {
    let mut bits = BitSequence::new();
    for symbol in text.chars() {
        let code = table.code(symbol).ok_or(Error::UnknownSymbol(symbol))?;
        bits.extend_from_bitslice(code.bits());
    }
    debug!(text_len = text.len(), bits = bits.len(), "encoded text");
    Ok(bits)
}

/// Read `bits` one at a time, emitting a symbol whenever the bits collected so
/// far form a complete code.
///
/// Bits left over at the end are an error, never silently dropped.
pub fn decode(bits: &BitSlice<u8, Msb0>, table: &CodeTable) -> Result<String> {
    let mut text = String::new();
    let mut candidate = Code::default();
    for bit in bits.iter().by_vals() {
        candidate.push(bit);
        if let Some(symbol) = table.symbol(&candidate) {
            text.push(symbol);
            candidate.clear();
        }
    }

    if !candidate.is_empty() {
        return Err(Error::TruncatedStream {
            leftover: candidate.len(),
        });
    }

    debug!(bits = bits.len(), text_len = text.len(), "decoded text");
    Ok(text)
}
