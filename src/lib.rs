//! Lossless text compression with static Huffman codes.
//!
//! ```
//! let (bits, table) = huffman::compress("aabbbcc").unwrap();
//! assert_eq!(bits.len(), 11);
//! assert_eq!(huffman::decompress(&bits, &table).unwrap(), "aabbbcc");
//! ```

pub mod artifact;
pub mod bit_packer;
mod errors;
mod files;
pub mod huffman;

use bitvec::prelude::*;

pub use crate::artifact::Artifact;
pub use crate::bit_packer::{pack, unpack};
pub use crate::errors::{Error, Result};
pub use crate::files::{compress_file, compress_file_with, decompress_file};
pub use crate::huffman::{BitSequence, Code, CodeTable, FrequencyTable};

/// Settings for writing artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Store the frequency table in the artifact header, so it decodes
    /// without the original code table. On by default.
    pub embed_frequencies: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            embed_frequencies: true,
        }
    }
}

impl Options {
    pub fn embed_frequencies(mut self, embed: bool) -> Self {
        self.embed_frequencies = embed;
        self
    }

    /// Wrap encoded bits in an artifact according to these options.
    pub fn artifact(&self, bits: BitSequence, table: &CodeTable) -> Artifact {
        if self.embed_frequencies {
            Artifact::self_describing(bits, table)
        } else {
            Artifact::bare(bits)
        }
    }
}

/// Build a code table for `text` and encode it.
///
/// The table has to travel with the bits: nothing else can decode them.
/// Empty text gives an empty table and no bits.
pub fn compress(text: &str) -> Result<(BitSequence, CodeTable)> {
    let table = CodeTable::from_frequencies(&FrequencyTable::from_text(text));
    let bits = huffman::encode(text, &table)?;
    Ok((bits, table))
}

pub fn decompress(bits: &BitSlice<u8, Msb0>, table: &CodeTable) -> Result<String> {
    huffman::decode(bits, table)
}
