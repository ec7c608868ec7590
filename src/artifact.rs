//! The on-disk format.
//!
//! ```text
//! +---+---+---------+-------+=====================+=============+
//! | MAGIC | VERSION | FLAGS |... frequencies ...  |... packed ...|
//! +---+---+---------+-------+=====================+=============+
//! ```
//!
//! MAGIC is `b"HF"`. If [`Flags::FREQUENCIES`] is set, the frequency table
//! follows as a big-endian u32 entry count, then one entry per symbol in
//! ascending order: the symbol's Unicode scalar value (u32) and its count
//! (u64), both big-endian. The packed bit stream comes last; see
//! [`crate::bit_packer`].
//!
//! Decoding rebuilds the code table from the stored frequencies, which gives
//! the exact table used for compression since tree construction is
//! deterministic.

mod flags;

use std::io::prelude::*;

use tracing::debug;

pub use self::flags::Flags;
use crate::bit_packer::{eof_is_corruption, read_packed, read_u32_be, read_u64_be, write_packed};
use crate::errors::{corrupt, Error, Result};
use crate::huffman::{self, BitSequence, CodeTable, FrequencyTable};

pub const MAGIC: [u8; 2] = *b"HF";
pub const VERSION: u8 = 1;

/// A compressed text as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    frequencies: Option<FrequencyTable>,
    bits: BitSequence,
}

impl Artifact {
    /// An artifact that can be decoded without any outside help.
    pub fn self_describing(bits: BitSequence, table: &CodeTable) -> Self {
        Self {
            frequencies: Some(table.frequencies().clone()),
            bits,
        }
    }

    /// An artifact holding only the bits. Decoding it needs the original
    /// code table.
    pub fn bare(bits: BitSequence) -> Self {
        Self {
            frequencies: None,
            bits,
        }
    }

    pub fn flags(&self) -> Flags {
        if self.frequencies.is_some() {
            Flags::FREQUENCIES
        } else {
            Flags::empty()
        }
    }

    pub fn bits(&self) -> &BitSequence {
        &self.bits
    }

    pub fn frequencies(&self) -> Option<&FrequencyTable> {
        self.frequencies.as_ref()
    }

    /// Rebuild the code table from the stored frequencies.
    pub fn code_table(&self) -> Result<CodeTable> {
        self.frequencies
            .as_ref()
            .map(CodeTable::from_frequencies)
            .ok_or(Error::CodeTableUnavailable)
    }

    /// Decode using the stored frequencies.
    pub fn decode(&self) -> Result<String> {
        let table = self.code_table()?;
        let text = huffman::decode(&self.bits, &table)?;

        let expected = table.frequencies().total();
        let decoded = text.chars().count() as u64;
        if decoded != expected {
            return corrupt(format!(
                "decoded {decoded} symbols but the header promises {expected}"
            ));
        }
        Ok(text)
    }

    /// Decode with a caller-supplied table, ignoring any stored frequencies.
    pub fn decode_with(&self, table: &CodeTable) -> Result<String> {
        huffman::decode(&self.bits, table)
    }

    pub fn write_to(&self, mut out: impl Write) -> Result<()> {
        out.write_all(&MAGIC)?;
        out.write_all(&[VERSION, self.flags().bits()])?;

        if let Some(frequencies) = &self.frequencies {
            let count = u32::try_from(frequencies.len())
                .expect("there are fewer than 2^32 distinct chars");
            out.write_all(&count.to_be_bytes())?;
            for (symbol, frequency) in frequencies.iter() {
                out.write_all(&u32::from(symbol).to_be_bytes())?;
                out.write_all(&frequency.to_be_bytes())?;
            }
        }

        write_packed(&mut out, &self.bits)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = vec![];
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Parse a whole artifact. Anything after the packed bits is an error.
    pub fn read_from(mut input: impl BufRead) -> Result<Self> {
        let flags = read_fixed_header(&mut input)?;

        let frequencies = if flags.contains(Flags::FREQUENCIES) {
            Some(read_frequencies(&mut input)?)
        } else {
            None
        };

        let bits = read_packed(&mut input)?;

        if !input.fill_buf()?.is_empty() {
            return corrupt("expected eof, but got more bytes after the packed bits");
        }

        debug!(
            ?flags,
            symbols = frequencies.as_ref().map_or(0, FrequencyTable::len),
            bits = bits.len(),
            "read artifact"
        );
        Ok(Self { frequencies, bits })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::read_from(bytes)
    }
}

fn read_fixed_header(mut input: impl Read) -> Result<Flags> {
    let mut header = [0; 4];
    input
        .read_exact(&mut header)
        .map_err(|e| eof_is_corruption(e, || "artifact header is cut short".into()))?;

    let first_2 = &header[..2];
    if first_2 != MAGIC {
        return corrupt(format!("unrecognized artifact magic; got {first_2:?}"));
    }

    let version = header[2];
    if version != VERSION {
        return corrupt(format!(
            "unsupported artifact version. expected {VERSION} found {version}"
        ));
    }

    Flags::new(header[3])
}

fn read_frequencies(mut input: impl Read) -> Result<FrequencyTable> {
    let count = read_u32_be(&mut input)?;

    let mut pairs = vec![];
    let mut prev: Option<char> = None;
    let mut total = 0u64;
    for _ in 0..count {
        let raw = read_u32_be(&mut input)?;
        let Some(symbol) = char::from_u32(raw) else {
            return corrupt(format!("invalid symbol {raw:#x} in frequency table"));
        };
        if prev.is_some_and(|prev| prev >= symbol) {
            return corrupt(format!(
                "frequency table is not strictly ascending at {symbol:?}"
            ));
        }
        let frequency = read_u64_be(&mut input)?;
        if frequency == 0 {
            return corrupt(format!("zero frequency for {symbol:?}"));
        }
        total = match total.checked_add(frequency) {
            Some(total) => total,
            None => return corrupt("frequency total overflows"),
        };
        pairs.push((symbol, frequency));
        prev = Some(symbol);
    }

    Ok(FrequencyTable::from_counts(pairs))
}
