//! Lossless conversion between a bit sequence and bytes.
//!
//! ```text
//! +---+---+---+---+=========================================+
//! |   BIT COUNT   |... ceil(BIT COUNT / 8) bytes of bits ...|
//! +---+---+---+---+=========================================+
//! ```
//!
//! The bit count is a big-endian u32. Bits are stored most significant first;
//! the unused low bits of the final byte are zero. Because the exact count is
//! stored, leading zero bits survive the round trip.

use std::io::{self, prelude::*};

use bitvec::prelude::*;
use tracing::trace;

use crate::errors::{corrupt, Error, Result};
use crate::huffman::BitSequence;

/// Size of the bit count field, in bytes.
pub const BIT_COUNT_LEN: usize = 4;

pub fn pack(bits: &BitSlice<u8, Msb0>) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(BIT_COUNT_LEN + packed_len(bits.len()));
    write_packed(&mut out, bits)?;
    Ok(out)
}

/// Inverse of [`pack`]. The buffer must hold exactly one packed sequence.
pub fn unpack(bytes: &[u8]) -> Result<BitSequence> {
    let mut input = bytes;
    let bits = read_packed(&mut input)?;
    if !input.is_empty() {
        return corrupt(format!(
            "{} unexpected byte(s) after the packed bits",
            input.len()
        ));
    }
    Ok(bits)
}

pub fn write_packed(mut out: impl Write, bits: &BitSlice<u8, Msb0>) -> Result<()> {
    let bit_count = u32::try_from(bits.len()).map_err(|_| Error::StreamTooLong(bits.len()))?;
    out.write_all(&bit_count.to_be_bytes())?;

    // Copy into a fresh, front-aligned buffer so the raw bytes line up.
    let mut buf = BitSequence::with_capacity(bits.len());
    buf.extend_from_bitslice(bits);
    buf.set_uninitialized(false);
    out.write_all(buf.as_raw_slice())?;

    trace!(bits = bits.len(), bytes = buf.as_raw_slice().len(), "packed bits");
    Ok(())
}

/// Read one packed sequence from the front of `input`, leaving whatever
/// follows unread.
pub fn read_packed(mut input: impl Read) -> Result<BitSequence> {
    let bit_count = read_u32_be(&mut input)? as usize;

    let expected = packed_len(bit_count);

    // Only allocate what the input actually holds, not what the header claims.
    let mut bytes = vec![];
    input.take(expected as u64).read_to_end(&mut bytes)?;
    if bytes.len() != expected {
        return corrupt(format!(
            "expected {expected} byte(s) for {bit_count} bits, found {}",
            bytes.len()
        ));
    }

    let mut bits = BitSequence::from_vec(bytes);
    if bits[bit_count..].any() {
        return corrupt("non-zero padding bits in the final byte");
    }
    bits.truncate(bit_count);
    Ok(bits)
}

/// Number of bytes needed to hold `bit_count` bits.
pub fn packed_len(bit_count: usize) -> usize {
    bit_count.div_ceil(8)
}

pub(crate) fn read_u32_be(mut input: impl Read) -> Result<u32> {
    let mut buf = [0; 4];
    input
        .read_exact(&mut buf)
        .map_err(|e| eof_is_corruption(e, || "truncated 32-bit field".into()))?;
    Ok(u32::from_be_bytes(buf))
}

pub(crate) fn read_u64_be(mut input: impl Read) -> Result<u64> {
    let mut buf = [0; 8];
    input
        .read_exact(&mut buf)
        .map_err(|e| eof_is_corruption(e, || "truncated 64-bit field".into()))?;
    Ok(u64::from_be_bytes(buf))
}

/// A short read means the buffer was cut off; anything else is a real I/O
/// failure.
pub(crate) fn eof_is_corruption(e: io::Error, msg: impl FnOnce() -> String) -> Error {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Error::Corrupt(msg())
    } else {
        Error::Io(e)
    }
}
