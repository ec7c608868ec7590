use bitflags::bitflags;

use crate::errors::{corrupt, Result};

bitflags! {
    /// Artifact header flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u8 {
        /// If set, the frequency table follows the fixed header, and the
        /// artifact decodes on its own.
        ///
        /// If clear, the caller has to supply the code table used at
        /// compression time.
        const FREQUENCIES = 0b_0000_0001;
    }
}

impl Flags {
    /// Return an error if any reserved bit is set.
    pub fn new(flag_byte: u8) -> Result<Flags> {
        match Flags::from_bits(flag_byte) {
            Some(flags) => Ok(flags),
            None => corrupt(format!(
                "reserved bit set in artifact flag byte: {flag_byte:08b}"
            )),
        }
    }
}
