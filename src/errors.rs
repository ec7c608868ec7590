use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while compressing or decompressing.
///
/// Empty input is not in here: it compresses to an empty table and an empty
/// bit sequence.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The text contains a symbol the code table has no code for.
    #[error("symbol {0:?} has no entry in the code table")]
    UnknownSymbol(char),

    /// Bits were left over after the last complete code.
    #[error("bit stream ended with {leftover} unmatched bit(s)")]
    TruncatedStream { leftover: usize },

    /// The artifact carries no frequency table and none was supplied.
    #[error("no code table available to decode this artifact")]
    CodeTableUnavailable,

    /// A packed buffer or artifact header that doesn't parse.
    #[error("corrupted packed buffer: {0}")]
    Corrupt(String),

    /// More bits than the 32-bit length field can describe.
    #[error("bit stream of {0} bits is too long to pack")]
    StreamTooLong(usize),

    #[error("cannot read input file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write output file {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Misc. catch-all for in-memory readers and writers.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        let kind = match &e {
            Error::Io(source)
            | Error::ReadInput { source, .. }
            | Error::WriteOutput { source, .. } => source.kind(),
            Error::TruncatedStream { .. } => io::ErrorKind::UnexpectedEof,
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, e)
    }
}

/// Shorthand for bailing out with [`Error::Corrupt`].
pub(crate) fn corrupt<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::Corrupt(msg.into()))
}
