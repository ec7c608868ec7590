use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::{Error, Result};
use crate::{compress, Artifact, CodeTable, Options};

/// Compress the text file at `input` into an artifact at `output`, storing
/// the frequency table in the header.
///
/// Returns the code table, in case the caller wants to keep it.
pub fn compress_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<CodeTable> {
    compress_file_with(input, output, &Options::default())
}

pub fn compress_file_with(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &Options,
) -> Result<CodeTable> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let text = fs::read_to_string(input).map_err(|source| Error::ReadInput {
        path: input.to_owned(),
        source,
    })?;
    let (bits, table) = compress(&text)?;
    let bytes = options.artifact(bits, &table).to_bytes()?;

    fs::write(output, &bytes).map_err(|source| Error::WriteOutput {
        path: output.to_owned(),
        source,
    })?;

    debug!(
        input = %input.display(),
        output = %output.display(),
        text_len = text.len(),
        artifact_len = bytes.len(),
        "compressed file"
    );
    Ok(table)
}

/// Reverse [`compress_file`].
///
/// With `table`, the artifact is decoded with it, and must have been produced
/// with it. Without, the artifact must carry its own frequency table, or this
/// fails with [`Error::CodeTableUnavailable`].
pub fn decompress_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    table: Option<&CodeTable>,
) -> Result<()> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let bytes = fs::read(input).map_err(|source| Error::ReadInput {
        path: input.to_owned(),
        source,
    })?;
    let artifact = Artifact::from_bytes(&bytes)?;
    let text = match table {
        Some(table) => artifact.decode_with(table)?,
        None => artifact.decode()?,
    };

    fs::write(output, &text).map_err(|source| Error::WriteOutput {
        path: output.to_owned(),
        source,
    })?;

    debug!(
        input = %input.display(),
        output = %output.display(),
        artifact_len = bytes.len(),
        text_len = text.len(),
        "decompressed file"
    );
    Ok(())
}
