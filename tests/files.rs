use std::fs;

use huffman::{compress_file, compress_file_with, decompress_file, Error, Options};
use tempfile::TempDir;
use test_case::test_case;

struct Paths {
    _dir: TempDir,
    text: std::path::PathBuf,
    artifact: std::path::PathBuf,
    restored: std::path::PathBuf,
}

fn paths() -> anyhow::Result<Paths> {
    let dir = tempfile::tempdir()?;
    Ok(Paths {
        text: dir.path().join("input.txt"),
        artifact: dir.path().join("input.huf"),
        restored: dir.path().join("restored.txt"),
        _dir: dir,
    })
}

#[test_case("" ; "empty file")]
#[test_case("aaaa" ; "single symbol")]
#[test_case("0000000000 leading zeros should not matter\n" ; "zeros")]
#[test_case("Привіт, світе! Hello, world!\n" ; "mixed scripts")]
fn file_round_trip(text: &str) -> anyhow::Result<()> {
    let p = paths()?;
    fs::write(&p.text, text)?;

    compress_file(&p.text, &p.artifact)?;
    decompress_file(&p.artifact, &p.restored, None)?;

    assert_eq!(fs::read_to_string(&p.restored)?, text);
    Ok(())
}

#[test]
fn bare_artifact_needs_the_table() -> anyhow::Result<()> {
    let p = paths()?;
    fs::write(&p.text, "abracadabra")?;

    let options = Options::default().embed_frequencies(false);
    let table = compress_file_with(&p.text, &p.artifact, &options)?;

    let err = decompress_file(&p.artifact, &p.restored, None).unwrap_err();
    assert!(matches!(err, Error::CodeTableUnavailable));
    assert!(!p.restored.exists());

    decompress_file(&p.artifact, &p.restored, Some(&table))?;
    assert_eq!(fs::read_to_string(&p.restored)?, "abracadabra");
    Ok(())
}

#[test]
fn missing_input() -> anyhow::Result<()> {
    let p = paths()?;
    let err = compress_file(&p.text, &p.artifact).unwrap_err();
    assert!(matches!(err, Error::ReadInput { .. }));

    let err = decompress_file(&p.artifact, &p.restored, None).unwrap_err();
    assert!(matches!(err, Error::ReadInput { .. }));
    Ok(())
}

#[test]
fn truncated_artifact() -> anyhow::Result<()> {
    let p = paths()?;
    fs::write(&p.text, "the quick brown fox jumps over the lazy dog")?;
    compress_file(&p.text, &p.artifact)?;

    let mut bytes = fs::read(&p.artifact)?;
    bytes.pop();
    fs::write(&p.artifact, &bytes)?;

    let err = decompress_file(&p.artifact, &p.restored, None).unwrap_err();
    assert!(matches!(err, Error::Corrupt(_)));
    Ok(())
}

#[test]
fn errors_convert_to_io() -> anyhow::Result<()> {
    let p = paths()?;
    let err: std::io::Error = compress_file(&p.text, &p.artifact).unwrap_err().into();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    Ok(())
}
