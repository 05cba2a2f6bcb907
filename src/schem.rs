//! File-level pipeline: gzip framing around the codec and the converter.
//!
//! A schematic file is a gzip stream whose decompressed body is exactly one
//! big-endian NBT document. The whole input is materialized before the
//! transform starts and the whole output tree is encoded before any byte is
//! written; there is no partial-output mode.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use zerocopy::BigEndian;

use crate::{Result, Summary, Value, convert_document, read_document, write_document};

/// Converts the v3 schematic at `input` and writes the v2 result to
/// `output`. Returns the conversion summary for reporting.
pub fn convert_path(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Summary> {
    let data = read_gz(input.as_ref())?;
    let document = read_document::<BigEndian>(&data)?;
    let conversion = convert_document(&document);
    let encoded = write_document::<BigEndian>(&conversion.document);
    write_gz(output.as_ref(), &encoded)?;
    Ok(conversion.summary)
}

fn read_gz(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(file);
    let mut data = Vec::new();
    decoder.read_to_end(&mut data)?;
    Ok(data)
}

fn write_gz(path: &Path, data: &[u8]) -> Result<()> {
    let file = File::create(path)?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(data)?;
    encoder.finish()?;
    Ok(())
}

/// Structural facts about a written schematic, gathered by re-decoding it.
/// Diagnostic only; nothing gates on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Verification {
    pub root_name: String,
    /// The root's `Version` value, when integer-kinded.
    pub version: Option<i64>,
    pub has_palette: bool,
    pub has_block_data: bool,
}

/// Re-reads a just-written schematic and reports what a v2 consumer would
/// see first: the root name, the version, and whether the lifted block
/// entries exist.
pub fn verify_path(path: impl AsRef<Path>) -> Result<Verification> {
    let data = read_gz(path.as_ref())?;
    let document = read_document::<BigEndian>(&data)?;
    Ok(Verification {
        version: document.root.get("Version").and_then(Value::as_i64),
        has_palette: document.root.get("Palette").is_some(),
        has_block_data: document.root.get("BlockData").is_some(),
        root_name: document.root_name,
    })
}
