//! Parser for the binary header of BLAST+ index files (.nin/.pin).
//!
//! Layout (format versions 4 and 5):
//!
//! ```text
//! u32 BE   format version
//! u32 BE   molecule type (0 = nucleotide, 1 = protein)
//! u32 BE   volume number                    (v5 only)
//! string   title
//! string   LMDB file name                   (v5 only)
//! string   build date
//! u32 BE   number of sequences
//! u64 LE   total residues
//! u32 BE   longest sequence
//! ```
//!
//! Strings are a `u32` big-endian byte length followed by the bytes.

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;
use thiserror::Error;

use crate::core::types::DatabaseKind;
use crate::utils::validation::check_header_string_length;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid metadata format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported index format version: {0}")]
    UnsupportedVersion(u32),

    #[error("Molecule type mismatch: expected {expected}, header says code {found}")]
    KindMismatch { expected: DatabaseKind, found: u32 },
}

/// Metadata read from an index file header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHeader {
    pub version: u32,
    pub kind: DatabaseKind,
    pub volume: Option<u32>,
    pub title: String,
    pub lmdb_file: Option<String>,
    pub date: String,
    pub sequence_count: u64,
    pub total_length: u64,
    pub max_length: u32,
}

/// Parse the header of an index file on disk
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened, or any other variant
/// if the header is truncated, oversized, or does not match `expected`.
pub fn parse_index_file(path: &Path, expected: DatabaseKind) -> Result<IndexHeader, ParseError> {
    let reader = std::fs::File::open(path).map(BufReader::new)?;
    parse_index_header(reader, expected)
}

/// Parse an index header from any reader
///
/// # Errors
///
/// Returns `ParseError::UnsupportedVersion` for versions other than 4 and 5,
/// `ParseError::KindMismatch` if the molecule type disagrees with `expected`,
/// and `ParseError::InvalidFormat` for truncated or oversized fields.
pub fn parse_index_header<R: Read>(
    mut reader: R,
    expected: DatabaseKind,
) -> Result<IndexHeader, ParseError> {
    read_header(&mut reader, expected).map_err(|e| match e {
        ParseError::Io(io) if io.kind() == ErrorKind::UnexpectedEof => {
            ParseError::InvalidFormat("Truncated index header".to_string())
        }
        other => other,
    })
}

fn read_header<R: Read>(reader: &mut R, expected: DatabaseKind) -> Result<IndexHeader, ParseError> {
    let version = reader.read_u32::<BigEndian>()?;
    if version != 4 && version != 5 {
        return Err(ParseError::UnsupportedVersion(version));
    }

    let code = reader.read_u32::<BigEndian>()?;
    if code != expected.header_code() {
        return Err(ParseError::KindMismatch {
            expected,
            found: code,
        });
    }

    let volume = if version == 5 {
        Some(reader.read_u32::<BigEndian>()?)
    } else {
        None
    };

    let title = read_string(reader)?;
    let lmdb_file = if version == 5 {
        Some(read_string(reader)?)
    } else {
        None
    };
    let date = read_string(reader)?;

    let sequence_count = u64::from(reader.read_u32::<BigEndian>()?);
    let total_length = reader.read_u64::<LittleEndian>()?;
    let max_length = reader.read_u32::<BigEndian>()?;

    Ok(IndexHeader {
        version,
        kind: expected,
        volume,
        title,
        lmdb_file,
        date,
        sequence_count,
        total_length,
        max_length,
    })
}

fn read_string<R: Read>(reader: &mut R) -> Result<String, ParseError> {
    let len = reader.read_u32::<BigEndian>()? as usize;
    if let Some(msg) = check_header_string_length(len) {
        return Err(ParseError::InvalidFormat(msg));
    }

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;

    // Older writers pad strings with NULs
    let text = String::from_utf8_lossy(&buf);
    Ok(text.trim_end_matches('\0').to_string())
}
