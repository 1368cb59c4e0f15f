//! Parsers for the metadata companions of a BLAST+ database.
//!
//! This module provides parsers for:
//!
//! - **Index headers (.nin/.pin)**: The binary header at the start of the index
//!   file, carrying the title, build date, sequence count and total length
//! - **Alias files (.nal/.pal)**: Human-readable `KEY value` files that name a
//!   database and its volumes
//!
//! Metadata is optional. Callers treat any [`ParseError`] as "metadata absent"
//! rather than as a reason to reject the database.
//!
//! ## Example
//!
//! ```rust,no_run
//! use seqserver::core::types::DatabaseKind;
//! use seqserver::parsing::index_header::parse_index_file;
//! use std::path::Path;
//!
//! let header = parse_index_file(Path::new("/db/sample.nin"), DatabaseKind::Nucleotide).unwrap();
//! println!("{}: {} sequences", header.title, header.sequence_count);
//! ```
//!
//! ## Alias Keys
//!
//! | Key    | Description | Used |
//! |--------|-------------|------|
//! | TITLE  | Database title | Yes |
//! | DBLIST | Volumes making up the database | Yes |
//! | NSEQ   | Number of sequences | Yes |
//! | LENGTH | Total residues | Yes |
//! | others | Filtering lists, membership bits | No |
//!
//! [`ParseError`]: index_header::ParseError

pub mod alias;
pub mod index_header;
