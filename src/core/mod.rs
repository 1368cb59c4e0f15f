//! Core data types for the database catalog.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`DatabaseDescriptor`]: An immutable record describing one validated BLAST+ database
//! - [`DatabaseId`]: The stable identifier of a database within the catalog
//! - [`DatabaseKind`]: Whether a database holds nucleotide or protein sequences
//!
//! ## Database Kinds
//!
//! BLAST+ stores the two molecule types under different companion extensions:
//!
//! | Kind       | Headers | Index | Sequences | Alias |
//! |------------|---------|-------|-----------|-------|
//! | Nucleotide | .nhr    | .nin  | .nsq      | .nal  |
//! | Protein    | .phr    | .pin  | .psq      | .pal  |
//!
//! [`DatabaseDescriptor`]: descriptor::DatabaseDescriptor
//! [`DatabaseId`]: types::DatabaseId
//! [`DatabaseKind`]: types::DatabaseKind

pub mod descriptor;
pub mod types;
