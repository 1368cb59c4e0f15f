//! Fixture helpers shared by the integration tests.
#![allow(dead_code)]

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use seqserver::DatabaseKind;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Encode a format-4 index header
pub fn index_header(kind: DatabaseKind, title: &str, count: u32, length: u64) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.write_u32::<BigEndian>(4).unwrap();
    buf.write_u32::<BigEndian>(kind.header_code()).unwrap();
    for s in [title, "Mar 12, 2024  11:48 AM"] {
        buf.write_u32::<BigEndian>(u32::try_from(s.len()).unwrap())
            .unwrap();
        buf.write_all(s.as_bytes()).unwrap();
    }
    buf.write_u32::<BigEndian>(count).unwrap();
    buf.write_u64::<LittleEndian>(length).unwrap();
    buf.write_u32::<BigEndian>(1_000).unwrap();
    buf
}

fn companion(base: &Path, ext: &str) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

/// Write the given companion files for `base` (relative to `root`)
pub fn write_files(root: &Path, base: &str, exts: &[&str]) {
    let base = root.join(base);
    fs::create_dir_all(base.parent().unwrap()).unwrap();
    for ext in exts {
        fs::write(companion(&base, ext), b"").unwrap();
    }
}

/// Write a complete database, with a readable index header when `title` is given
pub fn make_database(root: &Path, base: &str, kind: DatabaseKind, title: Option<&str>) {
    let p = kind.prefix();
    let exts = [format!("{p}hr"), format!("{p}in"), format!("{p}sq")];
    let exts: Vec<&str> = exts.iter().map(String::as_str).collect();
    write_files(root, base, &exts);

    if let Some(title) = title {
        let index = companion(&root.join(base), &format!("{p}in"));
        fs::write(index, index_header(kind, title, 13, 402_709)).unwrap();
    }
}

/// A database directory laid out like a small SequenceServer installation
pub struct Fixture {
    pub dir: TempDir,
    pub config_file: PathBuf,
    pub empty_config: PathBuf,
    pub database_dir: PathBuf,
    /// A subdirectory holding only an unformatted FASTA file
    pub database_dir_no_db: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let database_dir = dir.path().join("database");

        make_database(
            &database_dir,
            "nucleotide/Sinvicta2-2-3.cdna.subset",
            DatabaseKind::Nucleotide,
            Some("Sinvicta 2-2-3 cdna subset"),
        );
        make_database(
            &database_dir,
            "nucleotide/Solenopsis_invicta_gnG_subset",
            DatabaseKind::Nucleotide,
            None,
        );
        make_database(
            &database_dir,
            "proteins/Sinvicta2-2-3.prot.subset",
            DatabaseKind::Protein,
            Some("Sinvicta 2-2-3 prot subset"),
        );
        make_database(
            &database_dir,
            "proteins/uniprot/2020_06.ants",
            DatabaseKind::Protein,
            None,
        );

        // Noise that must not become a database
        let no_db = database_dir.join("proteins/Cardiocondyla_obscurior");
        fs::create_dir_all(&no_db).unwrap();
        fs::write(no_db.join("Cobs1.4.proteins.fasta"), b">seq1\nMKV\n").unwrap();
        fs::write(database_dir.join("README.md"), b"test databases\n").unwrap();

        let empty_config = dir.path().join("empty_config.yml");
        fs::write(&empty_config, b"").unwrap();

        let config_file = dir.path().join("seqserver.conf");
        fs::write(
            &config_file,
            format!("database_dir: {}\nnum_threads: 2\n", database_dir.display()),
        )
        .unwrap();

        Self {
            dir,
            config_file,
            empty_config,
            database_dir,
            database_dir_no_db: no_db,
        }
    }
}
