//! Registry snapshot semantics under concurrent readers.

mod common;

use chrono::Utc;
use common::{make_database, Fixture};
use seqserver::catalog::registry::{RegistryError, RescanOutcome};
use seqserver::{DatabaseDescriptor, DatabaseKind, DatabaseRegistry, Scanner};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn batch(prefix: &str, n: usize) -> Vec<DatabaseDescriptor> {
    (0..n)
        .map(|i| {
            DatabaseDescriptor::new(
                format!("{prefix}/{i}"),
                DatabaseKind::Protein,
                format!("/db/{prefix}/{i}"),
                Utc::now(),
            )
        })
        .collect()
}

#[test]
fn test_readers_never_see_partial_catalog() {
    let registry = Arc::new(DatabaseRegistry::new());
    registry.replace_all(batch("small", 2)).unwrap();
    let done = Arc::new(AtomicBool::new(false));

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let registry = Arc::clone(&registry);
            let done = Arc::clone(&done);
            scope.spawn(move || {
                while !done.load(Ordering::Acquire) {
                    let snapshot = registry.all();
                    let prefix = if snapshot.len() == 2 { "small" } else { "large" };
                    assert!(snapshot.len() == 2 || snapshot.len() == 50);
                    assert!(snapshot
                        .identifiers()
                        .all(|id| id.as_str().starts_with(prefix)));
                }
            });
        }

        for round in 0..200 {
            let next = if round % 2 == 0 {
                batch("large", 50)
            } else {
                batch("small", 2)
            };
            registry.replace_all(next).unwrap();
        }
        done.store(true, Ordering::Release);
    });
}

#[test]
fn test_snapshot_is_stable_while_held() {
    let registry = DatabaseRegistry::new();
    registry.replace_all(batch("first", 3)).unwrap();

    let held = registry.all();
    registry.replace_all(batch("second", 1)).unwrap();

    assert_eq!(held.len(), 3);
    assert!(held.get("first/0").is_some());
    assert!(registry.find("first/0").is_err());
    assert!(registry.find("second/0").is_ok());
}

#[test]
fn test_rescan_picks_up_new_databases() {
    let fixture = Fixture::new();
    let registry = DatabaseRegistry::new();
    let scanner = Scanner::new(&fixture.database_dir);

    registry.rescan(&scanner).unwrap();
    assert_eq!(registry.len(), 4);

    make_database(
        &fixture.database_dir,
        "nucleotide/new_genome",
        DatabaseKind::Nucleotide,
        None,
    );
    let outcome = registry.rescan(&scanner).unwrap();

    assert_eq!(
        outcome,
        RescanOutcome::Replaced {
            databases: 5,
            rejected: 0
        }
    );
    assert!(registry.find("nucleotide/new_genome").is_ok());
}

#[test]
fn test_rescan_of_vanished_directory_keeps_catalog() {
    let fixture = Fixture::new();
    let registry = DatabaseRegistry::new();
    registry
        .rescan(&Scanner::new(&fixture.database_dir))
        .unwrap();

    std::fs::remove_dir_all(&fixture.database_dir).unwrap();
    let result = registry.rescan(&Scanner::new(&fixture.database_dir));

    assert!(matches!(result, Err(RegistryError::Scan(_))));
    assert_eq!(registry.len(), 4);
}
