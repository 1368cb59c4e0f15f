use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::core::descriptor::DatabaseDescriptor;
use crate::core::types::{DatabaseId, DatabaseKind};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Duplicate database identifier: {0}")]
    DuplicateIdentifier(DatabaseId),

    #[error("Failed to serialize catalog: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Catalog format version written to JSON exports
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Serialize)]
pub struct CatalogData<'a> {
    pub version: &'static str,
    pub created_at: String,
    pub databases: &'a [DatabaseDescriptor],
}

/// An immutable set of databases with an identifier index.
///
/// The registry hands these out as snapshots; a catalog is never modified once
/// built.
#[derive(Debug, Default)]
pub struct DatabaseCatalog {
    /// Databases in discovery order
    databases: Vec<DatabaseDescriptor>,

    /// Index: identifier -> position in `databases`
    id_to_index: HashMap<DatabaseId, usize>,
}

impl DatabaseCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, keeping the given order
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateIdentifier` if two descriptors share an identifier.
    pub fn from_descriptors(databases: Vec<DatabaseDescriptor>) -> Result<Self, CatalogError> {
        let mut id_to_index = HashMap::with_capacity(databases.len());
        for (index, db) in databases.iter().enumerate() {
            if id_to_index.insert(db.identifier.clone(), index).is_some() {
                return Err(CatalogError::DuplicateIdentifier(db.identifier.clone()));
            }
        }

        Ok(Self {
            databases,
            id_to_index,
        })
    }

    /// Get a database by identifier
    pub fn get(&self, identifier: &str) -> Option<&DatabaseDescriptor> {
        self.id_to_index
            .get(identifier)
            .map(|&idx| &self.databases[idx])
    }

    /// All databases in discovery order
    pub fn databases(&self) -> &[DatabaseDescriptor] {
        &self.databases
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DatabaseDescriptor> {
        self.databases.iter()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &DatabaseId> {
        self.databases.iter().map(|db| &db.identifier)
    }

    /// Databases of one kind, in discovery order
    pub fn of_kind(&self, kind: DatabaseKind) -> impl Iterator<Item = &DatabaseDescriptor> {
        self.databases.iter().filter(move |db| db.kind == kind)
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION,
            created_at: chrono::Utc::now().to_rfc3339(),
            databases: &self.databases,
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of databases in catalog
    pub fn len(&self) -> usize {
        self.databases.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }
}

impl<'a> IntoIterator for &'a DatabaseCatalog {
    type Item = &'a DatabaseDescriptor;
    type IntoIter = std::slice::Iter<'a, DatabaseDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
