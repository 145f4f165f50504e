//! The in-memory record store.
//!
//! The store is populated once during startup and never mutated afterwards,
//! so it is shared between request handlers without any synchronization.

use itertools::Itertools;
use serde::{
    Deserialize,
    Serialize,
};
use std::sync::Arc;

/// A single dog entry.
///
/// `Record::default()` is the zero-value record returned by lookups that
/// don't match anything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub id: u32,
    pub name: String,
    /// The breed of the dog.
    pub category: String,
    pub age: u32,
}

impl Record {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        category: impl Into<String>,
        age: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            age,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record id `{0}` is used by more than one record")]
    DuplicateId(u32),
}

/// Ordered, immutable sequence of records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordStore {
    records: Arc<[Record]>,
}

impl RecordStore {
    /// Creates the store, checking that every id is unique.
    pub fn new(records: Vec<Record>) -> Result<Self, StoreError> {
        if let Some(id) = records.iter().map(|record| record.id).duplicates().next() {
            return Err(StoreError::DuplicateId(id))
        }

        Ok(Self {
            records: records.into(),
        })
    }

    /// The three records the service ships with.
    pub fn reference() -> Self {
        Self {
            records: Arc::from([
                Record::new(1, "Ted", "Husky", 3),
                Record::new(2, "Bob", "Rottweiler", 2),
                Record::new(3, "Trap", "Dalmata", 4),
            ]),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::reference()
    }
}
