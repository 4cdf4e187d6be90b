use crate::registry::{FrozenRegistry, PageRecord, RegisterOutcome};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Tables {
    records: HashMap<String, PageRecord>,
    filenames: HashMap<String, String>,
}

/// Thread-safe accumulation of completed pages
///
/// Records and the URL → filename index live behind one mutex, so a
/// registration updates both in a single critical section. At most one
/// record exists per normalized URL; later registrations for the same key
/// are dropped.
#[derive(Debug, Default)]
pub struct PageRegistry {
    tables: Mutex<Tables>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a record if no record exists for `normalized_url`
    ///
    /// # Returns
    ///
    /// * `RegisterOutcome::Inserted` - The record was stored
    /// * `RegisterOutcome::AlreadyPresent` - Another completion won; nothing changed
    pub fn register(&self, normalized_url: &str, record: PageRecord) -> RegisterOutcome {
        let mut tables = self.lock();

        match tables.records.entry(normalized_url.to_string()) {
            Entry::Occupied(_) => RegisterOutcome::AlreadyPresent,
            Entry::Vacant(slot) => {
                let filename = record.generated_filename.clone();
                slot.insert(record);
                tables
                    .filenames
                    .insert(normalized_url.to_string(), filename);
                RegisterOutcome::Inserted
            }
        }
    }

    /// Returns true if a record exists for the key
    pub fn contains(&self, normalized_url: &str) -> bool {
        self.lock().records.contains_key(normalized_url)
    }

    /// Returns the number of registered pages
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a point-in-time copy of all records
    ///
    /// The copy is independent of the registry; later registrations do not
    /// show up in it.
    pub fn snapshot(&self) -> HashMap<String, PageRecord> {
        self.lock().records.clone()
    }

    /// Consumes the registry and returns its immutable form
    pub fn freeze(self) -> FrozenRegistry {
        let tables = self
            .tables
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        FrozenRegistry::from_parts(tables.records, tables.filenames)
    }

    // A panic while holding the lock cannot leave the tables half-updated:
    // both inserts happen after all fallible work, so the data is still usable.
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
