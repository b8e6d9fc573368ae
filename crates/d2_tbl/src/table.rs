//! The caller-owned ordered record sequence the codec transforms to and from bytes.

use derive_more::derive::{Constructor, Deref, Index, IntoIterator};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single key/value entry of a string table.
///
/// The key uses a single-byte encoding on disk (Latin-1); the value is UTF-8 and may
/// embed color markers. The logical row of a record is its position in the owning
/// [`StringTable`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record {
    /// lookup key
    pub key: String,
    /// translated text
    pub value: String,
}

impl Record {
    /// Build a record from key and value text.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Record {
        Record {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered sequence of records.
///
/// Logical order is significant: it is what the binary layout's index array preserves
/// across the hash table, and what editors present to the user. The codec never owns
/// or mutates this sequence; the writer consumes a read-only snapshot of it.
#[derive(Constructor, Clone, Debug, Default, PartialEq, Eq, Deref, Index, IntoIterator)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StringTable(Vec<Record>);

impl StringTable {
    /// Get the record at a logical row, if it exists.
    pub fn record(&self, row: usize) -> Option<&Record> {
        self.0.get(row)
    }

    /// Replace the key and value at a logical row.
    ///
    /// Returns false if the row does not exist.
    pub fn set(&mut self, row: usize, key: impl Into<String>, value: impl Into<String>) -> bool {
        match self.0.get_mut(row) {
            Some(record) => {
                record.key = key.into();
                record.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Insert a blank record at a logical row, shifting later rows down.
    ///
    /// Rows past the end append instead.
    pub fn insert_at(&mut self, row: usize) {
        let row = row.min(self.0.len());
        self.0.insert(row, Record::default());
    }

    /// Append a record.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push(Record::new(key, value));
    }

    /// Delete the records at the given logical rows.
    ///
    /// Rows may be given in any order; out-of-range entries are ignored.
    pub fn delete(&mut self, rows: &[usize]) {
        let mut rows: Vec<usize> = rows.iter().copied().filter(|&r| r < self.0.len()).collect();
        rows.sort_unstable();
        rows.dedup();
        for row in rows.into_iter().rev() {
            self.0.remove(row);
        }
    }
}

impl FromIterator<(String, String)> for StringTable {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        StringTable(
            iter.into_iter()
                .map(|(key, value)| Record { key, value })
                .collect(),
        )
    }
}
