/*
 * Copyright 2019 Bitwise IO, Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 * -----------------------------------------------------------------------------
 */

//! An in-memory, ordered implementation of the database traits.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::ops::Bound::{self, Excluded, Included, Unbounded};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::database::error::DatabaseError;
use crate::database::{Database, DatabaseCursor, DatabaseReader, DatabaseWriter};

type BTreeDbInternal = BTreeMap<Vec<u8>, Vec<u8>>;

/// An in-memory database backed by a `BTreeMap`.
///
/// Clones share the same underlying map. Only one writer may exist at a time; it holds the write
/// lock until it is committed or dropped.
#[derive(Clone, Default)]
pub struct BTreeDatabase {
    btree: Arc<RwLock<BTreeDbInternal>>,
}

impl BTreeDatabase {
    pub fn new() -> BTreeDatabase {
        BTreeDatabase::default()
    }
}

impl Database for BTreeDatabase {
    fn get_reader<'a>(&'a self) -> Result<Box<dyn DatabaseReader + 'a>, DatabaseError> {
        let db = self
            .btree
            .read()
            .map_err(|_| DatabaseError::ReaderError("BTree lock poisoned".into()))?;

        Ok(Box::new(BTreeReader { db }))
    }

    fn get_writer<'a>(&'a self) -> Result<Box<dyn DatabaseWriter + 'a>, DatabaseError> {
        let db = self
            .btree
            .write()
            .map_err(|_| DatabaseError::WriterError("BTree lock poisoned".into()))?;

        Ok(Box::new(BTreeWriter::new(db)))
    }

    fn clone_box(&self) -> Box<dyn Database> {
        Box::new(self.clone())
    }
}

pub struct BTreeReader<'a> {
    db: RwLockReadGuard<'a, BTreeDbInternal>,
}

impl<'a> DatabaseReader for BTreeReader<'a> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, DatabaseError> {
        Ok(self.db.get(key).cloned())
    }

    /// Returns a cursor over a snapshot of the entries in `[start, end)`, in the natural key
    /// order.
    fn range_cursor(&self, start: &[u8], end: &[u8]) -> Result<DatabaseCursor, DatabaseError> {
        Ok(Box::new(BTreeDatabaseCursor::new(snapshot_range(
            &self.db, start, end,
        ))))
    }

    fn count(&self) -> Result<usize, DatabaseError> {
        Ok(self.db.len())
    }
}

pub struct BTreeWriter<'a> {
    db: RwLockWriteGuard<'a, BTreeDbInternal>,
    transactions: Vec<WriterTransaction>,
}

impl<'a> BTreeWriter<'a> {
    pub fn new(db: RwLockWriteGuard<'a, BTreeDbInternal>) -> BTreeWriter {
        BTreeWriter {
            db,
            transactions: vec![],
        }
    }

    /// Returns the committed entries in `[start, end)` with this writer's pending operations
    /// applied.
    fn pending_view(&self, start: &[u8], end: &[u8]) -> BTreeDbInternal {
        let mut view = snapshot_range(&self.db, start, end);
        for transaction in self.transactions.iter() {
            match transaction {
                WriterTransaction::Overwrite { key, value } => {
                    if in_range(key, start, end) {
                        view.insert(key.to_vec(), value.to_vec());
                    }
                }
            }
        }
        view
    }
}

enum WriterTransaction {
    Overwrite { key: Vec<u8>, value: Vec<u8> },
}

impl<'a> DatabaseWriter for BTreeWriter<'a> {
    fn overwrite(&mut self, key: &[u8], value: &[u8]) -> Result<(), DatabaseError> {
        self.transactions.push(WriterTransaction::Overwrite {
            key: key.to_vec(),
            value: value.to_vec(),
        });
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<(), DatabaseError> {
        let BTreeWriter {
            mut db,
            transactions,
        } = *self;

        for transaction in transactions {
            match transaction {
                WriterTransaction::Overwrite { key, value } => {
                    db.insert(key, value);
                }
            }
        }
        Ok(())
    }
}

impl<'a> DatabaseReader for BTreeWriter<'a> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, DatabaseError> {
        for transaction in self.transactions.iter().rev() {
            match transaction {
                WriterTransaction::Overwrite {
                    key: pending_key,
                    value,
                } => {
                    if pending_key.as_slice() == key {
                        return Ok(Some(value.clone()));
                    }
                }
            }
        }

        Ok(self.db.get(key).cloned())
    }

    fn range_cursor(&self, start: &[u8], end: &[u8]) -> Result<DatabaseCursor, DatabaseError> {
        Ok(Box::new(BTreeDatabaseCursor::new(
            self.pending_view(start, end),
        )))
    }

    fn count(&self) -> Result<usize, DatabaseError> {
        Ok(self.pending_view(&[], &[]).len())
    }
}

/// A cursor over an owned copy of a range of the database.
pub struct BTreeDatabaseCursor {
    entries: btree_map::IntoIter<Vec<u8>, Vec<u8>>,
}

impl BTreeDatabaseCursor {
    pub fn new(db: BTreeDbInternal) -> BTreeDatabaseCursor {
        BTreeDatabaseCursor {
            entries: db.into_iter(),
        }
    }
}

impl Iterator for BTreeDatabaseCursor {
    type Item = (Vec<u8>, Vec<u8>);

    fn next(&mut self) -> Option<(Vec<u8>, Vec<u8>)> {
        self.entries.next()
    }
}

fn lower_bound(start: &[u8]) -> Bound<&[u8]> {
    if start.is_empty() {
        Unbounded
    } else {
        Included(start)
    }
}

fn upper_bound(end: &[u8]) -> Bound<&[u8]> {
    if end.is_empty() {
        Unbounded
    } else {
        Excluded(end)
    }
}

fn in_range(key: &[u8], start: &[u8], end: &[u8]) -> bool {
    (start.is_empty() || key >= start) && (end.is_empty() || key < end)
}

fn snapshot_range(db: &BTreeDbInternal, start: &[u8], end: &[u8]) -> BTreeDbInternal {
    // BTreeMap::range panics on an inverted range
    if !start.is_empty() && !end.is_empty() && start >= end {
        return BTreeMap::new();
    }

    db.range::<[u8], _>((lower_bound(start), upper_bound(end)))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
